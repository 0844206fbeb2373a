//! Terminal user interface for taxobrowse.
//!
//! A two-pane browser for taxonomy trees, built with ratatui: a lazily
//! expanding file navigator on the left and, on the right, a schema-driven
//! entry form plus a syntax-highlighted preview of the selected file.
//!
//! # Usage
//!
//! ```rust,no_run
//! use taxobrowse_core::{BrowserConfig, EntryKind};
//! use taxobrowse_tui::ThemeVariant;
//!
//! let config = BrowserConfig::new(EntryKind::Knowledge);
//! taxobrowse_tui::run(config, ThemeVariant::Dark).unwrap();
//! ```
//!
//! # Keyboard Navigation
//!
//! - `j`/`k` - Move down/up
//! - `l`/`Enter` - Expand directory or preview file
//! - `h` - Collapse
//! - `Tab` - Focus the content pane
//! - `1`-`9`, `[`/`]` - Switch tabs
//! - `f` - Toggle the file tree
//! - `v` - View content
//! - `q` - Quit

pub mod app;
mod event;
pub mod form;
pub mod navigator;
pub mod preview;
mod settings;
mod theme;
mod ui;

pub use app::{App, AppResult};
pub use form::EntryForm;
pub use settings::{Settings, resolve_root};
pub use theme::{Theme, ThemeVariant};

use taxobrowse_core::BrowserConfig;

/// Run the TUI application.
pub fn run(config: BrowserConfig, theme: ThemeVariant) -> AppResult<()> {
    let rt = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(config, Theme::from_variant(theme)).run(terminal));
    ratatui::restore();

    result
}
