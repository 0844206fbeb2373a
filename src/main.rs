//! taxobrowse - browse knowledge and skills taxonomy trees in the terminal.
//!
//! Usage:
//!   taxobrowse knowledge [PATH]          Browse a knowledge taxonomy
//!   taxobrowse skills [PATH]             Browse a skills taxonomy
//!   taxobrowse template <KIND>           Print an empty qna.yaml entry
//!   taxobrowse --help                    Show help

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result, eyre};
use tracing_subscriber::EnvFilter;

use taxobrowse_core::{BrowserConfig, EntryKind};
use taxobrowse_tui::{EntryForm, Settings, resolve_root};

#[derive(Parser)]
#[command(
    name = "taxobrowse",
    version,
    about = "Browse knowledge and skills taxonomy trees",
    long_about = "taxobrowse shows a taxonomy directory next to an entry form.\n\n\
                  Pick a file in the tree to preview it with syntax highlighting, \
                  or fill in the form to sketch a new entry."
)]
struct Cli {
    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Start with the file tree de-emphasized
    #[arg(long, global = true)]
    hide_tree: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse a knowledge taxonomy
    Knowledge {
        /// Taxonomy root (defaults to settings, then taxonomy/knowledge)
        path: Option<PathBuf>,
    },

    /// Browse a compositional skills taxonomy
    Skills {
        /// Taxonomy root (defaults to settings, then taxonomy/compositional_skills)
        path: Option<PathBuf>,
    },

    /// Print an empty entry of the given kind as qna.yaml
    Template {
        kind: KindArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Knowledge,
    Skills,
}

impl From<KindArg> for EntryKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Knowledge => EntryKind::Knowledge,
            KindArg::Skills => EntryKind::Skill,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_tracing(path)?;
    }

    match cli.command {
        Command::Knowledge { path } => run_browser(EntryKind::Knowledge, path, cli.hide_tree),
        Command::Skills { path } => run_browser(EntryKind::Skill, path, cli.hide_tree),
        Command::Template { kind } => print_template(kind.into()),
    }
}

/// Log to `path` without ANSI colors, filtered by `RUST_LOG` (default: info).
fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))
}

fn run_browser(kind: EntryKind, path: Option<PathBuf>, hide_tree: bool) -> Result<()> {
    let settings = Settings::load();
    let root = resolve_root(kind, path, &settings);
    tracing::debug!(%kind, root = %root.display(), "resolved taxonomy root");

    let config = BrowserConfig::builder()
        .kind(kind)
        .root(root)
        .show_tree(settings.show_tree && !hide_tree)
        .build()
        .context("Invalid configuration")?;

    taxobrowse_tui::run(config, settings.theme)
}

fn print_template(kind: EntryKind) -> Result<()> {
    let entry = EntryForm::new(kind.schema()).export();
    let yaml = entry.to_yaml().context("Failed to serialize entry")?;
    print!("{yaml}");
    Ok(())
}
