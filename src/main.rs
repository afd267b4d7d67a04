//! # Pattern Network CLI (`pnet`)
//!
//! The `pnet` binary turns a CSV of pattern-tagged posts into a category
//! network and renders it.
//!
//! ## Usage
//!
//! ```bash
//! pnet --config ./config/pnet.toml <command> <csv>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pnet build <csv>` | Run the pipeline and write the HTML and SVG figures |
//! | `pnet check <csv>` | Validate the input and list row diagnostics |
//! | `pnet stats <csv>` | Print graph statistics |
//! | `pnet export <csv>` | Export the graph as JSON |
//!
//! Reports go to stdout. Log output goes to stderr.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pattern_network::render::RenderTargets;
use pattern_network::{build, check, config, export, logging, stats};

/// Pattern Network CLI: build a co-occurrence network of pattern categories
/// from a CSV of social-media posts.
///
/// Without `--config`, `./config/pnet.toml` is used when it exists and
/// built-in defaults otherwise.
#[derive(Parser)]
#[command(
    name = "pnet",
    about = "Pattern Network — category co-occurrence graphs from post CSV exports",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Build the category network and render it.
    ///
    /// Writes an interactive HTML page and a static SVG figure into the
    /// output directory. An input with no displayable categories writes
    /// nothing and still exits successfully.
    Build {
        /// Input CSV file.
        csv: PathBuf,

        /// Output directory (overrides `output.dir`).
        #[arg(long, short = 'o')]
        output_dir: Option<PathBuf>,

        /// Skip the HTML page.
        #[arg(long)]
        no_html: bool,

        /// Skip the SVG figure.
        #[arg(long)]
        no_svg: bool,
    },

    /// Validate the input without building the graph.
    ///
    /// Prints row counts, taxonomy size and every diagnostic.
    Check {
        /// Input CSV file.
        csv: PathBuf,
    },

    /// Print graph statistics.
    Stats {
        /// Input CSV file.
        csv: PathBuf,
    },

    /// Export the graph as JSON.
    Export {
        /// Input CSV file.
        csv: PathBuf,

        /// Output file path. Writes to stdout if not specified.
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::resolve_config(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        cfg.log.level = level;
    }
    logging::init(&cfg.log.level)?;

    match cli.command {
        Commands::Build {
            csv,
            output_dir,
            no_html,
            no_svg,
        } => {
            if let Some(dir) = output_dir {
                cfg.output.dir = dir;
            }
            let targets = RenderTargets {
                html: !no_html,
                svg: !no_svg,
            };
            build::run_build(&cfg, &csv, targets)?;
        }
        Commands::Check { csv } => {
            check::run_check(&cfg, &csv)?;
        }
        Commands::Stats { csv } => {
            stats::run_stats(&cfg, &csv)?;
        }
        Commands::Export { csv, output } => {
            export::run_export(&cfg, &csv, output.as_deref())?;
        }
    }

    Ok(())
}
