//! navkit command-line tool
//!
//! Renders navigation definition files, optionally into a page template.
//!
//! Usage:
//!   navkit render site.toml --select main=Members
//!   navkit render site.toml --select '/Help/' --template-dir templates --page page.html
//!   navkit check site.toml

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use navkit::Config;
use navkit::cli::{self, RenderRequest, SelectArg};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render navigation blocks from a definitions file.
    Render {
        /// TOML file with `[[navigation]]` blocks.
        definitions: PathBuf,

        /// Link to select, as `block=label` or `block=/pattern/` (block defaults to main).
        #[arg(long = "select", value_parser = cli::parse_select_arg)]
        selections: Vec<SelectArg>,

        /// Render only this block.
        #[arg(long)]
        block: Option<String>,

        /// Directory of page templates (overrides NAV_TEMPLATE_DIR).
        #[arg(long)]
        template_dir: Option<PathBuf>,

        /// Page template to render the navigation into.
        #[arg(long)]
        page: Option<String>,
    },

    /// Validate a definitions file and list its blocks.
    Check {
        /// TOML file with `[[navigation]]` blocks.
        definitions: PathBuf,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = Config::from_env().context("failed to load configuration")?;
    info!(strict_ordering = config.strict_ordering, "configuration loaded");

    let output = match args.command {
        Command::Render {
            definitions,
            selections,
            block,
            template_dir,
            page,
        } => cli::cmd_render(
            &config,
            &RenderRequest {
                definitions,
                selections,
                block,
                page,
                template_dir,
            },
        )?,
        Command::Check { definitions } => cli::cmd_check(&definitions)?,
    };

    print!("{output}");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
