//! filetmpl CLI: render name-marked template files across a project tree.
//!
//! Provides four commands: `init`, `run`, `list`, and `params`.
//!
//! Each command loads the project descriptor, applies command-line overrides, and
//! delegates to [`filetmpl_core`].

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::OptionArgs;

#[derive(Parser)]
#[command(
    name = "filetmpl",
    about = "Render *-tmpl files in a project tree from build metadata",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to filetmpl.config.json (default: ./filetmpl.config.json)
    #[arg(long, global = true, default_value = filetmpl_core::config::CONFIG_FILE)]
    config: PathBuf,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter filetmpl.config.json
    Init {
        /// Project directory (default: current directory)
        dir: Option<PathBuf>,

        /// Artifact id recorded in the descriptor (default: directory name)
        #[arg(long)]
        artifact_id: Option<String>,
    },

    /// Discover and render every template
    Run {
        #[command(flatten)]
        options: OptionArgs,

        /// Render without writing output files
        #[arg(long)]
        dry_run: bool,

        /// Exit with an error if any template failed
        #[arg(long)]
        fail_on_error: bool,
    },

    /// List discovered templates and their output paths
    List {
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the parameter model available to templates
    Params {
        #[command(flatten)]
        options: OptionArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Init { dir, artifact_id } => {
            commands::init::run(dir.as_deref(), artifact_id.as_deref())?;
        }
        Commands::Run {
            options,
            dry_run,
            fail_on_error,
        } => {
            commands::run::run(&cli.config, &options, dry_run, fail_on_error)?;
        }
        Commands::List { options } => {
            commands::list::run(&cli.config, &options)?;
        }
        Commands::Params { options } => {
            commands::params::run(&cli.config, &options)?;
        }
    }

    Ok(())
}
