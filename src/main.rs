use branch_wrangler::commands::*;
use branch_wrangler::core::{
    build_info::BuildInfo,
    command_init::ReconcileOptions,
    error::{Result, WranglerError},
    print_error,
};
use clap::{Args, Parser, Subcommand};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "branch-wrangler")]
#[command(about = "Classify local git branches and tell you what to do with them")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Path to config.json (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PassArgs {
    /// Base branches to check for merges, in order (e.g., "main,develop")
    #[arg(long, value_delimiter = ',')]
    base_branches: Vec<String>,

    /// Skip pull request lookups and classify from git alone
    #[arg(long)]
    offline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and list local branches
    List {
        /// Print branches as JSON
        #[arg(long)]
        json: bool,
        /// Predefined filter (Stale, PR, Merged, Ahead)
        #[arg(long, conflicts_with_all = ["states", "search"])]
        filter: Option<String>,
        /// Only show branches in this state (repeatable, e.g. "OPEN_PR")
        #[arg(long = "state")]
        states: Vec<String>,
        /// Only show branches whose name contains this text
        #[arg(long)]
        search: Option<String>,
        /// Report branches that fail to classify instead of aborting
        #[arg(long)]
        keep_going: bool,
        #[command(flatten)]
        pass: PassArgs,
    },
    /// Delete local branches whose pull request was merged and remote deleted
    Prune {
        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        pass: PassArgs,
    },
    /// Show build information
    Version {
        /// Print build information as JSON
        #[arg(long)]
        json: bool,
    },
}

impl PassArgs {
    fn into_options(self, config_path: Option<PathBuf>) -> ReconcileOptions {
        ReconcileOptions {
            config_path,
            base_branches: (!self.base_branches.is_empty()).then_some(self.base_branches),
            offline: self.offline,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let build_info = BuildInfo::from_env();

    let outcome = match cli.command {
        Commands::List {
            json,
            filter,
            states,
            search,
            keep_going,
            pass,
        } => execute_list(ListOptions {
            json,
            filter,
            states,
            search,
            keep_going,
            reconcile: pass.into_options(cli.config),
        }),
        Commands::Prune { dry_run, pass } => {
            execute_prune(dry_run, pass.into_options(cli.config))
        }
        Commands::Version { json } => execute_version(&build_info, json),
    };

    if let Err(e) = outcome {
        if let WranglerError::NotInGitRepo = e {
            print_error("Not in a git repository");
        } else {
            print_error(&e.to_string());
        }
        std::process::exit(1);
    }

    Ok(())
}
