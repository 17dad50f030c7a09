use clap::{Parser, Subcommand};
use coverage_navigator::commands::*;
use coverage_navigator::core::{
    config::AppConfig, error::Result, print_error, RouteRefDescriptor,
};
use std::env;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "coverage-navigator")]
#[command(about = "Validate coverage API responses and rewrite ref-aware routes")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a response body against a schema and print the outcome
    Validate {
        /// Built-in schema name (repo-overview, commit) or path to a schema file
        #[arg(short, long)]
        schema: String,
        /// Caller identifier used in diagnostics (defaults to the built-in query's)
        #[arg(short, long)]
        caller: Option<String>,
        /// Response body file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Activation page to link to (overrides the configured page)
        #[arg(long = "cta-page")]
        cta_page: Option<String>,
    },
    /// Compute the route to navigate to after switching branch, tag or commit
    Rewrite {
        /// Current route path (e.g. "critical-role/c3/tree/main/src")
        pathname: String,
        #[arg(long)]
        owner: Option<String>,
        #[arg(long)]
        repo: Option<String>,
        /// Ref currently embedded in the path
        #[arg(long = "ref")]
        current_ref: Option<String>,
        /// Branch route parameter
        #[arg(long)]
        branch: Option<String>,
        /// Newly selected branch, tag or commit
        #[arg(long = "new-ref")]
        new_ref: String,
    },
    /// Print the classified error for an error kind
    Classify {
        /// ParsingError, NotFoundError, OwnerNotActivatedError or Unknown
        kind: String,
        #[arg(short, long, default_value = "coverage-navigator")]
        caller: String,
        /// Structural mismatch description (ParsingError only)
        #[arg(short, long)]
        details: Option<String>,
    },
    /// Show the effective configuration
    Config {
        /// Only print the config file location
        #[arg(long)]
        show_path: bool,
        /// Write the default configuration if none exists
        #[arg(long)]
        init: bool,
    },
}

fn run(command: Commands) -> Result<bool> {
    match command {
        Commands::Validate {
            schema,
            caller,
            input,
            cta_page,
        } => {
            let config = AppConfig::load_or_default()?;
            execute_validate(
                ValidateOptions {
                    schema,
                    caller,
                    input,
                    cta_page,
                },
                &config,
            )
        }
        Commands::Rewrite {
            pathname,
            owner,
            repo,
            current_ref,
            branch,
            new_ref,
        } => {
            execute_rewrite(RouteRefDescriptor {
                pathname,
                owner,
                repo,
                current_ref,
                branch,
                new_ref_name: new_ref,
            })?;
            Ok(true)
        }
        Commands::Classify {
            kind,
            caller,
            details,
        } => {
            let config = AppConfig::load_or_default()?;
            execute_classify(&kind, &caller, details, &config)?;
            Ok(true)
        }
        Commands::Config { show_path, init } => {
            execute_config(show_path, init)?;
            Ok(true)
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else if env::var_os("RUST_LOG").is_none() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    match run(cli.command) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
