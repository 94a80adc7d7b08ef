use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod output;
mod process;

use config::{DEFAULT_CONFIG, config_path, known_fields, validate_config};
use process::{ProcessArgs, run_process};

const ENV_LOG: &str = "STATEMENTS_LOG";

#[derive(Parser, Debug)]
#[command(
    name = "statements",
    version,
    about = "Bank statement parser",
    long_about = "Utility tool for automatically parsing and analyzing bank statements"
)]
struct Cli {
    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Process a bank statement
    Process {
        /// Input file to process
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file to write to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file to use
        #[arg(long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,
    },

    /// Configure the CLI
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Print the tool's version
    Version,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate a configuration file, defaulting to config.json
    Validate {
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Process { input, output, config } => {
            let summary = run_process(&ProcessArgs { input, output, config })?;
            println!(
                "Wrote {} of {} {} transactions from {} to {}",
                summary.written,
                summary.read,
                summary.bank,
                summary.input.display(),
                summary.output.display()
            );
        }

        Command::Config { command } => match command {
            ConfigCommand::Validate { file } => {
                let path = config_path(file.as_deref());
                let valid = validate_config(&path)?;
                println!(
                    "Configuration valid! (bank: {}, filters: {})",
                    valid.bank,
                    valid.filters.len()
                );
                for f in &valid.filters {
                    println!("  - {f}");
                }
                println!("Known fields: {}", known_fields(valid.bank.field_types()));
            }
        },

        Command::Version => {
            println!("statements v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };

    let filter = std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter.to_string());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .init();
}
