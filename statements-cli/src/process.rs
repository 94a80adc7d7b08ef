//! `statements process`: read a statement, filter it and write normalized rows.

use anyhow::{Context, Result};
use statements_core::{Transaction, TransactionAdapter, filter_records};
use statements_ingest::{Bank, read_statement};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{FlagConfig, load_config};
use crate::output::{DEFAULT_OUTPUT, write_output};

#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSummary {
    pub bank: Bank,
    pub input: PathBuf,
    pub output: PathBuf,
    pub read: usize,
    pub written: usize,
}

/// Input precedence: CLI flag, then config, then the bank's default file.
pub fn resolve_input(flag: Option<&Path>, flags: &FlagConfig, bank: Bank) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| flags.input.clone())
        .unwrap_or_else(|| PathBuf::from(bank.default_input()))
}

/// Output precedence: CLI flag, then config, then `output.csv`.
pub fn resolve_output(flag: Option<&Path>, flags: &FlagConfig) -> PathBuf {
    flag.map(Path::to_path_buf)
        .or_else(|| flags.output.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessSummary> {
    let config = load_config(&args.config)?;
    let bank = config.bank()?;
    let filters = config.filters_for(bank)?;

    let input = resolve_input(args.input.as_deref(), &config.flags, bank);
    let rows = read_statement(&input)?;
    let records = bank
        .parse_rows(&rows)
        .with_context(|| format!("parsing {} statement {}", bank, input.display()))?;

    let kept = filter_records(&records, &filters);
    let txns: Vec<Transaction> = kept.iter().map(|r| r.normalize()).collect();

    let output = resolve_output(args.output.as_deref(), &config.flags);
    write_output(&output, &txns)?;

    info!(
        %bank,
        input = %input.display(),
        output = %output.display(),
        read = records.len(),
        written = txns.len(),
        "processed statement"
    );

    Ok(ProcessSummary {
        bank,
        input,
        output,
        read: records.len(),
        written: txns.len(),
    })
}
