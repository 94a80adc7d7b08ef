use anyhow::{Context, Result};
use statements_core::Transaction;
use std::path::Path;

pub const DEFAULT_OUTPUT: &str = "output.csv";

/// Write normalized transactions as `;`-delimited rows, no header.
pub fn write_output(path: &Path, txns: &[Transaction]) -> Result<()> {
    let mut w = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("output file could not be opened: {}", path.display()))?;

    for t in txns {
        w.write_record(t.csv_row())
            .with_context(|| format!("csv file could not be written: {}", path.display()))?;
    }
    w.flush()
        .with_context(|| format!("csv file could not be written: {}", path.display()))?;

    Ok(())
}
