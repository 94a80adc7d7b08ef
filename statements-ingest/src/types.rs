use anyhow::{Result, bail};
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use statements_core::{FieldTypeRegistry, TransactionAdapter, adapt_transactions};
use std::fmt;
use std::str::FromStr;

use crate::parsers::swedbank;

/// Banks whose statement exports can be processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Swedbank,
}

impl Bank {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bank::Swedbank => "swedbank",
        }
    }

    /// Input file used when neither the CLI nor the config names one.
    pub fn default_input(&self) -> &'static str {
        match self {
            Bank::Swedbank => "statement.csv",
        }
    }

    /// Field names filters may reference for this bank's rows.
    pub fn field_types(&self) -> &'static FieldTypeRegistry {
        match self {
            Bank::Swedbank => swedbank::field_types(),
        }
    }

    /// Parse raw CSV rows into this bank's adapter records.
    pub fn parse_rows(&self, rows: &[StringRecord]) -> Result<Vec<Box<dyn TransactionAdapter>>> {
        match self {
            Bank::Swedbank => Ok(adapt_transactions(swedbank::parse_swedbank_records(rows)?)),
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Bank {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "swedbank" => Ok(Bank::Swedbank),
            _ => bail!(r#"must be one of "swedbank""#),
        }
    }
}
