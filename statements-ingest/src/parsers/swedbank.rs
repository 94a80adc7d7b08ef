//! Swedbank (Latvia) statement export parser
//!
//! Expected `;`-delimited rows, first row is the export header:
//!   Klienta konts;Ieraksta tips;Datums;Saņēmējs/Maksātājs;Informācija saņēmējam;Summa;Valūta;
//!   Debets/Kredīts;Arhīva kods;Maksājuma veids;Refernces numurs;Dokumenta numurs;
//!   LV02HABA0123456789012;20;31.10.2025;TEST USER;SOME DESCRIPTION;0,83;EUR;K;2025103101234567;INB;;;
//!
//! Filters address fields by these header names.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::StringRecord;
use regex::Regex;
use statements_core::time::parse_little_endian;
use statements_core::{
    FieldKind, FieldTypeRegistry, FieldValue, FieldValueAccessor, Transaction, TransactionAdapter,
};
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::debug;

pub const ACCOUNT_NUMBER: &str = "Klienta konts";
pub const ENTRY_TYPE: &str = "Ieraksta tips";
pub const DATE: &str = "Datums";
pub const ACCOUNT_HOLDER: &str = "Saņēmējs/Maksātājs";
pub const DESCRIPTION: &str = "Informācija saņēmējam";
pub const VALUE: &str = "Summa";
pub const CURRENCY: &str = "Valūta";
pub const FLOW: &str = "Debets/Kredīts";
pub const ARCHIVE_CODE: &str = "Arhīva kods";
pub const TRANSACTION_TYPE: &str = "Maksājuma veids";
pub const REFERENCE_NUMBER: &str = "Refernces numurs";
pub const DOCUMENT_NUMBER: &str = "Dokumenta numurs";

const COLUMNS: usize = 12;

static FIELD_TYPES: LazyLock<FieldTypeRegistry> = LazyLock::new(|| {
    [
        (ACCOUNT_NUMBER, FieldKind::String),
        (ENTRY_TYPE, FieldKind::String),
        (DATE, FieldKind::Date),
        (ACCOUNT_HOLDER, FieldKind::String),
        (DESCRIPTION, FieldKind::String),
        (VALUE, FieldKind::Number),
        (CURRENCY, FieldKind::String),
        (FLOW, FieldKind::String),
        (ARCHIVE_CODE, FieldKind::String),
        (TRANSACTION_TYPE, FieldKind::String),
        (REFERENCE_NUMBER, FieldKind::String),
        (DOCUMENT_NUMBER, FieldKind::String),
    ]
    .into_iter()
    .collect()
});

/// Field kinds for Swedbank header names.
pub fn field_types() -> &'static FieldTypeRegistry {
    &FIELD_TYPES
}

/// Row kind (`Ieraksta tips`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwedbankEntryType {
    StartBalance,
    Transaction,
    Turnover,
    EndBalance,
    AccruedInterest,
}

impl SwedbankEntryType {
    pub fn code(&self) -> &'static str {
        match self {
            SwedbankEntryType::StartBalance => "10",
            SwedbankEntryType::Transaction => "20",
            SwedbankEntryType::Turnover => "82",
            SwedbankEntryType::EndBalance => "86",
            SwedbankEntryType::AccruedInterest => "900",
        }
    }
}

impl FromStr for SwedbankEntryType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "10" => SwedbankEntryType::StartBalance,
            "20" => SwedbankEntryType::Transaction,
            "82" => SwedbankEntryType::Turnover,
            "86" => SwedbankEntryType::EndBalance,
            "900" => SwedbankEntryType::AccruedInterest,
            _ => bail!("invalid Swedbank entry type provided: {s}"),
        })
    }
}

/// Payment kind (`Maksājuma veids`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwedbankTransactionType {
    StartBalance,
    ToBank,
    ToPrivate,
    CapitalGains,
    CurrentInterest,
    Commission,
    Turnover,
    EndBalance,
}

impl SwedbankTransactionType {
    pub fn code(&self) -> &'static str {
        match self {
            SwedbankTransactionType::StartBalance => "AS",
            SwedbankTransactionType::ToBank => "INB",
            SwedbankTransactionType::ToPrivate => "PRV",
            SwedbankTransactionType::CapitalGains => "AIA",
            SwedbankTransactionType::CurrentInterest => "AI",
            SwedbankTransactionType::Commission => "KOM",
            SwedbankTransactionType::Turnover => "K2",
            SwedbankTransactionType::EndBalance => "LS",
        }
    }
}

impl FromStr for SwedbankTransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "AS" => SwedbankTransactionType::StartBalance,
            "INB" => SwedbankTransactionType::ToBank,
            "PRV" => SwedbankTransactionType::ToPrivate,
            "AIA" => SwedbankTransactionType::CapitalGains,
            "AI" => SwedbankTransactionType::CurrentInterest,
            "KOM" => SwedbankTransactionType::Commission,
            "K2" => SwedbankTransactionType::Turnover,
            "LS" => SwedbankTransactionType::EndBalance,
            _ => bail!("invalid Swedbank transaction type provided: {s}"),
        })
    }
}

/// Cash flow direction (`Debets/Kredīts`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwedbankFlow {
    Debit,
    Credit,
}

impl SwedbankFlow {
    pub fn code(&self) -> &'static str {
        match self {
            SwedbankFlow::Debit => "D",
            SwedbankFlow::Credit => "K",
        }
    }
}

impl FromStr for SwedbankFlow {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "D" => SwedbankFlow::Debit,
            "K" => SwedbankFlow::Credit,
            _ => bail!("invalid Swedbank flow provided: {s}"),
        })
    }
}

/// One row of a Swedbank export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwedbankTransaction {
    pub account_number: String,
    pub entry_type: SwedbankEntryType,
    pub date: NaiveDate,
    pub account_holder: String,
    pub description: String,
    /// Unsigned minor units; direction lives in `flow`.
    pub value: u64,
    pub currency: String,
    pub flow: SwedbankFlow,
    pub archive_code: String,
    pub transaction_type: SwedbankTransactionType,
    pub reference_number: String,
    pub document_number: String,
}

/// Row parser holding the compiled amount pattern.
pub struct SwedbankParser {
    amount_re: Regex,
}

impl SwedbankParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            amount_re: Regex::new(r"^(?P<major>\d+)(?:,(?P<minor>\d{1,2}))?$")?,
        })
    }

    /// Parse "1234,56" into minor units. A single minor digit means tenths ("0,5" is 50).
    fn parse_amount(&self, s: &str) -> Result<u64> {
        let caps = self
            .amount_re
            .captures(s.trim())
            .with_context(|| format!("invalid Swedbank amount provided: {s}"))?;

        let major: u64 = caps["major"].parse()?;
        let minor: u64 = match caps.name("minor").map(|m| m.as_str()) {
            None => 0,
            Some(m) if m.len() == 1 => m.parse::<u64>()? * 10,
            Some(m) => m.parse()?,
        };

        major
            .checked_mul(100)
            .and_then(|v| v.checked_add(minor))
            .with_context(|| format!("Swedbank amount out of range: {s}"))
    }

    pub fn parse_row(&self, row: &StringRecord) -> Result<SwedbankTransaction> {
        if row.len() < COLUMNS {
            bail!("expected at least {COLUMNS} columns, got {}", row.len());
        }
        let col = |i: usize| row.get(i).unwrap_or("");

        Ok(SwedbankTransaction {
            account_number: col(0).to_string(),
            entry_type: col(1).parse()?,
            date: parse_little_endian(col(2))?,
            account_holder: col(3).to_string(),
            description: col(4).to_string(),
            value: self.parse_amount(col(5))?,
            currency: col(6).to_string(),
            flow: col(7).parse()?,
            archive_code: col(8).to_string(),
            transaction_type: col(9).parse()?,
            reference_number: col(10).to_string(),
            document_number: col(11).to_string(),
        })
    }

    /// Parse export rows, skipping the header row if present.
    pub fn parse_records(&self, rows: &[StringRecord]) -> Result<Vec<SwedbankTransaction>> {
        let mut out = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if i == 0 && is_header(row) {
                continue;
            }
            let txn = self.parse_row(row).with_context(|| format!("row {}", i + 1))?;
            out.push(txn);
        }

        debug!(rows = rows.len(), parsed = out.len(), "parsed Swedbank rows");
        Ok(out)
    }
}

fn is_header(row: &StringRecord) -> bool {
    row.get(0)
        .map(|s| s.trim_start_matches('\u{feff}').trim() == ACCOUNT_NUMBER)
        .unwrap_or(false)
}

impl SwedbankTransaction {
    pub fn from_record(row: &StringRecord) -> Result<Self> {
        SwedbankParser::new()?.parse_row(row)
    }
}

/// Parse a whole export with a fresh [`SwedbankParser`].
pub fn parse_swedbank_records(rows: &[StringRecord]) -> Result<Vec<SwedbankTransaction>> {
    SwedbankParser::new()?.parse_records(rows)
}

impl FieldValueAccessor for SwedbankTransaction {
    fn field_value(&self, field: &str) -> FieldValue<'_> {
        match field {
            ACCOUNT_NUMBER => FieldValue::Text(&self.account_number),
            ENTRY_TYPE => FieldValue::Text(self.entry_type.code()),
            DATE => FieldValue::Date(self.date),
            ACCOUNT_HOLDER => FieldValue::Text(&self.account_holder),
            DESCRIPTION => FieldValue::Text(&self.description),
            VALUE => i64::try_from(self.value)
                .map(FieldValue::Integer)
                .unwrap_or(FieldValue::Absent),
            CURRENCY => FieldValue::Text(&self.currency),
            FLOW => FieldValue::Text(self.flow.code()),
            ARCHIVE_CODE => FieldValue::Text(&self.archive_code),
            TRANSACTION_TYPE => FieldValue::Text(self.transaction_type.code()),
            REFERENCE_NUMBER => FieldValue::Text(&self.reference_number),
            DOCUMENT_NUMBER => FieldValue::Text(&self.document_number),
            _ => FieldValue::Absent,
        }
    }
}

impl TransactionAdapter for SwedbankTransaction {
    fn normalize(&self) -> Transaction {
        let value = i64::try_from(self.value).unwrap_or(i64::MAX);
        Transaction {
            date: self.date,
            account_holder: self.account_holder.clone(),
            description: self.description.clone(),
            value: match self.flow {
                SwedbankFlow::Debit => -value,
                SwedbankFlow::Credit => value,
            },
            currency: self.currency.clone(),
        }
    }
}
