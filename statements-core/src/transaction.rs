//! Bank-agnostic transaction record and the adapter trait bank rows implement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::field::FieldValueAccessor;
use crate::time::format_little_endian;

/// Normalized output of bank adapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub account_holder: String,
    pub description: String,
    /// Minor currency units. Negative means money leaving the account.
    pub value: i64,
    pub currency: String,
}

impl Transaction {
    /// Row for the normalized output CSV: date, holder, description, amount, currency.
    pub fn csv_row(&self) -> [String; 5] {
        [
            format_little_endian(self.date),
            self.account_holder.clone(),
            self.description.clone(),
            format_amount(self.value),
            self.currency.clone(),
        ]
    }
}

/// Render minor units as `<major>,<minor>` with a two-digit minor part.
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let abs = minor.unsigned_abs();
    format!("{sign}{},{:02}", abs / 100, abs % 100)
}

/// A bank-specific statement row.
pub trait TransactionAdapter: FieldValueAccessor {
    fn normalize(&self) -> Transaction;
}

impl<T: TransactionAdapter + ?Sized> TransactionAdapter for &T {
    fn normalize(&self) -> Transaction {
        (**self).normalize()
    }
}

impl<T: TransactionAdapter + ?Sized> TransactionAdapter for Box<T> {
    fn normalize(&self) -> Transaction {
        (**self).normalize()
    }
}

/// Convert concrete bank rows into trait objects.
pub fn adapt_transactions<T>(rows: Vec<T>) -> Vec<Box<dyn TransactionAdapter>>
where
    T: TransactionAdapter + 'static,
{
    rows.into_iter()
        .map(|row| Box::new(row) as Box<dyn TransactionAdapter>)
        .collect()
}
