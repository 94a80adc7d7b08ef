//! statements-core: field values, filter model, filter decoding and the filter pipeline

pub mod decode;
pub mod field;
pub mod filter;
pub mod pipeline;
pub mod time;
pub mod transaction;

pub use decode::{DecodeError, RawFilter, decode_filters};
pub use field::{FieldKind, FieldTypeRegistry, FieldValue, FieldValueAccessor};
pub use filter::{
    DateCondition, DateFilter, Filter, NumberCondition, NumberFilter, StringCondition,
    StringFilter,
};
pub use pipeline::{filter_records, matches_all};
pub use transaction::{Transaction, TransactionAdapter, adapt_transactions, format_amount};
