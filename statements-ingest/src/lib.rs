//! statements-ingest: statement CSV reading and bank-specific adapters.

pub mod parsers;
pub mod reader;
pub mod types;

pub use parsers::swedbank::{SwedbankTransaction, parse_swedbank_records};
pub use reader::read_statement;
pub use types::Bank;
