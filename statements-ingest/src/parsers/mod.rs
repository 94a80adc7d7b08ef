//! Bank-specific statement parsers

pub mod swedbank;
