//! Transaction records.
//!
//! This module contains everything related to a single transaction:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - The `TransactionKind` that says which way the money moved
//! - Validation of decoded records before they are aggregated

mod core;
mod kind;

pub use core::{
    Owner, Transaction, TransactionBuilder, TransactionDetails, TransactionId,
    validate_transactions,
};
pub use kind::TransactionKind;
