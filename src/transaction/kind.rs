//! The direction of a transaction.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Whether a transaction took money out of or put money into the user's balance.
///
/// Amounts are always stored as non-negative magnitudes, the kind alone decides
/// the effect on the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money was spent.
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionKind {
    /// The value used for this kind in storage, e.g. "expense".
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }

    /// The capitalised name used in labels, e.g. "Expense".
    pub fn label(self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    /// Parse a stored transaction type.
    ///
    /// Surrounding whitespace and ASCII case are ignored.
    ///
    /// # Errors
    ///
    /// Returns an [Error::UnknownKind] for anything other than "expense" or "income".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if trimmed.eq_ignore_ascii_case("expense") {
            Ok(Self::Expense)
        } else if trimmed.eq_ignore_ascii_case("income") {
            Ok(Self::Income)
        } else {
            Err(Error::UnknownKind(s.to_owned()))
        }
    }
}

impl Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
