//! Defines the core data model for transactions.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, transaction::TransactionKind};

// ============================================================================
// MODELS
// ============================================================================

/// The opaque identifier of a stored transaction.
///
/// The ID is assigned by the persistence backend and does not change when the
/// transaction is updated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user who created a transaction.
///
/// These fields are copied onto every record when it is written, so two
/// records from the same user may disagree if the user changed their profile
/// in between. Nothing in this crate reconciles them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// The ID of the user in the identity provider.
    pub id: String,
    /// The display name of the user.
    pub name: String,
    /// The email address of the user.
    pub email: String,
    /// A URL to the user's avatar, if they have one.
    pub image: Option<String>,
}

impl Owner {
    /// Create an owner without an avatar.
    pub fn new(id: &str, name: &str, email: &str) -> Self {
        Self {
            id: id.to_owned(),
            name: name.to_owned(),
            email: email.to_owned(),
            image: None,
        }
    }

    /// Set the avatar URL.
    pub fn image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable: the only way to change one is to replace all of
/// its editable fields at once with [Transaction::update].
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    #[serde(with = "time::serde::rfc3339")]
    occurred_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    recorded_at: OffsetDateTime,
    description: String,
    amount: f64,
    category: String,
    kind: TransactionKind,
    owner: Owner,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        amount: f64,
        occurred_at: OffsetDateTime,
        description: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            amount,
            occurred_at,
            description: description.to_owned(),
            recorded_at: None,
            category: String::new(),
            kind: TransactionKind::Expense,
            owner: Owner::default(),
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    /// When the money moved.
    pub fn occurred_at(&self) -> OffsetDateTime {
        self.occurred_at
    }

    /// When the transaction was entered into the system.
    pub fn recorded_at(&self) -> OffsetDateTime {
        self.recorded_at
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount of money spent or earned, always a magnitude.
    ///
    /// This is NaN if the stored amount could not be parsed, see [Transaction::validate].
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The free-text category, e.g. "Food".
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether the transaction is an expense or an income.
    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// The user who created the transaction.
    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    /// The editable fields of the transaction.
    pub fn details(&self) -> TransactionDetails {
        TransactionDetails {
            occurred_at: self.occurred_at,
            description: self.description.clone(),
            amount: self.amount,
            category: self.category.clone(),
            kind: self.kind,
        }
    }

    /// Replace every editable field of the transaction.
    ///
    /// The ID, the recorded time and the owner are kept.
    pub fn update(self, details: TransactionDetails) -> Self {
        Self {
            occurred_at: details.occurred_at,
            description: details.description,
            amount: details.amount,
            category: details.category,
            kind: details.kind,
            ..self
        }
    }

    /// Check that the amount is a finite, non-negative number.
    ///
    /// Aggregations assume valid amounts, so records coming out of the
    /// normalizer should be validated before they are grouped.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is NaN or infinite,
    /// - or [Error::NegativeAmount] if the amount is below zero.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.amount.is_finite() {
            Err(Error::InvalidAmount(self.id.clone()))
        } else if self.amount < 0.0 {
            Err(Error::NegativeAmount(self.id.clone()))
        } else {
            Ok(())
        }
    }
}

/// Check every transaction with [Transaction::validate], stopping at the first invalid one.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<(), Error> {
    transactions.iter().try_for_each(Transaction::validate)
}

/// The fields of a transaction that a user may edit.
///
/// An update always replaces all of these together.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDetails {
    /// When the money moved.
    pub occurred_at: OffsetDateTime,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The free-text category.
    pub category: String,
    /// Whether the transaction is an expense or an income.
    pub kind: TransactionKind,
}

/// A builder for creating [Transaction] instances.
///
/// Optional fields default to an expense with an empty category, an empty
/// owner, and a recorded time equal to the occurred time. Call
/// [TransactionBuilder::finalise] with the backend ID to get the [Transaction].
///
/// # Examples
///
/// ```
/// use monin_rs::{Owner, Transaction, TransactionId, TransactionKind};
/// use time::macros::datetime;
///
/// let transaction = Transaction::build(50.0, datetime!(2024-01-20 09:00 UTC), "Salary")
///     .kind(TransactionKind::Income)
///     .category("Salary")
///     .owner(Owner::new("u1", "Ana", "ana@example.com"))
///     .finalise(TransactionId::new("abc123"));
///
/// assert_eq!(transaction.kind(), TransactionKind::Income);
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The magnitude of the transaction.
    pub amount: f64,

    /// When the money moved.
    ///
    /// This represents the actual transaction date, not when it was recorded
    /// in the system.
    pub occurred_at: OffsetDateTime,

    /// A human-readable description of the transaction.
    pub description: String,

    /// When the transaction was entered into the system.
    ///
    /// `None` means the same instant as `occurred_at`.
    pub recorded_at: Option<OffsetDateTime>,

    /// The free-text category of the transaction, e.g. "Food", "Salary".
    pub category: String,

    /// Whether the transaction is an expense or an income.
    pub kind: TransactionKind,

    /// The user who created the transaction.
    pub owner: Owner,
}

impl TransactionBuilder {
    /// Set when the transaction was entered into the system.
    pub fn recorded_at(mut self, recorded_at: OffsetDateTime) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Set the category of the transaction.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set the kind of the transaction.
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the user who created the transaction.
    pub fn owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    /// Create the [Transaction] with the ID assigned by the backend.
    pub fn finalise(self, id: TransactionId) -> Transaction {
        Transaction {
            id,
            occurred_at: self.occurred_at,
            recorded_at: self.recorded_at.unwrap_or(self.occurred_at),
            description: self.description,
            amount: self.amount,
            category: self.category,
            kind: self.kind,
            owner: self.owner,
        }
    }
}
