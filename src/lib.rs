//! Monin is a personal expense tracker.
//!
//! This library holds the aggregation core of the application: decoding raw
//! rows from a persistence backend into [Transaction]s, grouping them by
//! calendar month and by owner, and deriving chart-ready category breakdowns.
//!
//! Every aggregation is a pure function of the record list it is given, so
//! callers simply recompute after each create, update or delete.

#![warn(missing_docs)]

mod category;
mod currency;
mod normalize;
mod period;
mod summary;
mod timezone;
mod transaction;

pub use category::{DEFAULT_CATEGORIES, known_categories};
pub use currency::format_currency;
pub use normalize::{
    Backend, Decoder, DocumentTimestamp, ExpenseDocument, RawRecord, SheetRow, normalize,
    parse_documents, parse_sheet_csv,
};
pub use period::{
    PERIOD_WINDOW_RADIUS, Period, display_label, period_window, sort_newest_first, within_dates,
};
pub use summary::{
    CategorySlice, GOLDEN_ANGLE_DEGREES, Hue, OwnerSummary, PeriodGroup, PeriodGroups,
    PeriodSummary, Totals, category_chart, category_slices, group_by_owner, group_by_period,
};
pub use timezone::{get_local_offset, local_today};
pub use transaction::{
    Owner, Transaction, TransactionBuilder, TransactionDetails, TransactionId, TransactionKind,
    validate_transactions,
};

/// The errors that may occur while decoding and checking transaction records.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A raw row did not contain one of the required fields.
    #[error("the required field \"{0}\" is missing")]
    MissingField(&'static str),

    /// A date or timestamp field could not be parsed.
    ///
    /// Callers should pass in the original error as a string and the text
    /// that caused the error.
    #[error("could not parse \"{1}\" as a date: {0}")]
    InvalidDate(String, String),

    /// The transaction type was neither "expense" nor "income".
    #[error("\"{0}\" is not a valid transaction type, expected \"expense\" or \"income\"")]
    UnknownKind(String),

    /// A raw row could not be decoded.
    ///
    /// Holds the zero-based index of the row and the underlying error message.
    #[error("could not decode row {0}: {1}")]
    InvalidRow(usize, String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The JSON had issues that prevented it from being parsed.
    #[error("Could not parse the JSON document: {0}")]
    InvalidJSON(String),

    /// The amount of a transaction is not a finite number.
    ///
    /// This happens when the stored amount could not be parsed, in which case
    /// the normalizer records the amount as NaN.
    #[error("the transaction {0} has an amount that is not a number")]
    InvalidAmount(TransactionId),

    /// The amount of a transaction is negative.
    ///
    /// Amounts are magnitudes, the direction of the money is given by the
    /// [TransactionKind].
    #[error("the transaction {0} has a negative amount")]
    NegativeAmount(TransactionId),

    /// A string could not be parsed as a period key like "January_2024".
    #[error("\"{0}\" is not a valid period, expected a key like \"January_2024\"")]
    InvalidPeriod(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The currency symbol could not be used to build a number formatter.
    #[error("invalid currency symbol \"{0}\"")]
    InvalidCurrencySymbol(String),
}
