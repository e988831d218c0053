//! Decoding of raw rows from the persistence backends into [Transaction]s.
//!
//! Two backends are supported: a spreadsheet whose rows are positional lists
//! of strings, and a document store whose documents have named fields. Each
//! has its own decoder, and both produce the same [Transaction] type, so
//! nothing downstream knows which backend the records came from.

mod document;
mod sheet;

pub use document::{DocumentTimestamp, ExpenseDocument, parse_documents};
pub use sheet::{SheetRow, parse_sheet_csv};

use time::{
    Date, OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::{
    Error, Owner, Transaction,
    timezone::{get_local_offset, offset_at},
};

/// A row as read from one of the persistence backends.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    /// A row of the "Expenses" sheet.
    Sheet(SheetRow),
    /// A document from the "expenses" collection.
    Document(ExpenseDocument),
}

/// The persistence backend that a dump of records was exported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Backend {
    /// A CSV export of the "Expenses" sheet.
    Sheet,
    /// A JSON array of documents from the "expenses" collection.
    Documents,
}

impl Backend {
    /// Parses the exported `text` into raw records.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCSV] or [Error::InvalidJSON] if `text` is
    /// not in the format of the backend.
    pub fn parse(self, text: &str) -> Result<Vec<RawRecord>, Error> {
        match self {
            Backend::Sheet => parse_sheet_csv(text),
            Backend::Documents => parse_documents(text),
        }
    }
}

/// Turns [RawRecord]s into [Transaction]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoder {
    owner: Owner,
    offset: UtcOffset,
    timezone: Option<String>,
}

impl Decoder {
    /// Create a decoder with a fixed UTC offset.
    ///
    /// Sheet rows do not record who created them, so `owner` is the signed in
    /// user whose sheet is being read. `offset` is used for dates without a
    /// time and for store timestamps. A fixed offset ignores daylight saving
    /// time, use [Decoder::with_timezone] for zones that observe it.
    pub fn new(owner: Owner, offset: UtcOffset) -> Self {
        Self {
            owner,
            offset,
            timezone: None,
        }
    }

    /// Create a decoder for a canonical timezone such as "Europe/London".
    ///
    /// Store timestamps are shown in the offset the zone had at their own
    /// instant, so a timestamp near a month boundary lands in the right month
    /// across daylight saving changes. Dates without a time use the zone's
    /// current offset.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidTimezoneError] if the name is not a known timezone.
    pub fn with_timezone(owner: Owner, canonical_timezone: &str) -> Result<Self, Error> {
        let offset = get_local_offset(canonical_timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(canonical_timezone.to_owned()))?;

        Ok(Self {
            owner,
            offset,
            timezone: Some(canonical_timezone.to_owned()),
        })
    }

    /// The offset to show `instant` in.
    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        self.timezone
            .as_deref()
            .and_then(|timezone| offset_at(timezone, instant))
            .unwrap_or(self.offset)
    }

    /// Decodes a single record.
    ///
    /// An amount that cannot be parsed is decoded as NaN rather than an error,
    /// use [Transaction::validate] to reject such records.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if a required field is absent,
    /// - [Error::InvalidDate] if a date cannot be parsed,
    /// - or [Error::UnknownKind] if the transaction type is not "expense" or "income".
    pub fn decode(&self, record: &RawRecord) -> Result<Transaction, Error> {
        match record {
            RawRecord::Sheet(row) => sheet::decode_sheet_row(row, &self.owner, self.offset),
            RawRecord::Document(document) => document::decode_document(document, self),
        }
    }
}

impl Default for Decoder {
    /// A decoder for an anonymous owner in UTC.
    fn default() -> Self {
        Self::new(Owner::default(), UtcOffset::UTC)
    }
}

/// Decodes every record in order, giving exactly one transaction per record.
///
/// # Errors
///
/// Returns an [Error::InvalidRow] with the index of the first record that
/// could not be decoded.
pub fn normalize(records: &[RawRecord], decoder: &Decoder) -> Result<Vec<Transaction>, Error> {
    let transactions = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            decoder
                .decode(record)
                .map_err(|error| Error::InvalidRow(index, error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Decoded {} transactions", transactions.len());

    Ok(transactions)
}

/// Parses an amount, giving NaN if `text` is not a number.
///
/// The whole trimmed text must be a number: "12abc" gives NaN, not 12, so
/// such rows are rejected by [crate::validate_transactions].
fn parse_amount(text: &str) -> f64 {
    match text.trim().parse() {
        Ok(amount) => amount,
        Err(error) => {
            tracing::warn!("Could not parse '{text}' as an amount, using NaN: {error}");
            f64::NAN
        }
    }
}

/// Parses an RFC 3339 timestamp, or a bare date which is placed at midnight in `offset`.
fn parse_timestamp(text: &str, offset: UtcOffset) -> Result<OffsetDateTime, Error> {
    const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

    let text = text.trim();

    if let Ok(timestamp) = OffsetDateTime::parse(text, &Rfc3339) {
        return Ok(timestamp);
    }

    match Date::parse(text, DATE_FORMAT) {
        Ok(date) => Ok(date.midnight().assume_offset(offset)),
        Err(error) => Err(Error::InvalidDate(error.to_string(), text.to_owned())),
    }
}
