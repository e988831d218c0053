//! Rows of the "Expenses" sheet.
//!
//! Each row is a list of cells in a fixed column order, with no header row.

use time::UtcOffset;

use crate::{
    Error, Owner, Transaction, TransactionId, TransactionKind,
    normalize::{RawRecord, parse_amount, parse_timestamp},
};

const OCCURRED_AT_COLUMN: usize = 0;
const DESCRIPTION_COLUMN: usize = 1;
const KIND_COLUMN: usize = 2;
const AMOUNT_COLUMN: usize = 3;
const CATEGORY_COLUMN: usize = 4;
const RECORDED_AT_COLUMN: usize = 5;

/// The names of the columns, used in error messages.
const COLUMN_NAMES: [&str; 6] = [
    "transaction_date",
    "description",
    "transaction_type",
    "amount",
    "category",
    "date",
];

/// A row of the "Expenses" sheet, as the cells' display values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow(Vec<String>);

impl SheetRow {
    /// Wrap the cells of a row.
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// The cells of the row.
    pub fn cells(&self) -> &[String] {
        &self.0
    }

    fn cell(&self, column: usize) -> Result<&str, Error> {
        self.0
            .get(column)
            .map(String::as_str)
            .ok_or(Error::MissingField(COLUMN_NAMES[column]))
    }
}

impl From<Vec<String>> for SheetRow {
    fn from(cells: Vec<String>) -> Self {
        Self::new(cells)
    }
}

/// Parses a CSV export of the "Expenses" sheet into raw records.
///
/// The export has no header row and rows may have any number of cells, short
/// rows are only rejected when they are decoded.
///
/// # Errors
///
/// Returns an [Error::InvalidCSV] if `text` is not valid CSV.
pub fn parse_sheet_csv(text: &str) -> Result<Vec<RawRecord>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let records = reader
        .records()
        .map(|record| {
            record
                .map(|record| {
                    RawRecord::Sheet(SheetRow::new(record.iter().map(str::to_owned).collect()))
                })
                .map_err(|error| Error::InvalidCSV(error.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Parsed {} sheet rows", records.len());

    Ok(records)
}

/// Decodes a sheet row, attributing it to `owner`.
///
/// The sheet has no ID column, so the ID is a hash of the row's cells. Two
/// rows with identical cells get the same ID.
pub(super) fn decode_sheet_row(
    row: &SheetRow,
    owner: &Owner,
    offset: UtcOffset,
) -> Result<Transaction, Error> {
    let occurred_at = parse_timestamp(row.cell(OCCURRED_AT_COLUMN)?, offset)?;
    let description = row.cell(DESCRIPTION_COLUMN)?;
    let kind: TransactionKind = row.cell(KIND_COLUMN)?.parse()?;
    let amount = parse_amount(row.cell(AMOUNT_COLUMN)?);
    let category = row.cell(CATEGORY_COLUMN)?;
    let recorded_at = parse_timestamp(row.cell(RECORDED_AT_COLUMN)?, offset)?;

    let transaction = Transaction::build(amount, occurred_at, description)
        .recorded_at(recorded_at)
        .kind(kind)
        .category(category)
        .owner(owner.clone())
        .finalise(create_row_id(row));

    Ok(transaction)
}

fn create_row_id(row: &SheetRow) -> TransactionId {
    TransactionId::new(format!("{:x}", md5::compute(row.0.join(","))))
}
