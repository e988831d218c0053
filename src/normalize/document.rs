//! Documents of the "expenses" collection.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::{
    Error, Owner, Transaction, TransactionId, TransactionKind,
    normalize::{Decoder, RawRecord, parse_amount, parse_timestamp},
};

/// A timestamp as stored in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentTimestamp {
    /// An RFC 3339 timestamp, or a bare `YYYY-MM-DD` date.
    Text(String),
    /// A server timestamp, as seconds and nanoseconds since the Unix epoch.
    Store {
        /// Whole seconds since the Unix epoch.
        #[serde(alias = "_seconds")]
        seconds: i64,
        /// The fraction of the second in nanoseconds.
        #[serde(alias = "_nanoseconds", default)]
        nanoseconds: u32,
    },
}

impl DocumentTimestamp {
    /// Converts to a date-time.
    ///
    /// Text keeps the offset written in it, or the decoder's offset if it is a
    /// bare date. Server timestamps are instants and are shown in the offset
    /// the decoder gives for that instant.
    fn to_offset_date_time(&self, decoder: &Decoder) -> Result<OffsetDateTime, Error> {
        match self {
            DocumentTimestamp::Text(text) => parse_timestamp(text, decoder.offset),
            DocumentTimestamp::Store {
                seconds,
                nanoseconds,
            } => {
                let nanos = i128::from(*seconds) * 1_000_000_000 + i128::from(*nanoseconds);

                let invalid = |reason: String| Error::InvalidDate(reason, format!("{seconds}s"));

                let instant = OffsetDateTime::from_unix_timestamp_nanos(nanos)
                    .map_err(|error| invalid(error.to_string()))?;
                let offset = decoder.offset_at(instant);

                instant
                    .checked_to_offset(offset)
                    .ok_or_else(|| invalid(format!("out of range at offset {offset}")))
            }
        }
    }
}

/// A document from the "expenses" collection.
///
/// Every field is optional here so that a missing field is reported by name
/// when the document is decoded, rather than as a generic JSON error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDocument {
    /// The document ID assigned by the store.
    pub id: Option<String>,
    /// When the document was created.
    pub date: Option<DocumentTimestamp>,
    /// When the money moved.
    pub transaction_date: Option<DocumentTimestamp>,
    /// What the transaction was for.
    pub description: Option<String>,
    /// A number, numeric text, or `null`.
    ///
    /// `None` means the field is absent, `Some(Value::Null)` means it was `null`.
    #[serde(default, deserialize_with = "deserialize_present")]
    pub amount: Option<Value>,
    /// The free-text category.
    pub category: Option<String>,
    /// Either "expense" or "income".
    pub transaction_type: Option<String>,
    /// The ID of the user who created the document.
    pub user_uid: Option<String>,
    /// The display name of the user at the time of writing.
    pub user_name: Option<String>,
    /// The email address of the user at the time of writing.
    pub user_email: Option<String>,
    /// The avatar URL of the user at the time of writing.
    pub user_image: Option<String>,
}

/// Keeps an explicit `null` distinct from an absent field.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parses a JSON array of documents into raw records.
///
/// # Errors
///
/// Returns an [Error::InvalidJSON] if `text` is not an array of objects.
pub fn parse_documents(text: &str) -> Result<Vec<RawRecord>, Error> {
    let documents: Vec<ExpenseDocument> =
        serde_json::from_str(text).map_err(|error| Error::InvalidJSON(error.to_string()))?;

    tracing::debug!("Parsed {} documents", documents.len());

    Ok(documents.into_iter().map(RawRecord::Document).collect())
}

fn required<'a, T>(field: &'a Option<T>, name: &'static str) -> Result<&'a T, Error> {
    field.as_ref().ok_or(Error::MissingField(name))
}

/// Decodes a document, taking the owner from the `user_*` fields.
pub(super) fn decode_document(
    document: &ExpenseDocument,
    decoder: &Decoder,
) -> Result<Transaction, Error> {
    let id = required(&document.id, "id")?;
    let occurred_at =
        required(&document.transaction_date, "transaction_date")?.to_offset_date_time(decoder)?;
    let recorded_at = required(&document.date, "date")?.to_offset_date_time(decoder)?;
    let description = required(&document.description, "description")?;
    let amount = amount_from_value(required(&document.amount, "amount")?);
    let category = required(&document.category, "category")?;
    let kind: TransactionKind = required(&document.transaction_type, "transaction_type")?.parse()?;
    let user_uid = required(&document.user_uid, "user_uid")?;

    let owner = Owner::new(
        user_uid,
        document.user_name.as_deref().unwrap_or_default(),
        document.user_email.as_deref().unwrap_or_default(),
    )
    .image(document.user_image.clone());

    let transaction = Transaction::build(amount, occurred_at, description)
        .recorded_at(recorded_at)
        .kind(kind)
        .category(category)
        .owner(owner)
        .finalise(TransactionId::new(id.as_str()));

    Ok(transaction)
}

fn amount_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number.as_f64().unwrap_or(f64::NAN),
        Value::String(text) => parse_amount(text),
        other => {
            tracing::warn!("Expected a number for the amount, got {other}, using NaN");
            f64::NAN
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::{UtcOffset, macros::datetime};

    use crate::{
        Error, Owner, TransactionKind,
        normalize::{Decoder, RawRecord, parse_documents},
    };

    use super::{DocumentTimestamp, ExpenseDocument, decode_document};

    fn groceries() -> serde_json::Value {
        json!({
            "id": "doc-1",
            "date": "2024-01-16T09:30:00+07:00",
            "transaction_date": "2024-01-15",
            "description": "Groceries",
            "amount": 100,
            "category": "Food",
            "transaction_type": "expense",
            "user_uid": "u1",
            "user_name": "Ana",
            "user_email": "ana@example.com",
            "user_image": "https://example.com/ana.png"
        })
    }

    fn decode(value: serde_json::Value) -> Result<crate::Transaction, Error> {
        let document: ExpenseDocument = serde_json::from_value(value).unwrap();
        let decoder = Decoder::new(Owner::default(), UtcOffset::from_hms(7, 0, 0).unwrap());
        decode_document(&document, &decoder)
    }

    #[test]
    fn decodes_all_fields() {
        let transaction = decode(groceries()).unwrap();

        assert_eq!(transaction.id().as_ref(), "doc-1");
        assert_eq!(transaction.occurred_at(), datetime!(2024-01-15 00:00 +7));
        assert_eq!(transaction.recorded_at(), datetime!(2024-01-16 09:30 +7));
        assert_eq!(transaction.description(), "Groceries");
        assert_eq!(transaction.amount(), 100.0);
        assert_eq!(transaction.category(), "Food");
        assert_eq!(transaction.kind(), TransactionKind::Expense);
        assert_eq!(
            transaction.owner(),
            &Owner::new("u1", "Ana", "ana@example.com")
                .image(Some("https://example.com/ana.png".to_owned()))
        );
    }

    #[test]
    fn amount_may_be_text() {
        let mut document = groceries();
        document["amount"] = json!("12.75");

        assert_eq!(decode(document).unwrap().amount(), 12.75);
    }

    #[test]
    fn null_amount_is_nan() {
        let mut document = groceries();
        document["amount"] = json!(null);

        assert!(decode(document).unwrap().amount().is_nan());
    }

    #[test]
    fn absent_amount_is_missing() {
        let mut document = groceries();
        document.as_object_mut().unwrap().remove("amount");

        assert_eq!(decode(document), Err(Error::MissingField("amount")));
    }

    #[test]
    fn absent_owner_is_missing() {
        let mut document = groceries();
        document.as_object_mut().unwrap().remove("user_uid");

        assert_eq!(decode(document), Err(Error::MissingField("user_uid")));
    }

    #[test]
    fn optional_profile_fields_default_to_empty() {
        let mut document = groceries();
        let fields = document.as_object_mut().unwrap();
        fields.remove("user_name");
        fields.remove("user_email");
        fields.insert("user_image".to_owned(), json!(null));

        let transaction = decode(document).unwrap();

        assert_eq!(transaction.owner(), &Owner::new("u1", "", ""));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let mut document = groceries();
        document["transaction_type"] = json!("transfer");

        assert_eq!(
            decode(document),
            Err(Error::UnknownKind("transfer".to_owned()))
        );
    }

    #[test]
    fn store_timestamps_are_shown_in_local_offset() {
        let mut document = groceries();
        // 2024-01-31T20:00:00Z, which is already February at +07:00.
        document["transaction_date"] = json!({ "seconds": 1706731200, "nanoseconds": 0 });
        document["date"] = json!({ "_seconds": 1706731200, "_nanoseconds": 0 });

        let transaction = decode(document).unwrap();

        assert_eq!(transaction.occurred_at(), datetime!(2024-02-01 03:00 +7));
        assert_eq!(transaction.recorded_at(), transaction.occurred_at());
    }

    #[test]
    fn store_timestamp_past_supported_range_is_an_error() {
        let mut document = groceries();
        // 9999-12-31T23:59:59Z, which is year 10000 at +07:00.
        document["transaction_date"] = json!({ "seconds": 253402300799_i64, "nanoseconds": 0 });

        let got = decode(document);

        assert!(
            matches!(got, Err(Error::InvalidDate(_, ref text)) if text == "253402300799s"),
            "got {got:?}"
        );
    }

    #[test]
    fn store_timestamps_follow_daylight_saving_of_timezone() {
        let decoder = Decoder::with_timezone(Owner::default(), "Europe/London").unwrap();
        let mut summer = groceries();
        // 2024-07-31T23:30:00Z, which is August at +01:00.
        summer["transaction_date"] = json!({ "seconds": 1722468600 });
        let mut winter = groceries();
        // 2024-01-31T23:30:00Z, still January at +00:00.
        winter["transaction_date"] = json!({ "seconds": 1706743800 });

        let summer: ExpenseDocument = serde_json::from_value(summer).unwrap();
        let winter: ExpenseDocument = serde_json::from_value(winter).unwrap();

        assert_eq!(
            decode_document(&summer, &decoder).unwrap().occurred_at(),
            datetime!(2024-08-01 00:30 +1)
        );
        assert_eq!(
            decode_document(&winter, &decoder).unwrap().occurred_at(),
            datetime!(2024-01-31 23:30 UTC)
        );
    }

    #[test]
    fn timestamp_accepts_text_and_store_shapes() {
        let text: DocumentTimestamp = serde_json::from_value(json!("2024-01-15")).unwrap();
        let store: DocumentTimestamp =
            serde_json::from_value(json!({ "seconds": 10, "nanoseconds": 5 })).unwrap();

        assert_eq!(text, DocumentTimestamp::Text("2024-01-15".to_owned()));
        assert_eq!(
            store,
            DocumentTimestamp::Store {
                seconds: 10,
                nanoseconds: 5
            }
        );
    }

    #[test]
    fn parses_document_arrays() {
        let text = serde_json::to_string(&json!([groceries(), groceries()])).unwrap();

        let records = parse_documents(&text).unwrap();

        assert_eq!(records.len(), 2);
        assert!(matches!(records[0], RawRecord::Document(_)));
    }

    #[test]
    fn rejects_non_arrays() {
        let got = parse_documents("{\"id\": 1}");

        assert!(matches!(got, Err(Error::InvalidJSON(_))), "got {got:?}");
    }
}
