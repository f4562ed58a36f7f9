use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::{ColumnValue, StoreRow};

/// One matched inbox message, every field in string form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: String,
    pub sender: Option<String>,
    pub body: String,
    pub timestamp: String,
}

impl MessageRecord {
    /// Coerce a raw store row. Only `sender` may be null.
    pub fn from_row(row: StoreRow) -> Result<Self> {
        Ok(Self {
            id: required(row.id, "_id")?,
            sender: row.address.into_text(),
            body: required(row.body, "body")?,
            timestamp: required(row.date, "date")?,
        })
    }
}

fn required(value: ColumnValue, column: &str) -> Result<String> {
    value
        .into_text()
        .ok_or_else(|| Error::QueryFailed(format!("column {} is null", column)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: ColumnValue, address: ColumnValue, body: ColumnValue, date: ColumnValue) -> StoreRow {
        StoreRow {
            id,
            address,
            body,
            date,
        }
    }

    #[test]
    fn coerces_native_types_to_strings() {
        let record = MessageRecord::from_row(row(
            ColumnValue::Integer(42),
            ColumnValue::Text("VM-HDFCBK".to_string()),
            ColumnValue::Text("Rs.500 paid to John".to_string()),
            ColumnValue::Integer(1_700_000_000_123),
        ))
        .unwrap();

        assert_eq!(record.id, "42");
        assert_eq!(record.sender.as_deref(), Some("VM-HDFCBK"));
        assert_eq!(record.timestamp, "1700000000123");
    }

    #[test]
    fn sender_may_be_null() {
        let record = MessageRecord::from_row(row(
            ColumnValue::Text("7".to_string()),
            ColumnValue::Null,
            ColumnValue::Blob(b"INR 20".to_vec()),
            ColumnValue::Real(2.5),
        ))
        .unwrap();

        assert_eq!(record.sender, None);
        assert_eq!(record.body, "INR 20");
        assert_eq!(record.timestamp, "2.5");
    }

    #[test]
    fn null_body_is_a_query_failure() {
        let err = MessageRecord::from_row(row(
            ColumnValue::Integer(1),
            ColumnValue::Null,
            ColumnValue::Null,
            ColumnValue::Integer(1),
        ))
        .unwrap_err();

        assert!(matches!(err, Error::QueryFailed(msg) if msg == "column body is null"));
    }

    #[test]
    fn serializes_with_named_fields() {
        let record = MessageRecord {
            id: "1".to_string(),
            sender: None,
            body: "INR".to_string(),
            timestamp: "2".to_string(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "1", "sender": null, "body": "INR", "timestamp": "2"})
        );
    }
}
