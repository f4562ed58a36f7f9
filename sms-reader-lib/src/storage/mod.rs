//! Read-only access to the device message store.
//!
//! Stores hand rows to a visitor instead of returning an open cursor, so the
//! cursor lives and dies inside `query_inbox` whatever the exit path.

use crate::error::Result;
use crate::filter::KeywordFilter;

mod db;

pub use db::{SqliteStore, SMS_TABLE};

/// Android telephony provider column names.
pub const COLUMN_ID: &str = "_id";
pub const COLUMN_ADDRESS: &str = "address";
pub const COLUMN_BODY: &str = "body";
pub const COLUMN_DATE: &str = "date";
pub const COLUMN_TYPE: &str = "type";

pub const PROJECTION: [&str; 4] = [COLUMN_ID, COLUMN_ADDRESS, COLUMN_BODY, COLUMN_DATE];

/// `type` value of received messages.
pub const MESSAGE_TYPE_INBOX: i64 = 1;

/// A single column as the store typed it.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl ColumnValue {
    /// String form of the value, `None` for null.
    pub fn into_text(self) -> Option<String> {
        match self {
            ColumnValue::Null => None,
            ColumnValue::Integer(i) => Some(i.to_string()),
            ColumnValue::Real(f) => Some(f.to_string()),
            ColumnValue::Text(s) => Some(s),
            ColumnValue::Blob(b) => Some(String::from_utf8_lossy(&b).into_owned()),
        }
    }
}

impl From<Option<String>> for ColumnValue {
    fn from(value: Option<String>) -> Self {
        value.map(ColumnValue::Text).unwrap_or(ColumnValue::Null)
    }
}

/// Projected inbox row, in `PROJECTION` order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRow {
    pub id: ColumnValue,
    pub address: ColumnValue,
    pub body: ColumnValue,
    pub date: ColumnValue,
}

/// Inbox rows matching `filter`, newest first.
pub struct InboxQuery<'a> {
    pub filter: &'a KeywordFilter,
}

pub trait MessageStore: Send + Sync {
    /// Run the query and feed each row to `visit` in store order.
    ///
    /// Any handle opened here must be released before returning, including
    /// when `visit` fails.
    fn query_inbox(
        &self,
        query: &InboxQuery<'_>,
        visit: &mut dyn FnMut(StoreRow) -> Result<()>,
    ) -> Result<()>;
}

impl<T: MessageStore + ?Sized> MessageStore for std::sync::Arc<T> {
    fn query_inbox(
        &self,
        query: &InboxQuery<'_>,
        visit: &mut dyn FnMut(StoreRow) -> Result<()>,
    ) -> Result<()> {
        (**self).query_inbox(query, visit)
    }
}
