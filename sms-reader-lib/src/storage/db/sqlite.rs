use super::super::{
    ColumnValue, InboxQuery, MessageStore, StoreRow, COLUMN_BODY, COLUMN_DATE, COLUMN_TYPE,
    MESSAGE_TYPE_INBOX, PROJECTION,
};
use crate::error::{Error, Result};
use log::debug;
use rusqlite::{params_from_iter, types::Value, Connection, OpenFlags};
use std::path::{Path, PathBuf};

pub const SMS_TABLE: &str = "sms";

impl From<Value> for ColumnValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ColumnValue::Null,
            Value::Integer(i) => ColumnValue::Integer(i),
            Value::Real(f) => ColumnValue::Real(f),
            Value::Text(s) => ColumnValue::Text(s),
            Value::Blob(b) => ColumnValue::Blob(b),
        }
    }
}

/// Message store backed by an `mmssms.db`-shaped SQLite file.
///
/// Every query opens its own read-only connection, so concurrent callers never
/// share a handle.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open the store at `path`, checking that it has an `sms` table.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
        };
        let conn = store
            .connect()
            .map_err(|e| Error::config(format!("cannot open {:?}: {}", store.path, e)))?;
        let has_table: bool = conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
                [SMS_TABLE],
                |row| row.get(0),
            )
            .map_err(Error::config)?;
        if !has_table {
            return Err(Error::config(format!(
                "{:?} has no {} table",
                store.path, SMS_TABLE
            )));
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> rusqlite::Result<Connection> {
        Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
    }

    fn inbox_sql(selection: &str) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = {} AND {} ORDER BY {} DESC",
            PROJECTION.join(", "),
            SMS_TABLE,
            COLUMN_TYPE,
            MESSAGE_TYPE_INBOX,
            selection,
            COLUMN_DATE
        )
    }
}

impl MessageStore for SqliteStore {
    fn query_inbox(
        &self,
        query: &InboxQuery<'_>,
        visit: &mut dyn FnMut(StoreRow) -> Result<()>,
    ) -> Result<()> {
        let (selection, args) = query.filter.like_selection(COLUMN_BODY);
        let sql = Self::inbox_sql(&selection);
        debug!("sqlite inbox query: {}", sql);

        // Connection, statement and rows are all dropped on return.
        let conn = self.connect()?;
        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(args.iter()))?;
        while let Some(row) = rows.next()? {
            visit(StoreRow {
                id: row.get::<_, Value>(0)?.into(),
                address: row.get::<_, Value>(1)?.into(),
                body: row.get::<_, Value>(2)?.into(),
                date: row.get::<_, Value>(3)?.into(),
            })?;
        }
        Ok(())
    }
}
