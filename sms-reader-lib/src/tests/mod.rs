
use crate::error::{Error, Result};
use crate::storage::{ColumnValue, InboxQuery, MessageStore, StoreRow};
use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub(crate) const INBOX: i64 = 1;
pub(crate) const SENT: i64 = 2;

const SMS_SCHEMA: &str = "CREATE TABLE sms (
    _id INTEGER PRIMARY KEY AUTOINCREMENT,
    thread_id INTEGER,
    address TEXT,
    person INTEGER,
    date INTEGER,
    date_sent INTEGER DEFAULT 0,
    read INTEGER DEFAULT 0,
    status INTEGER DEFAULT -1,
    type INTEGER,
    subject TEXT,
    body TEXT,
    seen INTEGER DEFAULT 0
)";

/// `mmssms.db`-shaped database in a temp dir.
pub(crate) struct Fixture {
    _dir: TempDir,
    pub path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("mmssms.db");
        Connection::open(&path)
            .expect("create fixture db")
            .execute_batch(SMS_SCHEMA)
            .expect("create sms table");
        Self { _dir: dir, path }
    }

    /// Inbox messages as `(address, body, date)`.
    pub fn with_inbox(messages: &[(Option<&str>, &str, i64)]) -> Self {
        let fixture = Self::new();
        for (address, body, date) in messages {
            fixture.insert(*address, Some(*body), *date, INBOX);
        }
        fixture
    }

    pub fn insert(&self, address: Option<&str>, body: Option<&str>, date: i64, kind: i64) {
        self.conn()
            .execute(
                "INSERT INTO sms (thread_id, address, date, type, body) VALUES (1, ?1, ?2, ?3, ?4)",
                params![address, date, kind, body],
            )
            .expect("insert sms");
    }

    pub fn conn(&self) -> Connection {
        Connection::open(&self.path).expect("open fixture db")
    }
}

pub(crate) fn inbox_row(id: i64, body: ColumnValue, date: i64) -> StoreRow {
    StoreRow {
        id: ColumnValue::Integer(id),
        address: ColumnValue::Text("AX-BANK".to_string()),
        body,
        date: ColumnValue::Integer(date),
    }
}

struct HandleGuard<'a>(&'a AtomicUsize);

impl Drop for HandleGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Store double that counts handle opens and releases.
///
/// Text bodies are selected with the filter; non-text bodies always pass,
/// like a store with a coarse selection would let them.
#[derive(Default)]
pub(crate) struct MemoryStore {
    rows: Vec<StoreRow>,
    fail_at: Option<usize>,
    pub opened: AtomicUsize,
    pub released: AtomicUsize,
}

impl MemoryStore {
    pub fn new(bodies: &[(&str, i64)]) -> Self {
        let rows = bodies
            .iter()
            .enumerate()
            .map(|(i, (body, date))| {
                inbox_row(i as i64 + 1, ColumnValue::Text(body.to_string()), *date)
            })
            .collect();
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn push(mut self, row: StoreRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Fail with a disk error when reaching the `index`-th selected row.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

impl MessageStore for MemoryStore {
    fn query_inbox(
        &self,
        query: &InboxQuery<'_>,
        visit: &mut dyn FnMut(StoreRow) -> Result<()>,
    ) -> Result<()> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let _handle = HandleGuard(&self.released);

        let mut selected: Vec<&StoreRow> = self
            .rows
            .iter()
            .filter(|row| match &row.body {
                ColumnValue::Text(body) => query.filter.matches(body),
                _ => true,
            })
            .collect();
        selected.sort_by_key(|row| match row.date {
            ColumnValue::Integer(date) => std::cmp::Reverse(date),
            _ => std::cmp::Reverse(i64::MIN),
        });

        for (index, row) in selected.into_iter().enumerate() {
            if self.fail_at == Some(index) {
                return Err(Error::query("disk I/O error"));
            }
            visit(row.clone())?;
        }
        Ok(())
    }
}
