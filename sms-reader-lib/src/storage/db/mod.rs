mod sqlite;

pub use sqlite::{SqliteStore, SMS_TABLE};
