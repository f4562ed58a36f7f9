#[cfg(test)]
mod tests;

pub mod access;
pub mod bridge;
pub mod error;
pub mod filter;
pub mod record;
pub mod storage;
pub mod types;

pub use access::{AccessEvent, AccessGate, AccessState, ManagedGate};
pub use bridge::SmsQueryBridge;
pub use error::{Error, Result};
pub use filter::KeywordFilter;
pub use record::MessageRecord;
pub use storage::{ColumnValue, InboxQuery, MessageStore, SqliteStore, StoreRow};
pub use types::ReaderConfig;

// JNI bridge for Android
#[cfg(all(feature = "jni-bridge", target_os = "android"))]
pub mod jni_bridge;
