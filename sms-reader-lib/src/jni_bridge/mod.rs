//! JNI bridge for Android
//!
//! Exposes the SMS reader to the app's `com.mytrackery.SmsReaderNative` class.
//!
//! ## Architecture
//!
//! - `types`: Global state (JavaVM, status callback, bridge) using OnceLock
//! - `gate`: READ_SMS permission checks through the app `Context`
//! - `store`: `content://sms/inbox` queries through the `ContentResolver`
//! - `lifecycle`: Init and permission-result entry points
//! - `callbacks`: Status callback into the JVM
//! - `query`: Permission request and SMS read entry points
//!
//! ## Thread Model
//!
//! - JNI calls run on whatever Android thread the app uses; `nativeReadSms`
//!   blocks it for the length of the provider query
//! - Gate and store attach the current thread to the JVM as needed

pub mod callbacks;
pub mod gate;
pub mod lifecycle;
pub mod query;
pub mod store;
pub mod types;

// Re-export main entry points
pub use lifecycle::{
    Java_com_mytrackery_SmsReaderNative_nativeInit,
    Java_com_mytrackery_SmsReaderNative_nativeOnPermissionResult,
};

pub use query::{
    Java_com_mytrackery_SmsReaderNative_nativeReadSms,
    Java_com_mytrackery_SmsReaderNative_nativeRequestSmsPermission,
};
