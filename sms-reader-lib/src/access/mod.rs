//! Permission gate for reading the SMS inbox.
//!
//! The platform grants or denies asynchronously: `request` only starts the
//! prompt, and the outcome arrives later on the gate's event channel.

mod managed;

pub use managed::ManagedGate;

use serde::Serialize;

/// Name of the Android permission guarding the inbox.
pub const READ_SMS_PERMISSION: &str = "android.permission.READ_SMS";

/// Request code passed along with the platform prompt.
pub const SMS_PERMISSION_CODE: i32 = 123;

pub trait AccessGate: Send + Sync {
    /// Whether the read capability is held right now.
    fn is_granted(&self) -> bool;

    /// Start the platform prompt. Must not wait for the user's answer.
    fn request(&self);
}

impl<T: AccessGate + ?Sized> AccessGate for std::sync::Arc<T> {
    fn is_granted(&self) -> bool {
        (**self).is_granted()
    }

    fn request(&self) {
        (**self).request()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    Unknown,
    Requested,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessEvent {
    Requested,
    Granted,
    Denied,
}

impl AccessEvent {
    /// Event for a user's answer to the prompt.
    pub fn outcome(granted: bool) -> Self {
        if granted {
            AccessEvent::Granted
        } else {
            AccessEvent::Denied
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccessEvent::Requested => "requested",
            AccessEvent::Granted => "granted",
            AccessEvent::Denied => "denied",
        }
    }
}
