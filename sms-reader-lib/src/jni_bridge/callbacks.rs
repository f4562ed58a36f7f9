//! Permission outcome delivery to the JVM status callback.

use super::types::{java_vm, STATUS_CALLBACK};
use crate::access::AccessEvent;
use jni::objects::JValue;

pub const PERMISSION_STATUS: &str = "permission";

/// Report a READ_SMS answer as `onStatusChange("permission", "granted" | "denied")`.
///
/// Returns `Ok(false)` when the app registered no callback.
pub fn invoke_permission_callback(
    outcome: AccessEvent,
) -> Result<bool, Box<dyn std::error::Error>> {
    let Some(callback) = STATUS_CALLBACK.get() else {
        return Ok(false);
    };
    let mut env = java_vm()?.attach_current_thread()?;

    let status = env.new_string(PERMISSION_STATUS)?;
    let outcome = env.new_string(outcome.as_str())?;
    env.call_method(
        callback.as_obj(),
        "onStatusChange",
        "(Ljava/lang/String;Ljava/lang/String;)V",
        &[JValue::Object(&status), JValue::Object(&outcome)],
    )?;

    Ok(true)
}
