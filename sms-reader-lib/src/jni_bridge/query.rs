//! Query APIs for JNI bridge
//!
//! `nativeReadSms` returns a JSON envelope string:
//! `{"ok": [records]}` or `{"error": {"code": ..., "message": ...}}`.

use super::types::*;
use jni::objects::{JClass, JObject};
use jni::sys::{jboolean, jstring, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use log::{error, warn};
use serde_json::json;
use std::ptr;

/// Helper macro to create a success envelope string
macro_rules! jni_ok {
    ($env:expr, $result:expr) => {{
        let response = json!({ "ok": $result });
        match serde_json::to_string(&response) {
            Ok(json_str) => match $env.new_string(json_str) {
                Ok(s) => s.into_raw(),
                Err(e) => {
                    error!("Failed to create JString: {}", e);
                    ptr::null_mut()
                }
            },
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                ptr::null_mut()
            }
        }
    }};
}

/// Helper macro to create an error envelope string
macro_rules! jni_error {
    ($env:expr, $code:expr, $message:expr) => {{
        let response = json!({
            "error": {
                "code": $code,
                "message": $message
            }
        });
        match serde_json::to_string(&response) {
            Ok(json_str) => match $env.new_string(json_str) {
                Ok(s) => s.into_raw(),
                Err(e) => {
                    error!("Failed to create error JString: {}", e);
                    ptr::null_mut()
                }
            },
            Err(e) => {
                error!("Failed to serialize error response: {}", e);
                ptr::null_mut()
            }
        }
    }};
}

/// JNI: Check READ_SMS, prompting if it is missing
///
/// Returns true only if the permission was already held. `activity` hosts
/// the prompt; the answer comes back through `nativeOnPermissionResult`.
#[no_mangle]
pub extern "C" fn Java_com_mytrackery_SmsReaderNative_nativeRequestSmsPermission(
    env: JNIEnv,
    _class: JClass,
    activity: JObject,
) -> jboolean {
    let bridge = match BRIDGE.get() {
        Some(b) => b,
        None => {
            error!("SMS reader not initialized");
            return JNI_FALSE;
        }
    };

    if !activity.is_null() {
        match env.new_global_ref(activity) {
            Ok(r) => bridge.gate().set_activity(r),
            Err(e) => warn!("Failed to create activity GlobalRef: {}", e),
        }
    }

    if bridge.request_access() {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

/// JNI: Read payment-related inbox messages, newest first
#[no_mangle]
pub extern "C" fn Java_com_mytrackery_SmsReaderNative_nativeReadSms(
    mut env: JNIEnv,
    _class: JClass,
) -> jstring {
    let bridge = match BRIDGE.get() {
        Some(b) => b,
        None => {
            warn!("SMS reader not initialized");
            return jni_error!(&mut env, "NOT_INITIALIZED", "SMS reader not initialized");
        }
    };

    match bridge.query_records() {
        Ok(records) => jni_ok!(&mut env, records),
        Err(e) => jni_error!(&mut env, e.code(), e.to_string()),
    }
}
