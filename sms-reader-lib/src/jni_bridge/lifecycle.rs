//! Lifecycle management for JNI bridge
//!
//! `nativeInit` wires the bridge to the app context once per process;
//! `nativeOnPermissionResult` forwards the platform's permission answer.

use super::callbacks::invoke_permission_callback;
use super::gate::AndroidGate;
use super::store::ContentResolverStore;
use super::types::*;
use crate::access::AccessEvent;
use crate::bridge::SmsQueryBridge;
use crate::error::{Error, Result};
use crate::filter::KeywordFilter;
use crate::types::FilterConfig;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use log::{error, info, warn};

/// JNI: Initialize the SMS reader
///
/// - `context`: application Context, used for permission checks and the
///   content resolver
/// - `status_callback`: object with `onStatusChange(String, String)`, may be null
/// - `filter_toml`: `keywords = [...]` / `case_sensitive = ...`, null for the
///   default payment keywords
#[no_mangle]
pub extern "C" fn Java_com_mytrackery_SmsReaderNative_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    context: JObject,
    status_callback: JObject,
    filter_toml: JString,
) -> jboolean {
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log::LevelFilter::Debug)
            .with_tag("sms-reader"),
    );

    if is_initialized() {
        error!("Already initialized!");
        return JNI_FALSE;
    }

    if JAVA_VM.get().is_none() {
        let vm = match env.get_java_vm() {
            Ok(vm) => vm,
            Err(e) => {
                error!("Failed to get JavaVM: {}", e);
                return JNI_FALSE;
            }
        };
        let _ = JAVA_VM.set(vm);
    }

    if !status_callback.is_null() {
        match env.new_global_ref(status_callback) {
            Ok(r) => {
                let _ = STATUS_CALLBACK.set(r);
            }
            Err(e) => {
                error!("Failed to create status callback GlobalRef: {}", e);
                return JNI_FALSE;
            }
        }
    }

    let filter = match load_filter(&mut env, &filter_toml) {
        Ok(filter) => filter,
        Err(e) => {
            error!("Invalid filter config: {}", e);
            return JNI_FALSE;
        }
    };
    info!("Keyword filter: {:?}", filter.keywords());

    let context_ref = match env.new_global_ref(context) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to create context GlobalRef: {}", e);
            return JNI_FALSE;
        }
    };

    let bridge = SmsQueryBridge::new(
        AndroidGate::new(context_ref.clone()),
        ContentResolverStore::new(context_ref),
        filter,
    );
    if BRIDGE.set(bridge).is_err() {
        error!("Failed to store bridge");
        return JNI_FALSE;
    }

    info!("SMS reader initialized");
    JNI_TRUE
}

/// JNI: Deliver the result of a READ_SMS prompt
///
/// Called from `onRequestPermissionsResult`; the outcome is passed on to the
/// status callback as `("permission", "granted" | "denied")`.
#[no_mangle]
pub extern "C" fn Java_com_mytrackery_SmsReaderNative_nativeOnPermissionResult(
    _env: JNIEnv,
    _class: JClass,
    granted: jboolean,
) {
    let outcome = AccessEvent::outcome(granted != JNI_FALSE);
    info!("SMS permission {}", outcome.as_str());

    if let Err(e) = invoke_permission_callback(outcome) {
        warn!("Failed to invoke status callback: {}", e);
    }
}

fn load_filter(env: &mut JNIEnv, filter_toml: &JString) -> Result<KeywordFilter> {
    if filter_toml.is_null() {
        return Ok(KeywordFilter::payment());
    }
    let text: String = env.get_string(filter_toml).map_err(Error::config)?.into();
    let config = text.parse::<FilterConfig>().map_err(Error::config)?;
    config.build()
}

