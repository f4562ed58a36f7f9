//! Global state management for JNI bridge

use super::gate::AndroidGate;
use super::store::ContentResolverStore;
use crate::bridge::SmsQueryBridge;
use jni::objects::GlobalRef;
use jni::JavaVM;
use std::sync::OnceLock;

pub type AndroidBridge = SmsQueryBridge<AndroidGate, ContentResolverStore>;

/// Global JavaVM for attaching native threads
pub static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Global status callback
pub static STATUS_CALLBACK: OnceLock<GlobalRef> = OnceLock::new();

/// Global bridge, set once by nativeInit
pub static BRIDGE: OnceLock<AndroidBridge> = OnceLock::new();

pub fn java_vm() -> Result<&'static JavaVM, &'static str> {
    JAVA_VM.get().ok_or("JavaVM not initialized")
}

pub fn is_initialized() -> bool {
    BRIDGE.get().is_some()
}
