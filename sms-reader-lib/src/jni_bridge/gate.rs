//! READ_SMS permission gate backed by the Android `Context`.

use super::types::java_vm;
use crate::access::{AccessGate, READ_SMS_PERMISSION, SMS_PERMISSION_CODE};
use jni::objects::{GlobalRef, JObject, JValue};
use log::{error, warn};
use std::sync::Mutex;

/// `PackageManager.PERMISSION_GRANTED`
const PERMISSION_GRANTED: i32 = 0;

pub struct AndroidGate {
    context: GlobalRef,
    activity: Mutex<Option<GlobalRef>>,
}

impl AndroidGate {
    pub fn new(context: GlobalRef) -> Self {
        Self {
            context,
            activity: Mutex::new(None),
        }
    }

    /// Activity used to show the permission prompt.
    pub fn set_activity(&self, activity: GlobalRef) {
        match self.activity.lock() {
            Ok(mut slot) => *slot = Some(activity),
            Err(poisoned) => *poisoned.into_inner() = Some(activity),
        }
    }

    fn activity(&self) -> Option<GlobalRef> {
        match self.activity.lock() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn check_permission(&self) -> Result<bool, Box<dyn std::error::Error>> {
        let vm = java_vm()?;
        let mut env = vm.attach_current_thread()?;

        let permission = env.new_string(READ_SMS_PERMISSION)?;
        // Context.checkSelfPermission(String) -> int
        let status = env
            .call_method(
                self.context.as_obj(),
                "checkSelfPermission",
                "(Ljava/lang/String;)I",
                &[JValue::Object(&permission)],
            )?
            .i()?;

        Ok(status == PERMISSION_GRANTED)
    }

    fn request_permission(&self, activity: &GlobalRef) -> Result<(), Box<dyn std::error::Error>> {
        let vm = java_vm()?;
        let mut env = vm.attach_current_thread()?;

        let permission = env.new_string(READ_SMS_PERMISSION)?;
        let permissions = env.new_object_array(1, "java/lang/String", JObject::null())?;
        env.set_object_array_element(&permissions, 0, &permission)?;

        // Activity.requestPermissions(String[], int); the answer arrives in
        // onRequestPermissionsResult on the Java side.
        env.call_method(
            activity.as_obj(),
            "requestPermissions",
            "([Ljava/lang/String;I)V",
            &[JValue::Object(&permissions), JValue::Int(SMS_PERMISSION_CODE)],
        )?;

        Ok(())
    }
}

impl AccessGate for AndroidGate {
    fn is_granted(&self) -> bool {
        self.check_permission().unwrap_or_else(|e| {
            error!("Failed to check SMS permission: {}", e);
            false
        })
    }

    fn request(&self) {
        let Some(activity) = self.activity() else {
            warn!("No activity available to request SMS permission");
            return;
        };
        if let Err(e) = self.request_permission(&activity) {
            error!("Failed to request SMS permission: {}", e);
        }
    }
}
