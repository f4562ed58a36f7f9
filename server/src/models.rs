use serde::{Deserialize, Serialize};
use sms_reader_lib::{AccessState, MessageRecord};

// ============ API Request Types ============

#[derive(Debug, Deserialize)]
pub struct ResolvePermissionRequest {
    pub granted: bool,
}

// ============ API Response Types ============

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub store_path: String,
    pub access: AccessState,
    pub keywords: Vec<String>,
    pub case_sensitive: bool,
}

#[derive(Debug, Serialize)]
pub struct PermissionRequestResponse {
    pub granted: bool,
}

#[derive(Debug, Serialize)]
pub struct PermissionStateResponse {
    pub state: AccessState,
}

#[derive(Debug, Serialize)]
pub struct SmsListResponse {
    pub items: Vec<MessageRecord>,
    pub count: usize,
}
