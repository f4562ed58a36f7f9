use crate::error::ApiError;
use crate::models::*;
use crate::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

// GET /v1/status
pub async fn get_status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let filter = state.reader.filter();

    Ok(Json(StatusResponse {
        store_path: state.reader.store_path().display().to_string(),
        access: state.reader.access_state(),
        keywords: filter.keywords().to_vec(),
        case_sensitive: filter.is_case_sensitive(),
    }))
}

// POST /v1/permission/request
pub async fn request_permission(
    State(state): State<AppState>,
) -> Result<Json<PermissionRequestResponse>, ApiError> {
    let granted = state.reader.request_access();
    tracing::info!("Permission request answered granted={}", granted);

    Ok(Json(PermissionRequestResponse { granted }))
}

// GET /v1/permission
pub async fn get_permission(
    State(state): State<AppState>,
) -> Result<Json<PermissionStateResponse>, ApiError> {
    Ok(Json(PermissionStateResponse {
        state: state.reader.access_state(),
    }))
}

// POST /v1/permission/resolve
pub async fn resolve_permission(
    State(state): State<AppState>,
    body: Result<Json<ResolvePermissionRequest>, JsonRejection>,
) -> Result<Json<PermissionStateResponse>, ApiError> {
    let Json(body) = body?;
    let state = state.reader.resolve_access(body.granted);

    Ok(Json(PermissionStateResponse { state }))
}

// GET /v1/sms
pub async fn list_sms(State(state): State<AppState>) -> Result<Json<SmsListResponse>, ApiError> {
    let items = state.reader.read_sms().await?;
    tracing::debug!("Returning {} payment messages", items.len());

    Ok(Json(SmsListResponse {
        count: items.len(),
        items,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::reader::SmsReader;
    use sms_reader_lib::{AccessState, ReaderConfig};
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio_test::{assert_err, assert_ok};

    pub(crate) fn fixture(messages: &[(&str, i64)]) -> (TempDir, ReaderConfig) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mmssms.db");
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(
            "CREATE TABLE sms (_id INTEGER PRIMARY KEY, address TEXT, date INTEGER, type INTEGER, body TEXT);",
        )
        .unwrap();
        for (body, date) in messages {
            conn.execute(
                "INSERT INTO sms (address, date, type, body) VALUES ('VK-ICICI', ?1, 1, ?2)",
                rusqlite::params![date, body],
            )
            .unwrap();
        }
        (dir, ReaderConfig::new(path))
    }

    pub(crate) fn app_state(config: &ReaderConfig, granted: bool) -> AppState {
        AppState {
            reader: Arc::new(SmsReader::open(config, granted).unwrap()),
        }
    }

    #[tokio::test]
    async fn list_sms_requires_permission() {
        let (_dir, config) = fixture(&[("INR 10", 1)]);
        let state = app_state(&config, false);

        let err = assert_err!(list_sms(State(state)).await);
        assert!(matches!(err, ApiError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn request_then_resolve_unlocks_listing() {
        let (_dir, config) = fixture(&[("Hi", 1), ("Rs.500 paid to John", 2), ("Meeting at 5", 3)]);
        let state = app_state(&config, false);

        let Json(first) = assert_ok!(request_permission(State(state.clone())).await);
        assert!(!first.granted);
        let Json(pending) = assert_ok!(get_permission(State(state.clone())).await);
        assert_eq!(pending.state, AccessState::Requested);

        let Json(resolved) = assert_ok!(
            resolve_permission(
                State(state.clone()),
                Ok(Json(ResolvePermissionRequest { granted: true }))
            )
            .await
        );
        assert_eq!(resolved.state, AccessState::Granted);

        let Json(list) = assert_ok!(list_sms(State(state.clone())).await);
        assert_eq!(list.count, 1);
        assert_eq!(list.items[0].body, "Rs.500 paid to John");
        assert_eq!(list.items[0].sender.as_deref(), Some("VK-ICICI"));

        let Json(again) = assert_ok!(request_permission(State(state)).await);
        assert!(again.granted);
    }

    #[tokio::test]
    async fn list_sms_is_newest_first() {
        let (_dir, config) = fixture(&[("INR 1", 5), ("INR 2", 10)]);
        let state = app_state(&config, true);

        let Json(list) = assert_ok!(list_sms(State(state)).await);
        let timestamps: Vec<&str> = list.items.iter().map(|r| r.timestamp.as_str()).collect();
        assert_eq!(timestamps, vec!["10", "5"]);
    }

    #[tokio::test]
    async fn status_reports_filter_and_access() {
        let (_dir, config) = fixture(&[]);
        let state = app_state(&config, true);

        let Json(status) = assert_ok!(get_status(State(state)).await);
        assert_eq!(status.access, AccessState::Granted);
        assert_eq!(status.keywords, vec!["Rs.", "INR", "paid to", "sent to"]);
        assert!(status.case_sensitive);
    }

    #[test]
    fn open_fails_for_missing_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReaderConfig::new(dir.path().join("missing.db"));
        assert!(SmsReader::open(&config, true).is_err());
    }
}
