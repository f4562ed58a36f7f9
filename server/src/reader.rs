use crate::error::ApiError;
use anyhow::Context;
use sms_reader_lib::{
    AccessState, KeywordFilter, ManagedGate, MessageRecord, ReaderConfig, SmsQueryBridge,
    SqliteStore,
};
use std::path::Path;
use std::sync::Arc;

pub type GatewayBridge = SmsQueryBridge<ManagedGate, SqliteStore>;

/// Async front for the blocking bridge.
pub struct SmsReader {
    bridge: Arc<GatewayBridge>,
}

impl SmsReader {
    pub fn new(bridge: GatewayBridge) -> Self {
        Self {
            bridge: Arc::new(bridge),
        }
    }

    pub fn open(config: &ReaderConfig, pre_granted: bool) -> anyhow::Result<Self> {
        let filter = config.filter.build().context("invalid filter config")?;
        let store = SqliteStore::open(&config.store.path)
            .with_context(|| format!("cannot open message store {:?}", config.store.path))?;
        let gate = if pre_granted {
            ManagedGate::granted()
        } else {
            ManagedGate::new()
        };
        Ok(Self::new(SmsQueryBridge::new(gate, store, filter)))
    }

    pub fn store_path(&self) -> &Path {
        self.bridge.store().path()
    }

    pub fn filter(&self) -> &KeywordFilter {
        self.bridge.filter()
    }

    pub fn access_state(&self) -> AccessState {
        self.bridge.gate().state()
    }

    pub fn request_access(&self) -> bool {
        self.bridge.request_access()
    }

    /// Out-of-band answer to a pending prompt.
    pub fn resolve_access(&self, granted: bool) -> AccessState {
        self.bridge.gate().resolve(granted)
    }

    pub async fn read_sms(&self) -> Result<Vec<MessageRecord>, ApiError> {
        let bridge = Arc::clone(&self.bridge);
        // The store query blocks; keep it off the async workers.
        let records = tokio::task::spawn_blocking(move || bridge.query_records()).await??;
        Ok(records)
    }
}
