//! The host-facing bridge: a permission check plus one filtered inbox read.

use crate::access::AccessGate;
use crate::error::{Error, Result};
use crate::filter::KeywordFilter;
use crate::record::MessageRecord;
use crate::storage::{InboxQuery, MessageStore};
use log::{debug, error, info, warn};

pub struct SmsQueryBridge<G, S> {
    gate: G,
    store: S,
    filter: KeywordFilter,
}

impl<G: AccessGate, S: MessageStore> SmsQueryBridge<G, S> {
    pub fn new(gate: G, store: S, filter: KeywordFilter) -> Self {
        Self {
            gate,
            store,
            filter,
        }
    }

    pub fn gate(&self) -> &G {
        &self.gate
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn filter(&self) -> &KeywordFilter {
        &self.filter
    }

    /// `true` if the read permission is already held. Otherwise starts one
    /// platform prompt and returns `false` without waiting for the answer.
    pub fn request_access(&self) -> bool {
        if self.gate.is_granted() {
            return true;
        }
        info!("SMS permission not held, requesting it");
        self.gate.request();
        false
    }

    /// Matching inbox messages, newest first.
    ///
    /// Blocks for the duration of the store query.
    pub fn query_records(&self) -> Result<Vec<MessageRecord>> {
        if !self.gate.is_granted() {
            warn!("SMS read refused: permission not granted");
            return Err(Error::PermissionDenied);
        }

        match self.read_inbox() {
            Ok(records) => {
                debug!("SMS read returned {} records", records.len());
                Ok(records)
            }
            Err(e) => {
                let e = match e {
                    Error::QueryFailed(_) => e,
                    other => Error::QueryFailed(other.to_string()),
                };
                error!("Error reading SMS: {}", e);
                Err(e)
            }
        }
    }

    fn read_inbox(&self) -> Result<Vec<MessageRecord>> {
        let query = InboxQuery {
            filter: &self.filter,
        };
        let mut records = Vec::new();
        self.store.query_inbox(&query, &mut |row| {
            let record = MessageRecord::from_row(row)?;
            // Store selections may be coarser than the filter.
            if self.filter.matches(&record.body) {
                records.push(record);
            }
            Ok(())
        })?;
        Ok(records)
    }
}
