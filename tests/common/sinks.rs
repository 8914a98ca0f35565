//! Persistence sinks that record or refuse saves

use async_trait::async_trait;
use cardflow::{DocumentRecord, PersistenceSink, SinkError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Keeps every saved record in order.
#[derive(Default)]
pub struct RecordingSink {
    saves: Mutex<Vec<DocumentRecord>>,
}

impl RecordingSink {
    pub fn saves(&self) -> Vec<DocumentRecord> {
        self.saves.lock().unwrap().clone()
    }
}

#[async_trait]
impl PersistenceSink for RecordingSink {
    async fn save(&self, record: &DocumentRecord) -> Result<(), SinkError> {
        self.saves.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Fails until `recover` is called.
#[derive(Default)]
pub struct FlakySink {
    healthy: AtomicBool,
    inner: RecordingSink,
}

impl FlakySink {
    pub fn recover(&self) {
        self.healthy.store(true, Ordering::SeqCst);
    }

    pub fn saves(&self) -> Vec<DocumentRecord> {
        self.inner.saves()
    }
}

#[async_trait]
impl PersistenceSink for FlakySink {
    async fn save(&self, record: &DocumentRecord) -> Result<(), SinkError> {
        if !self.healthy.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("disk offline".to_string()));
        }
        self.inner.save(record).await
    }
}
