//! In-memory sink

use super::traits::{DocumentRecord, PersistenceSink, SinkResult};
use crate::document::DocumentId;
use async_trait::async_trait;
use dashmap::DashMap;

/// Keeps the latest record per document in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: DashMap<DocumentId, DocumentRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn get(&self, id: &DocumentId) -> Option<DocumentRecord> {
        self.records.get(id).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl PersistenceSink for MemorySink {
    async fn save(&self, record: &DocumentRecord) -> SinkResult<()> {
        self.records.insert(record.id, record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::FormattingData;

    #[tokio::test]
    async fn keeps_latest_record() {
        let sink = MemorySink::new();
        let id = DocumentId::new();

        sink.save(&DocumentRecord::new(id, "first", FormattingData::new())).await.unwrap();
        sink.save(&DocumentRecord::new(id, "second", FormattingData::new())).await.unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.get(&id).unwrap().text, "second");
    }
}
