//! SQLite sink
//!
//! One row per document holding the text and the formatting JSON.

use super::traits::{DocumentRecord, PersistenceSink, SinkError, SinkResult};
use crate::document::DocumentId;
use crate::formatting::FormattingData;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// SQLite-backed document sink. Thread-safe via internal mutex on the connection.
pub struct SqliteSink {
    conn: Mutex<Connection>,
}

impl SqliteSink {
    /// Open or create a database at `path`
    pub fn open(path: impl AsRef<Path>) -> SinkResult<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database (useful for testing)
    pub fn open_in_memory() -> SinkResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> SinkResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id TEXT PRIMARY KEY,
                text TEXT NOT NULL,
                formatting_json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn lock(&self) -> SinkResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| SinkError::Unavailable("connection lock poisoned".to_string()))
    }

    pub fn load(&self, id: &DocumentId) -> SinkResult<Option<DocumentRecord>> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT id, text, formatting_json, updated_at FROM documents WHERE id = ?1",
                params![id.to_string()],
                Self::read_row,
            )
            .optional()?;
        row.map(Self::record_from_row).transpose()
    }

    /// All stored documents, most recently updated first
    pub fn list(&self) -> SinkResult<Vec<DocumentRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT id, text, formatting_json, updated_at FROM documents ORDER BY updated_at DESC",
        )?;
        let rows = stmt
            .query_map([], Self::read_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(Self::record_from_row).collect()
    }

    pub fn delete(&self, id: &DocumentId) -> SinkResult<bool> {
        let conn = self.lock()?;
        let affected = conn.execute("DELETE FROM documents WHERE id = ?1", params![id.to_string()])?;
        Ok(affected > 0)
    }

    fn read_row(row: &Row<'_>) -> rusqlite::Result<(String, String, String, String)> {
        Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
    }

    fn record_from_row(
        (id, text, formatting_json, updated_at): (String, String, String, String),
    ) -> SinkResult<DocumentRecord> {
        let id = DocumentId::parse(&id).map_err(|e| SinkError::Unavailable(format!("bad document id {}: {}", id, e)))?;
        Ok(DocumentRecord {
            id,
            text,
            formatting: FormattingData::from_json(&formatting_json)?,
            updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
                .map_err(|e| SinkError::DateParse(e.to_string()))?
                .with_timezone(&chrono::Utc),
        })
    }
}

#[async_trait]
impl PersistenceSink for SqliteSink {
    async fn save(&self, record: &DocumentRecord) -> SinkResult<()> {
        let formatting_json = serde_json::to_string(&record.formatting)?;
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO documents (id, text, formatting_json, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(id) DO UPDATE SET
                text = excluded.text,
                formatting_json = excluded.formatting_json,
                updated_at = excluded.updated_at
            "#,
            params![
                record.id.to_string(),
                record.text,
                formatting_json,
                record.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatting::{HighlightColor, RangePayload};

    fn record(text: &str) -> DocumentRecord {
        let formatting = FormattingData::new().with_range(
            text.len(),
            0,
            2,
            RangePayload::Highlight(HighlightColor::Yellow),
        );
        DocumentRecord::new(DocumentId::new(), text, formatting)
    }

    #[tokio::test]
    async fn save_then_load() {
        let sink = SqliteSink::open_in_memory().unwrap();
        let saved = record("Hello");
        sink.save(&saved).await.unwrap();

        let loaded = sink.load(&saved.id).unwrap().unwrap();
        assert_eq!(loaded.text, "Hello");
        assert_eq!(loaded.formatting, saved.formatting);
    }

    #[tokio::test]
    async fn save_upserts() {
        let sink = SqliteSink::open_in_memory().unwrap();
        let mut doc = record("first");
        sink.save(&doc).await.unwrap();
        doc.text = "second".to_string();
        doc.formatting = FormattingData::new();
        sink.save(&doc).await.unwrap();

        let all = sink.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].text, "second");
        assert!(all[0].formatting.is_empty());
    }

    #[test]
    fn missing_document_is_none() {
        let sink = SqliteSink::open_in_memory().unwrap();
        assert!(sink.load(&DocumentId::new()).unwrap().is_none());
        assert!(!sink.delete(&DocumentId::new()).unwrap());
    }

    #[tokio::test]
    async fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("docs.db");
        let saved = record("durable");

        {
            let sink = SqliteSink::open(&path).unwrap();
            sink.save(&saved).await.unwrap();
        }

        let sink = SqliteSink::open(&path).unwrap();
        assert_eq!(sink.load(&saved.id).unwrap().unwrap().text, "durable");
        assert!(sink.delete(&saved.id).unwrap());
    }
}
