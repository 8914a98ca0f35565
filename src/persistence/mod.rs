//! Persistence sinks
//!
//! The engine hands every save to a [`PersistenceSink`] and only tracks the
//! outcome. `SqliteSink` is the durable implementation; `MemorySink` serves
//! tests and embedding hosts that persist elsewhere.

mod memory;
mod sqlite;
mod traits;

pub use memory::MemorySink;
pub use sqlite::SqliteSink;
pub use traits::{DocumentRecord, PersistenceSink, SaveStatus, SinkError, SinkResult};
