//! In-memory transport for development and testing
//!
//! Stores stamped records in a `Vec` with configurable max capacity.

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{AuditEvent, AuditRecord};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory audit sink
///
/// Cloning shares the underlying buffer, so a test can keep one handle
/// while the `AuditLog` owns another.
#[derive(Clone)]
pub struct MemoryTransport {
    records: Arc<RwLock<Vec<AuditRecord>>>,
    max_records: usize,
    events_only: bool,
}

impl MemoryTransport {
    /// Create a transport keeping at most `max_records` (0 = unbounded)
    pub fn new(max_records: usize) -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            max_records,
            events_only: false,
        }
    }

    /// Drop message records, keeping only events (same filter as the
    /// MongoDB transport)
    pub fn events_only(mut self) -> Self {
        self.events_only = true;
        self
    }

    /// All stored records, oldest first
    pub async fn records(&self) -> Vec<AuditRecord> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait]
impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    async fn emit(&self, event: &AuditEvent) -> Result<()> {
        if self.events_only && !event.is_event() {
            return Ok(());
        }

        let mut records = self.records.write().await;
        records.push(AuditRecord::stamp(event));

        // Enforce max capacity
        if self.max_records > 0 && records.len() > self.max_records {
            let drain_count = records.len() - self.max_records;
            records.drain(..drain_count);
        }

        Ok(())
    }
}
