//! Transport trait: the sink abstraction for audit events
//!
//! Every sink (MongoDB, in-memory, console) implements `Transport`. The
//! `AuditLog` fans each event out to all registered transports.

use crate::error::Result;
use crate::types::AuditEvent;
use async_trait::async_trait;

pub mod console;
pub mod memory;
pub mod mongo;

/// Core trait for audit sinks
///
/// `emit` performs a single best-effort write. Returned errors are
/// logged by the `AuditLog` and never reach the lifecycle hook that
/// produced the event.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Transport name (e.g., "mongoose", "memory", "console")
    fn name(&self) -> &str;

    /// Persist or forward one event
    async fn emit(&self, event: &AuditEvent) -> Result<()>;

    /// Health check: returns true if the transport can accept writes
    ///
    /// Default implementation always reports healthy.
    async fn health(&self) -> Result<bool> {
        Ok(true)
    }
}
