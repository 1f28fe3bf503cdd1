//! The audit log: generic logging interface over pluggable transports
//!
//! `AuditLog` builds audit events and fans each one out to every
//! registered transport. Transport failures are logged and swallowed;
//! nothing is returned to the caller that triggered the event.

use crate::transport::Transport;
use crate::types::{Action, AuditEvent};
use futures::future::join_all;
use std::sync::Arc;

/// Audit log backed by any number of transports
///
/// Cheap to clone: clones share the same transports.
#[derive(Clone, Default)]
pub struct AuditLog {
    transports: Vec<Arc<dyn Transport>>,
}

impl AuditLog {
    /// Create an audit log with no transports
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style transport registration
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transports.push(Arc::new(transport));
        self
    }

    /// Register a shared transport
    pub fn add_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transports.push(transport);
    }

    /// Names of the registered transports, in registration order
    pub fn transport_names(&self) -> Vec<&str> {
        self.transports.iter().map(|t| t.name()).collect()
    }

    /// Build and emit an event record
    pub async fn log_event(
        &self,
        actor: Option<String>,
        origin: &str,
        action: Action,
        label: &str,
        object: Option<String>,
        description: &str,
    ) -> AuditEvent {
        let event = AuditEvent::new(actor, origin, action, label, object, description);
        self.emit(&event).await;
        event
    }

    /// Emit a free-form message record
    pub async fn log_message(&self, origin: &str, message: &str) -> AuditEvent {
        let event = AuditEvent::message(origin, message);
        self.emit(&event).await;
        event
    }

    /// Send an event to every transport concurrently
    ///
    /// Each transport gets exactly one attempt. Failures are logged.
    pub async fn emit(&self, event: &AuditEvent) {
        let writes = self.transports.iter().map(|transport| async move {
            if let Err(e) = transport.emit(event).await {
                tracing::warn!(
                    transport = transport.name(),
                    event_id = %event.id,
                    error = %e,
                    "Failed to emit audit event"
                );
            }
        });
        join_all(writes).await;

        tracing::debug!(
            event_id = %event.id,
            action = ?event.action,
            label = %event.label,
            transports = self.transports.len(),
            "Audit event emitted"
        );
    }

    /// Fire-and-forget variant of `emit` for synchronous callers
    ///
    /// Must be called from within a tokio runtime.
    pub fn emit_detached(&self, event: AuditEvent) -> tokio::task::JoinHandle<()> {
        let log = self.clone();
        tokio::spawn(async move { log.emit(&event).await })
    }

    /// Health of every transport, keyed by name
    pub async fn health(&self) -> Vec<(String, bool)> {
        let checks = self.transports.iter().map(|transport| async move {
            let healthy = transport.health().await.unwrap_or(false);
            (transport.name().to_string(), healthy)
        });
        join_all(checks).await
    }
}
