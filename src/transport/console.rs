//! Console transport: writes audit records through `tracing`

use crate::error::Result;
use crate::transport::Transport;
use crate::types::AuditEvent;
use async_trait::async_trait;

#[derive(Debug, Clone, Default)]
pub struct ConsoleTransport;

impl ConsoleTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Transport for ConsoleTransport {
    fn name(&self) -> &str {
        "console"
    }

    async fn emit(&self, event: &AuditEvent) -> Result<()> {
        match event.action {
            Some(action) => tracing::info!(
                event_id = %event.id,
                actor = ?event.actor,
                origin = %event.origin,
                action = %action,
                label = %event.label,
                object = ?event.object,
                "{}",
                event.description
            ),
            None => tracing::info!(
                event_id = %event.id,
                origin = %event.origin,
                "{}",
                event.description
            ),
        }
        Ok(())
    }
}
