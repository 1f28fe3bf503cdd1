//! ORM lifecycle plugin
//!
//! `AuditPlugin` turns post-save and post-remove callbacks into audit
//! events and hands them to an `AuditLog`. Attach it to a model's
//! `Schema` (or call the hooks directly from any ORM layer):
//!
//! ```rust
//! use audit_log::{AuditLog, AuditPlugin, PluginOptions, Schema};
//! use audit_log::transport::memory::MemoryTransport;
//!
//! # async fn example() {
//! let memory = MemoryTransport::default();
//! let log = AuditLog::new().with_transport(memory.clone());
//!
//! let plugin = AuditPlugin::new(log, PluginOptions::for_model("Post").with_name_path("title"));
//! let schema = Schema::new("Post").plugin(plugin);
//!
//! schema
//!     .fire_post_save(&serde_json::json!({"_id": "p1", "__v": 0, "title": "Hello"}))
//!     .await;
//! assert_eq!(memory.records().await[0].description, "Created \"Hello\"");
//! # }
//! ```

mod options;

pub use options::{Hook, Messages, PluginOptions};

use crate::format::format_message;
use crate::path::is_truthy;
use crate::schema::DocumentHooks;
use crate::store::AuditLog;
use crate::types::{Action, AuditEvent};
use async_trait::async_trait;
use serde_json::Value;

/// Audit plugin for one model
#[derive(Clone)]
pub struct AuditPlugin {
    audit_log: AuditLog,
    options: PluginOptions,
}

impl AuditPlugin {
    pub fn new(audit_log: AuditLog, options: PluginOptions) -> Self {
        Self { audit_log, options }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// `Created` when the version field exists and is zero, else `Updated`
    pub fn resolve_action(&self, doc: &Value) -> Action {
        let is_new = self
            .options
            .version_path
            .resolve(doc)
            .map(is_zero)
            .unwrap_or(false);

        if is_new {
            Action::Created
        } else {
            Action::Updated
        }
    }

    /// Description for an event: full snapshot or formatted template
    pub fn describe(&self, hook: Hook, action: Action, doc: &Value) -> String {
        if self.options.stores_document(hook, action) {
            return doc.to_string();
        }

        let name = self
            .options
            .name_path
            .as_ref()
            .and_then(|path| path.resolve(doc));
        format_message(self.options.messages.template(action), &[name])
    }

    /// Acting user, if the configured field holds a truthy value
    pub fn resolve_actor(&self, doc: &Value) -> Option<String> {
        self.options
            .user_id_path
            .as_ref()
            .and_then(|path| path.resolve(doc))
            .filter(|v| is_truthy(v))
            .and_then(crate::path::value_to_identifier)
    }

    /// Identifier of the affected document
    pub fn resolve_object(&self, doc: &Value) -> Option<String> {
        self.options.id_path.identifier(doc)
    }

    /// Build the audit event for a hook invocation
    pub fn build_event(&self, hook: Hook, doc: &Value) -> AuditEvent {
        let action = match hook {
            Hook::Save => self.resolve_action(doc),
            Hook::Remove => Action::Removed,
        };

        let object = self.resolve_object(doc);
        if object.is_none() && self.options.debug {
            tracing::warn!(
                model = %self.options.model_name,
                id_path = %self.options.id_path,
                "Document has no identifier at the configured id path"
            );
        }

        AuditEvent::new(
            self.resolve_actor(doc),
            self.options.origin.clone(),
            action,
            self.options.model_name.clone(),
            object,
            self.describe(hook, action, doc),
        )
    }

    async fn handle(&self, hook: Hook, doc: &Value) {
        let event = self.build_event(hook, doc);

        if self.options.debug {
            tracing::debug!(
                event_id = %event.id,
                hook = hook.as_str(),
                action = ?event.action,
                label = %event.label,
                "Audit hook fired"
            );
        }

        self.audit_log.emit(&event).await;
    }
}

#[async_trait]
impl DocumentHooks for AuditPlugin {
    async fn post_save(&self, doc: &Value) {
        self.handle(Hook::Save, doc).await;
    }

    async fn post_remove(&self, doc: &Value) {
        self.handle(Hook::Remove, doc).await;
    }
}

/// Loose equality with zero: empty and blank strings count as zero too
fn is_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) if s.trim().is_empty() => true,
        Value::String(s) => s.trim().parse::<f64>().map(|f| f == 0.0).unwrap_or(false),
        Value::Bool(b) => !b,
        _ => false,
    }
}
