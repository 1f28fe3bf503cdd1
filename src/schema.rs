//! Document lifecycle hook contract
//!
//! `DocumentHooks` is what an ORM layer calls after a document-level
//! operation completes. `Schema` is a per-model registry that fans a
//! callback out to every attached plugin, in attachment order.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// Post-operation lifecycle callbacks
///
/// Hooks receive a JSON snapshot of the document and cannot fail: a
/// plugin that runs into trouble logs it and returns.
#[async_trait]
pub trait DocumentHooks: Send + Sync {
    /// Called after a document has been saved (inserted or updated)
    async fn post_save(&self, doc: &Value);

    /// Called after a document has been removed
    async fn post_remove(&self, doc: &Value);
}

/// Hook registry for one model
#[derive(Clone, Default)]
pub struct Schema {
    name: String,
    hooks: Vec<Arc<dyn DocumentHooks>>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hooks: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a plugin
    pub fn plugin(mut self, hooks: impl DocumentHooks + 'static) -> Self {
        self.hooks.push(Arc::new(hooks));
        self
    }

    /// Attach a shared plugin
    pub fn add_plugin(&mut self, hooks: Arc<dyn DocumentHooks>) {
        self.hooks.push(hooks);
    }

    pub fn plugin_count(&self) -> usize {
        self.hooks.len()
    }

    /// Run every post-save hook for `doc`
    pub async fn fire_post_save<D: Serialize + ?Sized>(&self, doc: &D) {
        if let Some(snapshot) = self.snapshot(doc, "save") {
            for hooks in &self.hooks {
                hooks.post_save(&snapshot).await;
            }
        }
    }

    /// Run every post-remove hook for `doc`
    pub async fn fire_post_remove<D: Serialize + ?Sized>(&self, doc: &D) {
        if let Some(snapshot) = self.snapshot(doc, "remove") {
            for hooks in &self.hooks {
                hooks.post_remove(&snapshot).await;
            }
        }
    }

    fn snapshot<D: Serialize + ?Sized>(&self, doc: &D, hook: &str) -> Option<Value> {
        match serde_json::to_value(doc) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    schema = %self.name,
                    hook,
                    error = %e,
                    "Failed to snapshot document, skipping hooks"
                );
                None
            }
        }
    }
}
