//! Plugin configuration and override merging

use crate::error::{AuditError, Result};
use crate::path::FieldPath;
use crate::types::Action;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Lifecycle callback that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    Save,
    Remove,
}

impl Hook {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::Save => "save",
            Hook::Remove => "remove",
        }
    }
}

/// Per-action message templates (`%s` receives the name field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub created: String,
    pub updated: String,
    pub removed: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            created: "Created \"%s\"".to_string(),
            updated: "Updated \"%s\"".to_string(),
            removed: "Removed \"%s\"".to_string(),
        }
    }
}

impl Messages {
    pub fn template(&self, action: Action) -> &str {
        match action {
            Action::Created => &self.created,
            Action::Updated => &self.updated,
            Action::Removed => &self.removed,
        }
    }
}

/// Options for `AuditPlugin`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Recorded as the event label
    pub model_name: String,

    /// Origin tag stamped on every event
    pub origin: String,

    /// Field holding a human-readable name for templates
    pub name_path: Option<FieldPath>,

    /// Field holding the acting user's id
    pub user_id_path: Option<FieldPath>,

    /// Field holding the document's unique id
    pub id_path: FieldPath,

    /// Field holding the document version; `0` marks a new document
    pub version_path: FieldPath,

    pub debug: bool,

    /// Hooks (`save`, `remove`) or actions (`created`, `updated`,
    /// `removed`) whose description is the full document snapshot
    pub store_doc: Vec<String>,

    pub messages: Messages,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            model_name: "untitled".to_string(),
            origin: "mongoose".to_string(),
            name_path: None,
            user_id_path: None,
            id_path: FieldPath::new("_id"),
            version_path: FieldPath::new("__v"),
            debug: false,
            store_doc: vec!["remove".to_string()],
            messages: Messages::default(),
        }
    }
}

impl PluginOptions {
    /// Options for a model with every other field defaulted
    pub fn for_model(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Default::default()
        }
    }

    /// Deep-merge a JSON object of overrides onto the defaults
    ///
    /// Nested objects merge key by key and `null` values are ignored.
    /// Arrays replace the default wholesale rather than merging by index,
    /// so `{"storeDoc": []}` disables snapshots entirely.
    pub fn merge(overrides: &Value) -> Result<Self> {
        Self::default().merged(overrides)
    }

    /// Deep-merge overrides onto these options
    pub fn merged(&self, overrides: &Value) -> Result<Self> {
        if !overrides.is_object() && !overrides.is_null() {
            return Err(AuditError::Config(
                "Plugin overrides must be a JSON object".to_string(),
            ));
        }

        let mut base = serde_json::to_value(self)?;
        deep_merge(&mut base, overrides);
        Ok(serde_json::from_value(base)?)
    }

    pub fn with_name_path(mut self, path: impl Into<FieldPath>) -> Self {
        self.name_path = Some(path.into());
        self
    }

    pub fn with_user_id_path(mut self, path: impl Into<FieldPath>) -> Self {
        self.user_id_path = Some(path.into());
        self
    }

    pub fn with_store_doc<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.store_doc = entries.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the description for this hook/action is a full snapshot
    pub fn stores_document(&self, hook: Hook, action: Action) -> bool {
        self.store_doc
            .iter()
            .any(|entry| entry == hook.as_str() || entry == action.as_str())
    }
}

fn deep_merge(target: &mut Value, overrides: &Value) {
    match (target, overrides) {
        (Value::Object(target), Value::Object(overrides)) => {
            for (key, value) in overrides {
                if value.is_null() {
                    continue;
                }
                match target.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        deep_merge(existing, value)
                    }
                    _ => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (target, value) => *target = value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let opts = PluginOptions::default();
        assert_eq!(opts.model_name, "untitled");
        assert_eq!(opts.id_path.as_str(), "_id");
        assert_eq!(opts.version_path.as_str(), "__v");
        assert_eq!(opts.store_doc, vec!["remove"]);
        assert_eq!(opts.messages.template(Action::Created), "Created \"%s\"");
        assert!(opts.name_path.is_none());
    }

    #[test]
    fn test_merge_keeps_unspecified_messages() {
        let opts = PluginOptions::merge(&json!({
            "modelName": "Post",
            "namePath": "title",
            "messages": {"created": "New post %s"}
        }))
        .unwrap();

        assert_eq!(opts.model_name, "Post");
        assert_eq!(opts.name_path, Some(FieldPath::new("title")));
        assert_eq!(opts.messages.created, "New post %s");
        assert_eq!(opts.messages.updated, "Updated \"%s\"");
        assert_eq!(opts.id_path.as_str(), "_id");
    }

    #[test]
    fn test_merge_replaces_arrays() {
        let opts = PluginOptions::merge(&json!({"storeDoc": ["save"]})).unwrap();
        assert_eq!(opts.store_doc, vec!["save"]);

        let opts = PluginOptions::merge(&json!({"storeDoc": []})).unwrap();
        assert!(opts.store_doc.is_empty());
    }

    #[test]
    fn test_merge_null_is_noop() {
        assert_eq!(PluginOptions::merge(&Value::Null).unwrap(), PluginOptions::default());
    }

    #[test]
    fn test_merge_ignores_null_values() {
        let opts = PluginOptions::merge(&json!({
            "modelName": null,
            "namePath": "title",
            "messages": {"created": null, "updated": "Edited %s"}
        }))
        .unwrap();

        assert_eq!(opts.model_name, "untitled");
        assert_eq!(opts.name_path, Some(FieldPath::new("title")));
        assert_eq!(opts.messages.created, "Created \"%s\"");
        assert_eq!(opts.messages.updated, "Edited %s");
    }

    #[test]
    fn test_merge_rejects_non_object() {
        assert!(matches!(
            PluginOptions::merge(&json!(["modelName"])),
            Err(AuditError::Config(_))
        ));
    }

    #[test]
    fn test_stores_document_by_hook_or_action() {
        let opts = PluginOptions::default();
        assert!(opts.stores_document(Hook::Remove, Action::Removed));
        assert!(!opts.stores_document(Hook::Save, Action::Created));

        let opts = opts.with_store_doc(["updated"]);
        assert!(opts.stores_document(Hook::Save, Action::Updated));
        assert!(!opts.stores_document(Hook::Save, Action::Created));
        assert!(!opts.stores_document(Hook::Remove, Action::Removed));
    }
}
