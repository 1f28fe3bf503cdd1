//! Core audit types
//!
//! All types use camelCase JSON serialization for wire compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The state change an audit event describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Created,
    Updated,
    Removed,
}

impl Action {
    /// Wire name (`created`, `updated`, `removed`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Removed => "removed",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record flowing through the audit log
///
/// Persistent transports only store `Event` records; `Message` records
/// are free-form diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    #[default]
    Event,
    Message,
}

/// A single normalized audit event
///
/// Created per lifecycle callback and handed straight to the transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEvent {
    /// Correlation id (aud-<uuid>), not persisted
    pub id: String,

    #[serde(default)]
    pub kind: LogKind,

    /// Identifier of the acting user, if known
    pub actor: Option<String>,

    /// Fixed tag naming the producer (e.g. "mongoose")
    pub origin: String,

    /// `None` for message records
    pub action: Option<Action>,

    /// Model or collection name
    pub label: String,

    /// Identifier of the affected record
    pub object: Option<String>,

    /// Formatted sentence or full JSON snapshot
    pub description: String,
}

impl AuditEvent {
    /// Create an event record with an auto-generated id
    pub fn new(
        actor: Option<String>,
        origin: impl Into<String>,
        action: Action,
        label: impl Into<String>,
        object: Option<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            kind: LogKind::Event,
            actor,
            origin: origin.into(),
            action: Some(action),
            label: label.into(),
            object,
            description: description.into(),
        }
    }

    /// Create a free-form message record
    pub fn message(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            kind: LogKind::Message,
            actor: None,
            origin: origin.into(),
            action: None,
            label: String::new(),
            object: None,
            description: message.into(),
        }
    }

    pub fn is_event(&self) -> bool {
        self.kind == LogKind::Event
    }
}

/// The flat record a transport persists
///
/// `date` is set when the record is written, not when the event is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub actor: Option<String>,
    pub date: DateTime<Utc>,
    pub origin: String,
    pub action: Option<String>,
    pub label: String,
    pub object: Option<String>,
    pub description: String,
}

impl AuditRecord {
    /// Flatten an event and stamp it with the current time
    pub fn stamp(event: &AuditEvent) -> Self {
        Self::stamp_at(event, Utc::now())
    }

    pub fn stamp_at(event: &AuditEvent, date: DateTime<Utc>) -> Self {
        Self {
            actor: event.actor.clone(),
            date,
            origin: event.origin.clone(),
            action: event.action.map(|a| a.as_str().to_string()),
            label: event.label.clone(),
            object: event.object.clone(),
            description: event.description.clone(),
        }
    }
}

fn new_id() -> String {
    format!("aud-{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = AuditEvent::new(
            Some("user-1".to_string()),
            "mongoose",
            Action::Created,
            "Post",
            Some("p-1".to_string()),
            "Created \"Hello\"",
        );

        assert!(event.id.starts_with("aud-"));
        assert!(event.is_event());
        assert_eq!(event.action, Some(Action::Created));
        assert_eq!(event.label, "Post");
        assert_eq!(event.object.as_deref(), Some("p-1"));
    }

    #[test]
    fn test_message_record() {
        let event = AuditEvent::message("app", "started");
        assert_eq!(event.kind, LogKind::Message);
        assert!(event.action.is_none());
        assert_eq!(event.description, "started");
    }

    #[test]
    fn test_action_wire_names() {
        assert_eq!(serde_json::to_string(&Action::Created).unwrap(), "\"created\"");
        assert_eq!(serde_json::to_string(&Action::Updated).unwrap(), "\"updated\"");
        assert_eq!(serde_json::to_string(&Action::Removed).unwrap(), "\"removed\"");
        assert_eq!(Action::Removed.to_string(), "removed");
    }

    #[test]
    fn test_record_stamp() {
        let event = AuditEvent::new(
            None,
            "mongoose",
            Action::Removed,
            "Post",
            Some("p-1".to_string()),
            "{}",
        );
        let date = DateTime::parse_from_rfc3339("2024-01-02T03:04:05Z")
            .unwrap()
            .with_timezone(&Utc);

        let record = AuditRecord::stamp_at(&event, date);
        assert_eq!(record.date, date);
        assert_eq!(record.action.as_deref(), Some("removed"));
        assert!(record.actor.is_none());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["origin"], "mongoose");
        assert_eq!(json["object"], "p-1");
        assert!(json.get("id").is_none());
    }
}
