//! Memory transport integration tests
//!
//! End-to-end tests exercising the schema → plugin → audit log →
//! transport path with the in-memory transport.

use audit_log::{
    Action, AuditLog, AuditPlugin, ConsoleTransport, MemoryTransport, PluginOptions, Schema,
};
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct Article {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "__v")]
    version: u32,
    title: String,
    #[serde(rename = "updatedBy", skip_serializing_if = "Option::is_none")]
    updated_by: Option<String>,
}

fn article(version: u32) -> Article {
    Article {
        id: "a-1".to_string(),
        version,
        title: "Release notes".to_string(),
        updated_by: Some("editor-7".to_string()),
    }
}

fn article_schema(options: PluginOptions) -> (Schema, MemoryTransport) {
    let memory = MemoryTransport::default();
    let log = AuditLog::new()
        .with_transport(memory.clone())
        .with_transport(ConsoleTransport::new());
    let schema = Schema::new("Article").plugin(AuditPlugin::new(log, options));
    (schema, memory)
}

fn article_options() -> PluginOptions {
    PluginOptions::for_model("Article")
        .with_name_path("title")
        .with_user_id_path("updatedBy")
}

// ─── Lifecycle ───────────────────────────────────────────────────

#[tokio::test]
async fn test_full_document_lifecycle() {
    let (schema, memory) = article_schema(article_options());

    schema.fire_post_save(&article(0)).await;
    schema.fire_post_save(&article(1)).await;
    schema.fire_post_remove(&article(1)).await;

    let records = memory.records().await;
    assert_eq!(records.len(), 3);

    let actions: Vec<_> = records.iter().map(|r| r.action.clone().unwrap()).collect();
    assert_eq!(actions, vec!["created", "updated", "removed"]);

    assert_eq!(records[0].description, "Created \"Release notes\"");
    assert_eq!(records[1].description, "Updated \"Release notes\"");

    // Removal stores the snapshot by default
    let snapshot: serde_json::Value = serde_json::from_str(&records[2].description).unwrap();
    assert_eq!(snapshot["_id"], "a-1");
    assert_eq!(snapshot["title"], "Release notes");

    for record in &records {
        assert_eq!(record.label, "Article");
        assert_eq!(record.origin, "mongoose");
        assert_eq!(record.object.as_deref(), Some("a-1"));
        assert_eq!(record.actor.as_deref(), Some("editor-7"));
    }
}

#[tokio::test]
async fn test_records_are_dated_at_write_time() {
    let (schema, memory) = article_schema(article_options());
    let before = chrono::Utc::now();
    schema.fire_post_save(&article(0)).await;
    let after = chrono::Utc::now();

    let record = &memory.records().await[0];
    assert!(record.date >= before && record.date <= after);
}

// ─── Options ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_merged_options_from_json() {
    let options = PluginOptions::merge(&json!({
        "modelName": "Article",
        "namePath": "title",
        "idPath": "slug",
        "storeDoc": [],
        "messages": {"removed": "Deleted article %s"}
    }))
    .unwrap();
    let (schema, memory) = article_schema(options);

    schema
        .fire_post_remove(&json!({"slug": "release-notes", "title": "Release notes"}))
        .await;

    let record = &memory.records().await[0];
    assert_eq!(record.action.as_deref(), Some("removed"));
    assert_eq!(record.description, "Deleted article Release notes");
    assert_eq!(record.object.as_deref(), Some("release-notes"));
    assert!(record.actor.is_none());
}

#[tokio::test]
async fn test_store_doc_by_action_name() {
    let (schema, memory) = article_schema(article_options().with_store_doc(["created"]));

    schema.fire_post_save(&article(0)).await;
    schema.fire_post_save(&article(3)).await;

    let records = memory.records().await;
    assert!(records[0].description.starts_with('{'));
    assert_eq!(records[1].description, "Updated \"Release notes\"");
}

// ─── Direct logging ──────────────────────────────────────────────

#[tokio::test]
async fn test_direct_log_event_and_message() {
    let memory = MemoryTransport::default().events_only();
    let log = AuditLog::new().with_transport(memory.clone());

    log.log_event(
        Some("admin".to_string()),
        "cli",
        Action::Updated,
        "Settings",
        Some("global".to_string()),
        "Changed retention",
    )
    .await;
    log.log_message("cli", "ignored by events-only sinks").await;

    let records = memory.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].origin, "cli");
    assert_eq!(records[0].label, "Settings");
}

#[tokio::test]
async fn test_concurrent_hooks() {
    let (schema, memory) = article_schema(article_options());
    let schema = std::sync::Arc::new(schema);

    let mut handles = Vec::new();
    for i in 0..20u32 {
        let schema = schema.clone();
        handles.push(tokio::spawn(async move {
            schema
                .fire_post_save(&json!({"_id": format!("a-{}", i), "__v": i % 2, "title": "t"}))
                .await;
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let records = memory.records().await;
    assert_eq!(records.len(), 20);
    let created = records
        .iter()
        .filter(|r| r.action.as_deref() == Some("created"))
        .count();
    assert_eq!(created, 10);
}
