//! # audit-log
//!
//! Audit logging for ORM lifecycle callbacks with pluggable transports.
//!
//! ## Overview
//!
//! `audit-log` turns document lifecycle callbacks (post-save, post-remove)
//! into normalized audit events and forwards them to one or more
//! transports. The MongoDB transport persists each event as a flat
//! `{actor, date, origin, action, label, object, description}` document.
//!
//! ## Quick Start
//!
//! ```rust
//! use audit_log::{AuditLog, AuditPlugin, MongoConfig, MongoTransport, PluginOptions, Schema};
//!
//! # async fn example() {
//! let transport = MongoTransport::connect(MongoConfig {
//!     connection_string: "mongodb://127.0.0.1:27017/app".to_string(),
//!     debug: true,
//!     ..Default::default()
//! })
//! .await;
//!
//! let log = AuditLog::new().with_transport(transport);
//! let options = PluginOptions::for_model("Post")
//!     .with_name_path("title")
//!     .with_user_id_path("updatedBy");
//!
//! let schema = Schema::new("Post").plugin(AuditPlugin::new(log, options));
//! schema
//!     .fire_post_save(&serde_json::json!({"_id": "p1", "__v": 0, "title": "Hello"}))
//!     .await;
//! # }
//! ```
//!
//! ## Transports
//!
//! - **mongoose**: MongoDB collection writer (best effort, log and forget)
//! - **memory**: in-memory buffer for testing
//! - **console**: structured `tracing` output
//!
//! ## Architecture
//!
//! - **DocumentHooks** trait: what an ORM layer calls after an operation
//! - **AuditPlugin**: maps callbacks to `AuditEvent`s
//! - **AuditLog**: fans events out to transports, swallowing failures
//! - **Transport** trait: sink abstraction all backends implement

pub mod error;
pub mod format;
pub mod path;
pub mod plugin;
pub mod schema;
pub mod store;
pub mod transport;
pub mod types;

// Re-export core types
pub use error::{AuditError, Result};
pub use path::FieldPath;
pub use plugin::{AuditPlugin, Hook, Messages, PluginOptions};
pub use schema::{DocumentHooks, Schema};
pub use store::AuditLog;
pub use transport::Transport;
pub use types::{Action, AuditEvent, AuditRecord, LogKind};

// Re-export transports for convenience
pub use transport::console::ConsoleTransport;
pub use transport::memory::MemoryTransport;
pub use transport::mongo::{MongoConfig, MongoTransport};
