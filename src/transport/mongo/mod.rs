//! MongoDB audit transport
//!
//! Writes each `Event` record as one document in the configured
//! collection. Writes are best effort: failures are logged when `debug`
//! is enabled and never returned from `emit`.

mod config;

pub use config::{MongoConfig, DEFAULT_CONNECTION_STRING, DEFAULT_DATABASE};

use crate::error::{AuditError, Result};
use crate::transport::Transport;
use crate::types::{AuditEvent, AuditRecord};
use async_trait::async_trait;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TRANSPORT_NAME: &str = "mongoose";

/// Document shape stored in the audit collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredRecord {
    pub actor: Option<String>,
    pub date: BsonDateTime,
    pub origin: String,
    pub action: Option<String>,
    pub label: String,
    pub object: Option<String>,
    pub description: String,
}

impl From<AuditRecord> for StoredRecord {
    fn from(record: AuditRecord) -> Self {
        Self {
            actor: record.actor,
            date: BsonDateTime::from_millis(record.date.timestamp_millis()),
            origin: record.origin,
            action: record.action,
            label: record.label,
            object: record.object,
            description: record.description,
        }
    }
}

struct Connection {
    database: Database,
    collection: Collection<StoredRecord>,
}

/// MongoDB transport
///
/// The client is created once and reused for every write. A transport
/// whose connection string failed to parse stays disconnected and drops
/// every event.
pub struct MongoTransport {
    config: MongoConfig,
    connection: Option<Connection>,
}

impl MongoTransport {
    /// Create the client, surfacing configuration errors
    pub async fn try_connect(config: MongoConfig) -> Result<Self> {
        let uri = config.effective_connection_string();

        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| AuditError::Connection(format!("{}: {}", uri, e)))?;
        if let Some(ms) = config.server_selection_timeout_ms {
            options.server_selection_timeout = Some(Duration::from_millis(ms));
        }

        let client = Client::with_options(options)
            .map_err(|e| AuditError::Connection(format!("{}: {}", uri, e)))?;

        let database = match config.database.as_deref() {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        let collection = database.collection::<StoredRecord>(&config.collection_name);

        tracing::debug!(
            database = %database.name(),
            collection = %config.collection_name,
            "MongoDB audit transport ready"
        );

        Ok(Self {
            config,
            connection: Some(Connection {
                database,
                collection,
            }),
        })
    }

    /// Create the client; on failure, log and return a disconnected
    /// transport that discards events
    pub async fn connect(config: MongoConfig) -> Self {
        match Self::try_connect(config.clone()).await {
            Ok(transport) => transport,
            Err(e) => {
                let transport = Self {
                    config,
                    connection: None,
                };
                transport.debug_error(&format!("could not connect to DB: {}", e));
                transport
            }
        }
    }

    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Write one record, returning any failure
    ///
    /// Message records are skipped.
    pub async fn write(&self, event: &AuditEvent) -> Result<()> {
        if !event.is_event() {
            return Ok(());
        }

        let connection = self
            .connection
            .as_ref()
            .ok_or_else(|| AuditError::NotConnected(TRANSPORT_NAME.to_string()))?;

        let record = StoredRecord::from(AuditRecord::stamp(event));
        connection
            .collection
            .insert_one(&record)
            .await
            .map_err(|e| AuditError::Write {
                transport: TRANSPORT_NAME.to_string(),
                reason: e.to_string(),
            })?;

        Ok(())
    }

    fn debug_message(&self, msg: &str) {
        if self.config.debug {
            tracing::info!(transport = TRANSPORT_NAME, "{}", msg);
        }
    }

    fn debug_error(&self, msg: &str) {
        if self.config.debug {
            tracing::warn!(transport = TRANSPORT_NAME, "{}", msg);
        }
    }
}

#[async_trait]
impl Transport for MongoTransport {
    fn name(&self) -> &str {
        TRANSPORT_NAME
    }

    async fn emit(&self, event: &AuditEvent) -> Result<()> {
        self.debug_message(&format!(
            "emit: {} {:?} {} {:?}",
            event.id, event.action, event.label, event.object
        ));

        if let Err(e) = self.write(event).await {
            self.debug_error(&format!("error saving event to database: {}", e));
        }
        Ok(())
    }

    async fn health(&self) -> Result<bool> {
        let Some(connection) = self.connection.as_ref() else {
            return Ok(false);
        };
        Ok(connection
            .database
            .run_command(doc! { "ping": 1 })
            .await
            .is_ok())
    }
}
