use std::sync::LazyLock;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use mongodb::{bson::doc, options::ClientOptions, Client, Collection, Database};
use regex::Regex;

use crate::utils::errors::StoreError;

static MONGO_URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mongodb(\+srv)?://([^/\s]+)(/.*)?$").expect("static pattern compiles")
});

/// Owns the pooled client for the lifetime of the process.
#[derive(Clone, Debug)]
pub struct MongoContext {
    client: Client,
    db: Database
}

impl MongoContext {

    /// Connects and pings `db_name`; an unreachable server is an error, not a lazy failure.
    pub async fn init(uri: &str, db_name: &str, timeout: Duration) -> Result<MongoContext, StoreError> {
        log::info!("Attempting to connect to MongoDB database: {}", db_name);

        Self::validate_mongo_uri(uri)?;

        let mut client_options = ClientOptions::parse(uri.trim()).await?;

        client_options.app_name = Some("AdoptoApp".to_string());
        client_options.server_selection_timeout = Some(timeout);

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Unavailable(format!("Failed to connect to MongoDB: {}", e)))?;

        log::info!("Successfully connected to MongoDB database: {}", db_name);

        Ok(MongoContext { client, db })
    }

    pub fn get_db(&self) -> &Database {
        &self.db
    }

    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync + Unpin + for<'de> Deserialize<'de> + Serialize,
    {
        self.db.collection::<T>(name)
    }

    /// Waits for in-flight operations and closes the pool.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
        log::info!("MongoDB connection closed");
    }

    fn validate_mongo_uri(uri: &str) -> Result<(), StoreError> {
        let trimmed_uri = uri.trim();
        if trimmed_uri.is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "Invalid MongoDB URI: cannot be empty or whitespace".to_string()
            ));
        }

        let host_part = match trimmed_uri
            .strip_prefix("mongodb://")
            .or_else(|| trimmed_uri.strip_prefix("mongodb+srv://"))
        {
            Some(rest) => rest,
            None => return Err(StoreError::InvalidConfiguration(
                "Invalid MongoDB URI: must start with 'mongodb://' or 'mongodb+srv://'".to_string()
            )),
        };

        if host_part.trim().is_empty() {
            return Err(StoreError::InvalidConfiguration(
                "Invalid MongoDB URI: missing host after protocol".to_string()
            ));
        }

        if trimmed_uri.contains(char::is_whitespace) {
            return Err(StoreError::InvalidConfiguration(
                "Invalid MongoDB URI: cannot contain whitespace".to_string()
            ));
        }

        // Credentials stay out of the message.
        if !MONGO_URI_PATTERN.is_match(trimmed_uri) {
            return Err(StoreError::InvalidConfiguration(
                "Invalid MongoDB URI format. Expected mongodb://host[:port][/database] or mongodb+srv://host[/database]".to_string()
            ));
        }

        Ok(())
    }

}
