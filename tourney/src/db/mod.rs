//! Database module providing the document store abstraction.
//!
//! [`Database`] owns the MongoDB client; everything above it works against
//! the [`DocumentStore`] trait so tests can swap in a [`MemoryStore`].

use std::time::Duration;

use mongodb::{
    Client,
    bson::doc,
    options::ClientOptions,
};

pub mod config;
pub mod memory;
pub mod mongo;
pub mod store;

pub use config::DatabaseConfig;
pub use mongodb::bson;
pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use store::{DocumentStore, StoreError, StoreResult};

/// MongoDB client wrapper
#[derive(Clone)]
pub struct Database {
    client: Client,
    database: mongodb::Database,
}

impl Database {
    /// Create a new MongoDB client
    ///
    /// The driver connects lazily, so this only fails on a malformed
    /// connection string or invalid options. Use [`Database::health_check`]
    /// to verify the server is reachable.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tourney::db::{Database, DatabaseConfig};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), tourney::db::StoreError> {
    ///     let config = DatabaseConfig::new("mongodb://localhost:27017", "esports");
    ///     let db = Database::new(&config).await?;
    ///     db.health_check().await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn new(config: &DatabaseConfig) -> StoreResult<Self> {
        let mut options = ClientOptions::parse(&config.database_url).await?;
        options.app_name = Some(config.app_name.clone());
        options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
        options.server_selection_timeout =
            Some(Duration::from_secs(config.server_selection_timeout_secs));
        options.max_pool_size = Some(config.max_pool_size);
        options.min_pool_size = Some(config.min_pool_size);

        let client = Client::with_options(options)?;
        let database = client.database(&config.database_name);

        Ok(Self { client, database })
    }

    /// Document store over this database
    pub fn store(&self) -> MongoStore {
        MongoStore::new(self.database.clone())
    }

    /// Check if the database server answers a ping
    pub async fn health_check(&self) -> StoreResult<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Close the client and its connection pool
    pub async fn close(self) {
        self.client.shutdown().await;
    }
}
