//! # MongoDB
//!
//! Document store holding every visit.
//!
//! ## Layout
//!
//! - Database `personal`, collection `pho-tracker` (both overridable, see [`crate::config`])
//! - One document per visit, inserted by hand, never touched by this server
//!
//! ## Connection
//!
//! - One [`Client`] per process, built lazily on the first request
//! - The client is a pool, so every request after that reuses it as-is
//! - No retries and no timeouts beyond the driver defaults
//! - A missing URI is not fatal at startup, it fails the first call instead
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client,
    bson::{Document, doc},
};
use tokio::sync::OnceCell;
use tracing::{error, info};

use crate::{config::Config, error::AppError, models::VisitRecord};

pub const ADMIN_DATABASE: &str = "admin";

/// Read side of the visit log.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Cheapest round trip the server will answer.
    async fn ping(&self) -> Result<(), AppError>;

    /// Newest visits first, at most `limit` of them.
    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, AppError>;
}

pub struct MongoStore {
    uri: Option<String>,
    database: String,
    collection: String,
    client: OnceCell<Client>,
}

impl MongoStore {
    pub fn new(config: &Config) -> Self {
        Self {
            uri: config.mongodb_uri.clone(),
            database: config.database.clone(),
            collection: config.collection.clone(),
            client: OnceCell::new(),
        }
    }

    async fn client(&self) -> Result<&Client, AppError> {
        self.client
            .get_or_try_init(|| async {
                let uri = self.uri.as_deref().ok_or(AppError::MissingUri)?;

                info!("Initializing MongoDB client...");
                Ok(Client::with_uri_str(uri).await?)
            })
            .await
    }
}

#[async_trait]
impl VisitStore for MongoStore {
    async fn ping(&self) -> Result<(), AppError> {
        self.client()
            .await?
            .database(ADMIN_DATABASE)
            .run_command(doc! { "ping": 1 })
            .await?;

        Ok(())
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<VisitRecord>, AppError> {
        let cursor = self
            .client()
            .await?
            .database(&self.database)
            .collection::<VisitRecord>(&self.collection)
            .find(recent_visits_filter())
            .sort(recent_visits_sort())
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }
}

/// Every visit, nothing filtered out.
pub fn recent_visits_filter() -> Document {
    Document::new()
}

/// Newest `date` first.
pub fn recent_visits_sort() -> Document {
    doc! { "date": -1 }
}

/// Single ping, never retried. Any failure is logged and reported as `false`.
pub async fn test_database_connection(store: &dyn VisitStore) -> bool {
    match store.ping().await {
        Ok(()) => {
            info!("Pinged your deployment. You successfully connected to MongoDB!");
            true
        }
        Err(e) => {
            error!("Database ping failed: {e}");
            false
        }
    }
}
