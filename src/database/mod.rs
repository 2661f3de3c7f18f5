use mongodb::{Client, Collection, Database};
use std::collections::HashMap;
use std::error::Error;

/// Shared connection state, built once at startup and never mutated after.
/// Per-request handles are derived from it, never from each other.
#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db_name: String,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        // Test connection
        client.database(db_name).list_collection_names().await?;

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }

    /// Derives a fresh `Database` handle for a single request. The client is
    /// Arc-backed so the clone is cheap, and the returned handle is owned by
    /// the request alone and released on drop.
    pub fn request_database(&self) -> Database {
        self.client.clone().database(&self.db_name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn health_check(&self) -> Result<bool, Box<dyn Error>> {
        self.client
            .database(&self.db_name)
            .list_collection_names()
            .await?;
        Ok(true)
    }
}

/// Per-request bundle of route parameters and an exclusive database handle.
/// Created at the top of each handler, dropped when the handler returns,
/// error paths included.
pub struct RequestContext {
    pub params: HashMap<String, String>,
    pub db: Database,
}

impl RequestContext {
    pub fn new(mongo: &MongoDB, params: HashMap<String, String>) -> Self {
        Self {
            params,
            db: mongo.request_database(),
        }
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}
