// SPDX-License-Identifier: MIT OR Apache-2.0

//! Redis backend.
//!
//! This module provides the `redis://host:port/key` scheme. The whole document
//! is stored as one JSON string under `key`, so `dump` is a single `SET` and
//! other clients never observe a half-written document.

use crate::adapters::json_file::JsonCodec;
use crate::domain::{Document, KvError, Result, StoreLocation};
use crate::ports::{BackendFactory, DocumentCodec, KvBackend};
use once_cell::sync::Lazy;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use std::future::Future;
use std::sync::Arc;

/// Shared runtime so each load/dump does not pay for creating a new one.
static RUNTIME: Lazy<std::io::Result<tokio::runtime::Runtime>> =
    Lazy::new(tokio::runtime::Runtime::new);

/// Used when the location has no `host:port`.
const DEFAULT_ENDPOINT: &str = "127.0.0.1:6379";

/// Backend storing a document as JSON in a single Redis key.
///
/// # Missing keys
///
/// `load` of a key that does not exist returns an empty document. A server
/// that cannot be reached, or a value that is not a JSON object, fails with
/// [`KvError::BackendUnavailable`].
///
/// # Examples
///
/// ```rust,no_run
/// use hexkv::adapters::RedisBackend;
/// use hexkv::ports::KvBackend;
///
/// let backend = RedisBackend::new("127.0.0.1:6379", "myapp:config").unwrap();
/// let document = backend.load().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct RedisBackend {
    /// Redis client
    client: Arc<Client>,
    /// `host:port` the client connects to
    endpoint: String,
    /// Key holding the document
    key: String,
}

impl RedisBackend {
    /// Validates the key to prevent pattern injection
    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(KvError::invalid_arguments(
                "Redis location must name a key, e.g. redis://host:6379/myapp:config",
            ));
        }
        if key.contains(['*', '?', '[', ']', '\\']) {
            return Err(KvError::invalid_arguments(
                "Redis key contains invalid characters (* ? [ ] \\)",
            ));
        }
        Ok(())
    }

    /// Creates a backend for `key` on the server at `endpoint` (`host:port`).
    ///
    /// No connection is made until the first `load` or `dump`.
    pub fn new(endpoint: &str, key: &str) -> Result<Self> {
        Self::validate_key(key)?;

        let endpoint = if endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            endpoint
        };
        let client = Client::open(format!("redis://{}", endpoint)).map_err(|e| {
            KvError::backend("redis", format!("Failed to create Redis client: {}", e), e)
        })?;

        Ok(Self {
            client: Arc::new(client),
            endpoint: endpoint.to_string(),
            key: key.to_string(),
        })
    }

    /// Returns the `host:port` this backend connects to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the key holding the document.
    pub fn key(&self) -> &str {
        &self.key
    }

    async fn connect(client: &Client) -> Result<MultiplexedConnection> {
        client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| KvError::backend("redis", format!("Failed to connect to Redis: {}", e), e))
    }
}

/// Drives `future` to completion on the shared runtime.
///
/// When already inside a tokio runtime the work moves to a separate thread,
/// since blocking the caller's executor would deadlock it.
fn block_on<F, T>(future: F) -> Result<T>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let runtime = RUNTIME.as_ref().map_err(|e| {
        KvError::backend_msg("redis", format!("Failed to create runtime for Redis backend: {}", e))
    })?;

    if tokio::runtime::Handle::try_current().is_ok() {
        std::thread::spawn(move || runtime.block_on(future))
            .join()
            .map_err(|_| KvError::backend_msg("redis", "Redis worker thread panicked"))?
    } else {
        runtime.block_on(future)
    }
}

impl KvBackend for RedisBackend {
    fn name(&self) -> &str {
        Self::SCHEME
    }

    fn load(&self) -> Result<Document> {
        let client = Arc::clone(&self.client);
        let key = self.key.clone();

        let raw: Option<String> = block_on(async move {
            let mut conn = Self::connect(&client).await?;
            conn.get(&key).await.map_err(|e| {
                KvError::backend("redis", format!("Failed to fetch '{}' from Redis: {}", key, e), e)
            })
        })?;

        match raw {
            Some(raw) => {
                let document = JsonCodec::new().decode(&raw).map_err(|e| {
                    KvError::backend("redis", format!("Malformed document in '{}'", self.key), e)
                })?;
                tracing::debug!("Loaded '{}' from redis://{}", self.key, self.endpoint);
                Ok(document)
            }
            None => {
                tracing::debug!(
                    "'{}' does not exist on redis://{} yet, starting from an empty document",
                    self.key,
                    self.endpoint
                );
                Ok(Document::new())
            }
        }
    }

    fn dump(&self, document: &Document) -> Result<()> {
        let payload = JsonCodec::new().encode(document)?;
        let client = Arc::clone(&self.client);
        let key = self.key.clone();

        block_on(async move {
            let mut conn = Self::connect(&client).await?;
            conn.set::<_, _, ()>(&key, payload).await.map_err(|e| {
                KvError::backend("redis", format!("Failed to store '{}' in Redis: {}", key, e), e)
            })
        })?;

        tracing::debug!("Dumped '{}' to redis://{}", self.key, self.endpoint);
        Ok(())
    }
}

impl BackendFactory for RedisBackend {
    const SCHEME: &'static str = "redis";

    fn open(location: &StoreLocation) -> Result<Self> {
        Self::new(location.loc(), location.path().trim_start_matches('/'))
    }
}
