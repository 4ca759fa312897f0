//! Data Client
//!
//! HTTP client for the data service with a short-lived read/write-through cache.
//!
//! Every network operation makes exactly one attempt. Failures are logged
//! where they happen and handed back as [`ClientError`]; the cache is only
//! written after a request succeeded.

use std::sync::{Mutex, MutexGuard, PoisonError};

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error, info, warn};

use crate::cache::{CacheStats, DataCache};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::models::ApiResponse;
use crate::schema::{self, DatasetSchema};

// == Data Client ==
/// Client for loading and saving named datasets.
///
/// Construct one per service and share it (e.g. behind an `Arc`); all
/// operations take `&self`.
#[derive(Debug)]
pub struct DataClient {
    /// Underlying HTTP client
    http: Client,
    /// API base URL without trailing slash
    base_url: String,
    /// Per-dataset payload contract
    schema: DatasetSchema,
    /// Dataset cache; never locked across an await point
    cache: Mutex<DataCache>,
}

impl DataClient {
    // == Constructor ==
    /// Creates a client using the game's dataset schema.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            schema: DatasetSchema::game(),
            cache: Mutex::new(DataCache::new(config.cache_ttl)),
        })
    }

    /// Replaces the dataset schema.
    pub fn with_schema(mut self, schema: DatasetSchema) -> Self {
        self.schema = schema;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    // == Status ==
    /// Queries `GET /status`, reporting why it failed.
    pub async fn status(&self) -> Result<()> {
        let request = self.http.get(self.url("status"));
        self.send(request).await.map(|_| ())
    }

    /// Returns true only if the service is reachable and reports success.
    pub async fn check_status(&self) -> bool {
        match self.status().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Data service unavailable");
                false
            }
        }
    }

    // == Load ==
    /// Returns a dataset, from the cache while fresh, otherwise from the service.
    pub async fn load_data(&self, dataset: &str) -> Result<Value> {
        self.check_name(dataset)?;

        let cached = self.lock_cache().get(dataset);
        if let Some(value) = cached {
            debug!(dataset, "Dataset served from cache");
            return Ok(value);
        }

        match self.fetch_dataset(dataset).await {
            Ok(value) => {
                self.lock_cache().insert(dataset, value.clone());
                info!(dataset, "Dataset loaded from server");
                Ok(value)
            }
            Err(e) => {
                error!(dataset, error = %e, "Failed to load dataset");
                Err(e)
            }
        }
    }

    /// Loads a dataset and deserializes it into `T`.
    pub async fn load_as<T: DeserializeOwned>(&self, dataset: &str) -> Result<T> {
        let value = self.load_data(dataset).await?;
        serde_json::from_value(value).map_err(|source| ClientError::Conversion {
            dataset: dataset.to_string(),
            source,
        })
    }

    async fn fetch_dataset(&self, dataset: &str) -> Result<Value> {
        let request = self.http.get(self.url(&format!("data/{}", dataset)));
        let envelope = self.send(request).await?;

        let value = envelope.data.ok_or_else(|| {
            ClientError::Malformed(format!("response for '{}' has no data field", dataset))
        })?;
        self.check_payload(dataset, &value)?;
        Ok(value)
    }

    // == Save ==
    /// Stores a dataset on the service and, on success, in the cache.
    ///
    /// The cache takes the value that was sent, not anything read back.
    pub async fn save_data(&self, dataset: &str, data: Value) -> Result<()> {
        self.check_name(dataset)?;
        self.check_payload(dataset, &data)?;

        let request = self
            .http
            .post(self.url(&format!("data/{}", dataset)))
            .json(&data);

        match self.send(request).await {
            Ok(_) => {
                self.lock_cache().insert(dataset, data);
                info!(dataset, "Dataset saved to server");
                Ok(())
            }
            Err(e) => {
                error!(dataset, error = %e, "Failed to save dataset");
                Err(e)
            }
        }
    }

    /// Serializes `data` and saves it.
    pub async fn save_as<T: Serialize + ?Sized>(&self, dataset: &str, data: &T) -> Result<()> {
        let value = serde_json::to_value(data).map_err(|source| ClientError::Conversion {
            dataset: dataset.to_string(),
            source,
        })?;
        self.save_data(dataset, value).await
    }

    // == Load All ==
    /// Fetches every dataset in one request and refreshes their cache entries.
    ///
    /// Entries for datasets absent from the response are left alone. A key that
    /// is not a valid dataset name, or a schema violation in any dataset, fails
    /// the whole call without touching the cache.
    pub async fn load_all_data(&self) -> Result<Map<String, Value>> {
        match self.fetch_all().await {
            Ok(all) => {
                self.lock_cache()
                    .insert_many(all.iter().map(|(k, v)| (k.clone(), v.clone())));
                info!(datasets = all.len(), "All datasets loaded from server");
                Ok(all)
            }
            Err(e) => {
                error!(error = %e, "Failed to load all datasets");
                Err(e)
            }
        }
    }

    async fn fetch_all(&self) -> Result<Map<String, Value>> {
        let envelope = self.send(self.http.get(self.url("all-data"))).await?;

        let all = match envelope.data {
            Some(Value::Object(all)) => all,
            Some(_) => {
                return Err(ClientError::Malformed(
                    "all-data payload is not an object".to_string(),
                ))
            }
            None => {
                return Err(ClientError::Malformed(
                    "all-data response has no data field".to_string(),
                ))
            }
        };

        for (dataset, value) in &all {
            schema::validate_name(dataset).map_err(|e| {
                ClientError::Malformed(format!("all-data key '{}': {}", dataset, e))
            })?;
            self.check_payload(dataset, value)?;
        }
        Ok(all)
    }

    // == Cache Access ==
    /// Empties the cache.
    pub fn clear_cache(&self) {
        let mut cache = self.lock_cache();
        let stats = cache.stats();
        cache.clear();
        info!(
            entries = stats.total_entries,
            hit_rate = stats.hit_rate(),
            "Dataset cache cleared"
        );
    }

    /// Returns the cached dataset if it is still fresh. Never touches the network.
    pub fn get_cached_data(&self, dataset: &str) -> Option<Value> {
        self.lock_cache().get(dataset)
    }

    /// Snapshot of cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.lock_cache().stats()
    }

    // == Helpers ==
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn lock_cache(&self) -> MutexGuard<'_, DataCache> {
        // Entries are independent, so a poisoned lock is still usable
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sends a request and unwraps the envelope. The HTTP status is ignored;
    /// `success` decides.
    async fn send(&self, request: RequestBuilder) -> Result<ApiResponse> {
        let envelope: ApiResponse = request.send().await?.json().await?;
        if envelope.success {
            Ok(envelope)
        } else {
            Err(ClientError::Rejected(envelope.error_message().to_string()))
        }
    }

    fn check_name(&self, dataset: &str) -> Result<()> {
        schema::validate_name(dataset).map_err(|e| {
            warn!(dataset, error = %e, "Rejected dataset name");
            ClientError::InvalidDataset(e.to_string())
        })
    }

    fn check_payload(&self, dataset: &str, value: &Value) -> Result<()> {
        self.schema
            .validate(dataset, value)
            .map_err(|e| ClientError::Schema {
                dataset: dataset.to_string(),
                reason: e.to_string(),
            })
    }
}
