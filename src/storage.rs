//! Dataset Storage Module
//!
//! File-backed persistence for the data service: one pretty-printed JSON
//! document per dataset type, written atomically via temp file + rename.

use std::io;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{ServiceError, ServiceResult};
use crate::schema::DatasetSchema;

// == Dataset Store ==
/// Directory of dataset files governed by a schema.
#[derive(Debug)]
pub struct DatasetStore {
    data_dir: PathBuf,
    schema: DatasetSchema,
}

impl DatasetStore {
    // == Constructor ==
    /// Creates a store rooted at `data_dir`. The directory is created on first save.
    pub fn new(data_dir: impl Into<PathBuf>, schema: DatasetSchema) -> Self {
        Self {
            data_dir: data_dir.into(),
            schema,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    fn path_for(&self, dataset: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", dataset))
    }

    // == Load ==
    /// Reads a registered dataset.
    ///
    /// A dataset that was never saved, or whose file cannot be read or parsed,
    /// yields its shape's empty value.
    pub async fn load(&self, dataset: &str) -> ServiceResult<Value> {
        let shape = self
            .schema
            .shape_of(dataset)
            .ok_or_else(|| ServiceError::UnknownDataset(dataset.to_string()))?;

        let path = self.path_for(dataset);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(dataset, "Dataset file missing, returning empty value");
                return Ok(shape.empty_value());
            }
            Err(e) => {
                warn!(dataset, path = %path.display(), error = %e, "Failed to read dataset");
                return Ok(shape.empty_value());
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(dataset, path = %path.display(), error = %e, "Failed to parse dataset");
                Ok(shape.empty_value())
            }
        }
    }

    /// Reads every registered dataset.
    pub async fn load_all(&self) -> ServiceResult<Map<String, Value>> {
        let mut all = Map::new();
        for dataset in self.schema.names() {
            let value = self.load(dataset).await?;
            all.insert(dataset.to_string(), value);
        }
        Ok(all)
    }

    // == Save ==
    /// Validates and writes a dataset.
    pub async fn save(&self, dataset: &str, value: &Value) -> ServiceResult<()> {
        if !self.schema.contains(dataset) {
            return Err(ServiceError::UnknownDataset(dataset.to_string()));
        }
        self.schema
            .validate(dataset, value)
            .map_err(|e| ServiceError::InvalidPayload(e.to_string()))?;

        fs::create_dir_all(&self.data_dir).await?;

        let path = self.path_for(dataset);
        let json = serde_json::to_string_pretty(value)?;

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, json.as_bytes()).await?;
        fs::rename(&temp_path, &path).await?;

        debug!(dataset, path = %path.display(), "Dataset written");
        Ok(())
    }
}
