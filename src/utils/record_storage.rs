// roster-service/src/utils/record_storage.rs
use log::{error, info, warn};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::models::ServiceError;

// Collection names used by the service
pub const TEAMMATES_COLLECTION: &str = "teammates";
pub const USERS_COLLECTION: &str = "users";

// Remote-document-store shaped storage: opaque JSON documents keyed by
// store-assigned string ids, grouped into named collections. The store is
// the source of truth for every record; callers hold transient copies.
pub trait RecordStore: Send + Sync {
    // Create a document and return its assigned id
    fn create_record(&self, collection: &str, fields: &Value) -> Result<String, ServiceError>;

    // Fetch one document; `Ok(None)` if it does not exist
    fn get_record(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError>;

    // Fetch every document in a collection, in no particular order
    fn list_records(&self, collection: &str) -> Result<Vec<(String, Value)>, ServiceError>;

    // Merge the given top-level fields into an existing document
    fn update_record(&self, collection: &str, id: &str, partial_fields: &Value)
        -> Result<(), ServiceError>;
}

// File-backed store keeping one JSON file per document at
// `<root>/<collection>/<id>.json`.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn collection_dir(&self, collection: &str) -> PathBuf {
        self.root.join(collection)
    }

    fn record_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection_dir(collection).join(format!("{}.json", id))
    }

    fn ensure_collection_dir(&self, collection: &str) -> Result<(), ServiceError> {
        let dir = self.collection_dir(collection);
        if !dir.exists() {
            info!("Creating collection directory: {}", dir.display());
            fs::create_dir_all(&dir).map_err(|e| {
                error!("Failed to create collection directory: {:?}", e);
                ServiceError::InternalServerError
            })?;
        }
        Ok(())
    }

    fn write_document(&self, path: &Path, fields: &Value) -> Result<(), ServiceError> {
        let json = serde_json::to_string_pretty(fields).map_err(|e| {
            error!("Failed to serialize document: {:?}", e);
            ServiceError::InternalServerError
        })?;

        fs::write(path, json).map_err(|e| {
            error!("Failed to write document: {:?}", e);
            ServiceError::InternalServerError
        })
    }
}

impl RecordStore for JsonFileStore {
    fn create_record(&self, collection: &str, fields: &Value) -> Result<String, ServiceError> {
        self.ensure_collection_dir(collection)?;

        let id = Uuid::new_v4().to_string();
        self.write_document(&self.record_path(collection, &id), fields)?;

        info!("✅ Created record: {} in collection: {}", id, collection);
        Ok(id)
    }

    fn get_record(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError> {
        let path = self.record_path(collection, id);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read document {}: {:?}", id, e);
            ServiceError::InternalServerError
        })?;

        let fields = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse document {}: {:?}", id, e);
            ServiceError::InternalServerError
        })?;

        Ok(Some(fields))
    }

    fn list_records(&self, collection: &str) -> Result<Vec<(String, Value)>, ServiceError> {
        let dir = self.collection_dir(collection);

        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();

        for entry_result in fs::read_dir(&dir).map_err(|e| {
            error!("Failed to read collection directory: {:?}", e);
            ServiceError::InternalServerError
        })? {
            let entry = entry_result.map_err(|e| {
                error!("Failed to read directory entry: {:?}", e);
                ServiceError::InternalServerError
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }

            let id = match path.file_stem().and_then(|stem| stem.to_str()) {
                Some(stem) => stem.to_string(),
                None => continue,
            };

            let content = fs::read_to_string(&path).map_err(|e| {
                error!("Failed to read document {}: {:?}", id, e);
                ServiceError::InternalServerError
            })?;

            match serde_json::from_str(&content) {
                Ok(fields) => records.push((id, fields)),
                Err(e) => {
                    warn!("⚠️ Skipping unparseable document {}: {:?}", id, e);
                    continue;
                }
            }
        }

        Ok(records)
    }

    fn update_record(
        &self,
        collection: &str,
        id: &str,
        partial_fields: &Value,
    ) -> Result<(), ServiceError> {
        let partial = partial_fields.as_object().ok_or_else(|| {
            ServiceError::BadRequest("Partial update must be a JSON object".to_string())
        })?;

        let path = self.record_path(collection, id);
        if !path.exists() {
            error!("❌ Cannot update missing record: {} in collection: {}", id, collection);
            return Err(ServiceError::NotFound);
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            error!("Failed to read document {}: {:?}", id, e);
            ServiceError::InternalServerError
        })?;

        let mut fields: Value = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse document {}: {:?}", id, e);
            ServiceError::InternalServerError
        })?;

        let target = fields.as_object_mut().ok_or_else(|| {
            error!("Document {} is not a JSON object", id);
            ServiceError::InternalServerError
        })?;

        for (key, value) in partial {
            target.insert(key.clone(), value.clone());
        }

        self.write_document(&path, &fields)?;

        info!("✅ Updated record: {} in collection: {}", id, collection);
        Ok(())
    }
}
