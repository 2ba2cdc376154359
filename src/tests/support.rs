// roster-service/src/tests/support.rs
//
// Test doubles for the record store, plus roster fixtures.
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::models::{ServiceError, Teammate};
use crate::utils::record_storage::RecordStore;

// In-memory document store; records keep their insertion order
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<(String, Value)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
        }
    }

    // Seed a document with a known id
    pub fn insert(&self, collection: &str, id: &str, fields: Value) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push((id.to_string(), fields));
    }

    // Peek at a stored document
    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)?
            .iter()
            .find(|(record_id, _)| record_id == id)
            .map(|(_, fields)| fields.clone())
    }

    pub fn len(&self, collection: &str) -> usize {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .map_or(0, Vec::len)
    }
}

impl RecordStore for MemoryStore {
    fn create_record(&self, collection: &str, fields: &Value) -> Result<String, ServiceError> {
        let id = Uuid::new_v4().to_string();
        self.insert(collection, &id, fields.clone());
        Ok(id)
    }

    fn get_record(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError> {
        Ok(self.document(collection, id))
    }

    fn list_records(&self, collection: &str) -> Result<Vec<(String, Value)>, ServiceError> {
        Ok(self
            .collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default())
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

        let mut collections = self.collections.lock().unwrap();
        let records = collections
            .get_mut(collection)
            .ok_or(ServiceError::NotFound)?;
        let (_, fields) = records
            .iter_mut()
            .find(|(record_id, _)| record_id == id)
            .ok_or(ServiceError::NotFound)?;

        let target = fields
            .as_object_mut()
            .ok_or(ServiceError::InternalServerError)?;
        for (key, value) in partial {
            target.insert(key.clone(), value.clone());
        }

        Ok(())
    }
}

// Store whose reads or writes can be switched to fail mid-test
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    fn check_reads(&self) -> Result<(), ServiceError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ServiceError::InternalServerError);
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), ServiceError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(ServiceError::InternalServerError);
        }
        Ok(())
    }
}

impl RecordStore for FlakyStore {
    fn create_record(&self, collection: &str, fields: &Value) -> Result<String, ServiceError> {
        self.check_writes()?;
        self.inner.create_record(collection, fields)
    }

    fn get_record(&self, collection: &str, id: &str) -> Result<Option<Value>, ServiceError> {
        self.check_reads()?;
        self.inner.get_record(collection, id)
    }

    fn list_records(&self, collection: &str) -> Result<Vec<(String, Value)>, ServiceError> {
        self.check_reads()?;
        self.inner.list_records(collection)
    }

    fn update_record(
        &self,
        collection: &str,
        id: &str,
        partial_fields: &Value,
    ) -> Result<(), ServiceError> {
        self.check_writes()?;
        self.inner.update_record(collection, id, partial_fields)
    }
}

// Roster fixture; every other field keeps its default
pub fn teammate(name: &str, updated_at: Option<DateTime<Utc>>) -> Teammate {
    Teammate {
        name: name.to_string(),
        updated_at,
        ..Teammate::default()
    }
}

// Deterministic timestamps, `secs` apart
pub fn stamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}
