// roster-service/src/services/tracker_service.rs
//
// Session state behind the roster and detail views: a cached roster list and
// independently fetched per-record detail copies. The store is the source of
// truth; both caches are one-shot refetched on navigation and are never
// reconciled with each other, so they can drift until the next reload.
use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::engine::{self, BadgeCounts, FilterMode};
use crate::models::{Flag, ServiceError, Teammate, TeammateForm};
use crate::utils::record_storage::{RecordStore, TEAMMATES_COLLECTION};

// What to do with the optimistic local copy when a flag-toggle write is
// rejected by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackPolicy {
    // Keep the flipped local copy and log the failure; local and remote
    // diverge until the next reload
    KeepLocal,
    // Revert the local copy and surface the error to the caller
    Rollback,
}

// One rendered roster page: the derived view plus the badge counts
#[derive(Serialize, Debug)]
pub struct RosterPage {
    pub teammates: Vec<Teammate>,
    pub counts: BadgeCounts,
}

pub struct TrackerService {
    store: Arc<dyn RecordStore>,
    roster: Mutex<Vec<Teammate>>,
    details: Mutex<HashMap<String, Teammate>>,
    rollback_policy: RollbackPolicy,
}

impl TrackerService {
    pub fn new(store: Arc<dyn RecordStore>, rollback_policy: RollbackPolicy) -> Self {
        Self {
            store,
            roster: Mutex::new(Vec::new()),
            details: Mutex::new(HashMap::new()),
            rollback_policy,
        }
    }

    fn roster_lock(&self) -> Result<MutexGuard<'_, Vec<Teammate>>, ServiceError> {
        self.roster.lock().map_err(|e| {
            error!("Roster cache lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    fn details_lock(&self) -> Result<MutexGuard<'_, HashMap<String, Teammate>>, ServiceError> {
        self.details.lock().map_err(|e| {
            error!("Detail cache lock poisoned: {:?}", e);
            ServiceError::InternalServerError
        })
    }

    // One-shot fetch of the whole roster, replacing the cached copy
    pub fn refresh_roster(&self) -> Result<(), ServiceError> {
        let records = self.store.list_records(TEAMMATES_COLLECTION)?;

        let mut teammates = Vec::with_capacity(records.len());
        for (id, fields) in records {
            match Teammate::from_document(id.clone(), fields) {
                Ok(teammate) => teammates.push(teammate),
                Err(_) => warn!("⚠️ Skipping malformed teammate document: {}", id),
            }
        }

        *self.roster_lock()? = teammates;
        Ok(())
    }

    // Derived view over the cached roster, plus badge counts from the full
    // cache
    pub fn roster(&self, filter: FilterMode, search_term: &str) -> Result<RosterPage, ServiceError> {
        let roster = self.roster_lock()?;

        Ok(RosterPage {
            teammates: engine::roster_view(&roster, filter, search_term),
            counts: engine::badge_counts(&roster),
        })
    }

    // Unfiltered, unsorted snapshot of the cached roster
    pub fn roster_snapshot(&self) -> Result<Vec<Teammate>, ServiceError> {
        Ok(self.roster_lock()?.clone())
    }

    // Add-teammate flow: stamp the form, create the record, then append the
    // form snapshot to the cached roster. On store failure nothing is
    // appended and the caller's form state stays as submitted.
    pub fn add_teammate(&self, form: TeammateForm) -> Result<Teammate, ServiceError> {
        let teammate = form.into_teammate(Utc::now());
        let fields = teammate.to_document()?;

        let id = self.store.create_record(TEAMMATES_COLLECTION, &fields).map_err(|err| {
            error!("❌ Error adding teammate: {}", err);
            err
        })?;

        // The cached copy keeps the form snapshot as submitted, without the
        // store-assigned id; the list is refetched from the store on the
        // next navigation anyway.
        self.roster_lock()?.push(teammate.clone());

        info!("✅ Added teammate: {}", id);

        let mut created = teammate;
        created.id = id;
        Ok(created)
    }

    // One-shot fetch of a single record into the detail cache. `Ok(None)`
    // means the document does not exist.
    pub fn open_detail(&self, id: &str) -> Result<Option<Teammate>, ServiceError> {
        let fields = match self.store.get_record(TEAMMATES_COLLECTION, id)? {
            Some(fields) => fields,
            None => {
                error!("❌ No such document: {}", id);
                return Ok(None);
            }
        };

        let teammate = Teammate::from_document(id.to_string(), fields)?;
        self.details_lock()?.insert(id.to_string(), teammate.clone());

        Ok(Some(teammate))
    }

    // Flag toggle: flip the cached detail copy first, then persist the new
    // boolean plus a fresh `updatedAt` as a partial update. The rollback
    // policy decides what happens to the local copy when the write fails.
    pub fn toggle_flag(&self, id: &str, flag: Flag) -> Result<Teammate, ServiceError> {
        let cached = self.details_lock()?.get(id).cloned();
        let current = match cached {
            Some(teammate) => teammate,
            None => self.open_detail(id)?.ok_or(ServiceError::NotFound)?,
        };

        let previous_value = flag.get(&current);
        let previous_stamp = current.updated_at;
        let stamp = next_update_time(previous_stamp);

        // Optimistic local flip before the store confirms
        let flipped = {
            let mut details = self.details_lock()?;
            let entry = details.entry(id.to_string()).or_insert(current);
            flag.set(entry, !previous_value);
            entry.updated_at = Some(stamp);
            entry.clone()
        };

        let mut partial = Map::new();
        partial.insert(flag.field_name().to_string(), Value::Bool(!previous_value));
        partial.insert("updatedAt".to_string(), Value::String(stamp.to_rfc3339()));

        match self.store.update_record(TEAMMATES_COLLECTION, id, &Value::Object(partial)) {
            Ok(()) => {
                info!("✅ Toggled {} on teammate: {}", flag.field_name(), id);
                Ok(flipped)
            }
            Err(err) => match self.rollback_policy {
                RollbackPolicy::KeepLocal => {
                    warn!(
                        "⚠️ Store rejected toggle for teammate: {}; keeping local copy ({})",
                        id, err
                    );
                    Ok(flipped)
                }
                RollbackPolicy::Rollback => {
                    error!("❌ Store rejected toggle for teammate: {}; rolling back", id);
                    let mut details = self.details_lock()?;
                    if let Some(entry) = details.get_mut(id) {
                        flag.set(entry, previous_value);
                        entry.updated_at = previous_stamp;
                    }
                    Err(err)
                }
            },
        }
    }
}

// Fresh `updatedAt` stamp, bumped just past the previous one when the clock
// has not advanced, keeping the timestamp strictly increasing per record
pub fn next_update_time(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    match previous {
        Some(prev) if now <= prev => prev + Duration::milliseconds(1),
        _ => now,
    }
}
