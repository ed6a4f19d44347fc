//! In-memory record store
//!
//! The authoritative collection of one record kind. Records are kept in
//! insertion order, which is the order searches and exports enumerate them.
//! Every mutation takes the write lock and every read or flush takes the
//! read lock, so snapshots never observe a half-applied change.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use super::gateway::JsonGateway;
use crate::error::{RosterError, RosterResult};
use crate::models::{ids, Record};

/// Keyed collection of records with generated identifiers
#[derive(Debug)]
pub struct RecordStore<R> {
    data: RwLock<Vec<R>>,
}

impl<R: Record> Default for RecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(Vec::new()),
        }
    }

    /// Create a store holding `records`
    pub fn with_records(records: Vec<R>) -> RosterResult<Self> {
        let store = Self::new();
        store.replace_all(records)?;
        Ok(store)
    }

    fn read(&self) -> RosterResult<RwLockReadGuard<'_, Vec<R>>> {
        self.data
            .read()
            .map_err(|e| RosterError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> RosterResult<RwLockWriteGuard<'_, Vec<R>>> {
        self.data
            .write()
            .map_err(|e| RosterError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    fn not_found(id: &str) -> RosterError {
        RosterError::NotFound {
            entity_type: R::ENTITY,
            identifier: id.to_string(),
        }
    }

    /// Replace the whole contents, as done once by the startup load
    pub fn replace_all(&self, records: Vec<R>) -> RosterResult<()> {
        for (i, record) in records.iter().enumerate() {
            if records[..i].iter().any(|r| r.id() == record.id()) {
                return Err(RosterError::DuplicateIdentifier {
                    entity_type: R::ENTITY,
                    identifier: record.id().to_string(),
                });
            }
        }

        *self.write()? = records;
        Ok(())
    }

    /// Insert a record whose identifier was assigned by the caller
    pub fn add(&self, record: R) -> RosterResult<String> {
        let mut data = self.write()?;

        if data.iter().any(|r| r.id() == record.id()) {
            return Err(RosterError::DuplicateIdentifier {
                entity_type: R::ENTITY,
                identifier: record.id().to_string(),
            });
        }

        let id = record.id().to_string();
        data.push(record);
        debug!(entity = R::ENTITY, %id, "record added");
        Ok(id)
    }

    /// Generate the next identifier and insert the record built from it
    ///
    /// Identifier generation and insertion happen under one write lock.
    pub fn insert_new<F>(&self, build: F) -> RosterResult<R>
    where
        F: FnOnce(String) -> RosterResult<R>,
    {
        let mut data = self.write()?;

        let id = ids::next_id(data.iter().map(|r| r.id()), R::ID_PREFIX)?;
        let record = build(id.clone())?;
        if record.id() != id {
            return Err(RosterError::Validation(format!(
                "{} must keep its generated identifier {}",
                R::ENTITY,
                id
            )));
        }

        data.push(record.clone());
        debug!(entity = R::ENTITY, %id, "record created");
        Ok(record)
    }

    /// Identifier the next `insert_new` would assign
    pub fn peek_next_id(&self) -> RosterResult<String> {
        let data = self.read()?;
        ids::next_id(data.iter().map(|r| r.id()), R::ID_PREFIX)
    }

    /// Get a record by identifier (exact match)
    pub fn get(&self, id: &str) -> RosterResult<R> {
        self.read()?
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    /// Apply `mutate` to a record
    ///
    /// The mutator works on a copy. The stored record is replaced only when
    /// the mutator succeeds and leaves the identifier unchanged.
    pub fn update<F>(&self, id: &str, mutate: F) -> RosterResult<R>
    where
        F: FnOnce(&mut R) -> RosterResult<()>,
    {
        let mut data = self.write()?;

        let slot = data
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let mut updated = slot.clone();
        mutate(&mut updated)?;
        if updated.id() != id {
            return Err(RosterError::Validation(format!(
                "{} identifier cannot be changed",
                R::ENTITY
            )));
        }

        *slot = updated.clone();
        debug!(entity = R::ENTITY, %id, "record updated");
        Ok(updated)
    }

    /// Remove a record permanently, returning it
    pub fn delete(&self, id: &str) -> RosterResult<R> {
        let mut data = self.write()?;

        let index = data
            .iter()
            .position(|r| r.id() == id)
            .ok_or_else(|| Self::not_found(id))?;

        let removed = data.remove(index);
        debug!(entity = R::ENTITY, %id, "record deleted");
        Ok(removed)
    }

    /// Point-in-time copy of every record, in store order
    pub fn all(&self) -> RosterResult<Vec<R>> {
        Ok(self.read()?.clone())
    }

    /// Every identifier, in store order
    pub fn ids(&self) -> RosterResult<Vec<String>> {
        Ok(self.read()?.iter().map(|r| r.id().to_string()).collect())
    }

    pub fn contains(&self, id: &str) -> RosterResult<bool> {
        Ok(self.read()?.iter().any(|r| r.id() == id))
    }

    pub fn len(&self) -> RosterResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> RosterResult<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Save every record through `gateway`, holding the read lock so no
    /// mutation interleaves with the write
    pub fn flush(&self, gateway: &JsonGateway<R>) -> RosterResult<usize> {
        let data = self.read()?;
        gateway.save(&data)?;
        Ok(data.len())
    }
}
