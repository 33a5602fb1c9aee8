// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the gym database.
//!
//! [`Repository`] implements CRUD and predicate queries once for every
//! [`Entity`]; the per-entity repositories wrap it and add the few queries
//! that are specific to their collection.

use std::marker::PhantomData;

use redb::{ReadableDatabase, ReadableTable};

use super::database::{next_id, records};
use super::{Entity, GymDatabase, StoreError, StoreResult};

pub mod members;
pub mod trainers;
pub mod workouts;

pub use members::MemberRepository;
pub use trainers::TrainerRepository;
pub use workouts::WorkoutRepository;

/// Generic repository over one record table.
///
/// Every call is its own committed transaction, run on the blocking pool.
pub struct Repository<T> {
    db: GymDatabase,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Repository<T> {
    /// Create a new Repository.
    pub fn new(db: GymDatabase) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// All stored records, in id order.
    pub async fn get_all(&self) -> StoreResult<Vec<T>> {
        tracing::debug!(entity = T::KIND, "Getting all entities");
        self.find(|_| true).await
    }

    /// Look up a record by id. Absent ids are `Ok(None)`.
    pub async fn get_by_id(&self, id: i32) -> StoreResult<Option<T>> {
        tracing::debug!(entity = T::KIND, id, "Getting entity by id");
        self.db
            .run(move |db| {
                let read_txn = db.begin_read()?;
                let table = read_txn.open_table(records::<T>())?;
                let bytes = match table.get(id)? {
                    Some(value) => value.value().to_vec(),
                    None => return Ok(None),
                };
                Ok(Some(serde_json::from_slice(&bytes)?))
            })
            .await
    }

    /// Records matching `predicate`, evaluated inside the read transaction.
    pub async fn find<F>(&self, predicate: F) -> StoreResult<Vec<T>>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        self.db
            .run(move |db| {
                let read_txn = db.begin_read()?;
                let table = read_txn.open_table(records::<T>())?;
                let mut matches = Vec::new();
                for entry in table.iter()? {
                    let (_, value) = entry?;
                    let entity: T = serde_json::from_slice(value.value())?;
                    if predicate(&entity) {
                        matches.push(entity);
                    }
                }
                Ok(matches)
            })
            .await
    }

    /// Store a new record under a freshly assigned id.
    ///
    /// Any id already on `entity` is ignored. The record is committed before
    /// this returns, and the stored copy (with its id) is handed back.
    pub async fn add(&self, mut entity: T) -> StoreResult<T> {
        tracing::info!(entity = T::KIND, "Adding new entity");
        self.db
            .run(move |db| {
                let write_txn = db.begin_write()?;
                {
                    let id = next_id(&write_txn, T::KIND)?;
                    entity.set_id(id);
                    let json = serde_json::to_vec(&entity)?;
                    let mut table = write_txn.open_table(records::<T>())?;
                    table.insert(id, json.as_slice())?;
                }
                write_txn.commit()?;
                Ok(entity)
            })
            .await
    }

    /// Overwrite the stored record that has `entity`'s id.
    ///
    /// Fails with [`StoreError::NotFound`] when no such record exists; the
    /// table is left untouched in that case.
    pub async fn update(&self, entity: T) -> StoreResult<()> {
        let id = entity.id();
        tracing::info!(entity = T::KIND, id, "Updating entity");
        self.db
            .run(move |db| {
                let json = serde_json::to_vec(&entity)?;
                let write_txn = db.begin_write()?;
                {
                    let mut table = write_txn.open_table(records::<T>())?;
                    if table.get(id)?.is_none() {
                        return Err(StoreError::not_found::<T>(id));
                    }
                    table.insert(id, json.as_slice())?;
                }
                write_txn.commit()?;
                Ok(())
            })
            .await
    }

    /// Remove the record that has `entity`'s id. Absent ids are a no-op.
    pub async fn delete(&self, entity: &T) -> StoreResult<()> {
        let id = entity.id();
        tracing::info!(entity = T::KIND, id, "Deleting entity");
        let removed = self.remove(id).await?;
        if !removed {
            tracing::debug!(entity = T::KIND, id, "Entity already absent");
        }
        Ok(())
    }

    /// Look up `id` and delete it if present. Absent ids are a no-op.
    pub async fn delete_by_id(&self, id: i32) -> StoreResult<()> {
        tracing::info!(entity = T::KIND, id, "Deleting entity by id");
        match self.get_by_id(id).await? {
            Some(entity) => self.delete(&entity).await,
            None => {
                tracing::warn!(entity = T::KIND, id, "Entity not found for deletion");
                Ok(())
            }
        }
    }

    async fn remove(&self, id: i32) -> StoreResult<bool> {
        self.db
            .run(move |db| {
                let write_txn = db.begin_write()?;
                let removed = {
                    let mut table = write_txn.open_table(records::<T>())?;
                    let removed = table.remove(id)?.is_some();
                    removed
                };
                write_txn.commit()?;
                Ok(removed)
            })
            .await
    }
}
