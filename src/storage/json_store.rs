// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON-file data service: one container file per entity kind.
//!
//! ## File Format
//!
//! ```text
//! {
//!   "items": [ { "id": 1, ... }, ... ],
//!   "nextId": 3
//! }
//! ```
//!
//! Every operation reloads the file from disk and every mutation rewrites it
//! whole (temp file + rename), all while holding the service's lock. One
//! service instance exists per entity kind, so kinds never contend with each
//! other.
//!
//! A missing file is created with the entity's seed records on first use. A
//! file that cannot be read or parsed is treated as an empty container; the
//! next mutation then overwrites it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::{Entity, StoreError, StoreResult};

/// On-disk container for one entity kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Container<T> {
    pub items: Vec<T>,
    pub next_id: i32,
}

impl<T> Default for Container<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Entity> Container<T> {
    /// Container holding the seed records, counter one past the highest id.
    fn seeded() -> Self {
        let items = T::seed();
        let next_id = items.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Self { items, next_id }
    }

    fn position(&self, id: i32) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }
}

/// Data service over a single JSON container file.
pub struct JsonDataService<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> JsonDataService<T> {
    /// Create a service for `T` under `dir`. Nothing touches disk until the
    /// first operation.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join(format!("{}.json", T::KIND)))
    }

    /// Create a service over an explicit file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, read fresh from disk.
    pub fn get_all(&self) -> Vec<T> {
        let _guard = self.acquire();
        self.load().items
    }

    /// Linear scan for `id`.
    pub fn get_by_id(&self, id: i32) -> Option<T> {
        let _guard = self.acquire();
        self.load().items.into_iter().find(|item| item.id() == id)
    }

    /// Records matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let _guard = self.acquire();
        self.load()
            .items
            .into_iter()
            .filter(|item| predicate(item))
            .collect()
    }

    /// Append `entity` under the next id and return the stored copy.
    pub fn add(&self, mut entity: T) -> StoreResult<T> {
        let _guard = self.acquire();
        let mut container = self.load();

        let next_id = container
            .next_id
            .checked_add(1)
            .ok_or(StoreError::SequenceExhausted(T::KIND))?;
        entity.set_id(container.next_id);
        container.next_id = next_id;
        container.items.push(entity.clone());
        self.save(&container)?;

        tracing::info!(entity = T::KIND, id = entity.id(), "Added entity to JSON store");
        Ok(entity)
    }

    /// Overwrite the mutable fields of record `id` with those of `changes`.
    ///
    /// Returns `None` without writing when `id` is absent.
    pub fn update(&self, id: i32, changes: T) -> StoreResult<Option<T>> {
        let _guard = self.acquire();
        let mut container = self.load();

        let Some(index) = container.position(id) else {
            tracing::debug!(entity = T::KIND, id, "Update target not found in JSON store");
            return Ok(None);
        };
        container.items[index].apply_changes(changes);
        let updated = container.items[index].clone();
        self.save(&container)?;

        tracing::info!(entity = T::KIND, id, "Updated entity in JSON store");
        Ok(Some(updated))
    }

    /// Remove record `id`. Returns `false` without writing when absent.
    pub fn delete(&self, id: i32) -> StoreResult<bool> {
        let _guard = self.acquire();
        let mut container = self.load();

        let Some(index) = container.position(id) else {
            return Ok(false);
        };
        container.items.remove(index);
        self.save(&container)?;

        tracing::info!(entity = T::KIND, id, "Deleted entity from JSON store");
        Ok(true)
    }

    /// Empty the collection and reset the id counter to 1.
    pub fn delete_all(&self) -> StoreResult<bool> {
        let _guard = self.acquire();
        self.save(&Container::<T>::default())?;
        tracing::info!(entity = T::KIND, "Cleared JSON store");
        Ok(true)
    }

    // ========== File Handling (lock must be held) ==========

    /// The guard protects no data of its own, so a poisoned lock is safe to
    /// take over.
    fn acquire(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Container<T> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return self.initialize(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Unreadable JSON store, treating as empty"
                );
                return Container::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(container) => container,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Corrupt JSON store, treating as empty"
                );
                Container::default()
            }
        }
    }

    /// First use: write the seed container. If that fails the seeds are
    /// still served for this call and creation is retried next time.
    fn initialize(&self) -> Container<T> {
        let container = Container::seeded();
        match self.save(&container) {
            Ok(()) => tracing::info!(
                path = %self.path.display(),
                records = container.items.len(),
                "Created JSON store with seed data"
            ),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to create JSON store"
            ),
        }
        container
    }

    /// Write the container (atomic write via rename).
    fn save(&self, container: &Container<T>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, container)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}
