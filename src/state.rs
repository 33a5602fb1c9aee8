// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;
use std::time::Duration;

use crate::config::StorageBackend;
use crate::models::Trainer;
use crate::storage::{ListCache, StoragePaths, StoreResult, Stores};

#[derive(Clone)]
pub struct AppState {
    pub stores: Arc<Stores>,
    pub paths: StoragePaths,
    pub backend: StorageBackend,
    /// Cached result of the trainer list endpoint.
    pub trainer_cache: Arc<ListCache<Trainer>>,
}

impl AppState {
    pub fn new(stores: Stores, paths: StoragePaths, backend: StorageBackend, ttl: Duration) -> Self {
        Self {
            stores: Arc::new(stores),
            paths,
            backend,
            trainer_cache: Arc::new(ListCache::new(1, ttl)),
        }
    }

    /// Open the configured backend under `paths`.
    pub fn open(paths: StoragePaths, backend: StorageBackend, ttl: Duration) -> StoreResult<Self> {
        let stores = Stores::open(backend, &paths)?;
        Ok(Self::new(stores, paths, backend, ttl))
    }

    /// Fresh state in a temporary directory. The directory lives as long as the
    /// returned guard.
    #[cfg(test)]
    pub fn temp(backend: StorageBackend) -> (Self, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let state = Self::open(
            StoragePaths::new(dir.path()),
            backend,
            crate::storage::DEFAULT_LIST_TTL,
        )
        .unwrap();
        (state, dir)
    }
}
