// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend selection for the HTTP layer.
//!
//! Handlers talk to an [`EntityStore`], which forwards to either the database
//! repository or the JSON data service. Both expose the same logical contract
//! here: `update` and `delete` report absence instead of failing.

use std::sync::Arc;

use chrono::Utc;

use super::{
    Entity, GymDatabase, JsonDataService, MemberRepository, Repository, StoragePaths,
    StoreError, StoreResult, WorkoutRepository,
};
use crate::config::StorageBackend;
use crate::models::{Member, Trainer, Workout};

/// One entity kind's store, on whichever backend is configured.
pub enum EntityStore<T> {
    Database(Repository<T>),
    Json(Arc<JsonDataService<T>>),
}

impl<T> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        match self {
            EntityStore::Database(repo) => EntityStore::Database(repo.clone()),
            EntityStore::Json(service) => EntityStore::Json(Arc::clone(service)),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    fn json(paths: &StoragePaths) -> Self {
        EntityStore::Json(Arc::new(JsonDataService::with_path(
            paths.json_container(T::KIND),
        )))
    }

    pub async fn list(&self) -> StoreResult<Vec<T>> {
        match self {
            EntityStore::Database(repo) => repo.get_all().await,
            EntityStore::Json(service) => Ok(service.get_all()),
        }
    }

    pub async fn get(&self, id: i32) -> StoreResult<Option<T>> {
        match self {
            EntityStore::Database(repo) => repo.get_by_id(id).await,
            EntityStore::Json(service) => Ok(service.get_by_id(id)),
        }
    }

    /// Like [`get`](Self::get), but absence is a [`StoreError::NotFound`].
    pub async fn require(&self, id: i32) -> StoreResult<T> {
        self.get(id).await?.ok_or_else(|| StoreError::not_found::<T>(id))
    }

    pub async fn find<F>(&self, predicate: F) -> StoreResult<Vec<T>>
    where
        F: Fn(&T) -> bool + Send + 'static,
    {
        match self {
            EntityStore::Database(repo) => repo.find(predicate).await,
            EntityStore::Json(service) => Ok(service.find(predicate)),
        }
    }

    /// Store a new record; the returned copy carries the assigned id.
    pub async fn create(&self, entity: T) -> StoreResult<T> {
        match self {
            EntityStore::Database(repo) => repo.add(entity).await,
            EntityStore::Json(service) => service.add(entity),
        }
    }

    /// Apply `changes` to record `id`. `None` when the record does not exist.
    pub async fn update(&self, id: i32, changes: T) -> StoreResult<Option<T>> {
        match self {
            EntityStore::Database(repo) => {
                let Some(mut current) = repo.get_by_id(id).await? else {
                    return Ok(None);
                };
                current.apply_changes(changes);
                repo.update(current.clone()).await?;
                Ok(Some(current))
            }
            EntityStore::Json(service) => service.update(id, changes),
        }
    }

    /// Remove record `id`. `false` when the record does not exist.
    pub async fn delete(&self, id: i32) -> StoreResult<bool> {
        match self {
            EntityStore::Database(repo) => match repo.get_by_id(id).await? {
                Some(entity) => {
                    repo.delete(&entity).await?;
                    Ok(true)
                }
                None => Ok(false),
            },
            EntityStore::Json(service) => service.delete(id),
        }
    }
}

impl EntityStore<Member> {
    pub async fn active_members(&self) -> StoreResult<Vec<Member>> {
        match self {
            EntityStore::Database(repo) => {
                // Same table, wrapped for the member-specific query.
                MemberRepository::from(repo.clone()).get_active_members().await
            }
            EntityStore::Json(service) => Ok(service.find(|member| member.is_active)),
        }
    }
}

impl EntityStore<Workout> {
    pub async fn scheduled_workouts(&self) -> StoreResult<Vec<Workout>> {
        match self {
            EntityStore::Database(repo) => {
                WorkoutRepository::from(repo.clone())
                    .get_scheduled_workouts()
                    .await
            }
            EntityStore::Json(service) => {
                let now = Utc::now();
                Ok(service.find(|workout| workout.is_scheduled_after(now)))
            }
        }
    }
}

/// The three collections, all on the same backend.
#[derive(Clone)]
pub struct Stores {
    pub members: EntityStore<Member>,
    pub trainers: EntityStore<Trainer>,
    pub workouts: EntityStore<Workout>,
    /// Present on the database backend, for health checks.
    pub database: Option<GymDatabase>,
}

impl Stores {
    /// Open the configured backend under `paths`.
    pub fn open(backend: StorageBackend, paths: &StoragePaths) -> StoreResult<Self> {
        match backend {
            StorageBackend::Database => Ok(Self::database(GymDatabase::open(&paths.database())?)),
            StorageBackend::Json => {
                std::fs::create_dir_all(paths.root())?;
                Ok(Self::json(paths))
            }
        }
    }

    pub fn database(db: GymDatabase) -> Self {
        Self {
            members: EntityStore::Database(Repository::new(db.clone())),
            trainers: EntityStore::Database(Repository::new(db.clone())),
            workouts: EntityStore::Database(Repository::new(db.clone())),
            database: Some(db),
        }
    }

    pub fn json(paths: &StoragePaths) -> Self {
        Self {
            members: EntityStore::json(paths),
            trainers: EntityStore::json(paths),
            workouts: EntityStore::json(paths),
            database: None,
        }
    }
}
