// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Workout repository.

use std::ops::Deref;

use chrono::Utc;

use super::Repository;
use crate::models::Workout;
use crate::storage::{GymDatabase, StoreResult};

/// Repository for workout records, with the generic CRUD available via `Deref`.
#[derive(Clone)]
pub struct WorkoutRepository {
    inner: Repository<Workout>,
}

impl WorkoutRepository {
    pub fn new(db: GymDatabase) -> Self {
        Self {
            inner: Repository::new(db),
        }
    }

    /// Workouts that start after the moment of the call.
    pub async fn get_scheduled_workouts(&self) -> StoreResult<Vec<Workout>> {
        let now = Utc::now();
        self.inner
            .find(move |workout| workout.is_scheduled_after(now))
            .await
    }
}

impl From<Repository<Workout>> for WorkoutRepository {
    fn from(inner: Repository<Workout>) -> Self {
        Self { inner }
    }
}

impl Deref for WorkoutRepository {
    type Target = Repository<Workout>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
