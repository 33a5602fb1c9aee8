// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded gym database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `members`, `trainers`, `workouts`: id → serialized record (JSON bytes)
//! - `sequences`: collection name → next id to hand out
//!
//! Ids come from `sequences`, never from the highest stored key, so an id
//! freed by a delete is not handed out again.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};

use super::{Entity, StoreError, StoreResult};
use crate::models::{Member, Trainer, Workout};

// =============================================================================
// Table Definitions
// =============================================================================

/// Next id per collection.
const SEQUENCES: TableDefinition<&str, i32> = TableDefinition::new("sequences");

/// Record table for an entity kind: id → JSON bytes.
pub(crate) fn records<T: Entity>() -> TableDefinition<'static, i32, &'static [u8]> {
    TableDefinition::new(T::KIND)
}

// =============================================================================
// GymDatabase
// =============================================================================

/// Shared handle to the embedded database.
///
/// Cheap to clone; every clone refers to the same open file.
#[derive(Clone)]
pub struct GymDatabase {
    db: Arc<Database>,
}

impl GymDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SEQUENCES)?;
            let _ = write_txn.open_table(records::<Member>())?;
            let _ = write_txn.open_table(records::<Trainer>())?;
            let _ = write_txn.open_table(records::<Workout>())?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "Opened gym database");
        Ok(Self { db: Arc::new(db) })
    }

    /// Run a blocking database operation on the tokio blocking pool.
    pub(crate) async fn run<R, F>(&self, op: F) -> StoreResult<R>
    where
        F: FnOnce(&Database) -> StoreResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || op(&db)).await?
    }

    /// Check that a read transaction can be opened.
    pub fn health_check(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(SEQUENCES)?;
        Ok(())
    }
}

/// Take the next id for `kind` inside an open write transaction.
///
/// The counter starts at 1 and only ever moves forward.
pub(crate) fn next_id(write_txn: &WriteTransaction, kind: &'static str) -> StoreResult<i32> {
    let mut table = write_txn.open_table(SEQUENCES)?;
    let id = match table.get(kind)? {
        Some(value) => value.value(),
        None => 1,
    };
    let next = id.checked_add(1).ok_or(StoreError::SequenceExhausted(kind))?;
    table.insert(kind, next)?;
    Ok(id)
}
