// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error type shared by both backing stores.

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The identity does not exist in the collection.
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: &'static str, id: i32 },

    /// The id sequence for a collection ran past `i32::MAX`.
    #[error("id sequence exhausted for {0}")]
    SequenceExhausted(&'static str),
}

impl StoreError {
    pub fn not_found<T: super::Entity>(id: i32) -> Self {
        Self::NotFound { kind: T::LABEL, id }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
