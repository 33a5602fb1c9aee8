// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the data directory layout.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DATA_ROOT: &str = "data";

/// File name of the embedded database.
pub const DATABASE_FILE: &str = "gym.redb";

/// Storage path utilities for the data directory.
///
/// ```text
/// data/
///   gym.redb        # database backend
///   members.json    # JSON backend, one container per entity kind
///   trainers.json
///   workouts.json
/// ```
#[derive(Debug, Clone)]
pub struct StoragePaths {
    root: PathBuf,
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::new(DATA_ROOT)
    }
}

impl StoragePaths {
    /// Create a new StoragePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory for all data.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the embedded database file.
    pub fn database(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    /// Path to the JSON container for an entity kind.
    pub fn json_container(&self, kind: &str) -> PathBuf {
        self.root.join(format!("{kind}.json"))
    }
}
