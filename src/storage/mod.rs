// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistence for members, trainers and workouts. Two interchangeable
//! backends are provided:
//!
//! - **Database**: an embedded redb file with one table per entity kind,
//!   accessed through the generic [`Repository`].
//! - **JSON files**: one pretty-printed container file per kind, accessed
//!   through [`JsonDataService`].
//!
//! ## Storage Layout
//!
//! ```text
//! {DATA_DIR}/
//!   gym.redb         # database backend
//!   members.json     # JSON backend
//!   trainers.json
//!   workouts.json
//! ```
//!
//! Ids are assigned by the store, start at 1 and are never reused within a
//! collection, even after deletes.

pub mod database;
pub mod entity;
pub mod error;
pub mod json_store;
pub mod list_cache;
pub mod paths;
pub mod repository;
pub mod store;

pub use database::GymDatabase;
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use json_store::{Container, JsonDataService};
pub use list_cache::{ListCache, DEFAULT_LIST_TTL, TRAINERS_CACHE_KEY};
pub use paths::StoragePaths;
pub use repository::{MemberRepository, Repository, TrainerRepository, WorkoutRepository};
pub use store::{EntityStore, Stores};
