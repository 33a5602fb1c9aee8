// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Gym Server - Member, Trainer and Workout Management
//!
//! This crate provides a REST service for a fitness club: member
//! registration, the trainer roster and workout scheduling. Records are kept
//! either in an embedded redb database or in per-collection JSON files.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum) and OpenAPI document
//! - `config` - Environment-driven runtime settings
//! - `models` - Records and request bodies
//! - `storage` - Generic repository, JSON data service, list cache
//! - `validation` - Request validation rules

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod storage;
pub mod validation;
