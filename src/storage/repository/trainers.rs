// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Trainer repository. Trainers need nothing beyond the generic CRUD.

use super::Repository;
use crate::models::Trainer;

pub type TrainerRepository = Repository<Trainer>;
