// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Gym Data Models
//!
//! This module defines the stored records and the request bodies used by the
//! REST API. All types derive `Serialize`, `Deserialize`, and `ToSchema` for
//! automatic JSON handling and OpenAPI documentation. Field names are
//! camelCase on the wire and in the JSON data files.
//!
//! ## Model Categories
//!
//! - **Members**: Club members with a fixed join date and an active flag
//! - **Trainers**: Staff with experience and an optional specialization
//! - **Workouts**: Scheduled group sessions, timestamps kept in UTC

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::validation::{validate_future, validate_phone, validate_phone_strict};

// =============================================================================
// Member Models
// =============================================================================

/// A gym member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Store-assigned identifier.
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// When the member joined. Set once at creation.
    pub join_date: DateTime<Utc>,
    /// Membership category, e.g. "Стандарт" or "Преміум".
    pub membership_type: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub age: i32,
    pub gender: String,
}

fn default_active() -> bool {
    true
}

/// Request to register a new member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Enter a valid email"))]
    pub email: String,
    /// Ukrainian mobile number in `+380XXXXXXXXX` form.
    #[validate(custom(function = "validate_phone_strict"))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub membership_type: String,
    #[validate(range(min = 1, max = 120))]
    pub age: i32,
    #[validate(length(min = 1))]
    pub gender: String,
}

impl CreateMemberRequest {
    /// Build the member record. The store assigns the id.
    pub fn into_member(self, joined_at: DateTime<Utc>) -> Member {
        Member {
            id: 0,
            name: self.name,
            email: self.email,
            phone: self.phone,
            join_date: joined_at,
            membership_type: self.membership_type,
            is_active: true,
            age: self.age,
            gender: self.gender,
        }
    }
}

/// Request to edit an existing member.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub membership_type: String,
    pub is_active: bool,
    #[validate(range(min = 1, max = 120))]
    pub age: i32,
    #[validate(length(min = 1))]
    pub gender: String,
}

impl UpdateMemberRequest {
    /// Apply the requested values onto the current record.
    ///
    /// Identity and join date are carried over from `current`.
    pub fn apply_to(self, current: &Member) -> Member {
        Member {
            id: current.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            join_date: current.join_date,
            membership_type: self.membership_type,
            is_active: self.is_active,
            age: self.age,
            gender: self.gender,
        }
    }
}

// =============================================================================
// Trainer Models
// =============================================================================

/// A gym trainer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Trainer {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: String,
    /// Years of experience.
    pub experience: i32,
    #[serde(default)]
    pub specialization: Option<String>,
    pub phone: String,
    pub email: String,
}

/// Request body shared by trainer create and update.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrainerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 18, max = 100))]
    pub age: i32,
    #[validate(length(min = 1))]
    pub gender: String,
    #[validate(range(min = 0, max = 50))]
    pub experience: i32,
    #[serde(default)]
    pub specialization: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(email)]
    pub email: String,
}

impl TrainerRequest {
    pub fn into_trainer(self, id: i32) -> Trainer {
        Trainer {
            id,
            name: self.name,
            age: self.age,
            gender: self.gender,
            experience: self.experience,
            specialization: self.specialization,
            phone: self.phone,
            email: self.email,
        }
    }
}

// =============================================================================
// Workout Models
// =============================================================================

/// A scheduled workout session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub duration_minutes: i32,
    /// Name of the instructor running the session.
    pub instructor: String,
    pub max_participants: i32,
    /// Start time, normalized to UTC.
    pub scheduled_date_time: DateTime<Utc>,
    pub workout_type: String,
}

impl Workout {
    /// Whether the session starts after `now`.
    pub fn is_scheduled_after(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_date_time > now
    }
}

/// Offset-less forms sent by `datetime-local` inputs.
const NAIVE_SCHEDULE_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a schedule timestamp. Strings without an offset are read as UTC.
pub fn parse_schedule(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NAIVE_SCHEDULE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn deserialize_schedule<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_schedule(raw.trim())
        .ok_or_else(|| de::Error::custom(format!("invalid date-time `{raw}`")))
}

/// Request to schedule a new workout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    #[validate(length(min = 1, message = "Workout name is required"))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1, max = 300, message = "Duration must be between 1 and 300 minutes"))]
    pub duration_minutes: i32,
    #[validate(length(min = 1))]
    pub instructor: String,
    #[validate(range(min = 1, max = 50))]
    pub max_participants: i32,
    /// RFC 3339 with any offset, or a local `YYYY-MM-DDTHH:MM[:SS]` taken as UTC.
    #[validate(custom(function = "validate_future"))]
    #[serde(deserialize_with = "deserialize_schedule")]
    pub scheduled_date_time: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub workout_type: String,
}

/// Request to edit a workout. The schedule may be moved into the past.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 1, max = 300))]
    pub duration_minutes: i32,
    #[validate(length(min = 1))]
    pub instructor: String,
    #[validate(range(min = 1, max = 50))]
    pub max_participants: i32,
    #[serde(deserialize_with = "deserialize_schedule")]
    pub scheduled_date_time: DateTime<Utc>,
    #[validate(length(min = 1))]
    pub workout_type: String,
}

impl From<CreateWorkoutRequest> for Workout {
    fn from(request: CreateWorkoutRequest) -> Self {
        Workout {
            id: 0,
            name: request.name,
            description: request.description,
            duration_minutes: request.duration_minutes,
            instructor: request.instructor,
            max_participants: request.max_participants,
            scheduled_date_time: request.scheduled_date_time,
            workout_type: request.workout_type,
        }
    }
}

impl UpdateWorkoutRequest {
    pub fn into_workout(self, id: i32) -> Workout {
        Workout {
            id,
            name: self.name,
            description: self.description,
            duration_minutes: self.duration_minutes,
            instructor: self.instructor,
            max_participants: self.max_participants,
            scheduled_date_time: self.scheduled_date_time,
            workout_type: self.workout_type,
        }
    }
}
