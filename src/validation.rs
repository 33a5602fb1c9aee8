// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Field rules that the `validator` derive cannot express on its own.
//!
//! The declarative rules live on the request types in [`crate::models`];
//! handlers call `.validate()` before anything reaches storage. Storage never
//! re-checks these bounds.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use validator::ValidationError;

/// Registration form: the leading `+` is mandatory.
static PHONE_STRICT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+380\d{9}$").expect("phone pattern compiles")
});

/// Edit forms accept the number with or without the leading `+`.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?380\d{9}$").expect("phone pattern compiles")
});

fn phone_error(hint: &'static str) -> ValidationError {
    let mut error = ValidationError::new("phone");
    error.message = Some(Cow::Borrowed(hint));
    error
}

/// `+380XXXXXXXXX` only.
pub fn validate_phone_strict(phone: &str) -> Result<(), ValidationError> {
    if PHONE_STRICT.is_match(phone) {
        Ok(())
    } else {
        Err(phone_error("Phone must be in +380XXXXXXXXX format"))
    }
}

/// `+380XXXXXXXXX` or `380XXXXXXXXX`.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(phone) {
        Ok(())
    } else {
        Err(phone_error("Phone must be in +380... format"))
    }
}

/// The workout must start strictly after the current instant.
pub fn validate_future(at: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *at > Utc::now() {
        Ok(())
    } else {
        let mut error = ValidationError::new("future");
        error.message = Some(Cow::Borrowed("Workout date must be in the future"));
        Err(error)
    }
}
