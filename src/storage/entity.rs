// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The [`Entity`] trait ties a record type to its collection.
//!
//! Both backends are generic over it: the collection name picks the redb
//! table and the JSON file, `id`/`set_id` expose the store-assigned identity,
//! and `apply_changes` defines which fields an update may overwrite.

use chrono::{Duration, DurationRound, Utc};
use serde::{de::DeserializeOwned, Serialize};

use crate::models::{Member, Trainer, Workout};

pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name. Used as the redb table name and JSON file stem.
    const KIND: &'static str;

    /// Singular name used in messages, e.g. "Member".
    const LABEL: &'static str;

    fn id(&self) -> i32;

    fn set_id(&mut self, id: i32);

    /// Overwrite every mutable field with the values from `changes`.
    fn apply_changes(&mut self, changes: Self);

    /// Records written when a JSON container is created for the first time.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

impl Entity for Member {
    const KIND: &'static str = "members";
    const LABEL: &'static str = "Member";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    /// Join date stays as it was at creation.
    fn apply_changes(&mut self, changes: Self) {
        self.name = changes.name;
        self.email = changes.email;
        self.phone = changes.phone;
        self.membership_type = changes.membership_type;
        self.is_active = changes.is_active;
        self.age = changes.age;
        self.gender = changes.gender;
    }

    fn seed() -> Vec<Self> {
        let joined = Utc::now() - Duration::days(30);
        vec![
            Member {
                id: 1,
                name: "Іван Петренко".into(),
                email: "ivan.petrenko@example.com".into(),
                phone: "+380501234567".into(),
                join_date: joined,
                membership_type: "Стандарт".into(),
                is_active: true,
                age: 28,
                gender: "Чоловіча".into(),
            },
            Member {
                id: 2,
                name: "Олена Коваль".into(),
                email: "olena.koval@example.com".into(),
                phone: "+380671112233".into(),
                join_date: joined,
                membership_type: "Преміум".into(),
                is_active: true,
                age: 34,
                gender: "Жіноча".into(),
            },
        ]
    }
}

impl Entity for Trainer {
    const KIND: &'static str = "trainers";
    const LABEL: &'static str = "Trainer";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn apply_changes(&mut self, changes: Self) {
        self.name = changes.name;
        self.age = changes.age;
        self.gender = changes.gender;
        self.experience = changes.experience;
        self.specialization = changes.specialization;
        self.phone = changes.phone;
        self.email = changes.email;
    }

    fn seed() -> Vec<Self> {
        vec![
            Trainer {
                id: 1,
                name: "Андрій Мельник".into(),
                age: 35,
                gender: "Чоловіча".into(),
                experience: 10,
                specialization: Some("Силові тренування".into()),
                phone: "+380931234567".into(),
                email: "andriy.melnyk@example.com".into(),
            },
            Trainer {
                id: 2,
                name: "Марія Шевченко".into(),
                age: 29,
                gender: "Жіноча".into(),
                experience: 6,
                specialization: Some("Йога".into()),
                phone: "+380661234567".into(),
                email: "maria.shevchenko@example.com".into(),
            },
        ]
    }
}

impl Entity for Workout {
    const KIND: &'static str = "workouts";
    const LABEL: &'static str = "Workout";

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn apply_changes(&mut self, changes: Self) {
        self.name = changes.name;
        self.description = changes.description;
        self.duration_minutes = changes.duration_minutes;
        self.instructor = changes.instructor;
        self.max_participants = changes.max_participants;
        self.scheduled_date_time = changes.scheduled_date_time;
        self.workout_type = changes.workout_type;
    }

    fn seed() -> Vec<Self> {
        // Seed sessions start on the hour, a few days from now.
        let base = Utc::now()
            .duration_trunc(Duration::hours(1))
            .unwrap_or_else(|_| Utc::now());
        vec![
            Workout {
                id: 1,
                name: "Ранкова йога".into(),
                description: "Легка практика для початківців".into(),
                duration_minutes: 60,
                instructor: "Марія Шевченко".into(),
                max_participants: 15,
                scheduled_date_time: base + Duration::days(1),
                workout_type: "Йога".into(),
            },
            Workout {
                id: 2,
                name: "Функціональний тренінг".into(),
                description: "Кругове тренування з власною вагою".into(),
                duration_minutes: 45,
                instructor: "Андрій Мельник".into(),
                max_participants: 12,
                scheduled_date_time: base + Duration::days(2),
                workout_type: "Кросфіт".into(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_ids_are_unique<T: Entity>() -> bool {
        let mut ids: Vec<i32> = T::seed().iter().map(Entity::id).collect();
        let len = ids.len();
        ids.sort_unstable();
        ids.dedup();
        ids.len() == len && ids.iter().all(|id| *id > 0)
    }

    #[test]
    fn seeds_have_unique_positive_ids() {
        assert!(seed_ids_are_unique::<Member>());
        assert!(seed_ids_are_unique::<Trainer>());
        assert!(seed_ids_are_unique::<Workout>());
    }

    #[test]
    fn member_changes_leave_join_date_alone() {
        let mut seeded = Member::seed().remove(0);
        let joined = seeded.join_date;

        let mut changes = seeded.clone();
        changes.id = 99;
        changes.name = "Renamed".into();
        changes.is_active = false;
        changes.join_date = Utc::now() + Duration::days(365);

        seeded.apply_changes(changes);
        assert_eq!(seeded.id, 1);
        assert_eq!(seeded.join_date, joined);
        assert_eq!(seeded.name, "Renamed");
        assert!(!seeded.is_active);
    }

    #[test]
    fn seeded_workouts_are_in_the_future() {
        let now = Utc::now();
        assert!(Workout::seed().iter().all(|w| w.is_scheduled_after(now)));
    }
}
