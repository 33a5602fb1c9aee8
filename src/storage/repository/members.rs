// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Member repository.

use std::ops::Deref;

use super::Repository;
use crate::models::Member;
use crate::storage::{GymDatabase, StoreResult};

/// Repository for member records, with the generic CRUD available via `Deref`.
#[derive(Clone)]
pub struct MemberRepository {
    inner: Repository<Member>,
}

impl MemberRepository {
    pub fn new(db: GymDatabase) -> Self {
        Self {
            inner: Repository::new(db),
        }
    }

    /// Members whose active flag is set.
    pub async fn get_active_members(&self) -> StoreResult<Vec<Member>> {
        self.inner.find(|member| member.is_active).await
    }
}

impl From<Repository<Member>> for MemberRepository {
    fn from(inner: Repository<Member>) -> Self {
        Self { inner }
    }
}

impl Deref for MemberRepository {
    type Target = Repository<Member>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateMemberRequest;
    use chrono::Utc;

    fn member(name: &str) -> Member {
        CreateMemberRequest {
            name: name.to_string(),
            email: "m@test.com".to_string(),
            phone: "+380501112233".to_string(),
            membership_type: "Стандарт".to_string(),
            age: 30,
            gender: "Ж".to_string(),
        }
        .into_member(Utc::now())
    }

    #[tokio::test]
    async fn active_members_excludes_inactive() {
        let dir = tempfile::tempdir().unwrap();
        let repo = MemberRepository::new(GymDatabase::open(&dir.path().join("gym.redb")).unwrap());

        repo.add(member("Active")).await.unwrap();
        let mut lapsed = repo.add(member("Lapsed")).await.unwrap();
        lapsed.is_active = false;
        repo.update(lapsed).await.unwrap();

        let active = repo.get_active_members().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Active");
        assert_eq!(repo.get_all().await.unwrap().len(), 2);
    }
}
