// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use validator::Validate;

use super::ApiJson;
use crate::{
    error::ApiError,
    models::{CreateMemberRequest, Member, UpdateMemberRequest},
    state::AppState,
    storage::{Entity, StoreError},
};

#[utoipa::path(
    get,
    path = "/api/members",
    tag = "Members",
    responses((status = 200, body = [Member]))
)]
pub async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<Member>>, ApiError> {
    Ok(Json(state.stores.members.list().await?))
}

#[utoipa::path(
    get,
    path = "/api/members/active",
    tag = "Members",
    responses((status = 200, body = [Member]))
)]
pub async fn list_active_members(
    State(state): State<AppState>,
) -> Result<Json<Vec<Member>>, ApiError> {
    Ok(Json(state.stores.members.active_members().await?))
}

#[utoipa::path(
    get,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    tag = "Members",
    responses(
        (status = 200, body = Member),
        (status = 404, description = "Member not found")
    )
)]
pub async fn get_member(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<Member>, ApiError> {
    Ok(Json(state.stores.members.require(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/members",
    request_body = CreateMemberRequest,
    tag = "Members",
    responses(
        (status = 201, body = Member),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_member(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateMemberRequest>,
) -> Result<(StatusCode, Json<Member>), ApiError> {
    request.validate()?;
    let member = state
        .stores
        .members
        .create(request.into_member(Utc::now()))
        .await?;
    tracing::info!(member_id = member.id, "Member registered");
    Ok((StatusCode::CREATED, Json(member)))
}

#[utoipa::path(
    put,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    request_body = UpdateMemberRequest,
    tag = "Members",
    responses(
        (status = 200, body = Member),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn update_member(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateMemberRequest>,
) -> Result<Json<Member>, ApiError> {
    request.validate()?;
    let current = state.stores.members.require(id).await?;
    let changes = request.apply_to(&current);
    let updated = state
        .stores
        .members
        .update(id, changes)
        .await?
        .ok_or_else(|| StoreError::not_found::<Member>(id))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    params(("id" = i32, Path, description = "Member id")),
    tag = "Members",
    responses(
        (status = 204),
        (status = 404, description = "Member not found")
    )
)]
pub async fn delete_member(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if !state.stores.members.delete(id).await? {
        return Err(StoreError::not_found::<Member>(id).into());
    }
    tracing::info!(member_id = id, entity = Member::KIND, "Member removed");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    fn create_request() -> CreateMemberRequest {
        CreateMemberRequest {
            name: "Test".into(),
            email: "t@test.com".into(),
            phone: "+380501112233".into(),
            membership_type: "Стандарт".into(),
            age: 25,
            gender: "Ж".into(),
        }
    }

    fn update_request(active: bool) -> UpdateMemberRequest {
        UpdateMemberRequest {
            name: "Renamed".into(),
            email: "r@test.com".into(),
            phone: "380671234567".into(),
            membership_type: "Преміум".into(),
            is_active: active,
            age: 26,
            gender: "Ж".into(),
        }
    }

    #[tokio::test]
    async fn create_member_success() {
        for backend in [StorageBackend::Database, StorageBackend::Json] {
            let (state, _dir) = AppState::temp(backend);
            let before = Utc::now();

            let (status, Json(member)) = create_member(State(state.clone()), ApiJson(create_request()))
                .await
                .expect("member creation succeeds");

            assert_eq!(status, StatusCode::CREATED);
            assert!(member.is_active);
            assert!(member.join_date >= before);

            let Json(stored) = get_member(Path(member.id), State(state.clone()))
                .await
                .expect("member lookup succeeds");
            assert_eq!(stored, member);
        }
    }

    #[tokio::test]
    async fn fresh_database_assigns_id_one() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);
        let (_, Json(member)) = create_member(State(state), ApiJson(create_request()))
            .await
            .unwrap();
        assert_eq!(member.id, 1);
    }

    #[tokio::test]
    async fn create_member_rejects_bad_phone() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);
        let mut request = create_request();
        request.phone = "0501112233".into();

        let err = create_member(State(state.clone()), ApiJson(request))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap()["phone"].is_array());

        let Json(all) = list_members(State(state)).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn update_member_keeps_join_date() {
        for backend in [StorageBackend::Database, StorageBackend::Json] {
            let (state, _dir) = AppState::temp(backend);
            let (_, Json(created)) = create_member(State(state.clone()), ApiJson(create_request()))
                .await
                .unwrap();

            let Json(updated) = update_member(
                Path(created.id),
                State(state.clone()),
                ApiJson(update_request(false)),
            )
            .await
            .expect("member update succeeds");

            assert_eq!(updated.id, created.id);
            assert_eq!(updated.join_date, created.join_date);
            assert_eq!(updated.name, "Renamed");
            assert!(!updated.is_active);
        }
    }

    #[tokio::test]
    async fn update_missing_member_is_404() {
        let (state, _dir) = AppState::temp(StorageBackend::Json);
        let err = update_member(Path(999), State(state), ApiJson(update_request(true)))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Member with ID 999 not found");
    }

    #[tokio::test]
    async fn delete_member_success_then_404() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);
        let (_, Json(member)) = create_member(State(state.clone()), ApiJson(create_request()))
            .await
            .unwrap();

        let status = delete_member(Path(member.id), State(state.clone()))
            .await
            .expect("member deletion succeeds");
        assert_eq!(status, StatusCode::NO_CONTENT);

        let err = delete_member(Path(member.id), State(state.clone()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err = get_member(Path(member.id), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn active_members_filters_inactive() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);
        let (_, Json(first)) = create_member(State(state.clone()), ApiJson(create_request()))
            .await
            .unwrap();
        let (_, Json(second)) = create_member(State(state.clone()), ApiJson(create_request()))
            .await
            .unwrap();
        update_member(
            Path(second.id),
            State(state.clone()),
            ApiJson(update_request(false)),
        )
        .await
        .unwrap();

        let Json(active) = list_active_members(State(state)).await.unwrap();
        let ids: Vec<_> = active.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first.id]);
    }
}
