// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Trainer endpoints.
//!
//! The full list is served from [`AppState::trainer_cache`]. Every successful
//! mutation drops the cached list so the next read goes back to the store.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::ApiJson;
use crate::{
    error::ApiError,
    models::{Trainer, TrainerRequest},
    state::AppState,
    storage::{StoreError, TRAINERS_CACHE_KEY},
};

#[utoipa::path(
    get,
    path = "/api/trainers",
    tag = "Trainers",
    responses((status = 200, body = [Trainer]))
)]
pub async fn list_trainers(State(state): State<AppState>) -> Result<Json<Vec<Trainer>>, ApiError> {
    if let Some(cached) = state.trainer_cache.get(TRAINERS_CACHE_KEY) {
        tracing::debug!(count = cached.len(), "Trainer list served from cache");
        return Ok(Json(cached));
    }

    let generation = state.trainer_cache.generation();
    let trainers = state.stores.trainers.list().await?;
    state
        .trainer_cache
        .put_if_current(TRAINERS_CACHE_KEY, trainers.clone(), generation);
    Ok(Json(trainers))
}

#[utoipa::path(
    get,
    path = "/api/trainers/{id}",
    params(("id" = i32, Path, description = "Trainer id")),
    tag = "Trainers",
    responses(
        (status = 200, body = Trainer),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn get_trainer(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<Trainer>, ApiError> {
    Ok(Json(state.stores.trainers.require(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/trainers",
    request_body = TrainerRequest,
    tag = "Trainers",
    responses(
        (status = 201, body = Trainer),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_trainer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TrainerRequest>,
) -> Result<(StatusCode, Json<Trainer>), ApiError> {
    request.validate()?;
    let trainer = state.stores.trainers.create(request.into_trainer(0)).await?;
    state.trainer_cache.invalidate(TRAINERS_CACHE_KEY);
    Ok((StatusCode::CREATED, Json(trainer)))
}

#[utoipa::path(
    put,
    path = "/api/trainers/{id}",
    params(("id" = i32, Path, description = "Trainer id")),
    request_body = TrainerRequest,
    tag = "Trainers",
    responses(
        (status = 200, body = Trainer),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn update_trainer(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<TrainerRequest>,
) -> Result<Json<Trainer>, ApiError> {
    request.validate()?;
    let updated = state
        .stores
        .trainers
        .update(id, request.into_trainer(id))
        .await?
        .ok_or_else(|| StoreError::not_found::<Trainer>(id))?;
    state.trainer_cache.invalidate(TRAINERS_CACHE_KEY);
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/trainers/{id}",
    params(("id" = i32, Path, description = "Trainer id")),
    tag = "Trainers",
    responses(
        (status = 204),
        (status = 404, description = "Trainer not found")
    )
)]
pub async fn delete_trainer(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if !state.stores.trainers.delete(id).await? {
        return Err(StoreError::not_found::<Trainer>(id).into());
    }
    state.trainer_cache.invalidate(TRAINERS_CACHE_KEY);
    Ok(StatusCode::NO_CONTENT)
}
