// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::ApiJson;
use crate::{
    error::ApiError,
    models::{CreateWorkoutRequest, UpdateWorkoutRequest, Workout},
    state::AppState,
    storage::StoreError,
};

#[utoipa::path(
    get,
    path = "/api/workouts",
    tag = "Workouts",
    responses((status = 200, body = [Workout]))
)]
pub async fn list_workouts(State(state): State<AppState>) -> Result<Json<Vec<Workout>>, ApiError> {
    Ok(Json(state.stores.workouts.list().await?))
}

/// Workouts that have not started yet.
#[utoipa::path(
    get,
    path = "/api/workouts/scheduled",
    tag = "Workouts",
    responses((status = 200, body = [Workout]))
)]
pub async fn list_scheduled_workouts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Workout>>, ApiError> {
    Ok(Json(state.stores.workouts.scheduled_workouts().await?))
}

#[utoipa::path(
    get,
    path = "/api/workouts/{id}",
    params(("id" = i32, Path, description = "Workout id")),
    tag = "Workouts",
    responses(
        (status = 200, body = Workout),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn get_workout(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<Json<Workout>, ApiError> {
    Ok(Json(state.stores.workouts.require(id).await?))
}

#[utoipa::path(
    post,
    path = "/api/workouts",
    request_body = CreateWorkoutRequest,
    tag = "Workouts",
    responses(
        (status = 201, body = Workout),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_workout(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateWorkoutRequest>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    request.validate()?;
    let workout = state.stores.workouts.create(request.into()).await?;
    tracing::info!(
        workout_id = workout.id,
        scheduled = %workout.scheduled_date_time,
        "Workout scheduled"
    );
    Ok((StatusCode::CREATED, Json(workout)))
}

#[utoipa::path(
    put,
    path = "/api/workouts/{id}",
    params(("id" = i32, Path, description = "Workout id")),
    request_body = UpdateWorkoutRequest,
    tag = "Workouts",
    responses(
        (status = 200, body = Workout),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn update_workout(
    Path(id): Path<i32>,
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateWorkoutRequest>,
) -> Result<Json<Workout>, ApiError> {
    request.validate()?;
    let updated = state
        .stores
        .workouts
        .update(id, request.into_workout(id))
        .await?
        .ok_or_else(|| StoreError::not_found::<Workout>(id))?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/api/workouts/{id}",
    params(("id" = i32, Path, description = "Workout id")),
    tag = "Workouts",
    responses(
        (status = 204),
        (status = 404, description = "Workout not found")
    )
)]
pub async fn delete_workout(
    Path(id): Path<i32>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    if !state.stores.workouts.delete(id).await? {
        return Err(StoreError::not_found::<Workout>(id).into());
    }
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use chrono::{Duration, Utc};

    fn create_request(offset: Duration) -> CreateWorkoutRequest {
        CreateWorkoutRequest {
            name: "Morning Yoga".into(),
            description: "Gentle flow".into(),
            duration_minutes: 60,
            instructor: "Марія".into(),
            max_participants: 12,
            scheduled_date_time: Utc::now() + offset,
            workout_type: "Йога".into(),
        }
    }

    fn update_request(offset: Duration) -> UpdateWorkoutRequest {
        UpdateWorkoutRequest {
            name: "Evening Yoga".into(),
            description: "Slow flow".into(),
            duration_minutes: 45,
            instructor: "Марія".into(),
            max_participants: 10,
            scheduled_date_time: Utc::now() + offset,
            workout_type: "Йога".into(),
        }
    }

    #[tokio::test]
    async fn create_workout_success() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);
        let (status, Json(workout)) =
            create_workout(State(state.clone()), ApiJson(create_request(Duration::days(1))))
                .await
                .expect("workout creation succeeds");

        assert_eq!(status, StatusCode::CREATED);
        let Json(stored) = get_workout(Path(workout.id), State(state)).await.unwrap();
        assert_eq!(stored, workout);
    }

    #[tokio::test]
    async fn create_rejects_past_schedule_and_long_duration() {
        let (state, _dir) = AppState::temp(StorageBackend::Database);

        let err = create_workout(State(state.clone()), ApiJson(create_request(-Duration::hours(1))))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.details.unwrap()["scheduled_date_time"].is_array());

        let mut long = create_request(Duration::days(1));
        long.duration_minutes = 500;
        let err = create_workout(State(state.clone()), ApiJson(long))
            .await
            .unwrap_err();
        assert!(err.details.unwrap()["duration_minutes"].is_array());

        let Json(all) = list_workouts(State(state)).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn update_may_move_into_the_past() {
        for backend in [StorageBackend::Database, StorageBackend::Json] {
            let (state, _dir) = AppState::temp(backend);
            let (_, Json(created)) =
                create_workout(State(state.clone()), ApiJson(create_request(Duration::days(2))))
                    .await
                    .unwrap();

            let Json(updated) = update_workout(
                Path(created.id),
                State(state.clone()),
                ApiJson(update_request(-Duration::days(1))),
            )
            .await
            .expect("workout update succeeds");
            assert_eq!(updated.id, created.id);
            assert_eq!(updated.duration_minutes, 45);

            let Json(scheduled) = list_scheduled_workouts(State(state)).await.unwrap();
            assert!(scheduled.iter().all(|w| w.id != created.id));
        }
    }

    #[tokio::test]
    async fn delete_missing_workout_is_404() {
        let (state, _dir) = AppState::temp(StorageBackend::Json);
        let err = delete_workout(Path(404), State(state)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Workout with ID 404 not found");
    }
}
