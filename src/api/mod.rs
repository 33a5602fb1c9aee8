// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::FromRequest, routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ApiError,
    models::{
        CreateMemberRequest, CreateWorkoutRequest, Member, Trainer, TrainerRequest,
        UpdateMemberRequest, UpdateWorkoutRequest, Workout,
    },
    state::AppState,
};

/// `Json` extractor whose rejections render as [`ApiError`] bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub mod health;
pub mod members;
pub mod trainers;
pub mod workouts;

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route(
            "/members",
            get(members::list_members).post(members::create_member),
        )
        .route("/members/active", get(members::list_active_members))
        .route(
            "/members/{id}",
            get(members::get_member)
                .put(members::update_member)
                .delete(members::delete_member),
        )
        .route(
            "/trainers",
            get(trainers::list_trainers).post(trainers::create_trainer),
        )
        .route(
            "/trainers/{id}",
            get(trainers::get_trainer)
                .put(trainers::update_trainer)
                .delete(trainers::delete_trainer),
        )
        .route(
            "/workouts",
            get(workouts::list_workouts).post(workouts::create_workout),
        )
        .route("/workouts/scheduled", get(workouts::list_scheduled_workouts))
        .route(
            "/workouts/{id}",
            get(workouts::get_workout)
                .put(workouts::update_workout)
                .delete(workouts::delete_workout),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger").url("/swagger/v1/swagger.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Gym API", description = "Members, trainers and workout scheduling"),
    paths(
        members::list_members,
        members::list_active_members,
        members::get_member,
        members::create_member,
        members::update_member,
        members::delete_member,
        trainers::list_trainers,
        trainers::get_trainer,
        trainers::create_trainer,
        trainers::update_trainer,
        trainers::delete_trainer,
        workouts::list_workouts,
        workouts::list_scheduled_workouts,
        workouts::get_workout,
        workouts::create_workout,
        workouts::update_workout,
        workouts::delete_workout,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Member,
            Trainer,
            Workout,
            CreateMemberRequest,
            UpdateMemberRequest,
            TrainerRequest,
            CreateWorkoutRequest,
            UpdateWorkoutRequest,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Members", description = "Member registration and management"),
        (name = "Trainers", description = "Trainer roster"),
        (name = "Workouts", description = "Workout scheduling"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;
