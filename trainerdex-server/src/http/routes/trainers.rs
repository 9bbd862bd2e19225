//! Trainer endpoints

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Trainer, TrainerRepo};
use crate::http::error::ApiError;
use crate::http::extractors::TrainerId;
use crate::http::server::AppState;
use crate::service::TrainerService;

/// Create/update request body
#[derive(Deserialize)]
pub struct TrainerRequest {
    pub name: String,
    pub email: String,
}

/// Trainer response
#[derive(Serialize)]
pub struct TrainerResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<Trainer> for TrainerResponse {
    fn from(t: Trainer) -> Self {
        Self {
            id: t.id,
            name: t.name,
            email: t.email,
        }
    }
}

/// Result message for write operations
#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Search filters for GET /trainers
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerQuery {
    pub starting_with: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// GET /trainers - list, optionally filtered
async fn find_trainers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrainerQuery>,
) -> Result<Json<Vec<TrainerResponse>>, ApiError> {
    let service = TrainerService::new(TrainerRepo::new(&state.pool));

    // Filter precedence: startingWith, then name, then email.
    let trainers = if let Some(prefix) = query.starting_with.as_deref() {
        service.find_by_name_starting_with(prefix).await?
    } else if let Some(name) = query.name.as_deref() {
        service.find_by_name(name).await?
    } else if let Some(email) = query.email.as_deref() {
        service.find_by_email(email).await?
    } else {
        service.find_all().await?
    };

    Ok(Json(
        trainers.into_iter().map(TrainerResponse::from).collect(),
    ))
}

/// GET /trainers/{id} - get a single trainer
async fn find_trainer(
    State(state): State<Arc<AppState>>,
    TrainerId(id): TrainerId,
) -> Result<Json<TrainerResponse>, ApiError> {
    let trainer = TrainerService::new(TrainerRepo::new(&state.pool))
        .find_by_id(id)
        .await?;

    Ok(Json(TrainerResponse::from(trainer)))
}

/// POST /trainers - create a new trainer
async fn create_trainer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TrainerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let trainer = TrainerService::new(TrainerRepo::new(&state.pool))
        .create(&req.name, &req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/trainers/{}", trainer.id))],
        Json(MessageResponse {
            message: "trainer created",
        }),
    ))
}

/// PATCH /trainers/{id} - update name and email
async fn update_trainer(
    State(state): State<Arc<AppState>>,
    TrainerId(id): TrainerId,
    Json(req): Json<TrainerRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    TrainerService::new(TrainerRepo::new(&state.pool))
        .update(id, &req.name, &req.email)
        .await?;

    Ok(Json(MessageResponse {
        message: "trainer updated",
    }))
}

/// DELETE /trainers/{id}
async fn delete_trainer(
    State(state): State<Arc<AppState>>,
    TrainerId(id): TrainerId,
) -> Result<Json<MessageResponse>, ApiError> {
    TrainerService::new(TrainerRepo::new(&state.pool))
        .delete(id)
        .await?;

    Ok(Json(MessageResponse {
        message: "trainer deleted",
    }))
}

/// Trainer routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trainers", get(find_trainers).post(create_trainer))
        .route(
            "/trainers/{id}",
            get(find_trainer)
                .patch(update_trainer)
                .delete(delete_trainer),
        )
}

#[cfg(test)]
mod tests {
    // Workflow behavior is covered in service::trainers against an
    // in-memory store; end-to-end tests need a database:
    // DATABASE_URL=... cargo test -p trainerdex-server -- --ignored
}
