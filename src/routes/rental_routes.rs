use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::availability_dto::{AvailabilityResponse, VehicleAvailabilityRequest};
use crate::dto::rental_dto::{
    CancelRentalRequest, CompleteRentalRequest, CreateRentalRequest, RentalResponse,
};
use crate::services::availability::AvailabilityService;
use crate::services::overlap::DateInterval;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_rental))
        .route("/", get(list_rentals))
        .route("/availability", post(check_availability))
        .route("/:id", get(get_rental))
        .route("/:id", delete(delete_rental))
        .route("/:id/complete", patch(complete_rental))
        .route("/:id/cancel", patch(cancel_rental))
}

fn controller(state: &AppState) -> RentalController {
    RentalController::new(
        state.pool.clone(),
        state.documents.clone(),
        state.notifications.clone(),
    )
}

async fn create_rental(
    State(state): State<AppState>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<Json<RentalResponse>, AppError> {
    let response = controller(&state).create(request).await?;
    Ok(Json(response))
}

async fn list_rentals(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RentalResponse>, AppError> {
    let response = controller(&state).get(id).await?;
    Ok(Json(response))
}

/// Disponibilidad con vehículo por nombre, con exclusión opcional de un
/// rental en edición
async fn check_availability(
    State(state): State<AppState>,
    Json(request): Json<VehicleAvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let interval = DateInterval::new(request.start_date, request.end_date)?;
    let report = AvailabilityService::new(state.pool.clone())
        .check_availability(&request.vehicle, interval, request.exclude_rental_id)
        .await?;

    Ok(Json(AvailabilityResponse {
        available: report.available,
        conflicts: report.conflicts,
    }))
}

async fn complete_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CompleteRentalRequest>,
) -> Result<Json<RentalResponse>, AppError> {
    let response = controller(&state).complete(id, request).await?;
    Ok(Json(response))
}

async fn cancel_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<CancelRentalRequest>,
) -> Result<Json<RentalResponse>, AppError> {
    let response = controller(&state).cancel(id, request).await?;
    Ok(Json(response))
}

async fn delete_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Rental eliminado exitosamente"
    })))
}
