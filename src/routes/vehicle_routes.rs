use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::dto::availability_dto::{AvailabilityRequest, AvailabilityResponse, ScheduleQuery};
use crate::dto::rental_dto::RentalResponse;
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::availability::AvailabilityService;
use crate::services::overlap::DateInterval;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles))
        .route("/:vehicle/availability", post(check_availability))
        .route("/:vehicle/schedule", get(get_schedule))
}

/// Flota activa (solo lectura; la gestión de flota vive en otro módulo)
async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let vehicles = VehicleRepository::new(state.pool.clone()).list_active().await?;
    Ok(Json(vehicles))
}

/// Disponibilidad con vehículo por id en el path
async fn check_availability(
    State(state): State<AppState>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<AvailabilityRequest>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let interval = DateInterval::new(request.start_date, request.end_date)?;
    let report = AvailabilityService::new(state.pool.clone())
        .check_availability_by_id(vehicle_id, interval)
        .await?;

    Ok(Json(AvailabilityResponse {
        available: report.available,
        conflicts: report.conflicts,
    }))
}

/// Agenda del vehículo por nombre, filtrable por mes
async fn get_schedule(
    State(state): State<AppState>,
    Path(vehicle_name): Path<String>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let rentals = AvailabilityService::new(state.pool.clone())
        .schedule(&vehicle_name, query.month, query.year)
        .await?;

    Ok(Json(rentals.into_iter().map(Into::into).collect()))
}
