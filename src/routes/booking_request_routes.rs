use axum::{
    extract::{Path, State},
    routing::{delete, get, patch, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::booking_request_controller::BookingRequestController;
use crate::dto::booking_request_dto::{
    BookingRequestResponse, ConvertBookingRequest, DecideBookingRequest, SubmitBookingRequest,
    SubmitBookingResponse,
};
use crate::dto::rental_dto::RentalResponse;
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_booking_request_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_booking_request))
        .route("/", get(list_booking_requests))
        .route("/:id", get(get_booking_request))
        .route("/:id", delete(withdraw_booking_request))
        .route("/:id/status", patch(decide_booking_request))
        .route("/:id/convert", post(convert_booking_request))
}

fn controller(state: &AppState) -> BookingRequestController {
    BookingRequestController::new(state.pool.clone(), state.notifications.clone())
}

async fn submit_booking_request(
    State(state): State<AppState>,
    Json(request): Json<SubmitBookingRequest>,
) -> Result<Json<SubmitBookingResponse>, AppError> {
    let response = controller(&state).submit(request).await?;
    Ok(Json(response))
}

async fn list_booking_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingRequestResponse>>, AppError> {
    let response = controller(&state).list().await?;
    Ok(Json(response))
}

async fn get_booking_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookingRequestResponse>, AppError> {
    let response = controller(&state).get(id).await?;
    Ok(Json(response))
}

async fn decide_booking_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<DecideBookingRequest>,
) -> Result<Json<ApiResponse<BookingRequestResponse>>, AppError> {
    let response = controller(&state).decide(id, request).await?;
    Ok(Json(ApiResponse::success(response)))
}

async fn convert_booking_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConvertBookingRequest>,
) -> Result<Json<RentalResponse>, AppError> {
    let response = controller(&state).convert(id, request).await?;
    Ok(Json(response))
}

async fn withdraw_booking_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    controller(&state).withdraw(id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Solicitud de reserva eliminada exitosamente"
    })))
}
