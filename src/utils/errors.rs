//! Sistema de manejo de errores
//! 
//! Este módulo define todos los tipos de errores del sistema de reservas
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::rental::RentalConflict;

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Customer blacklisted: {0}")]
    CustomerBlacklisted(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Vehicle unavailable: {vehicle}")]
    VehicleUnavailable {
        vehicle: String,
        conflicts: Vec<RentalConflict>,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(#[from] sqlx::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::InvalidInterval(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Invalid Interval".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_INTERVAL".to_string()),
                },
            ),

            AppError::Validation(e) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation Error".to_string(),
                    message: "The provided data is invalid".to_string(),
                    details: Some(json!(e)),
                    code: Some("VALIDATION_ERROR".to_string()),
                },
            ),

            AppError::VehicleNotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Vehicle Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("VEHICLE_NOT_FOUND".to_string()),
                },
            ),

            AppError::CustomerNotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Customer Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("CUSTOMER_NOT_FOUND".to_string()),
                },
            ),

            AppError::CustomerBlacklisted(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse {
                    error: "Customer Blacklisted".to_string(),
                    message: msg,
                    details: None,
                    code: Some("CUSTOMER_BLACKLISTED".to_string()),
                },
            ),

            AppError::InvalidTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "Invalid Transition".to_string(),
                    message: msg,
                    details: None,
                    code: Some("INVALID_TRANSITION".to_string()),
                },
            ),

            AppError::VehicleUnavailable { vehicle, conflicts } => (
                StatusCode::CONFLICT,
                ErrorResponse {
                    error: "Vehicle Unavailable".to_string(),
                    message: format!(
                        "El vehículo '{}' ya tiene reservas en el intervalo solicitado",
                        vehicle
                    ),
                    details: Some(json!({ "conflicts": conflicts })),
                    code: Some("VEHICLE_UNAVAILABLE".to_string()),
                },
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: "Not Found".to_string(),
                    message: msg,
                    details: None,
                    code: Some("NOT_FOUND".to_string()),
                },
            ),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Bad Request".to_string(),
                    message: msg,
                    details: None,
                    code: Some("BAD_REQUEST".to_string()),
                },
            ),

            AppError::StorageUnavailable(e) => {
                log::error!("Storage error: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse {
                        error: "Storage Unavailable".to_string(),
                        message: "An error occurred while accessing the database".to_string(),
                        details: Some(json!({ "sql_error": e.to_string() })),
                        code: Some("STORAGE_UNAVAILABLE".to_string()),
                    },
                )
            }

            AppError::ExternalApi(msg) => {
                log::error!("External API error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse {
                        error: "External API Error".to_string(),
                        message: "An error occurred while communicating with external service"
                            .to_string(),
                        details: Some(json!({ "external_api_error": msg })),
                        code: Some("EXTERNAL_API_ERROR".to_string()),
                    },
                )
            }

            AppError::Internal(msg) => {
                log::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Internal Server Error".to_string(),
                        message: "An unexpected error occurred".to_string(),
                        details: Some(json!({ "internal_error": msg })),
                        code: Some("INTERNAL_ERROR".to_string()),
                    },
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: &str) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

/// Función helper para crear errores de transición de estado
pub fn invalid_transition_error(entity: &str, from: &str, to: &str) -> AppError {
    AppError::InvalidTransition(format!(
        "{} cannot transition from '{}' to '{}'",
        entity, from, to
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_unavailable_is_conflict() {
        let err = AppError::VehicleUnavailable {
            vehicle: "Avanza Blanco".to_string(),
            conflicts: vec![],
        };
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_invalid_interval_is_bad_request() {
        let err = AppError::InvalidInterval("end <= start".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_transition_is_unprocessable() {
        let err = invalid_transition_error("BookingRequest", "rejected", "confirmed");
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_not_found_helper() {
        let err = not_found_error("Rental", "abc");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
