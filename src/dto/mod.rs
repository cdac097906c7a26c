//! DTOs de la API
//! 
//! Requests y responses JSON de la capa HTTP. Los modelos de dominio
//! viven en `models`; aquí solo viven las formas de entrada/salida.

pub mod availability_dto;
pub mod booking_request_dto;
pub mod calendar_dto;
pub mod rental_dto;

use serde::Serialize;

/// Envoltorio de las responses de creación
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::success(42)).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], 42);
    }
}
