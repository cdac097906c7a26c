//! DTOs de booking requests

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::booking_request::{BookingRequest, BookingRequestStatus};

/// Request para enviar una solicitud de reserva
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitBookingRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    #[validate(length(max = 1000))]
    pub customer_message: Option<String>,
}

/// Resultado de la decisión del staff sobre una solicitud
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingDecision {
    Confirmed,
    Rejected,
}

/// Request de decisión del staff (PATCH /status)
#[derive(Debug, Deserialize)]
pub struct DecideBookingRequest {
    pub status: BookingDecision,
    pub staff_id: Uuid,
    pub reason: Option<String>,
}

/// Precio aportado por el staff al convertir la solicitud en rental
#[derive(Debug, Deserialize, Validate)]
pub struct ConvertBookingRequest {
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub discount: Option<Decimal>,
    pub total_price: Decimal,
}

/// Response al enviar una solicitud
#[derive(Debug, Serialize)]
pub struct SubmitBookingResponse {
    pub id: String,
    pub status: BookingRequestStatus,
    pub total_days: i32,
}

/// Response de una solicitud en listados y detalle
#[derive(Debug, Serialize)]
pub struct BookingRequestResponse {
    pub id: String,
    pub customer_id: String,
    pub vehicle_id: String,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub customer_message: Option<String>,
    pub status: BookingRequestStatus,
    pub confirmed_by_staff_id: Option<String>,
    pub confirmed_at: Option<String>,
    pub rejected_reason: Option<String>,
    pub email_sent: bool,
    pub whatsapp_sent: bool,
    pub created_at: String,
}

impl From<BookingRequest> for BookingRequestResponse {
    fn from(request: BookingRequest) -> Self {
        Self {
            id: request.id.to_string(),
            customer_id: request.customer_id.to_string(),
            vehicle_id: request.vehicle_id.to_string(),
            vehicle_name: request.vehicle_name,
            start_date: request.start_date,
            end_date: request.end_date,
            total_days: request.total_days,
            customer_message: request.customer_message,
            status: request.status,
            confirmed_by_staff_id: request.confirmed_by_staff_id.map(|id| id.to_string()),
            confirmed_at: request.confirmed_at.map(|at| at.to_rfc3339()),
            rejected_reason: request.rejected_reason,
            email_sent: request.email_sent,
            whatsapp_sent: request.whatsapp_sent,
            created_at: request.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_deserializes_lowercase() {
        let decide: DecideBookingRequest = serde_json::from_str(
            r#"{"status":"rejected","staff_id":"8c0e3f4e-9a1d-4a51-9f5a-0d62a4c3a111","reason":"sin stock"}"#,
        )
        .unwrap();
        assert_eq!(decide.status, BookingDecision::Rejected);
        assert_eq!(decide.reason.as_deref(), Some("sin stock"));
    }

    #[test]
    fn test_unknown_decision_is_rejected() {
        let res = serde_json::from_str::<DecideBookingRequest>(
            r#"{"status":"approved","staff_id":"8c0e3f4e-9a1d-4a51-9f5a-0d62a4c3a111"}"#,
        );
        assert!(res.is_err());
    }
}
