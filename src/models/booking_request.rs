//! Modelo de BookingRequest
//! 
//! Este módulo contiene el struct BookingRequest y su máquina de estados.
//! Un BookingRequest es la intención de reserva de un cliente, todavía
//! sin confirmar; es el objeto que se contrasta con la disponibilidad
//! antes de cualquier compromiso.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del booking request - mapea al ENUM booking_request_status.
/// `completed` es el único marcador terminal de "convertido a rental".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "booking_request_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingRequestStatus {
    Pending,
    Confirmed,
    Rejected,
    Completed,
}

impl BookingRequestStatus {
    /// Tabla de transiciones: pending -> {confirmed, rejected},
    /// confirmed -> completed (conversión a rental).
    /// `rejected` y `completed` son terminales.
    pub fn can_transition_to(self, next: BookingRequestStatus) -> bool {
        matches!(
            (self, next),
            (BookingRequestStatus::Pending, BookingRequestStatus::Confirmed)
                | (BookingRequestStatus::Pending, BookingRequestStatus::Rejected)
                | (BookingRequestStatus::Confirmed, BookingRequestStatus::Completed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingRequestStatus::Pending => "pending",
            BookingRequestStatus::Confirmed => "confirmed",
            BookingRequestStatus::Rejected => "rejected",
            BookingRequestStatus::Completed => "completed",
        }
    }
}

/// BookingRequest principal - mapea exactamente a la tabla booking_requests
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BookingRequest {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    // Denormalizado para mostrar en listados sin JOIN
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub customer_message: Option<String>,
    pub status: BookingRequestStatus,
    // Auditoría de la decisión del staff
    pub confirmed_by_staff_id: Option<Uuid>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub rejected_reason: Option<String>,
    // Flags de notificación al cliente
    pub email_sent: bool,
    pub whatsapp_sent: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(BookingRequestStatus::Pending.can_transition_to(BookingRequestStatus::Confirmed));
        assert!(BookingRequestStatus::Pending.can_transition_to(BookingRequestStatus::Rejected));
        assert!(!BookingRequestStatus::Pending.can_transition_to(BookingRequestStatus::Completed));
    }

    #[test]
    fn test_confirmed_only_converts() {
        assert!(BookingRequestStatus::Confirmed.can_transition_to(BookingRequestStatus::Completed));
        assert!(!BookingRequestStatus::Confirmed.can_transition_to(BookingRequestStatus::Rejected));
        assert!(!BookingRequestStatus::Confirmed.can_transition_to(BookingRequestStatus::Pending));
    }

    #[test]
    fn test_rejected_and_completed_are_terminal() {
        for next in [
            BookingRequestStatus::Pending,
            BookingRequestStatus::Confirmed,
            BookingRequestStatus::Rejected,
            BookingRequestStatus::Completed,
        ] {
            assert!(!BookingRequestStatus::Rejected.can_transition_to(next));
            assert!(!BookingRequestStatus::Completed.can_transition_to(next));
        }
    }
}
