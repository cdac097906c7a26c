//! Modelo de Rental
//! 
//! Este módulo contiene el struct Rental y su máquina de estados.
//! Un Rental es una reserva confirmada y con precio para un vehículo
//! durante un intervalo de fechas inclusivas [start_date, end_date].

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Estado del rental - mapea al ENUM rental_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Pending,
    Completed,
    Cancelled,
}

impl RentalStatus {
    /// Tabla de transiciones de la máquina de estados.
    /// `completed` y `cancelled` son terminales.
    pub fn can_transition_to(self, next: RentalStatus) -> bool {
        matches!(
            (self, next),
            (RentalStatus::Pending, RentalStatus::Completed)
                | (RentalStatus::Pending, RentalStatus::Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RentalStatus::Pending => "pending",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
        }
    }
}

/// Rental principal - mapea exactamente a la tabla rentals
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RentalStatus,
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    // Datos de entrega, se rellenan al completar el rental
    pub final_mileage: Option<i32>,
    pub fuel_level: Option<String>,
    pub vehicle_color: Option<String>,
    // Referencias opacas a artefactos externos (fotos, firma, comprobante)
    pub photo_urls: Json<Vec<String>>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
    pub agreement_url: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resumen de un rental en conflicto, para diagnóstico de disponibilidad
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RentalConflict {
    pub rental_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: Uuid,
}

impl From<&Rental> for RentalConflict {
    fn from(rental: &Rental) -> Self {
        Self {
            rental_id: rental.id,
            start_date: rental.start_date,
            end_date: rental.end_date,
            customer_id: rental.customer_id,
        }
    }
}

/// Datos de entrega del vehículo registrados por el staff al completar
#[derive(Debug, Clone)]
pub struct RentalHandover {
    pub final_mileage: i32,
    pub fuel_level: String,
    pub vehicle_color: Option<String>,
    pub total_price: Option<Decimal>,
    pub photo_urls: Option<Vec<String>>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_can_complete_or_cancel() {
        assert!(RentalStatus::Pending.can_transition_to(RentalStatus::Completed));
        assert!(RentalStatus::Pending.can_transition_to(RentalStatus::Cancelled));
    }

    #[test]
    fn test_terminal_states_are_frozen() {
        assert!(!RentalStatus::Completed.can_transition_to(RentalStatus::Pending));
        assert!(!RentalStatus::Completed.can_transition_to(RentalStatus::Cancelled));
        assert!(!RentalStatus::Cancelled.can_transition_to(RentalStatus::Pending));
        assert!(!RentalStatus::Cancelled.can_transition_to(RentalStatus::Completed));
    }

    #[test]
    fn test_no_self_transitions() {
        assert!(!RentalStatus::Pending.can_transition_to(RentalStatus::Pending));
        assert!(!RentalStatus::Completed.can_transition_to(RentalStatus::Completed));
    }
}
