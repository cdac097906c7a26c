//! DTOs de rentals

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::rental::{Rental, RentalStatus};

/// Request para crear un rental directo (autoservicio, sin solicitud previa).
/// Fotos, firma y comprobante de pago son opcionales en la creación:
/// la información incompleta está permitida por regla de negocio.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRentalRequest {
    pub customer_id: Uuid,
    pub vehicle: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub discount: Option<Decimal>,
    pub total_price: Decimal,
    pub photo_urls: Option<Vec<String>>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
}

/// Datos de entrega del vehículo (PATCH /complete)
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteRentalRequest {
    #[validate(range(min = 0))]
    pub final_mileage: i32,

    #[validate(length(min = 1, max = 50))]
    pub fuel_level: String,

    pub vehicle_color: Option<String>,
    pub total_price: Option<Decimal>,
    pub photo_urls: Option<Vec<String>>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
}

/// Request de cancelación (PATCH /cancel)
#[derive(Debug, Deserialize)]
pub struct CancelRentalRequest {
    pub reason: Option<String>,
}

/// Response de rental para la API
#[derive(Debug, Serialize)]
pub struct RentalResponse {
    pub id: String,
    pub customer_id: String,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: RentalStatus,
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub final_mileage: Option<i32>,
    pub fuel_level: Option<String>,
    pub vehicle_color: Option<String>,
    pub photo_urls: Vec<String>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
    pub agreement_url: Option<String>,
    pub cancel_reason: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Rental> for RentalResponse {
    fn from(rental: Rental) -> Self {
        Self {
            id: rental.id.to_string(),
            customer_id: rental.customer_id.to_string(),
            vehicle_name: rental.vehicle_name,
            start_date: rental.start_date,
            end_date: rental.end_date,
            status: rental.status,
            daily_rate: rental.daily_rate,
            deposit: rental.deposit,
            discount: rental.discount,
            total_price: rental.total_price,
            final_mileage: rental.final_mileage,
            fuel_level: rental.fuel_level,
            vehicle_color: rental.vehicle_color,
            photo_urls: rental.photo_urls.0,
            signature_url: rental.signature_url,
            payment_proof_url: rental.payment_proof_url,
            agreement_url: rental.agreement_url,
            cancel_reason: rental.cancel_reason,
            created_at: rental.created_at.to_rfc3339(),
            updated_at: rental.updated_at.to_rfc3339(),
        }
    }
}
