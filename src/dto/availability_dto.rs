//! DTOs de disponibilidad

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::rental::RentalConflict;

/// Request de disponibilidad para un vehículo identificado en el path
#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Request de disponibilidad con vehículo por nombre; `exclude_rental_id`
/// permite re-comprobar un rental existente que se está editando
#[derive(Debug, Deserialize)]
pub struct VehicleAvailabilityRequest {
    pub vehicle: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub exclude_rental_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    pub conflicts: Vec<RentalConflict>,
}

/// Query de agenda por mes (todo el histórico si se omite)
#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}
