//! DTOs del calendario de flota

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::rental::RentalStatus;

/// Query del calendario: un vehículo concreto o toda la flota
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub vehicle: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

/// Entrada del calendario: rental + identidad del cliente
#[derive(Debug, Serialize, FromRow)]
pub struct CalendarEntry {
    pub id: Uuid,
    pub vehicle: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub customer_id: Uuid,
    pub customer_name: String,
    pub status: RentalStatus,
}
