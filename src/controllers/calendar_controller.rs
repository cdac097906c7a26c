//! Controller del calendario
//! 
//! Proyección de solo lectura: rentals + identidad del cliente para un
//! vehículo o toda la flota, por mes.

use sqlx::PgPool;

use crate::dto::calendar_dto::{CalendarEntry, CalendarQuery};
use crate::repositories::rental_repository::RentalRepository;
use crate::services::availability::resolve_month_bounds;
use crate::utils::errors::AppError;

pub struct CalendarController {
    rentals: RentalRepository,
}

impl CalendarController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool),
        }
    }

    pub async fn list(&self, query: CalendarQuery) -> Result<Vec<CalendarEntry>, AppError> {
        let bounds = resolve_month_bounds(query.month, query.year)?;
        self.rentals
            .calendar_entries(query.vehicle.as_deref(), bounds)
            .await
    }
}
