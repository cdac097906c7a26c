//! Servicio de disponibilidad
//! 
//! Compone el detector de solapamiento con el repositorio de rentals para
//! responder "¿está libre el vehículo V en [start, end]?" y para listar
//! la agenda de un vehículo. Solo lectura; determinista dada una lectura
//! consistente del storage.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::rental::{Rental, RentalConflict};
use crate::models::vehicle::Vehicle;
use crate::repositories::rental_repository::RentalRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::overlap::{conflicting_rentals, month_bounds, DateInterval};
use crate::utils::errors::AppError;

/// Resultado de una comprobación de disponibilidad
#[derive(Debug)]
pub struct AvailabilityReport {
    pub available: bool,
    pub conflicts: Vec<RentalConflict>,
}

pub struct AvailabilityService {
    rentals: RentalRepository,
    vehicles: VehicleRepository,
}

impl AvailabilityService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
        }
    }

    /// Disponibilidad por nombre de vehículo. `exclude_rental_id` deja
    /// fuera un rental existente que se está editando.
    pub async fn check_availability(
        &self,
        vehicle_name: &str,
        interval: DateInterval,
        exclude_rental_id: Option<Uuid>,
    ) -> Result<AvailabilityReport, AppError> {
        let vehicle = self.resolve_by_name(vehicle_name).await?;
        self.check_for_vehicle(&vehicle, interval, exclude_rental_id)
            .await
    }

    /// Disponibilidad por id de vehículo (endpoint del path /vehicle/:id)
    pub async fn check_availability_by_id(
        &self,
        vehicle_id: Uuid,
        interval: DateInterval,
    ) -> Result<AvailabilityReport, AppError> {
        let vehicle = self.vehicles.find_by_id(vehicle_id).await?.ok_or_else(|| {
            AppError::VehicleNotFound(format!("Vehicle with id '{}' not found", vehicle_id))
        })?;
        self.check_for_vehicle(&vehicle, interval, None).await
    }

    /// Agenda del vehículo: rentals no cancelados que intersectan el mes
    /// (o todo el histórico si no se indica), por fecha de inicio.
    pub async fn schedule(
        &self,
        vehicle_name: &str,
        month: Option<u32>,
        year: Option<i32>,
    ) -> Result<Vec<Rental>, AppError> {
        self.resolve_by_name(vehicle_name).await?;
        let bounds = resolve_month_bounds(month, year)?;
        self.rentals.find_schedule(vehicle_name, bounds).await
    }

    async fn check_for_vehicle(
        &self,
        vehicle: &Vehicle,
        interval: DateInterval,
        exclude_rental_id: Option<Uuid>,
    ) -> Result<AvailabilityReport, AppError> {
        // El servicio no intercambia fechas en silencio: end <= start es
        // un error del caller
        let interval = DateInterval::strict(interval.start, interval.end)?;

        let rentals = self.rentals.find_active_by_vehicle(&vehicle.name).await?;
        let conflicts = conflicting_rentals(&rentals, interval, exclude_rental_id);

        log::debug!(
            "🔍 Disponibilidad de '{}' [{} → {}]: {} conflictos",
            vehicle.name,
            interval.start,
            interval.end,
            conflicts.len()
        );

        Ok(AvailabilityReport {
            available: conflicts.is_empty(),
            conflicts,
        })
    }

    async fn resolve_by_name(&self, vehicle_name: &str) -> Result<Vehicle, AppError> {
        self.vehicles.find_by_name(vehicle_name).await?.ok_or_else(|| {
            AppError::VehicleNotFound(format!("Vehicle '{}' not found", vehicle_name))
        })
    }
}

/// Traduce los parámetros month/year de la query a límites de calendario.
/// El mes sin año usa el año en curso; mes fuera de 1..=12 es un error.
pub fn resolve_month_bounds(
    month: Option<u32>,
    year: Option<i32>,
) -> Result<Option<(chrono::NaiveDate, chrono::NaiveDate)>, AppError> {
    use chrono::Datelike;

    let Some(month) = month else {
        return Ok(None);
    };
    let year = year.unwrap_or_else(|| chrono::Utc::now().year());
    month_bounds(year, month)
        .map(Some)
        .ok_or_else(|| AppError::BadRequest(format!("'{}' is not a valid month", month)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_resolve_month_bounds_none_when_omitted() {
        assert!(resolve_month_bounds(None, Some(2024)).unwrap().is_none());
        assert!(resolve_month_bounds(None, None).unwrap().is_none());
    }

    #[test]
    fn test_resolve_month_bounds_valid_month() {
        let bounds = resolve_month_bounds(Some(6), Some(2024)).unwrap().unwrap();
        assert_eq!(bounds.0, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(bounds.1, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
    }

    #[test]
    fn test_resolve_month_bounds_invalid_month() {
        assert!(resolve_month_bounds(Some(0), Some(2024)).is_err());
        assert!(resolve_month_bounds(Some(13), Some(2024)).is_err());
    }
}
