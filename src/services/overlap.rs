//! Detector de solapamiento de intervalos
//! 
//! Funciones puras que deciden si dos rangos de fechas entran en conflicto
//! para un mismo vehículo. Sin efectos secundarios: toda la lógica de
//! disponibilidad del sistema pasa por este único predicado.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::rental::{Rental, RentalConflict, RentalStatus};
use crate::utils::errors::AppError;

/// Política de frontera: con `false`, dos intervalos que se tocan
/// (uno termina el mismo día que empieza el otro) cuentan como conflicto,
/// porque un vehículo no se devuelve y se vuelve a entregar el mismo día.
/// Al cambiar a `true` hay que ajustar también la restricción
/// `rentals_no_overlap` de migrations/0001_init.sql, que materializa la
/// misma frontera con `daterange(..., '[]')`.
pub const ALLOW_SAME_DAY_CHANGEOVER: bool = false;

/// Intervalo cerrado de fechas de calendario [start, end]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    /// Construye un intervalo cerrado válido (start <= end).
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if start > end {
            return Err(AppError::InvalidInterval(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Construye un intervalo de reserva: las reservas exigen end > start
    /// (al menos un día completo de alquiler).
    pub fn strict(start: NaiveDate, end: NaiveDate) -> Result<Self, AppError> {
        if end <= start {
            return Err(AppError::InvalidInterval(format!(
                "end_date {} must be after start_date {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Días totales del alquiler: (end - start) en días, siempre > 0
    /// para intervalos construidos con `strict`.
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Predicado de solapamiento para intervalos cerrados.
/// Simétrico y total; subsume "A empieza dentro de B", "A termina dentro
/// de B" y "A contiene a B" como casos particulares.
pub fn overlaps(a: DateInterval, b: DateInterval) -> bool {
    if ALLOW_SAME_DAY_CHANGEOVER {
        // Los días de frontera compartidos cuentan como cambio de manos
        a.start < b.end && b.start < a.end
    } else {
        a.start <= b.end && b.start <= a.end
    }
}

/// Rentals que bloquean el intervalo pedido, como resúmenes de conflicto.
/// Los rentals cancelados no bloquean fechas; `exclude_rental_id` permite
/// re-evaluar disponibilidad ignorando un rental concreto.
pub fn conflicting_rentals(
    rentals: &[Rental],
    interval: DateInterval,
    exclude_rental_id: Option<Uuid>,
) -> Vec<RentalConflict> {
    rentals
        .iter()
        .filter(|r| r.status != RentalStatus::Cancelled)
        .filter(|r| Some(r.id) != exclude_rental_id)
        .filter(|r| {
            DateInterval::new(r.start_date, r.end_date)
                .map(|existing| overlaps(existing, interval))
                .unwrap_or(false)
        })
        .map(RentalConflict::from)
        .collect()
}

/// Límites de un mes de calendario, para filtrar agendas por mes.
/// Devuelve None si el mes no es válido (fuera de 1..=12).
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next_month.pred_opt()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval(s: (i32, u32, u32), e: (i32, u32, u32)) -> DateInterval {
        DateInterval::new(date(s.0, s.1, s.2), date(e.0, e.1, e.2)).unwrap()
    }

    fn rental(start: NaiveDate, end: NaiveDate, status: RentalStatus) -> Rental {
        Rental {
            id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vehicle_name: "Avanza Blanca".to_string(),
            start_date: start,
            end_date: end,
            status,
            daily_rate: Decimal::ZERO,
            deposit: Decimal::ZERO,
            discount: Decimal::ZERO,
            total_price: Decimal::ZERO,
            final_mileage: None,
            fuel_level: None,
            vehicle_color: None,
            photo_urls: Json(vec![]),
            signature_url: None,
            payment_proof_url: None,
            agreement_url: None,
            cancel_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_disjoint_intervals_do_not_overlap() {
        let a = interval((2024, 6, 1), (2024, 6, 5));
        let b = interval((2024, 6, 6), (2024, 6, 7));
        assert!(!overlaps(a, b));
        assert!(!overlaps(b, a));
    }

    #[test]
    fn test_touching_boundary_counts_as_overlap() {
        // El vehículo no puede devolverse y entregarse el mismo día
        let a = interval((2024, 6, 1), (2024, 6, 5));
        let b = interval((2024, 6, 5), (2024, 6, 7));
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = interval((2024, 6, 1), (2024, 6, 30));
        let inner = interval((2024, 6, 10), (2024, 6, 12));
        assert!(overlaps(outer, inner));
        assert!(overlaps(inner, outer));
    }

    #[test]
    fn test_partial_overlap() {
        let a = interval((2024, 6, 1), (2024, 6, 10));
        let b = interval((2024, 6, 8), (2024, 6, 15));
        assert!(overlaps(a, b));
        assert!(overlaps(b, a));
    }

    #[test]
    fn test_symmetry_over_sample_pairs() {
        let days: Vec<DateInterval> = (1..=10)
            .flat_map(|s| (s..=10).map(move |e| interval((2024, 7, s), (2024, 7, e))))
            .collect();
        for &a in &days {
            for &b in &days {
                assert_eq!(overlaps(a, b), overlaps(b, a));
            }
        }
    }

    #[test]
    fn test_single_day_intervals() {
        let a = interval((2024, 6, 3), (2024, 6, 3));
        let b = interval((2024, 6, 3), (2024, 6, 3));
        let c = interval((2024, 6, 4), (2024, 6, 4));
        assert!(overlaps(a, b));
        assert!(!overlaps(a, c));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let res = DateInterval::new(date(2024, 6, 5), date(2024, 6, 1));
        assert!(matches!(res, Err(AppError::InvalidInterval(_))));
    }

    #[test]
    fn test_strict_rejects_equal_dates() {
        let res = DateInterval::strict(date(2024, 6, 5), date(2024, 6, 5));
        assert!(matches!(res, Err(AppError::InvalidInterval(_))));
    }

    #[test]
    fn test_total_days() {
        let a = DateInterval::strict(date(2024, 6, 1), date(2024, 6, 5)).unwrap();
        assert_eq!(a.total_days(), 4);
    }

    #[test]
    fn test_empty_schedule_is_always_available() {
        let wanted = interval((2024, 6, 1), (2024, 6, 5));
        assert!(conflicting_rentals(&[], wanted, None).is_empty());
    }

    #[test]
    fn test_exclude_rental_id_skips_that_rental() {
        let existing = rental(date(2024, 6, 3), date(2024, 6, 8), RentalStatus::Pending);
        let wanted = interval((2024, 6, 1), (2024, 6, 5));

        let conflicts = conflicting_rentals(&[existing.clone()], wanted, None);
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].rental_id, existing.id);

        // Al re-evaluar el propio rental, sus fechas no cuentan en su contra
        let conflicts = conflicting_rentals(&[existing.clone()], wanted, Some(existing.id));
        assert!(conflicts.is_empty());
    }

    #[test]
    fn test_cancelled_rental_does_not_block_dates() {
        let start = date(2024, 6, 3);
        let end = date(2024, 6, 8);
        let wanted = interval((2024, 6, 1), (2024, 6, 5));

        let active = rental(start, end, RentalStatus::Pending);
        assert_eq!(conflicting_rentals(&[active], wanted, None).len(), 1);

        let cancelled = rental(start, end, RentalStatus::Cancelled);
        assert!(conflicting_rentals(&[cancelled], wanted, None).is_empty());
    }

    #[test]
    fn test_total_days_of_widest_interval_fits_i32() {
        let widest = DateInterval::new(NaiveDate::MIN, NaiveDate::MAX).unwrap();
        assert!(i32::try_from(widest.total_days()).is_ok());
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(
            month_bounds(2024, 6),
            Some((date(2024, 6, 1), date(2024, 6, 30)))
        );
        assert_eq!(
            month_bounds(2024, 12),
            Some((date(2024, 12, 1), date(2024, 12, 31)))
        );
        // Febrero bisiesto
        assert_eq!(
            month_bounds(2024, 2),
            Some((date(2024, 2, 1), date(2024, 2, 29)))
        );
        assert_eq!(month_bounds(2024, 13), None);
    }
}
