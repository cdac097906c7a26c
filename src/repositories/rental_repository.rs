//! Repositorio de rentals
//! 
//! Único escritor de las filas de rentals (y del marcador de conversión
//! de booking_requests). La invariante de no-solapamiento por vehículo se
//! protege aquí: la comprobación de conflictos y el INSERT van dentro de
//! una misma transacción SERIALIZABLE, y el schema lleva además una
//! constraint de exclusión sobre (vehicle_name, daterange). Ambos caminos
//! de rechazo se normalizan a `VehicleUnavailable`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::dto::calendar_dto::CalendarEntry;
use crate::models::booking_request::{BookingRequest, BookingRequestStatus};
use crate::models::rental::{Rental, RentalConflict, RentalHandover, RentalStatus};
use crate::services::overlap::{conflicting_rentals, DateInterval};
use crate::utils::errors::AppError;

/// Datos de un rental nuevo, antes de persistir
#[derive(Debug, Clone)]
pub struct NewRental {
    pub customer_id: Uuid,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_rate: Decimal,
    pub deposit: Decimal,
    pub discount: Decimal,
    pub total_price: Decimal,
    pub photo_urls: Vec<String>,
    pub signature_url: Option<String>,
    pub payment_proof_url: Option<String>,
}

pub struct RentalRepository {
    pool: PgPool,
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, AppError> {
        let rental = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(rental)
    }

    pub async fn list(&self) -> Result<Vec<Rental>, AppError> {
        let rentals =
            sqlx::query_as::<_, Rental>("SELECT * FROM rentals ORDER BY start_date DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rentals)
    }

    /// Rentals no cancelados de un vehículo; la base del cálculo de
    /// disponibilidad fuera de transacción.
    pub async fn find_active_by_vehicle(&self, vehicle_name: &str) -> Result<Vec<Rental>, AppError> {
        let rentals = sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE vehicle_name = $1 AND status <> 'cancelled'
            ORDER BY start_date ASC
            "#,
        )
        .bind(vehicle_name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rentals)
    }

    /// Agenda de un vehículo: rentals no cancelados que intersectan el mes
    /// dado (o todo el histórico si no hay límites), por fecha de inicio.
    pub async fn find_schedule(
        &self,
        vehicle_name: &str,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<Rental>, AppError> {
        let rentals = match bounds {
            Some((month_start, month_end)) => {
                sqlx::query_as::<_, Rental>(
                    r#"
                    SELECT * FROM rentals
                    WHERE vehicle_name = $1 AND status <> 'cancelled'
                      AND start_date <= $3 AND end_date >= $2
                    ORDER BY start_date ASC
                    "#,
                )
                .bind(vehicle_name)
                .bind(month_start)
                .bind(month_end)
                .fetch_all(&self.pool)
                .await?
            }
            None => self.find_active_by_vehicle(vehicle_name).await?,
        };

        Ok(rentals)
    }

    /// Crea un rental comprobando disponibilidad de forma atómica.
    /// "check availability, then create" es una única unidad atómica
    /// frente a otros escritores del mismo vehículo.
    pub async fn create_checked(&self, new: NewRental) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        let interval = DateInterval::new(new.start_date, new.end_date)?;
        let conflicts = conflicts_in_tx(&mut tx, &new.vehicle_name, interval, None).await?;
        if !conflicts.is_empty() {
            return Err(AppError::VehicleUnavailable {
                vehicle: new.vehicle_name,
                conflicts,
            });
        }

        let rental = insert_rental(&mut tx, &new)
            .await
            .map_err(|e| map_write_error(e, &new.vehicle_name))?;

        tx.commit()
            .await
            .map_err(|e| map_write_error(e, &rental.vehicle_name))?;

        log::info!(
            "📝 Rental {} creado para vehículo '{}' [{} → {}]",
            rental.id,
            rental.vehicle_name,
            rental.start_date,
            rental.end_date
        );
        Ok(rental)
    }

    /// Convierte un booking request confirmado en un rental. La re-lectura
    /// del estado de la solicitud, la comprobación de disponibilidad, el
    /// INSERT del rental y el marcador `completed` de la solicitud forman
    /// una sola transacción SERIALIZABLE.
    pub async fn create_from_request(
        &self,
        request: &BookingRequest,
        new: NewRental,
    ) -> Result<Rental, AppError> {
        let mut tx = self.pool.begin().await?;
        set_transaction_serializable(&mut tx).await?;

        // Re-leer el estado bajo lock: pudo cambiar desde que el
        // controller lo consultó
        let status: Option<BookingRequestStatus> = sqlx::query_scalar(
            "SELECT status FROM booking_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request.id)
        .fetch_optional(&mut *tx)
        .await?;

        match status {
            None => {
                return Err(AppError::NotFound(format!(
                    "BookingRequest with id '{}' not found",
                    request.id
                )))
            }
            Some(BookingRequestStatus::Confirmed) => {}
            Some(other) => {
                return Err(AppError::InvalidTransition(format!(
                    "BookingRequest cannot be converted from status '{}'",
                    other.as_str()
                )))
            }
        }

        // Comprobación fresca de disponibilidad: pudo pasar tiempo desde
        // la confirmación y el vehículo haberse reservado por otra vía
        let interval = DateInterval::new(new.start_date, new.end_date)?;
        let conflicts = conflicts_in_tx(&mut tx, &new.vehicle_name, interval, None).await?;
        if !conflicts.is_empty() {
            return Err(AppError::VehicleUnavailable {
                vehicle: new.vehicle_name,
                conflicts,
            });
        }

        let rental = insert_rental(&mut tx, &new)
            .await
            .map_err(|e| map_write_error(e, &new.vehicle_name))?;

        let res = sqlx::query(
            "UPDATE booking_requests SET status = 'completed' WHERE id = $1 AND status = 'confirmed'",
        )
        .bind(request.id)
        .execute(&mut *tx)
        .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::InvalidTransition(format!(
                "BookingRequest '{}' is no longer confirmed",
                request.id
            )));
        }

        tx.commit()
            .await
            .map_err(|e| map_write_error(e, &rental.vehicle_name))?;

        log::info!(
            "🔁 BookingRequest {} convertido en rental {} para '{}'",
            request.id,
            rental.id,
            rental.vehicle_name
        );
        Ok(rental)
    }

    /// Completa un rental pendiente registrando los datos de entrega
    pub async fn complete(&self, id: Uuid, handover: RentalHandover) -> Result<Rental, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id '{}' not found", id)))?;

        if !current.status.can_transition_to(RentalStatus::Completed) {
            return Err(AppError::InvalidTransition(format!(
                "Rental cannot transition from '{}' to 'completed'",
                current.status.as_str()
            )));
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET status = 'completed',
                final_mileage = $2,
                fuel_level = $3,
                vehicle_color = COALESCE($4, vehicle_color),
                total_price = COALESCE($5, total_price),
                photo_urls = COALESCE($6, photo_urls),
                signature_url = COALESCE($7, signature_url),
                payment_proof_url = COALESCE($8, payment_proof_url),
                updated_at = $9
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(handover.final_mileage)
        .bind(&handover.fuel_level)
        .bind(&handover.vehicle_color)
        .bind(handover.total_price)
        .bind(handover.photo_urls.map(Json))
        .bind(&handover.signature_url)
        .bind(&handover.payment_proof_url)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        // El guard de status en el WHERE perdió contra otra transición
        .ok_or_else(|| {
            AppError::InvalidTransition(format!("Rental '{}' is no longer pending", id))
        })?;

        Ok(rental)
    }

    /// Cancela un rental pendiente; el intervalo queda liberado porque los
    /// rentals cancelados se excluyen de todos los cálculos de conflicto
    pub async fn cancel(&self, id: Uuid, reason: Option<String>) -> Result<Rental, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id '{}' not found", id)))?;

        if !current.status.can_transition_to(RentalStatus::Cancelled) {
            return Err(AppError::InvalidTransition(format!(
                "Rental cannot transition from '{}' to 'cancelled'",
                current.status.as_str()
            )));
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET status = 'cancelled', cancel_reason = $2, updated_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&reason)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::InvalidTransition(format!("Rental '{}' is no longer pending", id))
        })?;

        log::info!("🚫 Rental {} cancelado, intervalo liberado", id);
        Ok(rental)
    }

    /// Guarda la referencia al contrato generado por el colaborador de
    /// documentos tras la completación
    pub async fn set_agreement_url(&self, id: Uuid, url: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE rentals SET agreement_url = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(url)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Borrado físico incondicional (solo staff)
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::NotFound(format!(
                "Rental with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    /// Proyección de calendario: rentals + identidad del cliente, para un
    /// vehículo o toda la flota, filtrado por mes
    pub async fn calendar_entries(
        &self,
        vehicle_name: Option<&str>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> Result<Vec<CalendarEntry>, AppError> {
        let mut sql = String::from(
            r#"
            SELECT r.id, r.vehicle_name AS vehicle, r.start_date, r.end_date,
                   r.customer_id, c.full_name AS customer_name, r.status
            FROM rentals AS r
            INNER JOIN customers AS c ON r.customer_id = c.id
            WHERE r.status <> 'cancelled'
            "#,
        );

        if vehicle_name.is_some() {
            sql.push_str(" AND r.vehicle_name = $1");
        }
        if bounds.is_some() {
            let (a, b) = if vehicle_name.is_some() {
                ("$2", "$3")
            } else {
                ("$1", "$2")
            };
            sql.push_str(&format!(" AND r.start_date <= {} AND r.end_date >= {}", b, a));
        }
        sql.push_str(" ORDER BY r.start_date ASC");

        let mut query = sqlx::query_as::<_, CalendarEntry>(&sql);
        if let Some(name) = vehicle_name {
            query = query.bind(name.to_string());
        }
        if let Some((month_start, month_end)) = bounds {
            query = query.bind(month_start).bind(month_end);
        }

        let entries = query.fetch_all(&self.pool).await?;
        Ok(entries)
    }
}

/// Fija la transacción a SERIALIZABLE; debe ser la primera sentencia
async fn set_transaction_serializable(
    tx: &mut Transaction<'_, Postgres>,
) -> Result<(), AppError> {
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Conflictos del intervalo contra los rentals no cancelados del vehículo,
/// leídos dentro de la transacción en curso
async fn conflicts_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    vehicle_name: &str,
    interval: DateInterval,
    exclude_rental_id: Option<Uuid>,
) -> Result<Vec<RentalConflict>, AppError> {
    let rentals = sqlx::query_as::<_, Rental>(
        "SELECT * FROM rentals WHERE vehicle_name = $1 AND status <> 'cancelled'",
    )
    .bind(vehicle_name)
    .fetch_all(&mut **tx)
    .await?;

    Ok(conflicting_rentals(&rentals, interval, exclude_rental_id))
}

async fn insert_rental(
    tx: &mut Transaction<'_, Postgres>,
    new: &NewRental,
) -> Result<Rental, sqlx::Error> {
    sqlx::query_as::<_, Rental>(
        r#"
        INSERT INTO rentals
            (id, customer_id, vehicle_name, start_date, end_date, status,
             daily_rate, deposit, discount, total_price,
             photo_urls, signature_url, payment_proof_url, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, 'pending', $6, $7, $8, $9, $10, $11, $12, $13, $13)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(new.customer_id)
    .bind(&new.vehicle_name)
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(new.daily_rate)
    .bind(new.deposit)
    .bind(new.discount)
    .bind(new.total_price)
    .bind(Json(new.photo_urls.clone()))
    .bind(&new.signature_url)
    .bind(&new.payment_proof_url)
    .bind(Utc::now())
    .fetch_one(&mut **tx)
    .await
}

/// Normaliza los rechazos de concurrencia del storage al mismo error que
/// el pre-check de aplicación: fallo de serialización (40001) y violación
/// de la constraint de exclusión (23P01) son `VehicleUnavailable`.
fn map_write_error(e: sqlx::Error, vehicle_name: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if let Some(code) = db_err.code() {
            if code == "40001" || code == "23P01" {
                log::warn!(
                    "⚠️ Escritura rechazada por el storage para '{}' (code {}): reserva concurrente",
                    vehicle_name,
                    code
                );
                return AppError::VehicleUnavailable {
                    vehicle: vehicle_name.to_string(),
                    conflicts: vec![],
                };
            }
        }
    }
    AppError::StorageUnavailable(e)
}
