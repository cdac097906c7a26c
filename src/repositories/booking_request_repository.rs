//! Repositorio de booking requests
//! 
//! Escritor de las filas de booking_requests, salvo el marcador de
//! conversión a `completed`, que vive en el repositorio de rentals para
//! ser atómico con el INSERT del rental.

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::booking_request::BookingRequest;
use crate::utils::errors::AppError;

/// Datos de una solicitud nueva, ya validados
#[derive(Debug, Clone)]
pub struct NewBookingRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub vehicle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub customer_message: Option<String>,
}

pub struct BookingRequestRepository {
    pool: PgPool,
}

impl BookingRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewBookingRequest) -> Result<BookingRequest, AppError> {
        let request = sqlx::query_as::<_, BookingRequest>(
            r#"
            INSERT INTO booking_requests
                (id, customer_id, vehicle_id, vehicle_name, start_date, end_date,
                 total_days, customer_message, status, email_sent, whatsapp_sent, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'pending', false, false, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.customer_id)
        .bind(new.vehicle_id)
        .bind(&new.vehicle_name)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.total_days)
        .bind(&new.customer_message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        log::info!(
            "📨 BookingRequest {} recibido para '{}' [{} → {}], {} días",
            request.id,
            request.vehicle_name,
            request.start_date,
            request.end_date,
            request.total_days
        );
        Ok(request)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<BookingRequest>, AppError> {
        let request =
            sqlx::query_as::<_, BookingRequest>("SELECT * FROM booking_requests WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(request)
    }

    pub async fn list(&self) -> Result<Vec<BookingRequest>, AppError> {
        let requests = sqlx::query_as::<_, BookingRequest>(
            "SELECT * FROM booking_requests ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }

    /// Confirma una solicitud pendiente registrando la auditoría del staff.
    /// El guard de status en el WHERE cierra la carrera entre dos decisiones.
    pub async fn confirm(&self, id: Uuid, staff_id: Uuid) -> Result<BookingRequest, AppError> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            UPDATE booking_requests
            SET status = 'confirmed', confirmed_by_staff_id = $2, confirmed_at = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(staff_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::InvalidTransition(format!("BookingRequest '{}' is not pending", id))
        })
    }

    /// Rechaza una solicitud pendiente; el motivo queda para auditoría y
    /// comunicación al cliente
    pub async fn reject(&self, id: Uuid, reason: &str) -> Result<BookingRequest, AppError> {
        sqlx::query_as::<_, BookingRequest>(
            r#"
            UPDATE booking_requests
            SET status = 'rejected', rejected_reason = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(reason)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| {
            AppError::InvalidTransition(format!("BookingRequest '{}' is not pending", id))
        })
    }

    /// Registra el resultado de los envíos de notificación al cliente
    pub async fn update_notification_flags(
        &self,
        id: Uuid,
        email_sent: bool,
        whatsapp_sent: bool,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE booking_requests SET email_sent = $2, whatsapp_sent = $3 WHERE id = $1",
        )
        .bind(id)
        .bind(email_sent)
        .bind(whatsapp_sent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Borrado físico sin restricción de estado: el staff tiene control
    /// total del ciclo de vida de las solicitudes, incluida la limpieza
    /// de registros ya convertidos
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM booking_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if res.rows_affected() < 1 {
            return Err(AppError::NotFound(format!(
                "BookingRequest with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
