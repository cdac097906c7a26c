//! Repositorio de clientes (solo lectura)

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::utils::errors::AppError;

pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    /// Precondición de todo punto de entrada que acepta reservas:
    /// el cliente existe y no está en lista negra
    pub async fn ensure_bookable(&self, id: Uuid) -> Result<Customer, AppError> {
        let customer = self.find_by_id(id).await?.ok_or_else(|| {
            AppError::CustomerNotFound(format!("Customer with id '{}' not found", id))
        })?;

        if customer.is_blacklisted {
            return Err(AppError::CustomerBlacklisted(format!(
                "Customer '{}' is blacklisted and cannot make bookings",
                customer.full_name
            )));
        }

        Ok(customer)
    }
}
