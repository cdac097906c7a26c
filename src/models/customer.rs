//! Modelo de Customer
//! 
//! Los clientes pertenecen al módulo de registro (fuera de este servicio);
//! aquí solo se leen para validar identidad y lista negra en los puntos
//! de entrada que aceptan reservas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_blacklisted: bool,
    pub created_at: DateTime<Utc>,
}
