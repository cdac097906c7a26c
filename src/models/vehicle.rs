//! Modelo de Vehicle
//! 
//! La gestión de flota es responsabilidad de otro módulo; este servicio
//! solo lee vehículos para resolver nombre/id y comprobar el flag activo.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub daily_mileage_limit: Option<i32>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
