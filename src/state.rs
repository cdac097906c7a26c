//! Shared application state
//! 
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. Sin estado mutable global: el pool y los
//! clientes de colaboradores se inyectan donde se necesitan.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::documents::{DocumentClient, HttpDocumentClient};
use crate::services::notifications::{HttpNotificationClient, NotificationClient};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub documents: Arc<dyn DocumentClient>,
    pub notifications: Arc<dyn NotificationClient>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        let documents: Arc<dyn DocumentClient> =
            Arc::new(HttpDocumentClient::new(config.document_service_url.clone()));
        let notifications: Arc<dyn NotificationClient> = Arc::new(HttpNotificationClient::new(
            config.notification_service_url.clone(),
        ));

        Self {
            pool,
            config,
            documents,
            notifications,
        }
    }
}
