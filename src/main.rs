mod config;
mod controllers;
mod database;
mod dto;
mod middleware;
mod models;
mod repositories;
mod routes;
mod services;
mod state;
mod utils;

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚗 Rental Booking - Plataforma de reservas de vehículos");
    info!("======================================================");

    let config = EnvironmentConfig::from_env();

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    if let Err(e) = database::run_migrations(&pool).await {
        error!("❌ Error ejecutando migraciones: {}", e);
        return Err(e);
    }
    info!("✅ Migraciones aplicadas");

    // CORS estricto en producción, permisivo en desarrollo
    let cors = if config.is_production() {
        cors_middleware_with_origins(config.cors_origins.clone())
    } else {
        cors_middleware()
    };

    // Crear router de la API
    let app_state = AppState::new(pool, config.clone());

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .nest("/api/booking-request", routes::booking_request_routes::create_booking_request_router())
        .nest("/api/rental", routes::rental_routes::create_rental_router())
        .nest("/api/vehicle", routes::vehicle_routes::create_vehicle_router())
        .nest("/api/calendar", routes::calendar_routes::create_calendar_router())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📨 Booking requests:");
    info!("   POST   /api/booking-request - Enviar solicitud de reserva");
    info!("   GET    /api/booking-request - Listar solicitudes");
    info!("   GET    /api/booking-request/:id - Detalle de solicitud");
    info!("   PATCH  /api/booking-request/:id/status - Confirmar/rechazar solicitud");
    info!("   POST   /api/booking-request/:id/convert - Convertir en rental");
    info!("   DELETE /api/booking-request/:id - Retirar solicitud");
    info!("📝 Rentals:");
    info!("   POST   /api/rental - Crear rental directo");
    info!("   GET    /api/rental - Listar rentals");
    info!("   GET    /api/rental/:id - Detalle de rental");
    info!("   POST   /api/rental/availability - Comprobar disponibilidad");
    info!("   PATCH  /api/rental/:id/complete - Completar con datos de entrega");
    info!("   PATCH  /api/rental/:id/cancel - Cancelar rental");
    info!("   DELETE /api/rental/:id - Eliminar rental");
    info!("🚙 Vehículos:");
    info!("   GET  /api/vehicle - Flota activa");
    info!("   POST /api/vehicle/:id/availability - Disponibilidad por id");
    info!("   GET  /api/vehicle/:name/schedule - Agenda mensual del vehículo");
    info!("📅 Calendario:");
    info!("   GET  /api/calendar - Calendario de flota por mes");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check del servicio
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "rental-booking",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
