//! Colaborador de notificaciones
//! 
//! El envío real (email / WhatsApp) lo hace un servicio externo; este
//! cliente solo reporta qué canales se entregaron para registrar los
//! flags en la solicitud.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::models::customer::Customer;
use crate::utils::errors::AppError;

/// Evento de negocio que dispara una notificación al cliente
#[derive(Debug, Clone)]
pub enum NotificationEvent {
    BookingConfirmed { vehicle_name: String },
    BookingRejected { vehicle_name: String, reason: String },
    RentalCompleted { vehicle_name: String },
}

impl NotificationEvent {
    fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::BookingConfirmed { .. } => "booking_confirmed",
            NotificationEvent::BookingRejected { .. } => "booking_rejected",
            NotificationEvent::RentalCompleted { .. } => "rental_completed",
        }
    }
}

/// Canales por los que llegó a entregarse la notificación
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct NotificationDelivery {
    pub email_sent: bool,
    pub whatsapp_sent: bool,
}

#[async_trait]
pub trait NotificationClient: Send + Sync {
    async fn notify(
        &self,
        customer: &Customer,
        event: NotificationEvent,
    ) -> Result<NotificationDelivery, AppError>;
}

/// Cliente HTTP contra el servicio de notificaciones
pub struct HttpNotificationClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpNotificationClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }
}

#[async_trait]
impl NotificationClient for HttpNotificationClient {
    async fn notify(
        &self,
        customer: &Customer,
        event: NotificationEvent,
    ) -> Result<NotificationDelivery, AppError> {
        let url = format!("{}/notifications", self.base_url);

        let payload = match &event {
            NotificationEvent::BookingConfirmed { vehicle_name } => json!({
                "event": event.kind(),
                "vehicle_name": vehicle_name,
            }),
            NotificationEvent::BookingRejected { vehicle_name, reason } => json!({
                "event": event.kind(),
                "vehicle_name": vehicle_name,
                "reason": reason,
            }),
            NotificationEvent::RentalCompleted { vehicle_name } => json!({
                "event": event.kind(),
                "vehicle_name": vehicle_name,
            }),
        };

        log::info!(
            "📬 Notificando '{}' a {} <{}>",
            event.kind(),
            customer.full_name,
            customer.email
        );

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "email": customer.email,
                "phone": customer.phone,
                "payload": payload,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("notification service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "notification service returned {}",
                response.status()
            )));
        }

        let delivery: NotificationDelivery = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("notification service: {}", e)))?;

        Ok(delivery)
    }
}
