//! Controller de booking requests
//! 
//! Máquina de estados de las solicitudes de reserva:
//! pending -> {confirmed, rejected}, confirmed -> completed (conversión).
//! La disponibilidad es consultiva en el envío (el staff conserva la
//! última palabra, p. ej. para ofrecer un vehículo sustituto); el único
//! punto donde se impide el doble-booking con autoridad es la conversión.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::booking_request_dto::{
    BookingDecision, BookingRequestResponse, ConvertBookingRequest, DecideBookingRequest,
    SubmitBookingRequest, SubmitBookingResponse,
};
use crate::dto::rental_dto::RentalResponse;
use crate::models::booking_request::{BookingRequest, BookingRequestStatus};
use crate::repositories::booking_request_repository::{BookingRequestRepository, NewBookingRequest};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::rental_repository::{NewRental, RentalRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::notifications::{NotificationClient, NotificationEvent};
use crate::services::overlap::DateInterval;
use crate::utils::errors::{invalid_transition_error, AppError};

pub struct BookingRequestController {
    requests: BookingRequestRepository,
    rentals: RentalRepository,
    customers: CustomerRepository,
    vehicles: VehicleRepository,
    notifications: Arc<dyn NotificationClient>,
}

impl BookingRequestController {
    pub fn new(pool: PgPool, notifications: Arc<dyn NotificationClient>) -> Self {
        Self {
            requests: BookingRequestRepository::new(pool.clone()),
            rentals: RentalRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            notifications,
        }
    }

    /// Alta de una solicitud. Valida el intervalo y las precondiciones de
    /// cliente/vehículo antes de tocar storage; no comprueba
    /// disponibilidad, que se ofrece como información consultiva por los
    /// endpoints de availability.
    pub async fn submit(
        &self,
        request: SubmitBookingRequest,
    ) -> Result<SubmitBookingResponse, AppError> {
        request.validate()?;

        let interval = DateInterval::strict(request.start_date, request.end_date)?;
        self.customers.ensure_bookable(request.customer_id).await?;

        let vehicle = self
            .vehicles
            .find_by_id(request.vehicle_id)
            .await?
            .ok_or_else(|| {
                AppError::VehicleNotFound(format!(
                    "Vehicle with id '{}' not found",
                    request.vehicle_id
                ))
            })?;

        if !vehicle.is_active {
            return Err(AppError::VehicleUnavailable {
                vehicle: vehicle.name,
                conflicts: vec![],
            });
        }

        let total_days = i32::try_from(interval.total_days()).map_err(|_| {
            AppError::InvalidInterval(format!(
                "rental of {} days exceeds the representable range",
                interval.total_days()
            ))
        })?;

        let created = self
            .requests
            .create(NewBookingRequest {
                customer_id: request.customer_id,
                vehicle_id: vehicle.id,
                vehicle_name: vehicle.name,
                start_date: interval.start,
                end_date: interval.end,
                total_days,
                customer_message: request.customer_message,
            })
            .await?;

        Ok(SubmitBookingResponse {
            id: created.id.to_string(),
            status: created.status,
            total_days: created.total_days,
        })
    }

    /// Decisión del staff sobre una solicitud pendiente
    pub async fn decide(
        &self,
        id: Uuid,
        decision: DecideBookingRequest,
    ) -> Result<BookingRequestResponse, AppError> {
        let current = self.find_or_not_found(id).await?;

        let target = match decision.status {
            BookingDecision::Confirmed => BookingRequestStatus::Confirmed,
            BookingDecision::Rejected => BookingRequestStatus::Rejected,
        };

        if !current.status.can_transition_to(target) {
            return Err(invalid_transition_error(
                "BookingRequest",
                current.status.as_str(),
                target.as_str(),
            ));
        }

        let mut updated = match decision.status {
            BookingDecision::Confirmed => {
                self.requests.confirm(id, decision.staff_id).await?
            }
            BookingDecision::Rejected => {
                let reason = decision
                    .reason
                    .as_deref()
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        AppError::BadRequest(
                            "A rejection reason is required to reject a booking request"
                                .to_string(),
                        )
                    })?;
                self.requests.reject(id, reason).await?
            }
        };

        self.notify_decision(&mut updated).await;

        Ok(updated.into())
    }

    /// Convierte una solicitud confirmada en un rental. La comprobación
    /// fresca de disponibilidad y el marcado `completed` de la solicitud
    /// se hacen atómicamente en el repositorio de rentals.
    pub async fn convert(
        &self,
        id: Uuid,
        pricing: ConvertBookingRequest,
    ) -> Result<RentalResponse, AppError> {
        pricing.validate()?;

        let current = self.find_or_not_found(id).await?;

        if !current
            .status
            .can_transition_to(BookingRequestStatus::Completed)
        {
            return Err(invalid_transition_error(
                "BookingRequest",
                current.status.as_str(),
                BookingRequestStatus::Completed.as_str(),
            ));
        }

        let new = NewRental {
            customer_id: current.customer_id,
            vehicle_name: current.vehicle_name.clone(),
            start_date: current.start_date,
            end_date: current.end_date,
            daily_rate: pricing.daily_rate,
            deposit: pricing.deposit,
            discount: pricing.discount.unwrap_or(Decimal::ZERO),
            total_price: pricing.total_price,
            photo_urls: vec![],
            signature_url: None,
            payment_proof_url: None,
        };

        let rental = self.rentals.create_from_request(&current, new).await?;
        Ok(rental.into())
    }

    /// Retirada de una solicitud: borrado físico sin restricción de estado
    pub async fn withdraw(&self, id: Uuid) -> Result<(), AppError> {
        self.requests.delete(id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<BookingRequestResponse, AppError> {
        Ok(self.find_or_not_found(id).await?.into())
    }

    pub async fn list(&self) -> Result<Vec<BookingRequestResponse>, AppError> {
        let requests = self.requests.list().await?;
        Ok(requests.into_iter().map(Into::into).collect())
    }

    async fn find_or_not_found(&self, id: Uuid) -> Result<BookingRequest, AppError> {
        self.requests.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound(format!("BookingRequest with id '{}' not found", id))
        })
    }

    /// Notificación al cliente tras la decisión, best-effort: un fallo del
    /// colaborador no revierte la decisión, solo queda en los flags y logs
    async fn notify_decision(&self, request: &mut BookingRequest) {
        let Ok(Some(customer)) = self.customers.find_by_id(request.customer_id).await else {
            log::warn!(
                "⚠️ Cliente {} no encontrado al notificar la solicitud {}",
                request.customer_id,
                request.id
            );
            return;
        };

        let event = match request.status {
            BookingRequestStatus::Confirmed => NotificationEvent::BookingConfirmed {
                vehicle_name: request.vehicle_name.clone(),
            },
            BookingRequestStatus::Rejected => NotificationEvent::BookingRejected {
                vehicle_name: request.vehicle_name.clone(),
                reason: request.rejected_reason.clone().unwrap_or_default(),
            },
            _ => return,
        };

        match self.notifications.notify(&customer, event).await {
            Ok(delivery) => {
                if let Err(e) = self
                    .requests
                    .update_notification_flags(
                        request.id,
                        delivery.email_sent,
                        delivery.whatsapp_sent,
                    )
                    .await
                {
                    log::warn!("⚠️ No se pudieron guardar los flags de notificación: {}", e);
                } else {
                    request.email_sent = delivery.email_sent;
                    request.whatsapp_sent = delivery.whatsapp_sent;
                }
            }
            Err(e) => log::warn!(
                "⚠️ Fallo notificando la solicitud {}: {}",
                request.id,
                e
            ),
        }
    }
}
