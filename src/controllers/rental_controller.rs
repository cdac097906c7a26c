//! Controller de rentals
//! 
//! Ciclo de vida del rental: pending -> {completed, cancelled}, ambos
//! terminales para el status (el borrado físico sigue permitido). La
//! creación directa de autoservicio re-valida disponibilidad de forma
//! atómica en el repositorio.

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::rental_dto::{CancelRentalRequest, CompleteRentalRequest, CreateRentalRequest, RentalResponse};
use crate::models::rental::{Rental, RentalHandover};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::rental_repository::{NewRental, RentalRepository};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::documents::DocumentClient;
use crate::services::notifications::{NotificationClient, NotificationEvent};
use crate::services::overlap::DateInterval;
use crate::utils::errors::AppError;

pub struct RentalController {
    rentals: RentalRepository,
    customers: CustomerRepository,
    vehicles: VehicleRepository,
    documents: Arc<dyn DocumentClient>,
    notifications: Arc<dyn NotificationClient>,
}

impl RentalController {
    pub fn new(
        pool: PgPool,
        documents: Arc<dyn DocumentClient>,
        notifications: Arc<dyn NotificationClient>,
    ) -> Self {
        Self {
            rentals: RentalRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            documents,
            notifications,
        }
    }

    /// Creación directa de autoservicio, sin solicitud previa. Fotos,
    /// firma y comprobante pueden faltar en la creación ("incomplete info
    /// is allowed"): no se bloquea el flujo de reserva por ellos.
    pub async fn create(&self, request: CreateRentalRequest) -> Result<RentalResponse, AppError> {
        request.validate()?;

        let interval = DateInterval::strict(request.start_date, request.end_date)?;
        self.customers.ensure_bookable(request.customer_id).await?;

        let vehicle = self
            .vehicles
            .find_by_name(&request.vehicle)
            .await?
            .ok_or_else(|| {
                AppError::VehicleNotFound(format!("Vehicle '{}' not found", request.vehicle))
            })?;

        if !vehicle.is_active {
            return Err(AppError::VehicleUnavailable {
                vehicle: vehicle.name,
                conflicts: vec![],
            });
        }

        let rental = self
            .rentals
            .create_checked(NewRental {
                customer_id: request.customer_id,
                vehicle_name: vehicle.name,
                start_date: interval.start,
                end_date: interval.end,
                daily_rate: request.daily_rate,
                deposit: request.deposit,
                discount: request.discount.unwrap_or(Decimal::ZERO),
                total_price: request.total_price,
                photo_urls: request.photo_urls.unwrap_or_default(),
                signature_url: request.signature_url,
                payment_proof_url: request.payment_proof_url,
            })
            .await?;

        Ok(rental.into())
    }

    /// Completación: registra los datos de entrega y dispara la
    /// generación y envío del contrato firmado
    pub async fn complete(
        &self,
        id: Uuid,
        request: CompleteRentalRequest,
    ) -> Result<RentalResponse, AppError> {
        request.validate()?;

        let mut rental = self
            .rentals
            .complete(
                id,
                RentalHandover {
                    final_mileage: request.final_mileage,
                    fuel_level: request.fuel_level,
                    vehicle_color: request.vehicle_color,
                    total_price: request.total_price,
                    photo_urls: request.photo_urls,
                    signature_url: request.signature_url,
                    payment_proof_url: request.payment_proof_url,
                },
            )
            .await?;

        self.deliver_agreement(&mut rental).await;

        Ok(rental.into())
    }

    /// Cancelación: libera el intervalo para futuras comprobaciones
    pub async fn cancel(
        &self,
        id: Uuid,
        request: CancelRentalRequest,
    ) -> Result<RentalResponse, AppError> {
        let rental = self.rentals.cancel(id, request.reason).await?;
        Ok(rental.into())
    }

    /// Borrado físico incondicional; también retira los documentos
    /// generados a través del colaborador de almacenamiento
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        self.rentals.delete(id).await?;

        if let Err(e) = self.documents.delete_documents(id).await {
            log::warn!("⚠️ No se pudieron eliminar los documentos del rental {}: {}", id, e);
        }

        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<RentalResponse, AppError> {
        let rental = self
            .rentals
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Rental with id '{}' not found", id)))?;

        Ok(rental.into())
    }

    pub async fn list(&self) -> Result<Vec<RentalResponse>, AppError> {
        let rentals = self.rentals.list().await?;
        Ok(rentals.into_iter().map(Into::into).collect())
    }

    /// Generación y entrega del contrato tras completar, best-effort: un
    /// fallo del colaborador no revierte la completación, la referencia
    /// queda vacía y el error en los logs
    async fn deliver_agreement(&self, rental: &mut Rental) {
        let Ok(Some(customer)) = self.customers.find_by_id(rental.customer_id).await else {
            log::warn!(
                "⚠️ Cliente {} no encontrado al generar el contrato del rental {}",
                rental.customer_id,
                rental.id
            );
            return;
        };

        match self.documents.generate_agreement(rental, &customer).await {
            Ok(url) => {
                if let Err(e) = self.rentals.set_agreement_url(rental.id, &url).await {
                    log::warn!("⚠️ No se pudo guardar la referencia del contrato: {}", e);
                } else {
                    rental.agreement_url = Some(url);
                }
            }
            Err(e) => log::warn!(
                "⚠️ Fallo generando el contrato del rental {}: {}",
                rental.id,
                e
            ),
        }

        let event = NotificationEvent::RentalCompleted {
            vehicle_name: rental.vehicle_name.clone(),
        };
        if let Err(e) = self.notifications.notify(&customer, event).await {
            log::warn!(
                "⚠️ Fallo notificando la completación del rental {}: {}",
                rental.id,
                e
            );
        }
    }
}
