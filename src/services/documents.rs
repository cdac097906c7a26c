//! Colaborador de generación de documentos
//! 
//! El contrato firmado se genera y almacena en un servicio externo; aquí
//! solo vive el cliente HTTP y el trait que permite stubearlo en tests.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::models::customer::Customer;
use crate::models::rental::Rental;
use crate::utils::errors::AppError;

#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Genera el contrato de un rental completado y devuelve la referencia
    /// opaca al documento almacenado
    async fn generate_agreement(
        &self,
        rental: &Rental,
        customer: &Customer,
    ) -> Result<String, AppError>;

    /// Elimina los documentos generados de un rental borrado
    async fn delete_documents(&self, rental_id: Uuid) -> Result<(), AppError>;
}

#[derive(Debug, Deserialize)]
struct AgreementResponse {
    document_url: String,
}

/// Cliente HTTP contra el servicio de documentos
pub struct HttpDocumentClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDocumentClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .expect("Failed to create HTTP client");

        Self { base_url, client }
    }
}

#[async_trait]
impl DocumentClient for HttpDocumentClient {
    async fn generate_agreement(
        &self,
        rental: &Rental,
        customer: &Customer,
    ) -> Result<String, AppError> {
        let url = format!("{}/agreements", self.base_url);
        log::info!("📄 Generando contrato para rental {} en {}", rental.id, url);

        let response = self
            .client
            .post(&url)
            .json(&json!({
                "rental_id": rental.id,
                "vehicle_name": rental.vehicle_name,
                "start_date": rental.start_date,
                "end_date": rental.end_date,
                "total_price": rental.total_price,
                "customer_name": customer.full_name,
                "customer_email": customer.email,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("document service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "document service returned {}",
                response.status()
            )));
        }

        let body: AgreementResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("document service: {}", e)))?;

        Ok(body.document_url)
    }

    async fn delete_documents(&self, rental_id: Uuid) -> Result<(), AppError> {
        let url = format!("{}/agreements/{}", self.base_url, rental_id);
        log::info!("🗑️ Eliminando documentos del rental {}", rental_id);

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("document service: {}", e)))?;

        if !response.status().is_success() && response.status() != reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::ExternalApi(format!(
                "document service returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
