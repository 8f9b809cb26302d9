use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::customer::errors::CustomerError;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::FullName;
use crate::domain::customer::models::PhoneNumber;
use crate::domain::customer::models::UpdateCustomerCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a customer (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

impl UpdateCustomerRequest {
    fn try_into_command(self) -> Result<UpdateCustomerCommand, CustomerError> {
        // Validation happens here - errors are automatically converted via #[from]
        let full_name = self.full_name.map(FullName::new).transpose()?;

        let phone = self.phone.map(PhoneNumber::new).transpose()?;

        Ok(UpdateCustomerCommand { full_name, phone })
    }
}

/// Response body for customer update operations
#[derive(Debug, Serialize, PartialEq)]
pub struct UpdateCustomerResponseData {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub updated_at: String,
}

impl From<Customer> for UpdateCustomerResponseData {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            full_name: customer.full_name.as_str().to_string(),
            email: customer.email.as_str().to_string(),
            phone: customer.phone.as_ref().map(|p| p.as_str().to_string()),
            updated_at: customer.updated_at.to_rfc3339(),
        }
    }
}

/// Full update (PUT): every updatable field must be present.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<ApiSuccess<UpdateCustomerResponseData>, ApiError> {
    let customer_id = CustomerId::from_string(&id).map_err(CustomerError::from)?;
    let command = req.try_into_command()?;

    if !command.is_complete() {
        return Err(ApiError::from(CustomerError::MissingUpdateFields));
    }

    state
        .customer_service
        .update_customer(&customer_id, command)
        .await
        .map_err(ApiError::from)
        .map(|customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}

/// Partial update (PATCH): absent fields keep their stored values.
pub async fn partial_update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCustomerRequest>,
) -> Result<ApiSuccess<UpdateCustomerResponseData>, ApiError> {
    let customer_id = CustomerId::from_string(&id).map_err(CustomerError::from)?;
    let command = req.try_into_command()?;

    state
        .customer_service
        .update_customer(&customer_id, command)
        .await
        .map_err(ApiError::from)
        .map(|customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}
