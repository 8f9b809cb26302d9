use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::customer::errors::EmailError;
use crate::customer::errors::FullNameError;
use crate::customer::errors::PhoneError;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::EmailAddress;
use crate::domain::customer::models::FullName;
use crate::domain::customer::models::PhoneNumber;
use crate::inbound::http::router::AppState;

pub async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<ApiSuccess<CreateCustomerResponseData>, ApiError> {
    state
        .customer_service
        .create_customer(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref customer| ApiSuccess::new(StatusCode::CREATED, customer.into()))
}

/// HTTP request body for registering a customer (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCustomerRequest {
    full_name: String,
    email: String,
    phone: Option<String>,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateCustomerRequestError {
    #[error("Invalid full name: {0}")]
    FullName(#[from] FullNameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid phone number: {0}")]
    Phone(#[from] PhoneError),
}

impl CreateCustomerRequest {
    fn try_into_command(self) -> Result<CreateCustomerCommand, ParseCreateCustomerRequestError> {
        let full_name = FullName::new(self.full_name)?;
        let email = EmailAddress::new(self.email)?;
        let phone = self.phone.map(PhoneNumber::new).transpose()?;
        let password = self.password;
        Ok(CreateCustomerCommand::new(full_name, email, phone, password))
    }
}

impl From<ParseCreateCustomerRequestError> for ApiError {
    fn from(err: ParseCreateCustomerRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateCustomerResponseData {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Customer> for CreateCustomerResponseData {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            full_name: customer.full_name.as_str().to_string(),
            email: customer.email.as_str().to_string(),
            phone: customer.phone.as_ref().map(|p| p.as_str().to_string()),
            created_at: customer.created_at,
        }
    }
}
