use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerId;
use crate::inbound::http::router::AppState;

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<ApiSuccess<GetCustomerResponseData>, ApiError> {
    let customer_id =
        CustomerId::from_string(&customer_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .customer_service
        .get_customer(&customer_id)
        .await
        .map_err(ApiError::from)
        .map(|ref customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GetCustomerResponseData {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Customer> for GetCustomerResponseData {
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
