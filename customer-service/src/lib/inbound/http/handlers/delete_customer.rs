use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use crate::customer::errors::CustomerError;
use crate::customer::ports::CustomerServicePort;
use crate::domain::customer::models::CustomerId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Soft delete: the row stays, the `active` flag is cleared.
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let customer_id = CustomerId::from_string(&id).map_err(CustomerError::from)?;

    state
        .customer_service
        .delete_customer(&customer_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
