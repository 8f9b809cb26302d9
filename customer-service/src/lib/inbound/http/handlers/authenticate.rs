use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::customer::errors::CustomerError;
use crate::customer::models::EmailAddress;
use crate::customer::ports::CustomerServicePort;
use crate::inbound::http::router::AppState;

/// Login: verify credentials and issue an access token.
///
/// Unknown email, deactivated account, and wrong password all surface the
/// same generic 401 so callers cannot probe which emails are registered.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let customer = state
        .customer_service
        .get_customer_by_email(&email)
        .await
        .map_err(|e| match e {
            CustomerError::NotFoundByEmail(_) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            _ => ApiError::from(e),
        })?;

    if !customer.active {
        tracing::warn!(email = %customer.email, "Login attempt for deactivated customer");
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = auth::Claims::new(
        customer.email.as_str(),
        &customer.role,
        state.jwt_expiration_hours,
    );

    let result = state
        .authenticator
        .authenticate(&body.password, &customer.password_hash, &claims)
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            auth::AuthenticationError::Password(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::Jwt(err) => {
                ApiError::InternalServerError(format!("Token generation failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            token: result.access_token,
            email: customer.email.as_str().to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticateResponseData {
    pub token: String,
    pub email: String,
}
