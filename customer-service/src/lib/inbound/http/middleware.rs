use std::time::Duration;

use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;
use tokio::time::timeout;

use crate::customer::errors::CustomerError;
use crate::customer::models::CustomerId;
use crate::customer::models::EmailAddress;
use crate::customer::ports::CustomerServicePort;
use crate::inbound::http::router::AppState;

/// Bound on the per-request credential-store lookup. A slow store must
/// surface as a retryable 503, never as a credential failure.
const STORE_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Extension type carrying the authenticated identity through the request.
///
/// Rebuilt from the token plus a fresh store lookup on every request; it
/// never outlives the request it was built for.
#[derive(Debug, Clone)]
pub struct AuthenticatedCustomer {
    pub customer_id: CustomerId,
    pub email: String,
    pub role: String,
}

/// Request gate: validates a bearer token, reconstructs the identity, and
/// attaches it to the request extensions.
///
/// Requests without a bearer token pass through unauthenticated; whether
/// anonymous access is acceptable is decided per route by
/// [`require_authentication`]. A present-but-bad token terminates the
/// request here, before any handler runs.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(token) = extract_token_from_header(&req) else {
        return Ok(next.run(req).await);
    };

    let claims = state.authenticator.validate_token(token).map_err(|e| {
        match e {
            auth::JwtError::TokenExpired => tracing::warn!("Rejected expired token"),
            _ => tracing::warn!(error = %e, "Rejected invalid token"),
        }
        unauthorized("Invalid or expired token")
    })?;

    let email = EmailAddress::new(claims.sub.clone()).map_err(|_| {
        tracing::warn!("Token subject is not a valid email");
        unauthorized("Invalid token format")
    })?;

    // Fresh lookup per request so deactivation and role changes take
    // effect on the next parse, not at natural token expiry
    let customer = match timeout(
        STORE_LOOKUP_TIMEOUT,
        state.customer_service.get_customer_by_email(&email),
    )
    .await
    {
        Err(_) => {
            tracing::error!(email = %email, "Credential store lookup timed out");
            return Err(service_unavailable("Temporarily unable to authenticate"));
        }
        Ok(Err(CustomerError::NotFoundByEmail(_))) => {
            tracing::warn!(email = %email, "Token subject no longer exists");
            return Err(unauthorized("Invalid or expired token"));
        }
        Ok(Err(CustomerError::DatabaseError(e))) => {
            tracing::error!(error = %e, "Credential store lookup failed");
            return Err(service_unavailable("Temporarily unable to authenticate"));
        }
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Credential store lookup failed");
            return Err(internal_error("Authentication failed"));
        }
        Ok(Ok(customer)) => customer,
    };

    if !customer.active {
        tracing::warn!(email = %email, "Token subject has been deactivated");
        return Err(unauthorized("Invalid or expired token"));
    }

    req.extensions_mut().insert(AuthenticatedCustomer {
        customer_id: customer.id,
        email: customer.email.as_str().to_string(),
        role: customer.role,
    });

    Ok(next.run(req).await)
}

/// Authorization boundary for protected routes: rejects requests that went
/// through the gate without establishing an identity.
pub async fn require_authentication(req: Request, next: Next) -> Result<Response, Response> {
    if req.extensions().get::<AuthenticatedCustomer>().is_none() {
        return Err(unauthorized("Authentication required"));
    }

    Ok(next.run(req).await)
}

/// Pull the bearer token out of the Authorization header.
///
/// Returns None for a missing header, a non-UTF-8 header, or a scheme
/// other than Bearer - those requests stay anonymous.
fn extract_token_from_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn service_unavailable(message: &str) -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
