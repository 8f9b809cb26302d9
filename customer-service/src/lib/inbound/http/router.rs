use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::authenticate::authenticate;
use super::handlers::create_customer::create_customer;
use super::handlers::delete_customer::delete_customer;
use super::handlers::get_customer::get_customer;
use super::handlers::list_customers::list_customers;
use super::handlers::update_customer::partial_update_customer;
use super::handlers::update_customer::update_customer;
use super::middleware::authenticate as auth_gate;
use super::middleware::require_authentication;
use crate::domain::customer::service::CustomerService;
use crate::outbound::repositories::customer::PostgresCustomerRepository;

#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService<PostgresCustomerRepository>>,
    pub authenticator: Arc<Authenticator>,
    pub jwt_expiration_hours: i64,
}

pub fn create_router(
    customer_service: Arc<CustomerService<PostgresCustomerRepository>>,
    authenticator: Arc<Authenticator>,
    jwt_expiration_hours: i64,
) -> Router {
    let state = AppState {
        customer_service,
        authenticator,
        jwt_expiration_hours,
    };

    // Registration and login are open; everything else requires an identity
    let public_routes = Router::new()
        .route("/api/authenticate", post(authenticate))
        .route("/api/customers", post(create_customer));

    let protected_routes = Router::new()
        .route("/api/customers", get(list_customers))
        .route("/api/customers/:customer_id", get(get_customer))
        .route("/api/customers/:customer_id", put(update_customer))
        .route("/api/customers/:customer_id", patch(partial_update_customer))
        .route("/api/customers/:customer_id", delete(delete_customer))
        .route_layer(middleware::from_fn(require_authentication));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // The gate runs on every request; routes without a token stay
        // anonymous until the route-level authorization layer decides
        .layer(middleware::from_fn_with_state(state.clone(), auth_gate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
