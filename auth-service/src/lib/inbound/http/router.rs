use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_user::current_user;
use super::handlers::health::health;
use super::handlers::token::issue_token;
use super::middleware::require_session;
use crate::domain::authentication::service::AuthenticationService;
use crate::domain::authentication::session::SessionResolver;
use crate::outbound::credentials::ConfiguredCredentialVerifier;
use crate::outbound::repositories::user::InMemoryUserDirectory;

pub type AppAuthenticationService =
    AuthenticationService<InMemoryUserDirectory, ConfiguredCredentialVerifier>;
pub type AppSessionResolver = SessionResolver<InMemoryUserDirectory>;

#[derive(Clone)]
pub struct AppState {
    pub authentication_service: Arc<AppAuthenticationService>,
    pub session_resolver: Arc<AppSessionResolver>,
}

pub fn create_router(
    authentication_service: Arc<AppAuthenticationService>,
    session_resolver: Arc<AppSessionResolver>,
) -> Router {
    let state = AppState {
        authentication_service,
        session_resolver,
    };

    let public_routes = Router::new()
        .route("/token", post(issue_token))
        .route("/health", get(health));

    let protected_routes = Router::new()
        .route("/user/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // Headers are left out of the span: they carry bearer tokens.
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
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
