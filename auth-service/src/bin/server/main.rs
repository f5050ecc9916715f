use std::sync::Arc;

use auth::TokenCodec;
use auth_service::config::Config;
use auth_service::domain::authentication::service::AuthenticationService;
use auth_service::domain::authentication::session::SessionResolver;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::credentials::ConfiguredCredentialVerifier;
use auth_service::outbound::repositories::InMemoryUserDirectory;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "auth-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        algorithm = %config.jwt.algorithm,
        expiration_minutes = config.jwt.expiration_minutes,
        verifier = ?config.directory.verifier,
        "Configuration loaded"
    );

    let codec = Arc::new(TokenCodec::new(config.jwt.token_config()?));

    let directory = Arc::new(InMemoryUserDirectory::new(config.directory.users()?));
    tracing::info!(users = directory.len(), "User directory seeded");

    let verifier = Arc::new(ConfiguredCredentialVerifier::from_kind(
        config.directory.verifier,
    )?);

    let authentication_service = Arc::new(AuthenticationService::new(
        Arc::clone(&directory),
        verifier,
        Arc::clone(&codec),
    ));
    let session_resolver = Arc::new(SessionResolver::new(directory, codec));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authentication_service, session_resolver);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
