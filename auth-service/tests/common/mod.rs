use std::sync::Arc;

use auth::TokenCodec;
use auth_service::config::JwtConfig;
use auth_service::config::VerifierKind;
use auth_service::domain::authentication::service::AuthenticationService;
use auth_service::domain::authentication::session::SessionResolver;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::Username;
use auth_service::inbound::http::router::create_router;
use auth_service::outbound::credentials::ConfiguredCredentialVerifier;
use auth_service::outbound::repositories::InMemoryUserDirectory;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    /// Codec sharing the server's configuration, for crafting tokens
    pub codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the application with the `johndoe` / `123` user
    pub async fn spawn() -> Self {
        Self::spawn_with(
            VerifierKind::Plaintext,
            vec![User::new(Username::new("johndoe").unwrap(), "123")],
        )
        .await
    }

    pub async fn spawn_with(verifier: VerifierKind, users: Vec<User>) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let jwt = JwtConfig {
            secret: TEST_SECRET.to_string(),
            algorithm: "HS256".to_string(),
            expiration_minutes: 30,
            max_expiration_minutes: None,
            issuer: None,
        };
        let codec = Arc::new(TokenCodec::new(
            jwt.token_config().expect("Invalid test token config"),
        ));

        let directory = Arc::new(InMemoryUserDirectory::new(users));
        let authentication_service = Arc::new(AuthenticationService::new(
            Arc::clone(&directory),
            Arc::new(
                ConfiguredCredentialVerifier::from_kind(verifier)
                    .expect("Failed to build credential verifier"),
            ),
            Arc::clone(&codec),
        ));
        let session_resolver = Arc::new(SessionResolver::new(directory, Arc::clone(&codec)));

        let router = create_router(authentication_service, session_resolver);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// POST the login form to `/token`
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/token")
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the access token, panicking on failure
    pub async fn access_token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
