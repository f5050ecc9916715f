use axum::extract::State;
use axum::http::StatusCode;
use axum::Form;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authentication::models::IssuedToken;
use crate::inbound::http::router::AppState;

/// `POST /token`: exchange a username/password form for a bearer token.
pub async fn issue_token(
    State(state): State<AppState>,
    Form(form): Form<TokenRequestForm>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    if let Some(grant_type) = form.grant_type.as_deref() {
        if grant_type != "password" {
            return Err(ApiError::BadRequest("Unsupported grant type".to_string()));
        }
    }

    let issued = state
        .authentication_service
        .login(&form.username, &form.password)
        .await?;

    Ok(ApiSuccess::new(StatusCode::OK, (&issued).into()))
}

/// OAuth2 password grant form. Unknown fields such as `scope` are ignored.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequestForm {
    username: String,
    password: String,
    #[serde(default)]
    grant_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub token_type: String,
}

impl From<&IssuedToken> for TokenResponseData {
    fn from(issued: &IssuedToken) -> Self {
        Self {
            access_token: issued.access_token.clone(),
            token_type: issued.token_type.as_str().to_string(),
        }
    }
}
