use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::{errors::HttpError, state::HttpState};

/// Shared-secret check for the internal API: the tool handlers, the
/// billing webhook and the admin console all present the same token.
pub async fn require_token(
    State(state): State<HttpState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HttpError> {
    let token = req
        .headers()
        .get("x-metron-token")
        .and_then(|value| value.to_str().ok());
    if token != Some(state.service_token.as_str()) {
        return Err(HttpError::new(
            StatusCode::UNAUTHORIZED,
            "missing or invalid service token",
            Some("token_invalid".to_string()),
        ));
    }

    Ok(next.run(req).await)
}
