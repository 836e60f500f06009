use axum::{
    extract::Request,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub username: String,
    pub is_admin: bool,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.username,
            is_admin: claims.is_admin,
        }
    }
}

/// Store the token's user on the request when a valid bearer token is present.
///
/// A missing or invalid token is not an error here; routes that need a user
/// are guarded by [`ensure_logged_in`] or [`ensure_admin`].
pub async fn authenticate_jwt(mut request: Request, next: Next) -> Response {
    if let Some(token) = extract_jwt_from_headers(request.headers()) {
        match validate_jwt(&token) {
            Ok(claims) => {
                let auth_user = AuthUser::from(claims);
                tracing::debug!("Authenticated {} (admin: {})", auth_user.username, auth_user.is_admin);
                request.extensions_mut().insert(auth_user);
            }
            Err(e) => tracing::debug!("Ignoring bearer token: {}", e),
        }
    }

    next.run(request).await
}

/// Reject requests without an authenticated user
pub async fn ensure_logged_in(request: Request, next: Next) -> Result<Response, ApiError> {
    if request.extensions().get::<AuthUser>().is_none() {
        return Err(ApiError::unauthorized("Unauthorized"));
    }
    Ok(next.run(request).await)
}

/// Reject requests unless the authenticated user is an admin
pub async fn ensure_admin(request: Request, next: Next) -> Result<Response, ApiError> {
    match request.extensions().get::<AuthUser>().cloned() {
        Some(user) if user.is_admin => Ok(next.run(request).await),
        Some(user) => {
            tracing::warn!("Admin route {} refused for {}", request.uri().path(), user.username);
            Err(ApiError::unauthorized("Unauthorized"))
        }
        None => Err(ApiError::unauthorized("Unauthorized")),
    }
}

/// Token from `Authorization: Bearer <token>`, scheme matched case-insensitively
fn extract_jwt_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = auth_str.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
