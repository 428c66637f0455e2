//! HTTP Basic authentication for the admin surface

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{HeaderValue, header};
use sha2::{Digest, Sha256};
use shared::error::AppError;

use crate::state::AppState;

/// Expected admin credentials, kept as SHA-256 digests so every comparison
/// runs over fixed-length input.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: [u8; 32],
    password: [u8; 32],
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

/// Compare every byte regardless of where the first difference is
fn equal_digests(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: digest(username),
            password: digest(password),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = equal_digests(&self.username, &digest(username));
        let pass_ok = equal_digests(&self.password, &digest(password));
        user_ok & pass_ok
    }

    /// Check an `Authorization` header value (`Basic base64(user:pass)`)
    pub fn verify_header(&self, value: &str) -> bool {
        let Some(encoded) = value
            .strip_prefix("Basic ")
            .or_else(|| value.strip_prefix("basic "))
        else {
            return false;
        };
        let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
            return false;
        };
        let Ok(decoded) = String::from_utf8(decoded) else {
            return false;
        };
        match decoded.split_once(':') {
            Some((user, pass)) => self.verify(user, pass),
            None => false,
        }
    }
}

/// Middleware guarding `/admin`
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    let Some(value) = request.headers().get(header::AUTHORIZATION) else {
        return Err(unauthorized(AppError::not_authenticated()));
    };

    let authorized = value
        .to_str()
        .is_ok_and(|v| state.admin.verify_header(v));
    if !authorized {
        tracing::debug!(path = %request.uri().path(), "Admin authentication failed");
        return Err(unauthorized(AppError::invalid_credentials()));
    }

    Ok(next.run(request).await)
}

/// 401 with the Basic challenge
fn unauthorized(error: AppError) -> Response {
    let mut response = error.into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"admin\""),
    );
    response
}
