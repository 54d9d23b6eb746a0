// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authentication middleware for the gateway.
//!
//! Session management is an external collaborator: by the time a request
//! reaches this service, the fronting session layer has already validated
//! the user and forwards the identity in the `x-haru-user` header. The
//! middleware enforces that the header is present (fail-closed) and, when
//! configured, additionally checks a static bearer token guarding the
//! whole API.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::handlers::unauthorized;

/// Header carrying the externally validated user identity.
pub const USER_HEADER: &str = "x-haru-user";

/// Authentication configuration for the gateway.
#[derive(Clone)]
pub struct AuthConfig {
    /// Expected bearer token. If `Some`, bearer auth is enforced in
    /// addition to the identity header.
    pub bearer_token: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}

/// The authenticated caller, attached as a request extension.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: String,
}

/// Middleware validating the bearer token (when configured) and the
/// identity header. Requests without a validated identity never reach a
/// handler.
pub async fn auth_middleware(
    State(auth): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(ref expected) = auth.bearer_token {
        let presented = request
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(expected.as_str()) {
            return unauthorized("invalid or missing bearer token");
        }
    }

    let user_id = request
        .headers()
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    match user_id {
        Some(user_id) => {
            request.extensions_mut().insert(Identity { user_id });
            next.run(request).await
        }
        None => unauthorized("no authenticated identity"),
    }
}
