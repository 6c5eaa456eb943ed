// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Failure to issue or validate a bearer token.
///
/// Callers of the codec get the precise kind; the HTTP gate collapses all
/// of them into a single [`AuthError::InvalidToken`].
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token structure could not be parsed (segments, base64, JSON)
    #[error("token is malformed")]
    Malformed,
    /// Signature does not match the process secret
    #[error("token signature is invalid")]
    InvalidSignature,
    /// Current time is at or past the `exp` claim
    #[error("token has expired")]
    Expired,
    /// A required claim is absent or has the wrong type
    #[error("token is missing the `{0}` claim")]
    MissingClaim(String),
    /// The signing primitive failed while issuing a token
    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl TokenError {
    /// Stable identifier, used in logs.
    pub fn error_code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "token_expired",
            TokenError::MissingClaim(_) => "missing_claim",
            TokenError::Signing(_) => "signing_error",
        }
    }
}

/// Rejection produced by the bearer gate.
///
/// Both variants are 401 with a plain-text body that never names the
/// verification step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization: Bearer ...` header present
    #[error("Unauthorized - Missing Token")]
    MissingToken,
    /// Token present but rejected by the verifier
    #[error("invalid token")]
    InvalidToken,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
