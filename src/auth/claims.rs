// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWT claims and authenticated principal representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Claims written into every issued token.
///
/// `username` and `exp` match the claim names used by tokens the service
/// has always issued, so existing tokens keep decoding.
#[derive(Debug, Clone, Serialize)]
pub struct TokenClaims {
    /// Principal the token was issued to
    pub username: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

/// Claims as read back from a presented token.
///
/// `username` is kept loose so that an absent or non-string value can be
/// reported as a missing claim instead of a generic parse failure.
#[derive(Debug, Deserialize)]
pub(crate) struct PresentedClaims {
    #[serde(default)]
    pub username: Option<serde_json::Value>,
    pub exp: i64,
}

/// Identity proven by a valid bearer token.
///
/// The gate attaches this to request extensions; handlers read it with
/// `Extension<Principal>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    /// Authenticated username
    pub username: String,

    /// Token expiration (Unix timestamp)
    #[serde(skip)]
    pub expires_at: i64,
}

impl Principal {
    pub fn new(username: impl Into<String>, expires_at: i64) -> Self {
        Self {
            username: username.into(),
            expires_at,
        }
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presented_claims_accept_missing_username() {
        let claims: PresentedClaims = serde_json::from_str(r#"{"exp":1700003600}"#).unwrap();
        assert!(claims.username.is_none());
        assert_eq!(claims.exp, 1700003600);
    }

    #[test]
    fn presented_claims_ignore_unknown_fields() {
        let claims: PresentedClaims =
            serde_json::from_str(r#"{"username":"alice","exp":1,"iat":0,"role":"x"}"#).unwrap();
        assert_eq!(claims.username, Some(serde_json::json!("alice")));
    }

    #[test]
    fn principal_displays_username() {
        let principal = Principal::new("alice", 0);
        assert_eq!(principal.to_string(), "alice");
    }
}
