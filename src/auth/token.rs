// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HS256 token codec.
//!
//! Tokens are standard three-segment JWTs signed with the process-wide
//! secret from [`AuthConfig`]. Verification is stateless: a token is valid
//! while its signature checks out and `exp` lies strictly in the future.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use tracing::debug;

use super::claims::{PresentedClaims, Principal, TokenClaims};
use super::TokenError;
use crate::config::AuthConfig;

/// Lifetime of an issued token.
pub const TOKEN_TTL_HOURS: i64 = 2;

/// Claim carrying the principal.
const PRINCIPAL_CLAIM: &str = "username";

/// Issues and validates signed, time-limited tokens.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is compared in `decode_at` against the caller's clock, with
        // no leeway.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret()),
            decoding_key: DecodingKey::from_secret(config.secret()),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    /// Issue a token for `principal`, valid for two hours from now.
    pub fn issue(&self, principal: &str) -> Result<String, TokenError> {
        self.issue_at(principal, Utc::now())
    }

    /// Issue a token as if the current time were `now`.
    pub fn issue_at(&self, principal: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = TokenClaims {
            username: principal.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        debug!(username = %principal, exp = claims.exp, "issuing token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Signing)
    }

    /// Validate `token` and return the principal it was issued to.
    pub fn decode(&self, token: &str) -> Result<Principal, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Validate `token` as if the current time were `now`.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<Principal, TokenError> {
        let token_data = decode::<PresentedClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
                _ => TokenError::Malformed,
            })?;

        let claims = token_data.claims;

        if now.timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }

        match claims.username {
            Some(serde_json::Value::String(username)) => Ok(Principal::new(username, claims.exp)),
            _ => Err(TokenError::MissingClaim(PRINCIPAL_CLAIM.to_string())),
        }
    }
}
