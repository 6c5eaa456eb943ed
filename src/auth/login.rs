// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Username/password login.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, info};

use super::{TokenCodec, TokenError};
use crate::storage::StorageResult;

type HmacSha256 = Hmac<Sha256>;

/// Key for the comparison MAC. Only used to make the comparison
/// length-independent, so it need not be secret.
const COMPARE_KEY: &[u8] = b"ecommerce-server/credential-compare";

/// Stored username and secret, as seen by the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub username: String,
    pub secret: String,
}

/// Read access to stored credentials.
pub trait CredentialStore {
    fn get_by_username(&self, username: &str) -> StorageResult<CredentialRecord>;
}

#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// Unknown user, wrong secret, or the lookup itself failed
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Authenticate `username`/`secret` and mint a token on success.
pub fn login(
    store: &dyn CredentialStore,
    tokens: &TokenCodec,
    username: &str,
    secret: &str,
) -> Result<String, LoginError> {
    let record = match store.get_by_username(username) {
        Ok(record) => record,
        Err(e) => {
            debug!(username = %username, error = %e, "login lookup failed");
            return Err(LoginError::InvalidCredentials);
        }
    };

    if !secrets_match(secret, &record.secret) {
        debug!(username = %username, "login secret mismatch");
        return Err(LoginError::InvalidCredentials);
    }

    let token = tokens.issue(username)?;
    info!(username = %username, "login succeeded");
    Ok(token)
}

/// Constant-time equality of two secrets of any length.
fn secrets_match(supplied: &str, stored: &str) -> bool {
    let (Ok(mut stored_mac), Ok(mut supplied_mac)) = (
        HmacSha256::new_from_slice(COMPARE_KEY),
        HmacSha256::new_from_slice(COMPARE_KEY),
    ) else {
        return false;
    };

    stored_mac.update(stored.as_bytes());
    let expected = stored_mac.finalize().into_bytes();

    supplied_mac.update(supplied.as_bytes());
    supplied_mac.verify_slice(&expected).is_ok()
}
