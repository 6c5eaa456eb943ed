// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer token verification capability.

use std::sync::Arc;

use super::{Principal, TokenCodec, TokenError};

/// Decides whether a presented bearer token can be trusted.
///
/// The gate only sees this trait, so tests can swap in a fake without
/// touching real signing keys.
pub trait TokenVerifier: Send + Sync {
    fn verify_token(&self, token: &str) -> Result<Principal, TokenError>;
}

/// Verifier shared across request tasks.
pub type SharedVerifier = Arc<dyn TokenVerifier>;

impl TokenVerifier for TokenCodec {
    fn verify_token(&self, token: &str) -> Result<Principal, TokenError> {
        self.decode(token)
    }
}
