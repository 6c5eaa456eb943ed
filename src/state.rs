// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::{
    auth::{SharedVerifier, TokenCodec},
    config::AuthConfig,
    storage::AppDatabase,
};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<AppDatabase>,
    pub tokens: Arc<TokenCodec>,
    /// Verifier consulted by the bearer gate on product routes
    pub verifier: SharedVerifier,
}

impl AppState {
    /// State whose gate verifies with the same codec that issues tokens.
    pub fn new(db: AppDatabase, auth: &AuthConfig) -> Self {
        let tokens = Arc::new(TokenCodec::new(auth));
        Self {
            db: Arc::new(db),
            verifier: tokens.clone(),
            tokens,
        }
    }

    pub fn with_verifier(mut self, verifier: SharedVerifier) -> Self {
        self.verifier = verifier;
        self
    }
}
