// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Bearer token authentication for the product API.
//!
//! ## Auth Flow
//!
//! 1. Client posts `{"username", "password"}` to `/login`
//! 2. Server checks the credentials against the user store and returns an
//!    HS256 JWT (`username`, `exp` = now + 2h)
//! 3. Client sends `Authorization: Bearer <token>` on product routes
//! 4. The gate verifies signature and expiry, then forwards the request
//!
//! ## Security
//!
//! - Verification is stateless; there is no revocation list
//! - The signing secret is fixed for the process lifetime
//! - Gate rejections never say which check failed
//! - Login never says whether the username exists

pub mod claims;
pub mod error;
pub mod login;
pub mod middleware;
pub mod token;
pub mod verifier;

pub use claims::Principal;
pub use error::{AuthError, TokenError};
pub use login::{login, CredentialRecord, CredentialStore, LoginError};
pub use middleware::require_bearer;
pub use token::TokenCodec;
pub use verifier::{SharedVerifier, TokenVerifier};
