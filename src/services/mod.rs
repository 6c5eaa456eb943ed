// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Business rules between the HTTP handlers and the repositories.

pub mod products;
pub mod users;

pub use products::ProductService;
pub use users::UserService;

use crate::auth::{LoginError, TokenError};
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Request failed a field check
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<LoginError> for ServiceError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredentials => ServiceError::InvalidCredentials,
            LoginError::Token(e) => ServiceError::Token(e),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
