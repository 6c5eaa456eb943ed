// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! This module defines the request and response data structures used by
//! the REST API. All types derive `ToSchema` for OpenAPI documentation.
//!
//! ## Model Categories
//!
//! - **Auth**: login request and token response
//! - **Users**: registered accounts (passwords are never serialized)
//! - **Products**: catalogue entries

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::{StoredProduct, StoredUser};

// =============================================================================
// Auth Models
// =============================================================================

/// Credentials posted to `/login`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// HS256 JWT, valid for two hours
    pub token: String,
}

// =============================================================================
// Generic Responses
// =============================================================================

/// Confirmation returned by mutating endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// User Models
// =============================================================================

/// A registered user as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
}

impl From<StoredUser> for User {
    fn from(user: StoredUser) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            username: user.username,
        }
    }
}

/// Request to register a user. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request to replace a user's details. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

// =============================================================================
// Product Models
// =============================================================================

/// A catalogue product.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub price: f64,
}

impl From<StoredProduct> for Product {
    fn from(product: StoredProduct) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
        }
    }
}

/// Request to create a product.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateProductRequest {
    pub name: String,
    /// Must be greater than zero
    pub price: f64,
}

/// Partial product update.
///
/// A non-empty `name` and a non-zero `price` replace the stored values;
/// anything else leaves them unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn user_response_omits_password() {
        let stored = StoredUser {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password: "correct-secret".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&User::from(stored)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("correct-secret"));
    }

    #[test]
    fn create_user_request_defaults_missing_fields() {
        let request: CreateUserRequest = serde_json::from_str(r#"{"name":"Alice"}"#).unwrap();
        assert_eq!(request.name, "Alice");
        assert!(request.password.is_empty());
    }

    #[test]
    fn update_product_request_is_partial() {
        let request: UpdateProductRequest = serde_json::from_str(r#"{"price":12.5}"#).unwrap();
        assert!(request.name.is_none());
        assert_eq!(request.price, Some(12.5));
    }
}
