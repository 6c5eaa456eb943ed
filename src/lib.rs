// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ecommerce Server - users and products REST service
//!
//! Products sit behind an HS256 bearer-token gate; tokens are issued by
//! `/login` against the stored user accounts.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Token codec, bearer gate and credential check
//! - `services` - Validation and business rules
//! - `storage` - Embedded redb persistence

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
