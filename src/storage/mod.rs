// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Storage Module
//!
//! Persistent storage for users and products in a single redb file.
//!
//! ## Storage Layout
//!
//! ```text
//! $DATA_DIR/
//!   ecommerce.redb
//!     users       id → user JSON
//!     usernames   username → id
//!     products    id → product JSON
//!     sequences   name → last id
//! ```
//!
//! Every mutation is a single redb write transaction, so the username
//! index never drifts from the user table.

pub mod database;
pub mod repository;

pub use database::{AppDatabase, StorageError, StorageResult};
pub use repository::{NewUser, ProductRepository, StoredProduct, StoredUser, UserRepository};
