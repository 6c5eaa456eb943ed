// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to the database.
//!
//! Each repository provides CRUD operations for a specific entity type,
//! borrowing the shared [`AppDatabase`](super::AppDatabase).

pub mod products;
pub mod users;

pub use products::{ProductRepository, StoredProduct};
pub use users::{NewUser, StoredUser, UserRepository};
