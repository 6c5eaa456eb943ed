// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product repository.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use serde::{Deserialize, Serialize};

use super::super::database::{next_id, AppDatabase, PRODUCTS};
use super::super::{StorageError, StorageResult};

const PRODUCT_SEQUENCE: &str = "products";

/// Product record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredProduct {
    pub id: u64,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Repository for product operations.
pub struct ProductRepository<'a> {
    db: &'a AppDatabase,
}

impl<'a> ProductRepository<'a> {
    pub fn new(db: &'a AppDatabase) -> Self {
        Self { db }
    }

    /// Insert a product, assigning the next id.
    pub fn create(&self, name: String, price: f64) -> StorageResult<StoredProduct> {
        let write_txn = self.db.inner().begin_write()?;
        let stored = {
            let now = Utc::now();
            let stored = StoredProduct {
                id: next_id(&write_txn, PRODUCT_SEQUENCE)?,
                name,
                price,
                created_at: now,
                updated_at: now,
            };

            let json = serde_json::to_vec(&stored)?;
            let mut products = write_txn.open_table(PRODUCTS)?;
            products.insert(stored.id, json.as_slice())?;
            stored
        };
        write_txn.commit()?;
        Ok(stored)
    }

    /// Get a product by id.
    pub fn get(&self, id: u64) -> StorageResult<StoredProduct> {
        let read_txn = self.db.inner().begin_read()?;
        let products = read_txn.open_table(PRODUCTS)?;
        let value = products
            .get(id)?
            .ok_or_else(|| StorageError::NotFound(format!("Product {id}")))?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// List all products ordered by id.
    pub fn list(&self) -> StorageResult<Vec<StoredProduct>> {
        let read_txn = self.db.inner().begin_read()?;
        let products = read_txn.open_table(PRODUCTS)?;

        let mut result = Vec::new();
        for entry in products.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    /// Replace an existing product.
    pub fn update(&self, product: &StoredProduct) -> StorageResult<()> {
        let write_txn = self.db.inner().begin_write()?;
        {
            let mut products = write_txn.open_table(PRODUCTS)?;
            if products.get(product.id)?.is_none() {
                return Err(StorageError::NotFound(format!("Product {}", product.id)));
            }

            let json = serde_json::to_vec(product)?;
            products.insert(product.id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete a product.
    pub fn delete(&self, id: u64) -> StorageResult<()> {
        let write_txn = self.db.inner().begin_write()?;
        {
            let mut products = write_txn.open_table(PRODUCTS)?;
            if products.remove(id)?.is_none() {
                return Err(StorageError::NotFound(format!("Product {id}")));
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}
