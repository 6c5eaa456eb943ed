// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Product catalogue. Every mutation names the principal that made it.

use chrono::Utc;
use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::{
    auth::Principal,
    models::{CreateProductRequest, Product, UpdateProductRequest},
    storage::{AppDatabase, ProductRepository, StorageError},
};

pub struct ProductService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> ProductService<'a> {
    pub fn new(db: &'a AppDatabase) -> Self {
        Self {
            products: ProductRepository::new(db),
        }
    }

    pub fn create(&self, actor: &Principal, request: CreateProductRequest) -> ServiceResult<Product> {
        if request.price <= 0.0 {
            return Err(ServiceError::Validation(
                "product price must be greater than zero".to_string(),
            ));
        }
        if request.name.is_empty() {
            return Err(ServiceError::Validation("product name is required".to_string()));
        }

        let stored = self.products.create(request.name, request.price)?;
        info!(
            product_id = stored.id,
            actor = %actor.username,
            "product created"
        );
        Ok(stored.into())
    }

    pub fn get(&self, id: u64) -> ServiceResult<Product> {
        match self.products.get(id) {
            Ok(product) => Ok(product.into()),
            Err(StorageError::NotFound(_)) => {
                Err(ServiceError::NotFound("Product not found".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn list(&self) -> ServiceResult<Vec<Product>> {
        Ok(self
            .products
            .list()?
            .into_iter()
            .map(Product::from)
            .collect())
    }

    /// Merge `request` onto the stored product.
    ///
    /// Empty names and zero prices in the request are treated as absent.
    pub fn update(
        &self,
        actor: &Principal,
        id: u64,
        request: UpdateProductRequest,
    ) -> ServiceResult<Product> {
        let mut product = match self.products.get(id) {
            Ok(product) => product,
            Err(StorageError::NotFound(_)) => {
                return Err(ServiceError::NotFound("Product not found".into()))
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(name) = request.name.filter(|n| !n.is_empty()) {
            product.name = name;
        }
        if let Some(price) = request.price.filter(|p| *p != 0.0) {
            product.price = price;
        }

        if product.name.is_empty() || product.price <= 0.0 {
            return Err(ServiceError::Validation("all fields are required".to_string()));
        }

        product.updated_at = Utc::now();
        self.products.update(&product).map_err(|e| match e {
            StorageError::NotFound(_) => ServiceError::NotFound("Product not found".into()),
            other => other.into(),
        })?;

        info!(product_id = id, actor = %actor.username, "product updated");
        Ok(product.into())
    }

    pub fn delete(&self, actor: &Principal, id: u64) -> ServiceResult<()> {
        match self.products.delete(id) {
            Ok(()) => {
                info!(product_id = id, actor = %actor.username, "product deleted");
                Ok(())
            }
            Err(StorageError::NotFound(_)) => Err(ServiceError::NotFound(format!(
                "product with id {id} not found"
            ))),
            Err(e) => Err(e.into()),
        }
    }
}
