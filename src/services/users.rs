// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User accounts and login.

use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::{
    auth::{self, TokenCodec},
    models::{CreateUserRequest, UpdateUserRequest, User},
    storage::{AppDatabase, NewUser, StorageError, UserRepository},
};

const ALL_FIELDS_REQUIRED: &str = "all fields are required";

pub struct UserService<'a> {
    users: UserRepository<'a>,
    tokens: &'a TokenCodec,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a AppDatabase, tokens: &'a TokenCodec) -> Self {
        Self {
            users: UserRepository::new(db),
            tokens,
        }
    }

    /// Check credentials and return a fresh bearer token.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<String> {
        Ok(auth::login(&self.users, self.tokens, username, password)?)
    }

    pub fn register(&self, request: CreateUserRequest) -> ServiceResult<User> {
        if [
            &request.name,
            &request.email,
            &request.username,
            &request.password,
        ]
        .iter()
        .any(|field| field.is_empty())
        {
            return Err(ServiceError::Validation(ALL_FIELDS_REQUIRED.to_string()));
        }

        let stored = self
            .users
            .create(NewUser {
                name: request.name,
                email: request.email,
                username: request.username,
                password: request.password,
            })
            .map_err(|e| match e {
                StorageError::AlreadyExists(_) => {
                    ServiceError::Conflict("username already registered".to_string())
                }
                other => other.into(),
            })?;

        info!(user_id = stored.id, username = %stored.username, "user registered");
        Ok(stored.into())
    }

    pub fn get(&self, id: u64) -> ServiceResult<User> {
        match self.users.get(id) {
            Ok(user) => Ok(user.into()),
            Err(StorageError::NotFound(_)) => Err(ServiceError::NotFound("User not found".into())),
            Err(e) => Err(e.into()),
        }
    }

    pub fn list(&self) -> ServiceResult<Vec<User>> {
        Ok(self.users.list()?.into_iter().map(User::from).collect())
    }

    pub fn update(&self, id: u64, request: UpdateUserRequest) -> ServiceResult<User> {
        if [
            &request.name,
            &request.email,
            &request.username,
            &request.password,
        ]
        .iter()
        .any(|field| field.is_empty())
        {
            return Err(ServiceError::Validation(ALL_FIELDS_REQUIRED.to_string()));
        }

        let mut user = match self.users.get(id) {
            Ok(user) => user,
            Err(StorageError::NotFound(_)) => {
                return Err(ServiceError::NotFound("user not found".into()))
            }
            Err(e) => return Err(e.into()),
        };

        user.name = request.name;
        user.email = request.email;
        user.username = request.username;
        user.password = request.password;

        self.users.update(&user).map_err(|e| match e {
            StorageError::AlreadyExists(_) => {
                ServiceError::Conflict("username already registered".to_string())
            }
            StorageError::NotFound(_) => ServiceError::NotFound("user not found".into()),
            other => other.into(),
        })?;

        info!(user_id = id, "user updated");
        Ok(user.into())
    }

    pub fn delete(&self, id: u64) -> ServiceResult<()> {
        match self.users.delete(id) {
            Ok(()) => {
                info!(user_id = id, "user deleted");
                Ok(())
            }
            Err(StorageError::NotFound(_)) => Err(ServiceError::NotFound("User not found".into())),
            Err(e) => Err(e.into()),
        }
    }
}
