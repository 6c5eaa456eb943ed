// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User repository.
//!
//! Users live in the `users` table keyed by numeric id; the `usernames`
//! table keeps usernames unique and serves login lookups.

use chrono::{DateTime, Utc};
use redb::{ReadableDatabase, ReadableTable};
use serde::{Deserialize, Serialize};

use super::super::database::{next_id, AppDatabase, USERNAMES, USERS};
use super::super::{StorageError, StorageResult};
use crate::auth::{CredentialRecord, CredentialStore};

const USER_SEQUENCE: &str = "users";

/// User record as persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Login secret, stored as supplied at registration
    pub password: String,
    pub created_at: DateTime<Utc>,
}

/// Fields of a user that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Repository for user operations.
pub struct UserRepository<'a> {
    db: &'a AppDatabase,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a AppDatabase) -> Self {
        Self { db }
    }

    /// Insert a user, assigning the next id.
    pub fn create(&self, user: NewUser) -> StorageResult<StoredUser> {
        let write_txn = self.db.inner().begin_write()?;
        let stored = {
            let mut usernames = write_txn.open_table(USERNAMES)?;
            if usernames.get(user.username.as_str())?.is_some() {
                return Err(StorageError::AlreadyExists(format!(
                    "Username {}",
                    user.username
                )));
            }

            let stored = StoredUser {
                id: next_id(&write_txn, USER_SEQUENCE)?,
                name: user.name,
                email: user.email,
                username: user.username,
                password: user.password,
                created_at: Utc::now(),
            };

            let json = serde_json::to_vec(&stored)?;
            let mut users = write_txn.open_table(USERS)?;
            users.insert(stored.id, json.as_slice())?;
            usernames.insert(stored.username.as_str(), stored.id)?;
            stored
        };
        write_txn.commit()?;
        Ok(stored)
    }

    /// Get a user by id.
    pub fn get(&self, id: u64) -> StorageResult<StoredUser> {
        let read_txn = self.db.inner().begin_read()?;
        let users = read_txn.open_table(USERS)?;
        let value = users
            .get(id)?
            .ok_or_else(|| StorageError::NotFound(format!("User {id}")))?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// Get a user by username.
    pub fn get_by_username(&self, username: &str) -> StorageResult<StoredUser> {
        let read_txn = self.db.inner().begin_read()?;
        let usernames = read_txn.open_table(USERNAMES)?;
        let id = usernames
            .get(username)?
            .map(|id| id.value())
            .ok_or_else(|| StorageError::NotFound(format!("User {username}")))?;

        let users = read_txn.open_table(USERS)?;
        let value = users.get(id)?.ok_or_else(|| {
            StorageError::Corrupt(format!("username {username} points at missing user {id}"))
        })?;
        Ok(serde_json::from_slice(value.value())?)
    }

    /// List all users ordered by id.
    pub fn list(&self) -> StorageResult<Vec<StoredUser>> {
        let read_txn = self.db.inner().begin_read()?;
        let users = read_txn.open_table(USERS)?;

        let mut result = Vec::new();
        for entry in users.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }

    /// Replace an existing user, keeping the username index in step.
    pub fn update(&self, user: &StoredUser) -> StorageResult<()> {
        let write_txn = self.db.inner().begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let previous: StoredUser = match users.get(user.id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::NotFound(format!("User {}", user.id))),
            };

            let mut usernames = write_txn.open_table(USERNAMES)?;
            if previous.username != user.username {
                if usernames.get(user.username.as_str())?.is_some() {
                    return Err(StorageError::AlreadyExists(format!(
                        "Username {}",
                        user.username
                    )));
                }
                usernames.remove(previous.username.as_str())?;
                usernames.insert(user.username.as_str(), user.id)?;
            }

            let json = serde_json::to_vec(user)?;
            users.insert(user.id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete a user and its username index entry.
    pub fn delete(&self, id: u64) -> StorageResult<()> {
        let write_txn = self.db.inner().begin_write()?;
        {
            let mut users = write_txn.open_table(USERS)?;
            let removed: StoredUser = match users.remove(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => return Err(StorageError::NotFound(format!("User {id}"))),
            };

            let mut usernames = write_txn.open_table(USERNAMES)?;
            usernames.remove(removed.username.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl CredentialStore for UserRepository<'_> {
    fn get_by_username(&self, username: &str) -> StorageResult<CredentialRecord> {
        let user = UserRepository::get_by_username(self, username)?;
        Ok(CredentialRecord {
            username: user.username,
            secret: user.password,
        })
    }
}
