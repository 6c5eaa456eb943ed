// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `users`: user id → serialized StoredUser
//! - `usernames`: username → user id (uniqueness index)
//! - `products`: product id → serialized StoredProduct
//! - `sequences`: sequence name → last allocated id

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition, WriteTransaction};

// =============================================================================
// Table Definitions
// =============================================================================

/// Primary table: user id → serialized StoredUser (JSON bytes).
pub(crate) const USERS: TableDefinition<u64, &[u8]> = TableDefinition::new("users");

/// Index: username → user id.
pub(crate) const USERNAMES: TableDefinition<&str, u64> = TableDefinition::new("usernames");

/// Primary table: product id → serialized StoredProduct (JSON bytes).
pub(crate) const PRODUCTS: TableDefinition<u64, &[u8]> = TableDefinition::new("products");

/// Id allocation: sequence name → last id handed out.
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Tables disagree with each other (e.g. index points at a missing row)
    #[error("inconsistent data: {0}")]
    Corrupt(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// AppDatabase
// =============================================================================

/// Handle to the service database.
pub struct AppDatabase {
    db: Database,
}

impl AppDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS)?;
            let _ = write_txn.open_table(USERNAMES)?;
            let _ = write_txn.open_table(PRODUCTS)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        tracing::info!(path = %path.display(), "database opened");

        Ok(Self { db })
    }

    /// Check that the database can serve reads.
    pub fn ping(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(SEQUENCES)?;
        Ok(())
    }

    pub(crate) fn inner(&self) -> &Database {
        &self.db
    }
}

/// Allocate the next id of `sequence` inside an open write transaction.
///
/// Ids start at 1 and are never reused, even after deletes.
pub(crate) fn next_id(write_txn: &WriteTransaction, sequence: &str) -> StorageResult<u64> {
    let mut table = write_txn.open_table(SEQUENCES)?;
    let next = table.get(sequence)?.map(|last| last.value()).unwrap_or(0) + 1;
    table.insert(sequence, next)?;
    Ok(next)
}
