use redb::{Database as RedbDatabase, ReadTransaction, WriteTransaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::tables::*;

/// Scheme prefix accepted by [`Database::connect`].
pub const CONNECTION_SCHEME: &str = "redb://";

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Commit error: {0}")]
    Commit(Box<redb::CommitError>),
    #[error("Database error: {0}")]
    RedbDatabase(Box<redb::DatabaseError>),
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),
    #[error("Storage error: {0}")]
    Storage(Box<redb::StorageError>),
    #[error("Table error: {0}")]
    Table(Box<redb::TableError>),
    #[error("Transaction error: {0}")]
    Transaction(Box<redb::TransactionError>),
}

impl From<redb::CommitError> for DatabaseError {
    fn from(e: redb::CommitError) -> Self {
        DatabaseError::Commit(Box::new(e))
    }
}

impl From<redb::DatabaseError> for DatabaseError {
    fn from(e: redb::DatabaseError) -> Self {
        DatabaseError::RedbDatabase(Box::new(e))
    }
}

impl From<redb::StorageError> for DatabaseError {
    fn from(e: redb::StorageError) -> Self {
        DatabaseError::Storage(Box::new(e))
    }
}

impl From<redb::TableError> for DatabaseError {
    fn from(e: redb::TableError) -> Self {
        DatabaseError::Table(Box::new(e))
    }
}

impl From<redb::TransactionError> for DatabaseError {
    fn from(e: redb::TransactionError) -> Self {
        DatabaseError::Transaction(Box::new(e))
    }
}

/// Failures surfaced by the storage adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),
    #[error("Persistence error: {0}")]
    Persistence(#[from] DatabaseError),
    #[error("Invalid identifier: '{0}'")]
    InvalidIdentifier(String),
    #[error("Cast to {expected} failed for value \"{value}\" at path \"{field}\"")]
    InvalidField {
        field: String,
        expected: &'static str,
        value: String,
    },
}

pub struct Database {
    db: Arc<RedbDatabase>,
    path: PathBuf,
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            path: self.path.clone(),
        }
    }
}

impl Database {
    /// Connect using a `redb://<path>` connection string.
    pub fn connect(connection_string: &str) -> Result<Self, StoreError> {
        let path = parse_connection_string(connection_string)?;
        Self::open(&path).map_err(|e| {
            StoreError::Connection(format!("cannot open database at {}: {e}", path.display()))
        })
    }

    /// Open or create the database file at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, DatabaseError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Arc::new(RedbDatabase::create(&path)?);

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(CUSTOMIZATIONS)?;
        }
        write_txn.commit()?;

        Ok(Self { db, path })
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Begin a read transaction
    pub fn begin_read(&self) -> Result<ReadTransaction, DatabaseError> {
        Ok(self.db.begin_read()?)
    }

    /// Begin a write transaction
    pub fn begin_write(&self) -> Result<WriteTransaction, DatabaseError> {
        Ok(self.db.begin_write()?)
    }
}

fn parse_connection_string(connection_string: &str) -> Result<PathBuf, StoreError> {
    let trimmed = connection_string.trim();
    let path = trimmed.strip_prefix(CONNECTION_SCHEME).ok_or_else(|| {
        StoreError::Connection(format!(
            "malformed connection string '{trimmed}': expected {CONNECTION_SCHEME}<path>"
        ))
    })?;

    if path.is_empty() {
        return Err(StoreError::Connection(format!(
            "malformed connection string '{trimmed}': missing database path"
        )));
    }

    Ok(PathBuf::from(path))
}
