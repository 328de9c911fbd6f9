//! customization-service - HTTP backend for product customization submissions
//!
//! This crate provides:
//! - Multipart, urlencoded and JSON submission intake with an optional picture upload
//! - redb embedded database for customization records
//! - Static serving of uploaded pictures from the content directory

pub mod api;
pub mod config;
pub mod storage;
pub mod submission;
#[cfg(test)]
pub mod testutil;
pub mod uploads;

use config::Config;
use storage::{Database, StoreError};
use uploads::UploadDir;

/// Shared application state
pub struct AppState {
    pub config: Config,
    /// `None` when the database could not be reached at startup
    pub db: Option<Database>,
    pub uploads: UploadDir,
}

impl AppState {
    /// The connected database, or a connection error for this request.
    pub fn db(&self) -> Result<&Database, StoreError> {
        self.db
            .as_ref()
            .ok_or_else(|| StoreError::Connection("database is not connected".to_string()))
    }
}
