//! Shared test helpers for customization-service tests.

use std::sync::Arc;

use crate::config::{Config, ServerConfig, StorageConfig};
use crate::storage::Database;
use crate::uploads::UploadDir;
use crate::AppState;

const BOUNDARY: &str = "customization-test-boundary";

/// Create a test AppState with a temporary database and content directory.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = test_config(temp_dir);
    let db = Database::connect(&config.storage.database_url)
        .expect("Failed to open test database");
    let uploads =
        UploadDir::new(&config.storage.upload_dir).expect("Failed to create test upload dir");

    Arc::new(AppState {
        config,
        db: Some(db),
        uploads,
    })
}

/// Like [`test_state`], but as if the database had been unreachable at startup.
pub fn test_state_without_db(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    let config = test_config(temp_dir);
    let uploads =
        UploadDir::new(&config.storage.upload_dir).expect("Failed to create test upload dir");

    Arc::new(AppState {
        config,
        db: None,
        uploads,
    })
}

fn test_config(temp_dir: &tempfile::TempDir) -> Config {
    let db_path = temp_dir.path().join("data").join("customizations.redb");
    let upload_dir = temp_dir.path().join("uploads");

    Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            public_base_url: "http://localhost:8000".to_string(),
        },
        storage: StorageConfig {
            database_url: format!("redb://{}", db_path.display()),
            upload_dir: upload_dir.to_string_lossy().to_string(),
        },
        max_upload_size: None,
    }
}

/// One part of a hand-built multipart/form-data body.
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl MultipartPart {
    pub fn text(name: &str, value: &str) -> Self {
        MultipartPart::Text {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn file(name: &str, file_name: &str, content_type: &str, data: Vec<u8>) -> Self {
        MultipartPart::File {
            name: name.to_string(),
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data,
        }
    }
}

/// Encode `parts` as a multipart body. Returns the Content-Type header value and the body.
pub fn multipart_body(parts: &[MultipartPart]) -> (String, Vec<u8>) {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            MultipartPart::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            MultipartPart::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
