use bytes::Bytes;
use chrono::Utc;
use std::path::{Path, PathBuf};

use super::UploadError;
use crate::submission::Submission;

/// Content directory holding uploaded attachments.
#[derive(Debug, Clone)]
pub struct UploadDir {
    base_path: PathBuf,
}

impl UploadDir {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, std::io::Error> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn path(&self) -> &Path {
        &self.base_path
    }

    /// Store the single file sent under `field_name`, if any, and return its
    /// generated name (`<unix-millis>-<original-name>`).
    ///
    /// Files sent under any other field are rejected.
    ///
    /// Same-name uploads within one millisecond overwrite each other.
    pub async fn accept_attachment(
        &self,
        submission: &mut Submission,
        field_name: &str,
    ) -> Result<Option<String>, UploadError> {
        let mut attachments = submission.take_attachments(field_name);
        if attachments.len() > 1 {
            return Err(UploadError::UnexpectedFile(field_name.to_string()));
        }
        if let Some(stray) = submission.attachments.first() {
            return Err(UploadError::UnexpectedFile(stray.field_name.clone()));
        }
        let Some(attachment) = attachments.pop() else {
            return Ok(None);
        };

        let file_name = format!(
            "{}-{}",
            Utc::now().timestamp_millis(),
            sanitize_file_name(&attachment.file_name)
        );
        tokio::fs::write(self.base_path.join(&file_name), &attachment.data).await?;

        tracing::debug!(
            file_name = %file_name,
            size = attachment.size(),
            "Stored attachment"
        );
        Ok(Some(file_name))
    }

    /// Read a stored attachment by its generated name.
    pub async fn read(&self, file_name: &str) -> Result<Bytes, UploadError> {
        let path = self
            .resolve(file_name)
            .ok_or_else(|| UploadError::NotFound(file_name.to_string()))?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(UploadError::NotFound(file_name.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Only bare file names resolve; anything that could leave the directory does not.
    fn resolve(&self, file_name: &str) -> Option<PathBuf> {
        if file_name.is_empty()
            || file_name == "."
            || file_name == ".."
            || file_name.contains(['/', '\\', '\0'])
        {
            return None;
        }
        Some(self.base_path.join(file_name))
    }
}

/// Keep only the final path component of a client-supplied file name.
fn sanitize_file_name(original: &str) -> String {
    let name = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .replace('\0', "");

    match name.as_str() {
        "" | "." | ".." => "upload".to_string(),
        _ => name,
    }
}
