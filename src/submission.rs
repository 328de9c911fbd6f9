//! Parsed customization submissions, independent of the HTTP framework.

use std::collections::HashMap;

use bytes::Bytes;

/// A binary file sent along with a submission.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Form field the file was sent under
    pub field_name: String,
    /// File name as given by the client
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

/// Text fields plus any files of one submission.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub fields: HashMap<String, String>,
    pub attachments: Vec<Attachment>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every attachment sent under `field_name`.
    pub fn take_attachments(&mut self, field_name: &str) -> Vec<Attachment> {
        let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.attachments)
            .into_iter()
            .partition(|a| a.field_name == field_name);
        self.attachments = kept;
        taken
    }
}
