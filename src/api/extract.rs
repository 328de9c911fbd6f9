use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::{Form, Json};
use serde_json::Value;

use crate::api::response::{ApiError, FormError};
use crate::submission::{Attachment, Submission};

/// Extracts a [`Submission`] from a multipart, urlencoded or JSON body.
///
/// Requests with any other content type yield an empty submission.
pub struct SubmissionForm(pub Submission);

#[axum::async_trait]
impl<S> FromRequest<S> for SubmissionForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();

        let submission = if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| FormError::Multipart(e.body_text()))?;
            read_multipart(multipart).await?
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| FormError::Form(e.body_text()))?;
            Submission {
                fields,
                attachments: Vec::new(),
            }
        } else if content_type.starts_with("application/json") {
            let Json(object) = Json::<serde_json::Map<String, Value>>::from_request(req, state)
                .await
                .map_err(|e| FormError::Json(e.body_text()))?;
            from_json(object)?
        } else {
            Submission::new()
        };

        Ok(SubmissionForm(submission))
    }
}

/// Parts with a file name become attachments, everything else a text field.
///
/// A file part with an empty file name is an unfilled file input and is skipped.
async fn read_multipart(mut multipart: Multipart) -> Result<Submission, FormError> {
    let mut submission = Submission::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FormError::Multipart(e.body_text()))?
    {
        let field_name = field.name().unwrap_or("").to_string();

        match field.file_name().map(|s| s.to_string()) {
            Some(file_name) if file_name.is_empty() => {}
            Some(file_name) => {
                let content_type = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| FormError::Multipart(format!("Failed to read file: {e}")))?;

                submission.attachments.push(Attachment {
                    field_name,
                    file_name,
                    content_type,
                    data,
                });
            }
            None => {
                let value = field.text().await.map_err(|e| {
                    FormError::Multipart(format!("Invalid value for {field_name}: {e}"))
                })?;
                submission.fields.insert(field_name, value);
            }
        }
    }

    Ok(submission)
}

fn from_json(object: serde_json::Map<String, Value>) -> Result<Submission, FormError> {
    let mut submission = Submission::new();

    for (name, value) in object {
        let text = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => return Err(FormError::UnsupportedValue(name)),
        };
        submission.fields.insert(name, text);
    }

    Ok(submission)
}
