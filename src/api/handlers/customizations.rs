use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::extract::SubmissionForm;
use crate::api::response::ApiError;
use crate::storage::models::{CustomizationRecord, NewCustomization};
use crate::uploads::PICTURE_FIELD;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

/// A record as returned by the list endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationResponse {
    #[serde(flatten)]
    pub record: CustomizationRecord,
    pub selected_picture_url: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn create_customization(
    State(state): State<Arc<AppState>>,
    SubmissionForm(mut submission): SubmissionForm,
) -> Result<Json<CustomizationRecord>, ApiError> {
    // A stored picture is not removed if the record write below fails.
    let selected_picture = state
        .uploads
        .accept_attachment(&mut submission, PICTURE_FIELD)
        .await?;

    let new = NewCustomization::from_fields(&submission.fields, selected_picture)?;
    let record = state.db()?.create(new)?;

    tracing::debug!(
        customization_id = %record.id,
        picture = ?record.selected_picture,
        "Created customization"
    );
    Ok(Json(record))
}

pub async fn list_customizations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CustomizationResponse>>, ApiError> {
    let records = state.db()?.list_all()?;

    let items = records
        .into_iter()
        .map(|record| {
            let selected_picture_url = record
                .selected_picture
                .as_deref()
                .map(|name| state.config.attachment_url(name));
            CustomizationResponse {
                record,
                selected_picture_url,
            }
        })
        .collect();

    Ok(Json(items))
}

/// Responds with `null` when no record has the identifier.
pub async fn get_customization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Option<CustomizationRecord>>, ApiError> {
    let record = state.db()?.get_by_id(&id)?;
    Ok(Json(record))
}
