use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::db::StoreError;

/// Form field names of a customization submission.
pub mod fields {
    pub const PRODUCT_ID: &str = "productId";
    pub const PRODUCT_TYPE: &str = "productType";
    pub const SELECTED_COLOR: &str = "selectedColor";
    pub const SELECTED_FONT: &str = "selectedFont";
    pub const SELECTED_PICTURE: &str = "selectedPicture";
    pub const CUSTOM_TEXT: &str = "customText";
    pub const INSTRUCTIONS: &str = "instructions";
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const CUSTOMER_PHONE: &str = "customerPhone";
    pub const CUSTOMER_EMAIL: &str = "customerEmail";
}

/// A customization record stored in redb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomizationRecord {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub selected_color: Option<String>,
    #[serde(default)]
    pub selected_font: Option<String>,
    /// Stored attachment file name in the content directory
    #[serde(default)]
    pub selected_picture: Option<String>,
    #[serde(default)]
    pub custom_text: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
}

/// Field values for a record that has not been assigned an identifier yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCustomization {
    pub product_id: Option<i64>,
    pub product_type: Option<String>,
    pub selected_color: Option<String>,
    pub selected_font: Option<String>,
    pub selected_picture: Option<String>,
    pub custom_text: Option<String>,
    pub instructions: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
}

impl NewCustomization {
    /// Build from submitted text fields, coercing each to its schema type.
    ///
    /// Missing fields stay `None`. `selectedPicture` is never read from the
    /// text fields; it is the stored attachment name passed by the caller.
    pub fn from_fields(
        form: &HashMap<String, String>,
        selected_picture: Option<String>,
    ) -> Result<Self, StoreError> {
        let text = |name: &str| form.get(name).cloned();

        Ok(Self {
            product_id: coerce_integer(fields::PRODUCT_ID, form.get(fields::PRODUCT_ID))?,
            product_type: text(fields::PRODUCT_TYPE),
            selected_color: text(fields::SELECTED_COLOR),
            selected_font: text(fields::SELECTED_FONT),
            selected_picture,
            custom_text: text(fields::CUSTOM_TEXT),
            instructions: text(fields::INSTRUCTIONS),
            customer_name: text(fields::CUSTOMER_NAME),
            customer_phone: text(fields::CUSTOMER_PHONE),
            customer_email: text(fields::CUSTOMER_EMAIL),
        })
    }

    pub fn into_record(self, id: String) -> CustomizationRecord {
        CustomizationRecord {
            id,
            product_id: self.product_id,
            product_type: self.product_type,
            selected_color: self.selected_color,
            selected_font: self.selected_font,
            selected_picture: self.selected_picture,
            custom_text: self.custom_text,
            instructions: self.instructions,
            customer_name: self.customer_name,
            customer_phone: self.customer_phone,
            customer_email: self.customer_email,
        }
    }
}

/// Blank input is treated as absent. Integral decimals such as `101.0` are accepted.
fn coerce_integer(field: &str, value: Option<&String>) -> Result<Option<i64>, StoreError> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if let Ok(n) = trimmed.parse::<i64>() {
        return Ok(Some(n));
    }

    let integral = |f: f64| {
        f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
    };
    match trimmed.parse::<f64>() {
        Ok(f) if integral(f) => Ok(Some(f as i64)),
        _ => Err(StoreError::InvalidField {
            field: field.to_string(),
            expected: "integer",
            value: raw.clone(),
        }),
    }
}
