//! Multipart payload assembly for registration submissions.
//!
//! The backend reads plain form fields and, for some categories, a duplicated
//! JSON blob of the same draft. Booleans travel as `"1"`/`"0"`; dates and free
//! text are sent as typed.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::record::Category;
use crate::wizard::{FieldKind, FieldValue, FormDraft, WizardSchema};

/// Form fields the backend schema rejects; never sent.
pub const PROBLEMATIC_FIELDS: &[&str] = &["travel_date", "travel_destination", "arrest_date", "guardian_id"];

/// Key of the duplicated JSON copy of the draft.
pub const JSON_BLOB_FIELD: &str = "form_data";

/// Multipart key of the photo part.
pub const PHOTO_FIELD: &str = "file";

pub const MAX_PHOTO_BYTES: u64 = 5 * 1024 * 1024;
pub const ACCEPTED_PHOTO_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Metadata of an attached photo. The bytes stay with the caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUpload {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PhotoError {
    #[error("Please choose a JPEG, PNG, or WebP image (got {0})")]
    UnsupportedType(String),
    #[error("Image is too large ({size_bytes} bytes, max {max_bytes})")]
    TooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("Image file is empty")]
    Empty,
}

/// Check a photo's type and size before it is attached to a form.
///
/// # Errors
///
/// Returns a [`PhotoError`] describing the first rule the photo breaks.
pub fn validate_photo(photo: &PhotoUpload) -> Result<(), PhotoError> {
    let content_type = photo.content_type.to_ascii_lowercase();
    if !ACCEPTED_PHOTO_TYPES.contains(&content_type.as_str()) {
        return Err(PhotoError::UnsupportedType(photo.content_type.clone()));
    }
    if photo.size_bytes == 0 {
        return Err(PhotoError::Empty);
    }
    if photo.size_bytes > MAX_PHOTO_BYTES {
        return Err(PhotoError::TooLarge { size_bytes: photo.size_bytes, max_bytes: MAX_PHOTO_BYTES });
    }
    Ok(())
}

/// Text parts of a multipart registration body, in submission order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormPayload {
    pub fields: Vec<(String, String)>,
}

impl FormPayload {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == key)
    }

    /// The duplicated JSON blob, parsed back into an object.
    #[must_use]
    pub fn json_blob(&self) -> Option<Map<String, Value>> {
        let raw = self.get(JSON_BLOB_FIELD)?;
        match serde_json::from_str(raw) {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Remove every key in [`PROBLEMATIC_FIELDS`] from the parts and from the
    /// JSON blob.
    pub fn strip_problematic_fields(&mut self) {
        self.fields.retain(|(key, _)| !PROBLEMATIC_FIELDS.contains(&key.as_str()));
        if let Some(mut blob) = self.json_blob() {
            for key in PROBLEMATIC_FIELDS {
                blob.remove(*key);
            }
            let rendered = Value::Object(blob).to_string();
            if let Some(slot) = self.fields.iter_mut().find(|(k, _)| k == JSON_BLOB_FIELD) {
                slot.1 = rendered;
            }
        }
    }

    /// The fields as a flat JSON object, for JSON-bodied endpoints.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let map = self
            .fields
            .iter()
            .filter(|(key, _)| key != JSON_BLOB_FIELD)
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect::<Map<_, _>>();
        Value::Object(map)
    }
}

/// Build the multipart field list for a finished draft.
///
/// Fields follow schema order, then any extra draft keys; `form_type` is
/// always set from the category and the JSON blob comes last.
#[must_use]
pub fn build_payload(schema: &WizardSchema, draft: &FormDraft) -> FormPayload {
    let mut fields = Vec::new();
    let mut blob = Map::new();
    let mut seen = Vec::new();

    for spec in schema.fields() {
        if spec.kind == FieldKind::Photo {
            continue;
        }
        if let Some(value) = draft.get(spec.key) {
            push_value(&mut fields, &mut blob, spec.key, value);
            seen.push(spec.key);
        }
    }
    for (key, value) in draft.iter() {
        if !seen.contains(&key) && key != "form_type" {
            push_value(&mut fields, &mut blob, key, value);
        }
    }

    let form_type = schema.category.as_str();
    fields.push(("form_type".to_owned(), form_type.to_owned()));
    blob.insert("form_type".to_owned(), Value::String(form_type.to_owned()));
    fields.push((JSON_BLOB_FIELD.to_owned(), Value::Object(blob).to_string()));

    FormPayload { fields }
}

fn push_value(fields: &mut Vec<(String, String)>, blob: &mut Map<String, Value>, key: &str, value: &FieldValue) {
    match value {
        FieldValue::Text(text) => {
            let text = text.trim();
            fields.push((key.to_owned(), text.to_owned()));
            blob.insert(key.to_owned(), Value::String(text.to_owned()));
        }
        FieldValue::Flag(flag) => {
            fields.push((key.to_owned(), if *flag { "1" } else { "0" }.to_owned()));
            blob.insert(key.to_owned(), Value::Bool(*flag));
        }
    }
}

/// Stable key identifying "the same registration" for duplicate suppression.
#[must_use]
pub fn submission_key(category: Category, draft: &FormDraft) -> String {
    let name = if draft.text("name").trim().is_empty() { draft.text("full_name") } else { draft.text("name") };
    let phone = if draft.text("phone_number").trim().is_empty() {
        draft.text("guardian_phone")
    } else {
        draft.text("phone_number")
    };
    [category.as_str(), name, draft.text("national_id"), phone]
        .iter()
        .map(|part| part.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join("|")
}
