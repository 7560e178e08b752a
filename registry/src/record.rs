//! Person records as returned by the registry backend.
//!
//! DESIGN
//! ======
//! The backend's responses are informally typed: ids arrive as numbers or
//! strings, phone numbers sometimes as integers, and the same concept can be
//! spelled two ways (`name`/`full_name`, `image_path`/`image_url`). Records
//! keep every spelling as its own optional field and resolve them through
//! accessors, so a payload carrying both spellings still decodes.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Placeholder rendered for absent or blank fields.
pub const NOT_AVAILABLE: &str = "N/A";

/// Person-record subtype. Acts as the discriminator for forms and endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Man,
    Woman,
    Child,
    Disabled,
}

impl Category {
    pub const ALL: [Category; 4] = [Self::Man, Self::Woman, Self::Child, Self::Disabled];

    /// Canonical wire value stored in `form_type`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Man => "man",
            Self::Woman => "woman",
            Self::Child => "child",
            Self::Disabled => "disabled",
        }
    }

    /// Value for the `category` query parameter of `/search`.
    #[must_use]
    pub fn query_value(self) -> &'static str {
        match self {
            Self::Man => "male",
            Self::Woman => "female",
            Self::Child => "child",
            Self::Disabled => "disabled",
        }
    }

    /// Human-readable label for headings and filters.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Man => "Man",
            Self::Woman => "Woman",
            Self::Child => "Child",
            Self::Disabled => "Disabled person",
        }
    }

    /// Parse any of the spellings the backend and routes use.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "man" | "male" | "men" => Some(Self::Man),
            "woman" | "female" | "women" => Some(Self::Woman),
            "child" | "children" => Some(Self::Child),
            "disabled" | "disability" | "disabilities" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown category: {raw}")))
    }
}

/// A registry record. Every field except `id` is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub phone_company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub second_phone_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub guardian_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub guardian_phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub disability_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub medical_condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub last_seen_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    /// Any keys the model does not name explicitly.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PersonRecord {
    /// Resolve the record subtype. An explicit discriminator wins; otherwise
    /// it is inferred from subtype-only fields.
    #[must_use]
    pub fn category(&self) -> Option<Category> {
        let explicit = self
            .form_type
            .as_deref()
            .or(self.category.as_deref())
            .and_then(Category::parse);
        if explicit.is_some() {
            return explicit;
        }
        if non_blank(self.disability_type.as_deref()).is_some() {
            return Some(Category::Disabled);
        }
        if non_blank(self.guardian_name.as_deref()).is_some() {
            return Some(Category::Child);
        }
        None
    }

    /// The best available name, or `N/A`.
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.full_name.as_deref()))
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Name used for sorting; records without a name sort by empty string.
    #[must_use]
    pub fn sort_name(&self) -> String {
        non_blank(self.name.as_deref())
            .or_else(|| non_blank(self.full_name.as_deref()))
            .unwrap_or_default()
            .to_lowercase()
    }

    /// Raw image reference regardless of which key the backend used.
    #[must_use]
    pub fn image_ref(&self) -> Option<&str> {
        non_blank(self.image_path.as_deref()).or_else(|| non_blank(self.image_url.as_deref()))
    }

    /// Resolve the image reference to a URL the browser can load.
    ///
    /// Absolute URLs and `data:` URIs pass through; relative paths are joined
    /// to the origin of `api_base_url` (the `/api` suffix is not part of
    /// static file paths).
    #[must_use]
    pub fn image_src(&self, api_base_url: &str) -> Option<String> {
        let raw = self.image_ref()?;
        if raw.starts_with("http://") || raw.starts_with("https://") || raw.starts_with("data:") {
            return Some(raw.to_owned());
        }
        let origin = origin_of(api_base_url);
        Some(format!("{}/{}", origin, raw.trim_start_matches('/')))
    }

    /// Look up a named or extra field as display text, `N/A` when absent.
    #[must_use]
    pub fn field_or_na(&self, key: &str) -> String {
        self.field(key)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    }

    /// Look up a field by its wire key.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<String> {
        let named = match key {
            "id" => Some(self.id.as_str()),
            "name" => self.name.as_deref(),
            "full_name" => self.full_name.as_deref(),
            "nickname" => self.nickname.as_deref(),
            "national_id" => self.national_id.as_deref(),
            "address" => self.address.as_deref(),
            "phone_number" => self.phone_number.as_deref(),
            "phone_company" => self.phone_company.as_deref(),
            "second_phone_number" => self.second_phone_number.as_deref(),
            "image_path" => self.image_path.as_deref(),
            "image_url" => self.image_url.as_deref(),
            "form_type" => self.form_type.as_deref(),
            "category" => self.category.as_deref(),
            "gender" => self.gender.as_deref(),
            "date_of_birth" => self.date_of_birth.as_deref(),
            "guardian_name" => self.guardian_name.as_deref(),
            "guardian_phone" => self.guardian_phone.as_deref(),
            "disability_type" => self.disability_type.as_deref(),
            "medical_condition" => self.medical_condition.as_deref(),
            "vehicle_model" => self.vehicle_model.as_deref(),
            "license_plate" => self.license_plate.as_deref(),
            "last_seen_location" => self.last_seen_location.as_deref(),
            "created_at" => self.created_at.as_deref(),
            "updated_at" => self.updated_at.as_deref(),
            _ => return self.extra.get(key).and_then(value_to_text),
        };
        named.map(str::to_owned)
    }

    /// Whether the id was generated client-side for an unconfirmed registration.
    #[must_use]
    pub fn is_provisional(&self) -> bool {
        self.id.starts_with("temp-")
    }
}

/// Error returned by [`parse_record_list`] and [`parse_record`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// Parse a list response. Accepts a bare array or an object wrapping the
/// array under `users`, `results`, `data`, or `items`. An empty body is an
/// empty list.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is not JSON or has no recognizable list.
pub fn parse_record_list(body: &str) -> Result<Vec<PersonRecord>, ParseError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(body)?;
    let list = match value {
        Value::Array(items) => items,
        Value::Null => return Ok(Vec::new()),
        Value::Object(mut map) => {
            let key = ["users", "results", "data", "items"]
                .into_iter()
                .find(|key| map.get(*key).is_some_and(Value::is_array))
                .ok_or_else(|| ParseError::Shape("object without a record list".to_owned()))?;
            match map.remove(key) {
                Some(Value::Array(items)) => items,
                _ => return Err(ParseError::Shape(format!("`{key}` is not an array"))),
            }
        }
        other => return Err(ParseError::Shape(format!("expected array, got {other}"))),
    };
    list.into_iter()
        .map(|item| serde_json::from_value(item).map_err(ParseError::from))
        .collect()
}

/// Parse a single-record response. Accepts the record itself or an object
/// wrapping it under `user` or `data`. Returns `Ok(None)` for an empty or
/// `null` body.
///
/// # Errors
///
/// Returns [`ParseError`] if the body is present but cannot be decoded.
pub fn parse_record(body: &str) -> Result<Option<PersonRecord>, ParseError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body)?;
    let record = match value {
        Value::Null => return Ok(None),
        Value::Object(mut map) => {
            if map.contains_key("id") {
                Value::Object(map)
            } else if let Some(inner) = map.remove("user").or_else(|| map.remove("data")) {
                if inner.is_null() {
                    return Ok(None);
                }
                inner
            } else {
                return Err(ParseError::Shape("record without `id`".to_owned()));
            }
        }
        other => return Err(ParseError::Shape(format!("expected object, got {other}"))),
    };
    Ok(Some(serde_json::from_value(record)?))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "Yes" } else { "No" }.to_owned()),
        other => Some(other.to_string()),
    }
}

fn origin_of(api_base_url: &str) -> &str {
    let trimmed = api_base_url.trim_end_matches('/');
    let scheme_end = trimmed.find("://").map_or(0, |idx| idx + 3);
    match trimmed[scheme_end..].find('/') {
        Some(idx) => &trimmed[..scheme_end + idx],
        None => trimmed,
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("expected string or number id, got {other}"))),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    })
}
