//! Payload validation against the content type registry.
//!
//! Request bodies are arbitrary JSON; nothing reaches the database without
//! passing through here. Unknown fields are rejected rather than spread
//! blindly into the document.

use serde_json::{Map, Value};
use thiserror::Error;

use super::registry::{ContentTypeDef, FieldKind, FieldSpec};

/// Fields owned by the write path; clients may never supply them.
const SYSTEM_FIELDS: &[&str] = &["_id", "createdAt", "updatedAt"];

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Expected a JSON object")]
    NotAnObject,

    #[error("Field '{0}' is set by the server and cannot be supplied")]
    SystemField(String),

    #[error("Field '{0}' is not allowed for this content type")]
    UnknownField(String),

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("Field '{field}' must be {expected}")]
    WrongType {
        field: String,
        expected: &'static str,
    },

    #[error("Field '{field}' must be one of: {allowed}")]
    InvalidEnumValue { field: String, allowed: String },

    #[error("Field '{0}' must be a media object with a 'url' string")]
    InvalidMedia(String),
}

/// A payload that passed validation, split into the common columns and the
/// type-specific field map.
#[derive(Debug, Default)]
pub struct ValidatedDoc {
    pub order: Option<i32>,
    pub is_active: Option<bool>,
    pub fields: Map<String, Value>,
}

/// Validate a create payload: system fields rejected, required fields
/// enforced.
pub fn validate_create(
    def: &ContentTypeDef,
    payload: &Value,
) -> Result<ValidatedDoc, ValidationError> {
    let doc = validate_payload(def, payload, true)?;

    for spec in def.fields.iter().filter(|f| f.required) {
        match doc.fields.get(spec.name) {
            Some(v) if !v.is_null() => {}
            _ => return Err(ValidationError::MissingRequiredField(spec.name)),
        }
    }

    Ok(doc)
}

/// Validate an update payload: partial, required-ness not enforced, system
/// fields silently dropped (PUT bodies carry `_id` by contract).
pub fn validate_update(
    def: &ContentTypeDef,
    payload: &Value,
) -> Result<ValidatedDoc, ValidationError> {
    validate_payload(def, payload, false)
}

fn validate_payload(
    def: &ContentTypeDef,
    payload: &Value,
    reject_system: bool,
) -> Result<ValidatedDoc, ValidationError> {
    let map = payload.as_object().ok_or(ValidationError::NotAnObject)?;
    let mut doc = ValidatedDoc::default();

    for (key, value) in map {
        if SYSTEM_FIELDS.contains(&key.as_str()) {
            if reject_system {
                return Err(ValidationError::SystemField(key.clone()));
            }
            continue;
        }

        match key.as_str() {
            "order" => {
                let n = value
                    .as_i64()
                    .and_then(|n| i32::try_from(n).ok())
                    .ok_or_else(|| ValidationError::WrongType {
                        field: key.clone(),
                        expected: "an integer",
                    })?;
                doc.order = Some(n);
            }
            "isActive" => {
                let b = value.as_bool().ok_or_else(|| ValidationError::WrongType {
                    field: key.clone(),
                    expected: "a boolean",
                })?;
                doc.is_active = Some(b);
            }
            _ => {
                let spec = def
                    .field(key)
                    .ok_or_else(|| ValidationError::UnknownField(key.clone()))?;
                if !value.is_null() {
                    check_field_value(spec, value)?;
                }
                doc.fields.insert(key.clone(), value.clone());
            }
        }
    }

    Ok(doc)
}

fn check_field_value(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    match spec.kind {
        FieldKind::Text => {
            if !value.is_string() {
                return Err(wrong_type(spec, "a string"));
            }
        }
        FieldKind::Integer => {
            if value.as_i64().is_none() {
                return Err(wrong_type(spec, "an integer"));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                return Err(wrong_type(spec, "a boolean"));
            }
        }
        FieldKind::Media => check_media(spec, value)?,
        FieldKind::Enum(allowed) => {
            let ok = value
                .as_str()
                .map(|s| allowed.contains(&s))
                .unwrap_or(false);
            if !ok {
                return Err(ValidationError::InvalidEnumValue {
                    field: spec.name.to_string(),
                    allowed: allowed.join(", "),
                });
            }
        }
    }
    Ok(())
}

fn check_media(spec: &FieldSpec, value: &Value) -> Result<(), ValidationError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ValidationError::InvalidMedia(spec.name.to_string()))?;

    match obj.get("url") {
        Some(Value::String(url)) if !url.is_empty() => {}
        _ => return Err(ValidationError::InvalidMedia(spec.name.to_string())),
    }

    for (key, v) in obj {
        match key.as_str() {
            "url" => {}
            "alt" => {
                if !v.is_string() && !v.is_null() {
                    return Err(ValidationError::InvalidMedia(spec.name.to_string()));
                }
            }
            _ => return Err(ValidationError::InvalidMedia(spec.name.to_string())),
        }
    }

    Ok(())
}

fn wrong_type(spec: &FieldSpec, expected: &'static str) -> ValidationError {
    ValidationError::WrongType {
        field: spec.name.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::registry::lookup;
    use serde_json::json;

    fn partners() -> &'static ContentTypeDef {
        lookup("partners").unwrap()
    }

    #[test]
    fn valid_partner_create() {
        let payload = json!({
            "name": "Acme",
            "category": "strategic",
            "logo": {"url": "https://cdn.example.com/acme.png", "alt": "Acme"},
            "order": 1,
            "isActive": true
        });
        let doc = validate_create(partners(), &payload).unwrap();
        assert_eq!(doc.order, Some(1));
        assert_eq!(doc.is_active, Some(true));
        assert_eq!(doc.fields.get("name"), Some(&json!("Acme")));
        assert!(doc.fields.get("order").is_none());
    }

    #[test]
    fn unknown_field_rejected() {
        let payload = json!({"name": "Acme", "category": "strategic",
            "logo": {"url": "x"}, "sponsorTier": "gold"});
        let err = validate_create(partners(), &payload).unwrap_err();
        assert!(matches!(err, ValidationError::UnknownField(f) if f == "sponsorTier"));
    }

    #[test]
    fn missing_required_field_rejected() {
        let payload = json!({"name": "Acme", "category": "strategic"});
        let err = validate_create(partners(), &payload).unwrap_err();
        assert!(matches!(err, ValidationError::MissingRequiredField("logo")));
    }

    #[test]
    fn enum_domain_enforced() {
        let payload = json!({"name": "Acme", "category": "platinum", "logo": {"url": "x"}});
        let err = validate_create(partners(), &payload).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidEnumValue { .. }));
    }

    #[test]
    fn media_requires_url() {
        let payload = json!({"name": "Acme", "category": "media", "logo": {"alt": "Acme"}});
        let err = validate_create(partners(), &payload).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidMedia(f) if f == "logo"));
    }

    #[test]
    fn create_rejects_server_owned_fields() {
        let payload = json!({"name": "Acme", "category": "media",
            "logo": {"url": "x"}, "createdAt": "2024-01-01T00:00:00Z"});
        let err = validate_create(partners(), &payload).unwrap_err();
        assert!(matches!(err, ValidationError::SystemField(f) if f == "createdAt"));
    }

    #[test]
    fn update_strips_server_owned_fields() {
        let payload = json!({"_id": "abc", "createdAt": "x", "website": "https://acme.example"});
        let doc = validate_update(partners(), &payload).unwrap();
        assert!(doc.fields.get("_id").is_none());
        assert!(doc.fields.get("createdAt").is_none());
        assert_eq!(doc.fields.get("website"), Some(&json!("https://acme.example")));
    }

    #[test]
    fn update_is_partial() {
        // No required-ness on updates
        let doc = validate_update(partners(), &json!({"website": "https://acme.example"})).unwrap();
        assert_eq!(doc.fields.len(), 1);
    }

    #[test]
    fn null_clears_optional_field() {
        let doc = validate_update(partners(), &json!({"website": null})).unwrap();
        assert_eq!(doc.fields.get("website"), Some(&Value::Null));
    }

    #[test]
    fn order_must_be_integer() {
        let err = validate_update(partners(), &json!({"order": "first"})).unwrap_err();
        assert!(matches!(err, ValidationError::WrongType { .. }));
    }

    #[test]
    fn non_object_payload_rejected() {
        let err = validate_create(partners(), &json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject));
    }
}
