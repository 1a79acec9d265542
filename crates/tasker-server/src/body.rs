//! Request body parsing and field-presence rules.
//!
//! A field is present when it exists and is not `null`. An empty string or
//! `false` counts as present.

use serde_json::{Map, Value};

use crate::errors::ApiError;

pub type JsonObject = Map<String, Value>;

/// Parse a request body as a JSON object. An empty body is an empty object.
pub fn parse_object(bytes: &[u8]) -> Result<JsonObject, ApiError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(JsonObject::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(ApiError::BadRequest("Request body must be a JSON object.".into())),
        Err(e) => Err(ApiError::BadRequest(format!("Malformed JSON body: {e}"))),
    }
}

pub fn is_present(body: &JsonObject, field: &str) -> bool {
    body.get(field).is_some_and(|v| !v.is_null())
}

pub fn all_present(body: &JsonObject, fields: &[&str]) -> bool {
    fields.iter().all(|f| is_present(body, f))
}

/// `name` must be a string once presence has been checked.
pub fn name_field(body: &JsonObject) -> Result<String, ApiError> {
    match body.get("name") {
        Some(Value::String(name)) => Ok(name.clone()),
        _ => Err(ApiError::BadRequest("Field 'name' must be a string.".into())),
    }
}

/// Coerce `completed` the way the store's 0/1 encoding was always fed:
/// `false`, `0` and `""` are false, anything else present is true.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
