//! Field-level access to JSON payloads.
//!
//! The codec only needs a narrow slice of a JSON document model: treat a
//! value as an object, look up a field by name, and coerce it to a string
//! or number. [`Reader`] and [`Writer`] provide exactly that on top of
//! `serde_json`, turning every shape problem into a [`DecodeError`].

use serde_json::{Map, Number, Value};

use crate::error::DecodeError;

/// Describes the JSON kind of a value for error messages.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rejects an absent or JSON `null` payload.
pub fn require_payload<'a>(
    payload: Option<&'a Value>,
    context: &'static str,
) -> Result<&'a Value, DecodeError> {
    match payload {
        None | Some(Value::Null) => Err(DecodeError::NullPayload { context }),
        Some(value) => Ok(value),
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader over the fields of a JSON object payload.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    object: &'a Map<String, Value>,
}

impl<'a> Reader<'a> {
    /// Creates a reader, checking that the payload is present and an object.
    pub fn new(payload: Option<&'a Value>, context: &'static str) -> Result<Self, DecodeError> {
        match require_payload(payload, context)? {
            Value::Object(object) => Ok(Self { object }),
            other => Err(DecodeError::NotAnObject {
                context,
                found: json_kind(other),
            }),
        }
    }

    /// Returns the raw field, treating JSON `null` as absent.
    pub fn field(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field).filter(|v| !v.is_null())
    }

    /// Returns the raw field, failing if it is missing. A present `null` is
    /// returned as is.
    pub fn require_field(&self, field: &'static str) -> Result<&'a Value, DecodeError> {
        self.object
            .get(field)
            .ok_or(DecodeError::MissingField { field })
    }

    /// Reads a required string field.
    pub fn read_str(&self, field: &'static str) -> Result<&'a str, DecodeError> {
        match self.object.get(field) {
            None => Err(DecodeError::MissingField { field }),
            Some(value) => as_str(value, field),
        }
    }

    /// Reads an optional string field; missing and `null` are `None`.
    pub fn read_opt_str(&self, field: &'static str) -> Result<Option<&'a str>, DecodeError> {
        self.field(field).map(|v| as_str(v, field)).transpose()
    }

    /// Reads a required number field as `f64`.
    pub fn read_f64(&self, field: &'static str) -> Result<f64, DecodeError> {
        match self.object.get(field) {
            None => Err(DecodeError::MissingField { field }),
            Some(value) => as_f64(value, field),
        }
    }

    /// Reads an optional number field; missing and `null` are `None`.
    pub fn read_opt_f64(&self, field: &'static str) -> Result<Option<f64>, DecodeError> {
        self.field(field).map(|v| as_f64(v, field)).transpose()
    }

    /// Reads a required non-negative integer field.
    pub fn read_u64(&self, field: &'static str) -> Result<u64, DecodeError> {
        let n = self.read_integer(field)?;
        n.as_u64().ok_or_else(|| DecodeError::IntegerOutOfRange {
            field,
            value: n.to_string(),
        })
    }

    /// Reads a required signed integer field.
    pub fn read_i64(&self, field: &'static str) -> Result<i64, DecodeError> {
        let n = self.read_integer(field)?;
        n.as_i64().ok_or_else(|| DecodeError::IntegerOutOfRange {
            field,
            value: n.to_string(),
        })
    }

    fn read_integer(&self, field: &'static str) -> Result<&'a Number, DecodeError> {
        match self.object.get(field) {
            None => Err(DecodeError::MissingField { field }),
            Some(Value::Number(n)) if !n.is_f64() => Ok(n),
            Some(Value::Number(_)) => Err(DecodeError::InvalidFieldType {
                field,
                expected: "an integer",
                found: "a fractional number",
            }),
            Some(other) => Err(DecodeError::InvalidFieldType {
                field,
                expected: "an integer",
                found: json_kind(other),
            }),
        }
    }
}

/// Coerces a value to a string slice.
pub fn as_str<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, DecodeError> {
    value.as_str().ok_or(DecodeError::InvalidFieldType {
        field,
        expected: "a string",
        found: json_kind(value),
    })
}

fn as_f64(value: &Value, field: &'static str) -> Result<f64, DecodeError> {
    value.as_f64().ok_or(DecodeError::InvalidFieldType {
        field,
        expected: "a number",
        found: json_kind(value),
    })
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer that builds a JSON object payload.
///
/// Fields are emitted in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    object: Map<String, Value>,
}

impl Writer {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a string field.
    pub fn write_str(&mut self, field: &str, value: &str) -> &mut Self {
        self.object.insert(field.to_string(), Value::String(value.to_string()));
        self
    }

    /// Writes a number field. Non-finite values become `null`.
    pub fn write_f64(&mut self, field: &str, value: f64) -> &mut Self {
        self.object.insert(field.to_string(), Value::from(value));
        self
    }

    /// Writes a nullable number field.
    pub fn write_opt_f64(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        let value = value.map_or(Value::Null, Value::from);
        self.object.insert(field.to_string(), value);
        self
    }

    /// Writes an unsigned integer field.
    pub fn write_u64(&mut self, field: &str, value: u64) -> &mut Self {
        self.object.insert(field.to_string(), Value::from(value));
        self
    }

    /// Writes a signed integer field.
    pub fn write_i64(&mut self, field: &str, value: i64) -> &mut Self {
        self.object.insert(field.to_string(), Value::from(value));
        self
    }

    /// Writes an arbitrary value.
    pub fn write_value(&mut self, field: &str, value: Value) -> &mut Self {
        self.object.insert(field.to_string(), value);
        self
    }

    /// Returns the finished object.
    pub fn finish(self) -> Value {
        Value::Object(self.object)
    }
}
