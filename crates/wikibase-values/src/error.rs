//! Error types for data value decoding, identifier parsing and validation.

use thiserror::Error;

/// Coarse error categories reported by the decoder.
///
/// Every [`DecodeError`] maps to exactly one code, so callers can branch on
/// the category without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: nothing to decode
    NullPayload,
    /// E002: payload present but not shaped as expected
    ShapeMismatch,
    /// E003: identifier text does not match `<prefix><serial>`
    MalformedIdentifier,
    /// E004: envelope tag is not a known data value type
    UnknownType,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NullPayload => "E001",
            ErrorCode::ShapeMismatch => "E002",
            ErrorCode::MalformedIdentifier => "E003",
            ErrorCode::UnknownType => "E004",
        }
    }
}

/// Reason an entity identifier failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("identifier is empty")]
    Empty,

    #[error("identifier has no letter prefix")]
    MissingPrefix,

    #[error("identifier has no serial number")]
    MissingSerial,

    #[error("unexpected character {char:?} in identifier")]
    InvalidChar { char: char },

    #[error("serial number has a leading zero")]
    LeadingZero,

    #[error("serial number does not fit in 64 bits")]
    SerialOverflow,
}

/// Error during JSON decoding of a data value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Null payload ===
    #[error("[E001] no payload to decode for {context}")]
    NullPayload { context: &'static str },

    // === E002: Shape mismatch ===
    #[error("[E002] expected a JSON object for {context}, found {found}")]
    NotAnObject {
        context: &'static str,
        found: &'static str,
    },

    #[error("[E002] missing required field {field:?}")]
    MissingField { field: &'static str },

    #[error("[E002] field {field:?} must be {expected}, found {found}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("[E002] field {field:?} value {value} is out of range")]
    IntegerOutOfRange { field: &'static str, value: String },

    #[error("[E002] invalid time precision: {value}")]
    InvalidTimePrecision { value: u64 },

    #[error("[E002] unknown entity type: {entity_type:?}")]
    UnknownEntityType { entity_type: String },

    #[error("[E002] field {field:?} is not a sign-prefixed decimal: {text:?}")]
    InvalidDecimal { field: &'static str, text: String },

    // === E003: Malformed identifier ===
    #[error("[E003] malformed identifier {text:?} in {field}: {reason}")]
    MalformedIdentifier {
        field: &'static str,
        text: String,
        reason: IdError,
    },

    // === E004: Unknown type ===
    #[error("[E004] unknown data value type: {tag:?}")]
    UnknownType { tag: String },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::NullPayload { .. } => ErrorCode::NullPayload,
            DecodeError::MalformedIdentifier { .. } => ErrorCode::MalformedIdentifier,
            DecodeError::UnknownType { .. } => ErrorCode::UnknownType,
            _ => ErrorCode::ShapeMismatch,
        }
    }
}

/// Error during caller-side validation or checked construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} is not a sign-prefixed decimal: {text:?}")]
    InvalidDecimal { field: &'static str, text: String },

    #[error("quantity bounds out of order: {lower} <= {amount} <= {upper} does not hold")]
    BoundsOutOfOrder {
        lower: String,
        amount: String,
        upper: String,
    },

    #[error("{field} must be finite")]
    NonFinite { field: &'static str },

    #[error("latitude {lat} out of range [-90, +90]")]
    LatitudeOutOfRange { lat: f64 },

    #[error("longitude {lon} out of range [-180, +180]")]
    LongitudeOutOfRange { lon: f64 },

    #[error("coordinate precision {precision} must be positive")]
    NonPositivePrecision { precision: f64 },

    #[error("monolingual text has an empty language code")]
    EmptyLanguage,

    #[error("time {time:?} does not start with a sign")]
    UnsignedTime { time: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ErrorCode::NullPayload.code(),
            ErrorCode::ShapeMismatch.code(),
            ErrorCode::MalformedIdentifier.code(),
            ErrorCode::UnknownType.code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_shape_errors_share_a_code() {
        let errors = [
            DecodeError::NotAnObject { context: "quantity", found: "array" },
            DecodeError::MissingField { field: "amount" },
            DecodeError::InvalidFieldType { field: "unit", expected: "a string", found: "number" },
            DecodeError::InvalidTimePrecision { value: 15 },
        ];
        for err in errors {
            assert_eq!(err.code(), ErrorCode::ShapeMismatch);
        }
    }

    #[test]
    fn test_message_carries_code() {
        let err = DecodeError::MalformedIdentifier {
            field: "unit",
            text: "Q!!".to_string(),
            reason: IdError::MissingSerial,
        };
        assert!(err.to_string().starts_with("[E003]"));
        assert_eq!(err.code().code(), "E003");
    }
}
