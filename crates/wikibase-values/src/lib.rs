//! Typed data values for Wikibase knowledge bases and their JSON codec.
//!
//! Statements in a Wikibase (such as Wikidata) carry data values: strings,
//! entity references, quantities, points in time, coordinates. The web API
//! transmits them as JSON envelopes tagged with a type. This crate converts
//! between that JSON and a closed set of Rust types.
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use wikibase_values::{decode_quantity, encode_quantity, EntityId, QuantityValue};
//!
//! let payload = json!({
//!     "amount": "+10",
//!     "unit": "http://www.wikidata.org/entity/Q11573",
//!     "upperBound": "+10",
//!     "lowerBound": "+9"
//! });
//!
//! let quantity = decode_quantity(Some(&payload)).unwrap();
//! assert_eq!(quantity.unit(), Some(&EntityId::parse("Q11573").unwrap()));
//!
//! // Units are always written back in their compact form.
//! assert_eq!(encode_quantity(&quantity)["unit"], "Q11573");
//!
//! // Exact integer quantities carry an explicit sign.
//! assert_eq!(QuantityValue::from_integer(0).amount(), "+0");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Data value types and entity identifiers
//! - [`codec`]: JSON encoding/decoding and type dispatch
//! - [`validate`]: Opt-in semantic checks (decimal grammar, bounds, ranges)
//! - [`error`]: Error types
//!
//! # Numbers as text
//!
//! Quantity amounts and bounds are kept as the sign-prefixed decimal text
//! the API sends (`"+1.50"`), never converted to floating point. Decoding
//! stores them verbatim and encoding writes them back unchanged.

pub mod codec;
pub mod error;
pub mod model;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{
    decode_data_value, decode_data_value_with_options, decode_data_value_with_type,
    decode_quantity, decode_quantity_with_options, encode_data_value, encode_quantity,
    DecodeOptions,
};
pub use error::{DecodeError, ErrorCode, IdError, ValidationError};
pub use model::{
    DataValue, DataValueType, EntityId, EntityType, GlobeCoordinateValue, MonolingualTextValue,
    QuantityValue, TimePrecision, TimeValue,
};
pub use validate::{validate_data_value, validate_quantity};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
