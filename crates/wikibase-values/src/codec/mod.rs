//! JSON encoding/decoding for Wikibase data values.
//!
//! This module implements the wire format used by the Wikibase API.

pub mod primitives;
pub mod value;

pub use primitives::{Reader, Writer};
pub use value::{
    decode_data_value, decode_data_value_with_options, decode_data_value_with_type,
    decode_quantity, decode_quantity_with_options, decode_typed_value, encode_data_value,
    encode_payload, encode_quantity, resolve_tag, DecodeOptions,
};
