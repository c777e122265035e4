//! Data model types for Wikibase data values.
//!
//! This module contains the in-memory representation:
//! - Identifiers (`Q42`, `P31`, ...)
//! - Data values (the closed set of value kinds)

pub mod id;
pub mod value;

pub use id::{last_path_segment, EntityId, EntityType};
pub use value::{
    DataValue, DataValueType, GlobeCoordinateValue, MonolingualTextValue, QuantityValue,
    TimePrecision, TimeValue, CALENDAR_GREGORIAN, CALENDAR_JULIAN, GLOBE_EARTH,
};
