//! JSON encoding/decoding for data values.
//!
//! A data value travels in an envelope `{"value": <payload>, "type": <tag>}`.
//! Decoding resolves the tag against the closed set of [`DataValueType`]s
//! and hands the payload to that type's decoder. Encoding goes the other
//! way: every variant writes its own payload and the envelope adds the tag.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, trace};

use crate::codec::primitives::{as_str, require_payload, Reader, Writer};
use crate::error::{DecodeError, ValidationError};
use crate::model::{
    last_path_segment, DataValue, DataValueType, EntityId, EntityType, GlobeCoordinateValue,
    MonolingualTextValue, QuantityValue, TimePrecision, TimeValue, GLOBE_EARTH,
};
use crate::validate::is_decimal;

// Envelope
const TYPE: &str = "type";
const VALUE: &str = "value";

// Quantity
const AMOUNT: &str = "amount";
const UNIT: &str = "unit";
const UPPER_BOUND: &str = "upperBound";
const LOWER_BOUND: &str = "lowerBound";

// Entity reference
const ENTITY_TYPE: &str = "entity-type";
const NUMERIC_ID: &str = "numeric-id";
const ID: &str = "id";

// Monolingual text
const TEXT: &str = "text";
const LANGUAGE: &str = "language";

// Globe coordinate
const LATITUDE: &str = "latitude";
const LONGITUDE: &str = "longitude";
const ALTITUDE: &str = "altitude";
const PRECISION: &str = "precision";
const GLOBE: &str = "globe";

// Time
const TIME: &str = "time";
const TIMEZONE: &str = "timezone";
const BEFORE: &str = "before";
const AFTER: &str = "after";
const CALENDAR_MODEL: &str = "calendarmodel";

/// Options for decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject quantities whose amount or bounds are not sign-prefixed
    /// decimals.
    ///
    /// Off by default: the wire format is trusted and the text is stored
    /// verbatim. Turn it on when the payload comes from somewhere other
    /// than the remote API.
    pub strict_decimals: bool,
}

impl DecodeOptions {
    /// Creates default (trusting) decoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates strict decoding options.
    pub fn strict() -> Self {
        Self { strict_decimals: true }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes an enveloped data value `{"value": ..., "type": ...}`.
pub fn decode_data_value(payload: Option<&Value>) -> Result<DataValue, DecodeError> {
    decode_data_value_with_options(payload, DecodeOptions::default())
}

/// Decodes an enveloped data value with the given options.
pub fn decode_data_value_with_options(
    payload: Option<&Value>,
    options: DecodeOptions,
) -> Result<DataValue, DecodeError> {
    let reader = Reader::new(payload, "data value")?;
    let data_type = resolve_tag(reader.read_str(TYPE)?)?;
    let value = reader.require_field(VALUE)?;
    decode_typed_value(data_type, Some(value), options)
}

/// Decodes a flattened payload whose type tag is known from context.
pub fn decode_data_value_with_type(tag: &str, payload: Option<&Value>) -> Result<DataValue, DecodeError> {
    decode_typed_value(resolve_tag(tag)?, payload, DecodeOptions::default())
}

/// Resolves a wire tag to its data value type.
pub fn resolve_tag(tag: &str) -> Result<DataValueType, DecodeError> {
    DataValueType::from_tag(tag).ok_or_else(|| {
        debug!(tag, "unknown data value type");
        DecodeError::UnknownType { tag: tag.to_string() }
    })
}

/// Decodes a payload of a known type.
pub fn decode_typed_value(
    data_type: DataValueType,
    payload: Option<&Value>,
    options: DecodeOptions,
) -> Result<DataValue, DecodeError> {
    trace!(tag = data_type.tag(), "decoding data value");
    match data_type {
        DataValueType::String => decode_string(payload).map(DataValue::String),
        DataValueType::EntityId => decode_entity_id(payload).map(DataValue::EntityId),
        DataValueType::MonolingualText => decode_monolingual_text(payload).map(DataValue::MonolingualText),
        DataValueType::GlobeCoordinate => decode_globe_coordinate(payload).map(DataValue::GlobeCoordinate),
        DataValueType::Quantity => decode_quantity_with_options(payload, options).map(DataValue::Quantity),
        DataValueType::Time => decode_time(payload).map(DataValue::Time),
    }
}

fn decode_string(payload: Option<&Value>) -> Result<String, DecodeError> {
    let value = require_payload(payload, "string")?;
    as_str(value, VALUE).map(str::to_string)
}

/// Decodes a quantity payload.
pub fn decode_quantity(payload: Option<&Value>) -> Result<QuantityValue, DecodeError> {
    decode_quantity_with_options(payload, DecodeOptions::default())
}

/// Decodes a quantity payload with the given options.
pub fn decode_quantity_with_options(
    payload: Option<&Value>,
    options: DecodeOptions,
) -> Result<QuantityValue, DecodeError> {
    let reader = Reader::new(payload, "quantity")?;
    let amount = reader.read_str(AMOUNT)?;
    let unit = decode_unit(reader.read_opt_str(UNIT)?)?;
    let upper_bound = reader.read_str(UPPER_BOUND)?;
    let lower_bound = reader.read_str(LOWER_BOUND)?;

    if options.strict_decimals {
        for (field, text) in [(AMOUNT, amount), (UPPER_BOUND, upper_bound), (LOWER_BOUND, lower_bound)] {
            if !is_decimal(text) {
                return Err(DecodeError::InvalidDecimal {
                    field,
                    text: text.to_string(),
                });
            }
        }
    }

    Ok(QuantityValue::new(amount, upper_bound, lower_bound, unit))
}

/// Decodes the unit text: empty is dimensionless, anything else is an
/// identifier or a URI ending in one.
fn decode_unit(unit: Option<&str>) -> Result<Option<EntityId>, DecodeError> {
    match unit {
        None | Some("") => Ok(None),
        Some(text) => EntityId::from_uri(text)
            .map(Some)
            .map_err(|reason| DecodeError::MalformedIdentifier {
                field: UNIT,
                text: last_path_segment(text).to_string(),
                reason,
            }),
    }
}

fn decode_entity_id(payload: Option<&Value>) -> Result<EntityId, DecodeError> {
    let reader = Reader::new(payload, "wikibase-entityid")?;

    if let Some(id) = reader.read_opt_str(ID)? {
        return EntityId::parse(id).map_err(|reason| DecodeError::MalformedIdentifier {
            field: ID,
            text: id.to_string(),
            reason,
        });
    }

    let name = reader.read_str(ENTITY_TYPE)?;
    let entity_type = EntityType::from_name(name).ok_or_else(|| DecodeError::UnknownEntityType {
        entity_type: name.to_string(),
    })?;
    let serial = reader.read_u64(NUMERIC_ID)?;
    EntityId::from_parts(entity_type.prefix(), serial).map_err(|reason| DecodeError::MalformedIdentifier {
        field: NUMERIC_ID,
        text: serial.to_string(),
        reason,
    })
}

fn decode_monolingual_text(payload: Option<&Value>) -> Result<MonolingualTextValue, DecodeError> {
    let reader = Reader::new(payload, "monolingualtext")?;
    let text = reader.read_str(TEXT)?;
    let language = reader.read_str(LANGUAGE)?;
    Ok(MonolingualTextValue::new(text, language))
}

fn decode_globe_coordinate(payload: Option<&Value>) -> Result<GlobeCoordinateValue, DecodeError> {
    let reader = Reader::new(payload, "globecoordinate")?;
    let latitude = reader.read_f64(LATITUDE)?;
    let longitude = reader.read_f64(LONGITUDE)?;
    let altitude = reader.read_opt_f64(ALTITUDE)?;
    let precision = reader.read_opt_f64(PRECISION)?;
    let globe = reader.read_opt_str(GLOBE)?.unwrap_or(GLOBE_EARTH);

    let coordinate = GlobeCoordinateValue::new(latitude, longitude, precision)
        .map_err(coordinate_error)?
        .with_altitude(altitude)
        .map_err(coordinate_error)?
        .with_globe(globe);
    Ok(coordinate)
}

/// Maps a coordinate construction failure onto the field that caused it.
fn coordinate_error(err: ValidationError) -> DecodeError {
    let field = match err {
        ValidationError::NonFinite { field } => field,
        _ => "globecoordinate",
    };
    DecodeError::InvalidFieldType {
        field,
        expected: "a finite number",
        found: "a number",
    }
}

fn decode_time(payload: Option<&Value>) -> Result<TimeValue, DecodeError> {
    let reader = Reader::new(payload, "time")?;
    let time = reader.read_str(TIME)?;

    let timezone = reader.read_i64(TIMEZONE)?;
    let timezone = i16::try_from(timezone).map_err(|_| DecodeError::IntegerOutOfRange {
        field: TIMEZONE,
        value: timezone.to_string(),
    })?;

    let before = reader.read_u64(BEFORE)?;
    let after = reader.read_u64(AFTER)?;

    let precision = reader.read_u64(PRECISION)?;
    let precision = u8::try_from(precision)
        .ok()
        .and_then(TimePrecision::from_u8)
        .ok_or(DecodeError::InvalidTimePrecision { value: precision })?;

    let calendar_model = reader.read_str(CALENDAR_MODEL)?;

    Ok(TimeValue::new(time, precision)
        .with_timezone(timezone)
        .with_uncertainty(before, after)
        .with_calendar_model(calendar_model))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a data value in its envelope `{"value": ..., "type": ...}`.
pub fn encode_data_value(value: &DataValue) -> Value {
    let mut writer = Writer::new();
    writer
        .write_value(VALUE, encode_payload(value))
        .write_str(TYPE, value.type_tag());
    writer.finish()
}

/// Encodes only the payload of a data value, without the envelope.
pub fn encode_payload(value: &DataValue) -> Value {
    match value {
        DataValue::String(s) => Value::String(s.clone()),
        DataValue::EntityId(id) => encode_entity_id(id),
        DataValue::MonolingualText(text) => encode_monolingual_text(text),
        DataValue::GlobeCoordinate(coordinate) => encode_globe_coordinate(coordinate),
        DataValue::Quantity(quantity) => encode_quantity(quantity),
        DataValue::Time(time) => encode_time(time),
    }
}

/// Encodes a quantity payload.
///
/// The unit is always written in its compact form (`Q11573`), never as a
/// URI, and as `""` when the quantity is dimensionless.
pub fn encode_quantity(quantity: &QuantityValue) -> Value {
    let mut writer = Writer::new();
    writer
        .write_str(AMOUNT, quantity.amount())
        .write_str(UNIT, quantity.unit().map_or("", EntityId::prefixed_id))
        .write_str(UPPER_BOUND, quantity.upper_bound())
        .write_str(LOWER_BOUND, quantity.lower_bound());
    writer.finish()
}

fn encode_entity_id(id: &EntityId) -> Value {
    let mut writer = Writer::new();
    if let Some(entity_type) = id.entity_type() {
        writer
            .write_str(ENTITY_TYPE, entity_type.name())
            .write_u64(NUMERIC_ID, id.serial());
    }
    writer.write_str(ID, id.prefixed_id());
    writer.finish()
}

fn encode_monolingual_text(text: &MonolingualTextValue) -> Value {
    let mut writer = Writer::new();
    writer
        .write_str(TEXT, text.text())
        .write_str(LANGUAGE, text.language());
    writer.finish()
}

fn encode_globe_coordinate(coordinate: &GlobeCoordinateValue) -> Value {
    let mut writer = Writer::new();
    writer
        .write_f64(LATITUDE, coordinate.latitude())
        .write_f64(LONGITUDE, coordinate.longitude())
        .write_opt_f64(ALTITUDE, coordinate.altitude())
        .write_opt_f64(PRECISION, coordinate.precision())
        .write_str(GLOBE, coordinate.globe());
    writer.finish()
}

fn encode_time(time: &TimeValue) -> Value {
    let mut writer = Writer::new();
    writer
        .write_str(TIME, time.time())
        .write_i64(TIMEZONE, time.timezone().into())
        .write_u64(BEFORE, time.before())
        .write_u64(AFTER, time.after())
        .write_u64(PRECISION, time.precision() as u64)
        .write_str(CALENDAR_MODEL, time.calendar_model());
    writer.finish()
}

// =============================================================================
// CONVENIENCE METHODS AND SERDE
// =============================================================================

impl DataValue {
    /// Decodes an enveloped data value.
    pub fn decode(payload: Option<&Value>) -> Result<DataValue, DecodeError> {
        decode_data_value(payload)
    }

    /// Encodes this value with its envelope.
    pub fn encode(&self) -> Value {
        encode_data_value(self)
    }

    /// Encodes only the payload of this value.
    pub fn encode_value(&self) -> Value {
        encode_payload(self)
    }
}

impl QuantityValue {
    /// Decodes a quantity payload.
    pub fn decode(payload: Option<&Value>) -> Result<QuantityValue, DecodeError> {
        decode_quantity(payload)
    }

    /// Encodes this quantity's payload.
    pub fn encode(&self) -> Value {
        encode_quantity(self)
    }
}

impl Serialize for DataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_data_value(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DataValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_data_value(Some(&value)).map_err(D::Error::custom)
    }
}

impl Serialize for QuantityValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        encode_quantity(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for QuantityValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        decode_quantity(Some(&value)).map_err(D::Error::custom)
    }
}
