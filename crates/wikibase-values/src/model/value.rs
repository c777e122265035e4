//! Data value types for Wikibase statements.
//!
//! Values are the typed content of a statement's main snak or qualifier:
//! strings, entity references, quantities, points in time and so on.

use crate::error::ValidationError;
use crate::model::id::EntityId;

/// Concept URI of Earth, the default globe for coordinates.
pub const GLOBE_EARTH: &str = "http://www.wikidata.org/entity/Q2";

/// Concept URI of the proleptic Gregorian calendar, the default calendar model.
pub const CALENDAR_GREGORIAN: &str = "http://www.wikidata.org/entity/Q1985727";

/// Concept URI of the proleptic Julian calendar.
pub const CALENDAR_JULIAN: &str = "http://www.wikidata.org/entity/Q1985786";

/// Data value types and their wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataValueType {
    String,
    EntityId,
    MonolingualText,
    GlobeCoordinate,
    Quantity,
    Time,
}

impl DataValueType {
    /// All types in the dispatch table.
    pub const ALL: [DataValueType; 6] = [
        DataValueType::String,
        DataValueType::EntityId,
        DataValueType::MonolingualText,
        DataValueType::GlobeCoordinate,
        DataValueType::Quantity,
        DataValueType::Time,
    ];

    /// Creates a DataValueType from its wire tag.
    pub fn from_tag(tag: &str) -> Option<DataValueType> {
        match tag {
            "string" => Some(DataValueType::String),
            "wikibase-entityid" => Some(DataValueType::EntityId),
            "monolingualtext" => Some(DataValueType::MonolingualText),
            "globecoordinate" => Some(DataValueType::GlobeCoordinate),
            "quantity" => Some(DataValueType::Quantity),
            "time" => Some(DataValueType::Time),
            _ => None,
        }
    }

    /// Returns the wire tag. Tags are part of the wire format and never change.
    pub fn tag(self) -> &'static str {
        match self {
            DataValueType::String => "string",
            DataValueType::EntityId => "wikibase-entityid",
            DataValueType::MonolingualText => "monolingualtext",
            DataValueType::GlobeCoordinate => "globecoordinate",
            DataValueType::Quantity => "quantity",
            DataValueType::Time => "time",
        }
    }
}

/// A typed data value.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    /// Plain string (also used for external identifiers, URLs, media files).
    String(String),

    /// Reference to another entity.
    EntityId(EntityId),

    /// Text in a specific language.
    MonolingualText(MonolingualTextValue),

    /// Geographic coordinate on a globe.
    GlobeCoordinate(GlobeCoordinateValue),

    /// Measured quantity with uncertainty bounds and optional unit.
    Quantity(QuantityValue),

    /// Point in time with precision and calendar model.
    Time(TimeValue),
}

impl DataValue {
    /// Returns the type of this value.
    pub fn data_type(&self) -> DataValueType {
        match self {
            DataValue::String(_) => DataValueType::String,
            DataValue::EntityId(_) => DataValueType::EntityId,
            DataValue::MonolingualText(_) => DataValueType::MonolingualText,
            DataValue::GlobeCoordinate(_) => DataValueType::GlobeCoordinate,
            DataValue::Quantity(_) => DataValueType::Quantity,
            DataValue::Time(_) => DataValueType::Time,
        }
    }

    /// Returns the wire tag of this value.
    pub fn type_tag(&self) -> &'static str {
        self.data_type().tag()
    }
}

impl From<QuantityValue> for DataValue {
    fn from(value: QuantityValue) -> Self {
        DataValue::Quantity(value)
    }
}

impl From<EntityId> for DataValue {
    fn from(value: EntityId) -> Self {
        DataValue::EntityId(value)
    }
}

impl From<MonolingualTextValue> for DataValue {
    fn from(value: MonolingualTextValue) -> Self {
        DataValue::MonolingualText(value)
    }
}

impl From<GlobeCoordinateValue> for DataValue {
    fn from(value: GlobeCoordinateValue) -> Self {
        DataValue::GlobeCoordinate(value)
    }
}

impl From<TimeValue> for DataValue {
    fn from(value: TimeValue) -> Self {
        DataValue::Time(value)
    }
}

// =============================================================================
// QUANTITY
// =============================================================================

/// A quantity with uncertainty bounds and an optional unit.
///
/// Amount and bounds are sign-prefixed decimal text (`+1.5`, `-3`) and are
/// kept exactly as given. No arithmetic relation between them is enforced
/// here; see [`crate::validate::validate_quantity`] for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantityValue {
    amount: String,
    upper_bound: String,
    lower_bound: String,
    unit: Option<EntityId>,
}

impl QuantityValue {
    /// Creates a quantity from its text fields, stored verbatim.
    pub fn new(
        amount: impl Into<String>,
        upper_bound: impl Into<String>,
        lower_bound: impl Into<String>,
        unit: Option<EntityId>,
    ) -> Self {
        Self {
            amount: amount.into(),
            upper_bound: upper_bound.into(),
            lower_bound: lower_bound.into(),
            unit,
        }
    }

    /// Creates an exact, dimensionless quantity for an integer.
    ///
    /// Non-negative values get a `+` prefix, so zero is `+0`.
    pub fn from_integer(value: i64) -> Self {
        let text = if value >= 0 {
            format!("+{value}")
        } else {
            value.to_string()
        };
        Self {
            amount: text.clone(),
            upper_bound: text.clone(),
            lower_bound: text,
            unit: None,
        }
    }

    /// Returns the amount.
    pub fn amount(&self) -> &str {
        &self.amount
    }

    /// Returns the upper uncertainty bound (inclusive).
    pub fn upper_bound(&self) -> &str {
        &self.upper_bound
    }

    /// Returns the lower uncertainty bound (inclusive).
    pub fn lower_bound(&self) -> &str {
        &self.lower_bound
    }

    /// Returns the unit, or `None` for a dimensionless quantity.
    pub fn unit(&self) -> Option<&EntityId> {
        self.unit.as_ref()
    }

    /// Returns true if the quantity has no unit.
    pub fn is_dimensionless(&self) -> bool {
        self.unit.is_none()
    }

    /// Returns true if both bounds equal the amount textually.
    pub fn is_exact(&self) -> bool {
        self.amount == self.upper_bound && self.amount == self.lower_bound
    }

    /// Sets the amount.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Sets the upper bound.
    pub fn with_upper_bound(mut self, upper_bound: impl Into<String>) -> Self {
        self.upper_bound = upper_bound.into();
        self
    }

    /// Sets the lower bound.
    pub fn with_lower_bound(mut self, lower_bound: impl Into<String>) -> Self {
        self.lower_bound = lower_bound.into();
        self
    }

    /// Sets the unit, or clears it with `None`.
    pub fn with_unit(mut self, unit: Option<EntityId>) -> Self {
        self.unit = unit;
        self
    }
}

impl From<i64> for QuantityValue {
    fn from(value: i64) -> Self {
        QuantityValue::from_integer(value)
    }
}

// =============================================================================
// MONOLINGUAL TEXT
// =============================================================================

/// Text tagged with a language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MonolingualTextValue {
    text: String,
    language: String,
}

impl MonolingualTextValue {
    /// Creates a text in the given language.
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the language code (e.g. `en`, `pt-br`).
    pub fn language(&self) -> &str {
        &self.language
    }
}

// =============================================================================
// GLOBE COORDINATE
// =============================================================================

/// A coordinate on a globe.
///
/// All numeric fields are finite; construction rejects NaN and infinities
/// since JSON cannot carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeCoordinateValue {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
    precision: Option<f64>,
    globe: String,
}

impl GlobeCoordinateValue {
    /// Creates a coordinate on Earth.
    pub fn new(latitude: f64, longitude: f64, precision: Option<f64>) -> Result<Self, ValidationError> {
        check_finite(latitude, "latitude")?;
        check_finite(longitude, "longitude")?;
        if let Some(p) = precision {
            check_finite(p, "precision")?;
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
            precision,
            globe: GLOBE_EARTH.to_string(),
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Altitude, currently unused by the remote API.
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    /// Precision in degrees.
    pub fn precision(&self) -> Option<f64> {
        self.precision
    }

    /// Concept URI of the globe.
    pub fn globe(&self) -> &str {
        &self.globe
    }

    /// Sets the altitude. Fails if it is not finite.
    pub fn with_altitude(mut self, altitude: Option<f64>) -> Result<Self, ValidationError> {
        if let Some(a) = altitude {
            check_finite(a, "altitude")?;
        }
        self.altitude = altitude;
        Ok(self)
    }

    /// Sets the globe concept URI.
    pub fn with_globe(mut self, globe: impl Into<String>) -> Self {
        self.globe = globe.into();
        self
    }
}

fn check_finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

// =============================================================================
// TIME
// =============================================================================

/// Precision of a time value, from billions of years down to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TimePrecision {
    BillionYears = 0,
    HundredMillionYears = 1,
    TenMillionYears = 2,
    MillionYears = 3,
    HundredThousandYears = 4,
    TenThousandYears = 5,
    Millennium = 6,
    Century = 7,
    Decade = 8,
    Year = 9,
    Month = 10,
    Day = 11,
    Hour = 12,
    Minute = 13,
    Second = 14,
}

impl TimePrecision {
    /// Creates a TimePrecision from its wire representation.
    pub fn from_u8(v: u8) -> Option<TimePrecision> {
        match v {
            0 => Some(TimePrecision::BillionYears),
            1 => Some(TimePrecision::HundredMillionYears),
            2 => Some(TimePrecision::TenMillionYears),
            3 => Some(TimePrecision::MillionYears),
            4 => Some(TimePrecision::HundredThousandYears),
            5 => Some(TimePrecision::TenThousandYears),
            6 => Some(TimePrecision::Millennium),
            7 => Some(TimePrecision::Century),
            8 => Some(TimePrecision::Decade),
            9 => Some(TimePrecision::Year),
            10 => Some(TimePrecision::Month),
            11 => Some(TimePrecision::Day),
            12 => Some(TimePrecision::Hour),
            13 => Some(TimePrecision::Minute),
            14 => Some(TimePrecision::Second),
            _ => None,
        }
    }
}

/// A point in time.
///
/// The timestamp is sign-prefixed ISO 8601-style text such as
/// `+2001-12-31T00:00:00Z`, kept verbatim like quantity amounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeValue {
    time: String,
    timezone: i16,
    before: u64,
    after: u64,
    precision: TimePrecision,
    calendar_model: String,
}

impl TimeValue {
    /// Creates a UTC time in the Gregorian calendar with no uncertainty.
    pub fn new(time: impl Into<String>, precision: TimePrecision) -> Self {
        Self {
            time: time.into(),
            timezone: 0,
            before: 0,
            after: 0,
            precision,
            calendar_model: CALENDAR_GREGORIAN.to_string(),
        }
    }

    /// Timestamp text, e.g. `+2001-05-11T00:00:00Z`.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Timezone offset from UTC in minutes.
    pub fn timezone(&self) -> i16 {
        self.timezone
    }

    /// Uncertainty before the timestamp, in units of the precision.
    pub fn before(&self) -> u64 {
        self.before
    }

    /// Uncertainty after the timestamp, in units of the precision.
    pub fn after(&self) -> u64 {
        self.after
    }

    /// Precision of the timestamp.
    pub fn precision(&self) -> TimePrecision {
        self.precision
    }

    /// Concept URI of the calendar model.
    pub fn calendar_model(&self) -> &str {
        &self.calendar_model
    }

    /// Sets the timestamp text.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    /// Sets the timezone offset in minutes.
    pub fn with_timezone(mut self, timezone: i16) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the before and after uncertainty.
    pub fn with_uncertainty(mut self, before: u64, after: u64) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// Sets the precision.
    pub fn with_precision(mut self, precision: TimePrecision) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the calendar model concept URI.
    pub fn with_calendar_model(mut self, calendar_model: impl Into<String>) -> Self {
        self.calendar_model = calendar_model.into();
        self
    }
}
