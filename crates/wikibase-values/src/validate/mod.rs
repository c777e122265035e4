//! Semantic validation for data values.
//!
//! Decoding only checks shape: a quantity whose amount lies outside its
//! bounds, or a coordinate at latitude 200, decodes fine because the remote
//! API is the authority on what it sends. Callers that build values locally
//! (or want to reject suspicious input) opt in to the checks here.
//!
//! Decimal comparison works on the text directly, so arbitrarily long
//! amounts compare exactly without a big-number library.

use std::cmp::Ordering;

use crate::error::ValidationError;
use crate::model::{DataValue, GlobeCoordinateValue, MonolingualTextValue, QuantityValue, TimeValue};

/// A parsed sign-prefixed decimal, borrowing its digits from the text.
#[derive(Debug, Clone, Copy)]
struct Decimal<'a> {
    negative: bool,
    integer: &'a str,
    /// Fraction digits with trailing zeros removed.
    fraction: &'a str,
}

impl Decimal<'_> {
    fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction.is_empty()
    }

    fn cmp_magnitude(&self, other: &Decimal<'_>) -> Ordering {
        self.integer
            .len()
            .cmp(&other.integer.len())
            .then_with(|| self.integer.cmp(other.integer))
            .then_with(|| self.fraction.cmp(other.fraction))
    }
}

impl Ord for Decimal<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => {
                return if other.negative { Ordering::Greater } else { Ordering::Less };
            }
            (false, true) => {
                return if self.negative { Ordering::Less } else { Ordering::Greater };
            }
            (false, false) => {}
        }
        match (self.negative, other.negative) {
            (false, false) => self.cmp_magnitude(other),
            (true, true) => other.cmp_magnitude(self),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
        }
    }
}

impl PartialEq for Decimal<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal<'_> {}

impl PartialOrd for Decimal<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Parses `^[+-](0|[1-9][0-9]*)(\.[0-9]+)?$`.
fn parse_decimal(text: &str) -> Option<Decimal<'_>> {
    let negative = match text.as_bytes().first()? {
        b'+' => false,
        b'-' => true,
        _ => return None,
    };
    let unsigned = &text[1..];
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    if integer.is_empty() || !integer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if integer.len() > 1 && integer.starts_with('0') {
        return None;
    }
    let fraction = match fraction {
        Some(f) if f.is_empty() || !f.bytes().all(|b| b.is_ascii_digit()) => return None,
        Some(f) => f.trim_end_matches('0'),
        None => "",
    };

    Some(Decimal { negative, integer, fraction })
}

/// Returns true if `text` is a sign-prefixed decimal such as `+1.5` or `-3`.
pub fn is_decimal(text: &str) -> bool {
    parse_decimal(text).is_some()
}

/// Compares two sign-prefixed decimals numerically.
///
/// Returns `None` if either text is not a valid decimal. `+0` and `-0.00`
/// compare equal.
pub fn compare_decimals(a: &str, b: &str) -> Option<Ordering> {
    Some(parse_decimal(a)?.cmp(&parse_decimal(b)?))
}

/// Checks a single decimal field.
pub fn validate_decimal(field: &'static str, text: &str) -> Result<(), ValidationError> {
    if is_decimal(text) {
        Ok(())
    } else {
        Err(ValidationError::InvalidDecimal {
            field,
            text: text.to_string(),
        })
    }
}

/// Validates a quantity: all three texts are decimals and
/// `lower_bound <= amount <= upper_bound`.
pub fn validate_quantity(quantity: &QuantityValue) -> Result<(), ValidationError> {
    validate_decimal("amount", quantity.amount())?;
    validate_decimal("upperBound", quantity.upper_bound())?;
    validate_decimal("lowerBound", quantity.lower_bound())?;

    let lower_ok = compare_decimals(quantity.lower_bound(), quantity.amount())
        .is_some_and(|o| o != Ordering::Greater);
    let upper_ok = compare_decimals(quantity.amount(), quantity.upper_bound())
        .is_some_and(|o| o != Ordering::Greater);
    if !(lower_ok && upper_ok) {
        return Err(ValidationError::BoundsOutOfOrder {
            lower: quantity.lower_bound().to_string(),
            amount: quantity.amount().to_string(),
            upper: quantity.upper_bound().to_string(),
        });
    }
    Ok(())
}

/// Validates coordinate ranges and precision.
pub fn validate_globe_coordinate(coordinate: &GlobeCoordinateValue) -> Result<(), ValidationError> {
    let lat = coordinate.latitude();
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::LatitudeOutOfRange { lat });
    }
    let lon = coordinate.longitude();
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::LongitudeOutOfRange { lon });
    }
    if let Some(precision) = coordinate.precision() {
        if precision <= 0.0 {
            return Err(ValidationError::NonPositivePrecision { precision });
        }
    }
    Ok(())
}

/// Checks that the text carries a language code.
pub fn validate_monolingual_text(text: &MonolingualTextValue) -> Result<(), ValidationError> {
    if text.language().is_empty() {
        return Err(ValidationError::EmptyLanguage);
    }
    Ok(())
}

/// Checks that the timestamp has an explicit sign.
pub fn validate_time(time: &TimeValue) -> Result<(), ValidationError> {
    if !time.time().starts_with(['+', '-']) {
        return Err(ValidationError::UnsignedTime {
            time: time.time().to_string(),
        });
    }
    Ok(())
}

/// Validates any data value.
///
/// Strings and entity references have no rules beyond what decoding
/// already enforces.
pub fn validate_data_value(value: &DataValue) -> Result<(), ValidationError> {
    match value {
        DataValue::String(_) | DataValue::EntityId(_) => Ok(()),
        DataValue::MonolingualText(text) => validate_monolingual_text(text),
        DataValue::GlobeCoordinate(coordinate) => validate_globe_coordinate(coordinate),
        DataValue::Quantity(quantity) => validate_quantity(quantity),
        DataValue::Time(time) => validate_time(time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TimePrecision;

    #[test]
    fn test_decimal_grammar() {
        for ok in ["+0", "-0", "+5", "-12", "+1.5", "-0.001", "+100.10"] {
            assert!(is_decimal(ok), "{ok} should be a decimal");
        }
        for bad in ["", "5", "+", "+-1", "+01", "+1.", "+.5", "+1.2.3", "+1e5", " +1", "+1,5", "+ 1"] {
            assert!(!is_decimal(bad), "{bad} should not be a decimal");
        }
    }

    #[test]
    fn test_compare_decimals() {
        assert_eq!(compare_decimals("+1", "+2"), Some(Ordering::Less));
        assert_eq!(compare_decimals("+10", "+9"), Some(Ordering::Greater));
        assert_eq!(compare_decimals("-10", "-9"), Some(Ordering::Less));
        assert_eq!(compare_decimals("+1.5", "+1.45"), Some(Ordering::Greater));
        assert_eq!(compare_decimals("+1.50", "+1.5"), Some(Ordering::Equal));
        assert_eq!(compare_decimals("+0", "-0.00"), Some(Ordering::Equal));
        assert_eq!(compare_decimals("-0.1", "+0"), Some(Ordering::Less));
        assert_eq!(compare_decimals("+0", "-3"), Some(Ordering::Greater));
        assert_eq!(compare_decimals("-1", "+1"), Some(Ordering::Less));
        assert_eq!(
            compare_decimals("+123456789012345678901234567890", "+123456789012345678901234567891"),
            Some(Ordering::Less)
        );
        assert_eq!(compare_decimals("+1", "1"), None);
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(&QuantityValue::from_integer(5)).is_ok());
        assert!(validate_quantity(&QuantityValue::new("+10", "+10", "+9", None)).is_ok());
        assert!(validate_quantity(&QuantityValue::new("-1.5", "-1", "-2", None)).is_ok());

        assert_eq!(
            validate_quantity(&QuantityValue::new("+10", "+9", "+8", None)),
            Err(ValidationError::BoundsOutOfOrder {
                lower: "+8".to_string(),
                amount: "+10".to_string(),
                upper: "+9".to_string(),
            })
        );
        assert_eq!(
            validate_quantity(&QuantityValue::new("10", "+10", "+10", None)),
            Err(ValidationError::InvalidDecimal { field: "amount", text: "10".to_string() })
        );
    }

    #[test]
    fn test_validate_globe_coordinate() {
        let ok = GlobeCoordinateValue::new(52.5, 13.4, Some(0.001)).unwrap();
        assert!(validate_globe_coordinate(&ok).is_ok());

        let lat = GlobeCoordinateValue::new(91.0, 0.0, None).unwrap();
        assert_eq!(
            validate_globe_coordinate(&lat),
            Err(ValidationError::LatitudeOutOfRange { lat: 91.0 })
        );
        let lon = GlobeCoordinateValue::new(0.0, -180.5, None).unwrap();
        assert_eq!(
            validate_globe_coordinate(&lon),
            Err(ValidationError::LongitudeOutOfRange { lon: -180.5 })
        );
        let precision = GlobeCoordinateValue::new(0.0, 0.0, Some(0.0)).unwrap();
        assert!(validate_globe_coordinate(&precision).is_err());
    }

    #[test]
    fn test_validate_data_value() {
        assert!(validate_data_value(&DataValue::String(String::new())).is_ok());
        assert_eq!(
            validate_data_value(&MonolingualTextValue::new("hallo", "").into()),
            Err(ValidationError::EmptyLanguage)
        );
        let unsigned = TimeValue::new("2001-12-31T00:00:00Z", TimePrecision::Day);
        assert!(validate_data_value(&unsigned.into()).is_err());
        let signed = TimeValue::new("-0044-03-15T00:00:00Z", TimePrecision::Day);
        assert!(validate_data_value(&signed.into()).is_ok());
    }
}
