//! Property-based tests for the quantity codec.
//!
//! These tests check the guarantees that must hold for every input:
//! - Exact construction: amount and both bounds are the same signed text
//! - Idempotence: decode(encode(q)) re-encodes to the same bytes
//! - Unit normalization: any URI prefix collapses to the compact id

use proptest::prelude::*;
use wikibase_values::validate::{compare_decimals, is_decimal};
use wikibase_values::{decode_quantity, encode_quantity, EntityId, QuantityValue};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn decimal_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[+-](0|[1-9][0-9]{0,30})(\\.[0-9]{1,12})?").unwrap()
}

fn entity_id_strategy() -> impl Strategy<Value = EntityId> {
    (prop::sample::select(vec!["Q", "P", "L", "M"]), 1u64..u64::MAX)
        .prop_map(|(prefix, serial)| EntityId::from_parts(prefix, serial).unwrap())
}

fn quantity_strategy() -> impl Strategy<Value = QuantityValue> {
    (
        decimal_strategy(),
        decimal_strategy(),
        decimal_strategy(),
        prop::option::of(entity_id_strategy()),
    )
        .prop_map(|(amount, upper, lower, unit)| QuantityValue::new(amount, upper, lower, unit))
}

fn uri_prefix_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("(https?://[a-z]{1,12}\\.org/)?([a-z]{1,8}/){0,3}").unwrap()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    /// from_integer produces identical, explicitly signed text.
    #[test]
    fn from_integer_is_exact_and_signed(v in any::<i64>()) {
        let q = QuantityValue::from_integer(v);
        prop_assert_eq!(q.amount(), q.upper_bound());
        prop_assert_eq!(q.amount(), q.lower_bound());
        prop_assert!(q.unit().is_none());

        let expected_sign = if v < 0 { '-' } else { '+' };
        prop_assert_eq!(q.amount().chars().next(), Some(expected_sign));
        prop_assert!(is_decimal(q.amount()));
    }

    /// from_integer preserves order between integers.
    #[test]
    fn from_integer_preserves_order(a in any::<i64>(), b in any::<i64>()) {
        let qa = QuantityValue::from_integer(a);
        let qb = QuantityValue::from_integer(b);
        prop_assert_eq!(compare_decimals(qa.amount(), qb.amount()), Some(a.cmp(&b)));
    }

    /// Encoding a decoded encoding is byte-identical.
    #[test]
    fn encode_decode_is_idempotent(q in quantity_strategy()) {
        let encoded = encode_quantity(&q);
        let decoded = decode_quantity(Some(&encoded)).unwrap();
        prop_assert_eq!(&decoded, &q);

        let first = serde_json::to_string(&encoded).unwrap();
        let second = serde_json::to_string(&encode_quantity(&decoded)).unwrap();
        prop_assert_eq!(first, second);
    }

    /// A unit given as a URI re-encodes as the bare identifier.
    #[test]
    fn uri_units_normalize(prefix in uri_prefix_strategy(), id in entity_id_strategy()) {
        let payload = serde_json::json!({
            "amount": "+1",
            "unit": format!("{prefix}{id}"),
            "upperBound": "+1",
            "lowerBound": "+1",
        });
        let q = decode_quantity(Some(&payload)).unwrap();
        prop_assert_eq!(q.unit(), Some(&id));
        let encoded = encode_quantity(&q);
        prop_assert_eq!(encoded["unit"].as_str(), Some(id.prefixed_id()));
    }
}
