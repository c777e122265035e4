use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wikibase_values::{
    decode_data_value, decode_quantity, encode_data_value, encode_quantity, DataValue, EntityId,
    ErrorCode, QuantityValue,
};

// ── Quantity wire format ──────────────────────────────────────────

#[test]
fn dimensionless_quantity_reencodes_identically() {
    let text = r#"{"amount":"+5","unit":"","upperBound":"+5","lowerBound":"+5"}"#;
    let payload: Value = serde_json::from_str(text).unwrap();

    let quantity = decode_quantity(Some(&payload)).unwrap();
    assert_eq!(quantity.unit(), None);
    assert_eq!(serde_json::to_string(&encode_quantity(&quantity)).unwrap(), text);
}

#[test]
fn uri_unit_reencodes_in_compact_form() {
    let payload: Value = serde_json::from_str(
        r#"{"amount":"+10","unit":"http://example.org/entity/Q11573","upperBound":"+10","lowerBound":"+9"}"#,
    )
    .unwrap();

    let quantity = decode_quantity(Some(&payload)).unwrap();
    assert_eq!(quantity.unit(), Some(&EntityId::parse("Q11573").unwrap()));

    let encoded = serde_json::to_string(&encode_quantity(&quantity)).unwrap();
    assert_eq!(
        encoded,
        r#"{"amount":"+10","unit":"Q11573","upperBound":"+10","lowerBound":"+9"}"#
    );
}

#[test]
fn encoded_field_order_is_stable() {
    let quantity = QuantityValue::new("+1.5", "+2", "+1", Some(EntityId::parse("Q828224").unwrap()));
    let encoded = serde_json::to_string(&encode_quantity(&quantity)).unwrap();
    assert_eq!(
        encoded,
        r#"{"amount":"+1.5","unit":"Q828224","upperBound":"+2","lowerBound":"+1"}"#
    );
}

#[test]
fn missing_amount_is_a_shape_mismatch() {
    let payload = json!({"unit": "", "upperBound": "+5", "lowerBound": "+5"});
    let err = decode_quantity(Some(&payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::ShapeMismatch);
}

#[test]
fn missing_bounds_are_shape_mismatches() {
    for field in ["upperBound", "lowerBound"] {
        let mut payload = json!({"amount": "+5", "unit": "", "upperBound": "+5", "lowerBound": "+5"});
        payload.as_object_mut().unwrap().remove(field);
        let err = decode_quantity(Some(&payload)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ShapeMismatch, "missing {field}");
    }
}

#[test]
fn null_or_absent_payload_is_null_payload() {
    assert_eq!(decode_quantity(None).unwrap_err().code(), ErrorCode::NullPayload);
    assert_eq!(decode_quantity(Some(&Value::Null)).unwrap_err().code(), ErrorCode::NullPayload);
}

#[test]
fn malformed_unit_is_malformed_identifier() {
    let payload = json!({"amount": "+5", "unit": "Q!!notanid", "upperBound": "+5", "lowerBound": "+5"});
    let err = decode_quantity(Some(&payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedIdentifier);
}

#[test]
fn numeric_unit_is_not_dimensionless() {
    let payload = json!({"amount": "+5", "unit": "1", "upperBound": "+5", "lowerBound": "+5"});
    let err = decode_quantity(Some(&payload)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::MalformedIdentifier);
}

#[test]
fn from_integer_zero_is_plus_zero() {
    let quantity = QuantityValue::from_integer(0);
    assert_eq!(quantity.amount(), "+0");
    assert_eq!(
        encode_quantity(&quantity),
        json!({"amount": "+0", "unit": "", "upperBound": "+0", "lowerBound": "+0"})
    );
}

// ── Envelope ──────────────────────────────────────────────────────

#[test]
fn every_variant_reencodes_through_the_envelope() {
    let envelopes = [
        json!({"value": "0000-0002-1825-0097", "type": "string"}),
        json!({"value": {"entity-type": "item", "numeric-id": 5, "id": "Q5"}, "type": "wikibase-entityid"}),
        json!({"value": {"text": "Douglas Adams", "language": "en"}, "type": "monolingualtext"}),
        json!({
            "value": {
                "latitude": 51.5,
                "longitude": -0.125,
                "altitude": null,
                "precision": 0.001,
                "globe": "http://www.wikidata.org/entity/Q2"
            },
            "type": "globecoordinate"
        }),
        json!({
            "value": {"amount": "+1.75", "unit": "Q11573", "upperBound": "+1.76", "lowerBound": "+1.74"},
            "type": "quantity"
        }),
        json!({
            "value": {
                "time": "+2001-05-11T00:00:00Z",
                "timezone": 0,
                "before": 0,
                "after": 0,
                "precision": 11,
                "calendarmodel": "http://www.wikidata.org/entity/Q1985727"
            },
            "type": "time"
        }),
    ];

    for envelope in envelopes {
        let value = decode_data_value(Some(&envelope)).unwrap();
        let encoded = encode_data_value(&value);
        assert_eq!(
            serde_json::to_string(&encoded).unwrap(),
            serde_json::to_string(&envelope).unwrap()
        );
    }
}

#[test]
fn unknown_tag_is_unknown_type() {
    let envelope = json!({"value": {}, "type": "geo-shape"});
    let err = decode_data_value(Some(&envelope)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::UnknownType);
}

#[test]
fn statement_snak_values_deserialize_with_serde() {
    // A fragment of a claim as returned by the API; only the datavalue is ours.
    let snak = json!({
        "snaktype": "value",
        "property": "P2048",
        "datavalue": {
            "value": {
                "amount": "+1.96",
                "unit": "http://www.wikidata.org/entity/Q11573",
                "upperBound": "+1.97",
                "lowerBound": "+1.95"
            },
            "type": "quantity"
        }
    });

    let value: DataValue = serde_json::from_value(snak["datavalue"].clone()).unwrap();
    match value {
        DataValue::Quantity(q) => {
            assert_eq!(q.amount(), "+1.96");
            assert_eq!(q.unit().map(EntityId::prefixed_id), Some("Q11573"));
        }
        other => panic!("expected a quantity, got {other:?}"),
    }
}
