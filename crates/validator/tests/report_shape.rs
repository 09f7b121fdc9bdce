use czml_model::EntityType;
use czml_validator::{summarize, validate, ValidationResult};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn report_serializes_with_camel_case_keys() {
    let result = validate(&json!([
        {"id": "document", "name": "Demo", "version": "1.0"},
        {"id": "sat", "position": {"cartographicDegrees": [0, 0, 400000]}, "point": {"pixelSize": 4}}
    ]));

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value,
        json!({
            "valid": true,
            "errors": [],
            "warnings": [],
            "packetCount": 2,
            "hasDocument": true,
            "hasClock": false,
            "entityTypes": ["point"]
        })
    );

    let back: ValidationResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}

#[test]
fn diagnostics_serialize_severity_in_lowercase() {
    let result = validate(&json!([{"id": "x"}]));
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value["errors"][0],
        json!({
            "path": "[0]",
            "message": "First packet must be document packet with id \"document\"",
            "severity": "error"
        })
    );
}

#[test]
fn duplicate_point_scenario() {
    let result = validate(&json!([
        {"id": "document"},
        {"id": "a", "point": {"pixelSize": -1}},
        {"id": "a", "point": {"pixelSize": 5}}
    ]));

    assert!(!result.valid);
    assert_eq!(result.entity_types, vec![EntityType::Point]);
    assert_eq!(result.packet_count, 3);

    let messages: Vec<_> = result.issues().map(|i| i.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "error at [1].point.pixelSize: Point pixelSize must be positive",
            "error at [1]: Entity with point/label/billboard/ellipse/model requires a position",
            "error at [2]: Entity with point/label/billboard/ellipse/model requires a position",
            "warning at [0].name: Document should have a name",
            "warning at [0].version: Document should have a version",
            "warning at [2]: Duplicate packet ID: \"a\"",
        ]
    );
}

#[test]
fn summary_serializes_entity_counts_by_key() {
    let summary = summarize(&[
        json!({"id": "document", "name": "Grid"}),
        json!({"id": "w", "wall": {}}),
        json!({"id": "b", "box": {}, "wall": {}}),
    ]);
    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "Grid",
            "version": "unknown",
            "entityCount": 2,
            "hasClock": false,
            "entityTypes": {"box": 1, "wall": 2}
        })
    );
}
