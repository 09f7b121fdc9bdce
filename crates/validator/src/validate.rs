use std::collections::HashSet;

use czml_model::{
    ClockRange, DocumentArray, EntityType, CARTESIAN, CARTOGRAPHIC_DEGREES, CZML_VERSION,
    DOCUMENT_ID, POSITION_KEYS, REFERENCE,
};
use serde_json::{Map, Value};

use crate::report::{Diagnostics, ValidationResult};
use crate::value::{display_value, is_truthy};

type Object = Map<String, Value>;

/// Entity capabilities that get dedicated checks, with the label used in messages.
const ENTITY_CHECKS: [(EntityType, &str, fn(&Object, &str, &mut Diagnostics)); 4] = [
    (EntityType::Point, "Point", check_point),
    (EntityType::Polyline, "Polyline", check_polyline),
    (EntityType::Polygon, "Polygon", check_polygon),
    (EntityType::Ellipse, "Ellipse", check_ellipse),
];

/// Validate an arbitrary JSON value as a CZML document array.
///
/// Never fails: malformed input is reported through the returned diagnostics.
/// A non-array or empty array yields a single top-level error and nothing else;
/// every other problem is collected in one pass.
#[must_use]
pub fn validate(czml: &Value) -> ValidationResult {
    match czml {
        Value::Array(packets) => validate_packets(packets),
        _ => ValidationResult::fatal("CZML must be an array"),
    }
}

#[must_use]
pub fn validate_document(document: &DocumentArray) -> ValidationResult {
    validate_packets(document.as_slice())
}

#[must_use]
pub fn validate_packets(packets: &[Value]) -> ValidationResult {
    let Some(first) = packets.first() else {
        return ValidationResult::fatal("CZML array is empty");
    };

    let mut diagnostics = Diagnostics::default();
    let mut has_document = false;
    let mut has_clock = false;

    match as_packet(first) {
        Some((doc, DOCUMENT_ID)) => {
            has_document = true;
            check_document(doc, "[0]", &mut diagnostics);
            has_clock = doc.contains_key("clock");
        }
        _ => diagnostics.error("[0]", "First packet must be document packet with id \"document\""),
    }

    let mut packet_count = 0usize;
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut entity_types: Vec<EntityType> = Vec::new();

    for (index, packet) in packets.iter().enumerate() {
        let path = format!("[{index}]");
        let Some((obj, id)) = as_packet(packet) else {
            diagnostics.error(path, "Invalid packet structure");
            continue;
        };

        packet_count += 1;

        if !seen_ids.insert(id) {
            diagnostics.warning(path.as_str(), format!("Duplicate packet ID: \"{id}\""));
        }

        if id == DOCUMENT_ID {
            continue;
        }

        check_entity(obj, &path, &mut diagnostics);

        for kind in EntityType::present_in(obj) {
            if !entity_types.contains(&kind) {
                entity_types.push(kind);
            }
        }
    }

    let (errors, warnings) = diagnostics.into_parts();
    log::debug!(
        "Validated {packet_count} packets: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    ValidationResult {
        valid: errors.is_empty(),
        errors,
        warnings,
        packet_count,
        has_document,
        has_clock,
        entity_types,
    }
}

/// An object with a string `id`; anything else is structurally invalid.
fn as_packet(packet: &Value) -> Option<(&Object, &str)> {
    let obj = packet.as_object()?;
    let id = obj.get("id")?.as_str()?;
    Some((obj, id))
}

fn check_document(doc: &Object, path: &str, diagnostics: &mut Diagnostics) {
    if !doc.contains_key("name") {
        diagnostics.warning(format!("{path}.name"), "Document should have a name");
    }

    match doc.get("version") {
        None => diagnostics.warning(format!("{path}.version"), "Document should have a version"),
        Some(Value::String(version)) if version == CZML_VERSION => {}
        Some(other) => diagnostics.warning(
            format!("{path}.version"),
            format!("Unknown CZML version: {}", display_value(other)),
        ),
    }

    if let Some(clock) = doc.get("clock").filter(|clock| is_truthy(clock)) {
        check_clock(clock, &format!("{path}.clock"), diagnostics);
    }
}

fn check_clock(clock: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let Some(clock) = clock.as_object() else {
        diagnostics.error(path, "Clock must be an object");
        return;
    };

    if let Some(interval) = clock.get("interval") {
        if !interval.as_str().is_some_and(|s| s.contains('/')) {
            diagnostics.error(
                format!("{path}.interval"),
                "Clock interval must be a string in format \"start/end\"",
            );
        }
    }

    if let Some(multiplier) = clock.get("multiplier") {
        if !multiplier.is_number() {
            diagnostics.error(format!("{path}.multiplier"), "Clock multiplier must be a number");
        }
    }

    if let Some(range) = clock.get("range") {
        let known = range
            .as_str()
            .is_some_and(|s| s.parse::<ClockRange>().is_ok());
        if !known {
            let allowed: Vec<&str> = ClockRange::ALL.iter().map(|r| r.as_str()).collect();
            diagnostics.warning(
                format!("{path}.range"),
                format!("Clock range must be one of: {}", allowed.join(", ")),
            );
        }
    }
}

fn check_entity(packet: &Object, path: &str, diagnostics: &mut Diagnostics) {
    if let Some(position) = packet.get("position").filter(|p| is_truthy(p)) {
        check_position(position, &format!("{path}.position"), diagnostics);
    }

    for (kind, label, check) in ENTITY_CHECKS {
        let Some(value) = packet.get(kind.as_str()) else {
            continue;
        };
        let entity_path = format!("{path}.{kind}");
        match value.as_object() {
            Some(obj) => check(obj, &entity_path, diagnostics),
            None => diagnostics.error(entity_path, format!("{label} must be an object")),
        }
    }

    let needs_position = EntityType::present_in(packet).any(EntityType::requires_position);
    if needs_position && !packet.contains_key("position") {
        diagnostics.error(
            path,
            "Entity with point/label/billboard/ellipse/model requires a position",
        );
    }
}

fn check_position(position: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let Some(pos) = position.as_object() else {
        diagnostics.error(path, "Position must be an object");
        return;
    };

    let encodings = POSITION_KEYS
        .iter()
        .filter(|key| pos.contains_key(**key))
        .count();
    if encodings > 1 {
        diagnostics.error(
            path,
            "Position must have only one of cartographicDegrees, cartesian, or reference",
        );
    }

    if let Some(coords) = pos.get(CARTOGRAPHIC_DEGREES) {
        check_cartographic(coords, &format!("{path}.{CARTOGRAPHIC_DEGREES}"), diagnostics);
    } else if let Some(coords) = pos.get(CARTESIAN) {
        if !coords.is_array() {
            diagnostics.error(
                format!("{path}.{CARTESIAN}"),
                "Cartesian position must be an array",
            );
        }
    } else if pos.contains_key(REFERENCE) {
        // Resolved by the consumer; nothing to check here.
    } else {
        diagnostics.error(
            path,
            "Position must have cartographicDegrees, cartesian, or reference",
        );
    }
}

/// Range-checks `[lon, lat, ...]`. Sampled arrays that don't start with two
/// numbers are left alone.
fn check_cartographic(coords: &Value, path: &str, diagnostics: &mut Diagnostics) {
    let Some(coords) = coords.as_array() else {
        return;
    };
    if coords.len() < 3 {
        return;
    }
    let (Some(lon), Some(lat)) = (coords[0].as_f64(), coords[1].as_f64()) else {
        return;
    };

    // Longitude wraps in the renderer, latitude cannot.
    if !(-180.0..=180.0).contains(&lon) {
        diagnostics.warning(
            format!("{path}[0]"),
            format!("Longitude {lon} is out of range [-180, 180]"),
        );
    }
    if !(-90.0..=90.0).contains(&lat) {
        diagnostics.error(
            format!("{path}[1]"),
            format!("Latitude {lat} is out of range [-90, 90]"),
        );
    }
}

fn check_point(point: &Object, path: &str, diagnostics: &mut Diagnostics) {
    let Some(pixel_size) = point.get("pixelSize").and_then(Value::as_f64) else {
        return;
    };
    if pixel_size <= 0.0 {
        diagnostics.error(format!("{path}.pixelSize"), "Point pixelSize must be positive");
    }
    if pixel_size > 100.0 {
        diagnostics.warning(
            format!("{path}.pixelSize"),
            "Point pixelSize is unusually large (> 100)",
        );
    }
}

fn check_polyline(polyline: &Object, path: &str, diagnostics: &mut Diagnostics) {
    if !polyline.contains_key("positions") {
        diagnostics.error(path, "Polyline requires positions");
    }
    if let Some(width) = polyline.get("width").and_then(Value::as_f64) {
        if width <= 0.0 {
            diagnostics.error(format!("{path}.width"), "Polyline width must be positive");
        }
    }
}

fn check_polygon(polygon: &Object, path: &str, diagnostics: &mut Diagnostics) {
    if !polygon.contains_key("positions") {
        diagnostics.error(path, "Polygon requires positions");
    }
    let extruded = polygon.get("extrudedHeight").and_then(Value::as_f64);
    let height = polygon.get("height").and_then(Value::as_f64);
    if let (Some(extruded), Some(height)) = (extruded, height) {
        if extruded < height {
            diagnostics.warning(
                format!("{path}.extrudedHeight"),
                "extrudedHeight should be greater than height",
            );
        }
    }
}

fn check_ellipse(ellipse: &Object, path: &str, diagnostics: &mut Diagnostics) {
    if !ellipse.contains_key("semiMajorAxis") || !ellipse.contains_key("semiMinorAxis") {
        diagnostics.error(path, "Ellipse requires semiMajorAxis and semiMinorAxis");
    }
    let major = ellipse.get("semiMajorAxis").and_then(Value::as_f64);
    let minor = ellipse.get("semiMinorAxis").and_then(Value::as_f64);
    if let (Some(major), Some(minor)) = (major, minor) {
        if major < minor {
            diagnostics.warning(path, "semiMajorAxis should be >= semiMinorAxis");
        }
    }
}
