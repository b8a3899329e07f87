use super::Attributes;
use crate::model::RoadEnvError;
use geo::{Coord, LineString, Point};
use geojson::{feature::Id, Feature, Value};

/// normalizes a GeoJSON line geometry into one ordered coordinate sequence.
///
/// a MultiLineString is reduced to its first part, which is how the road
/// network source splits directed links. elevation is returned only when every
/// position carries a third component.
///
/// # Arguments
///
/// * `value`   - GeoJSON geometry value
/// * `feature` - feature label used in error messages
///
/// # Returns
///
/// * the 2D line and its optional per-vertex elevations, or an error for
///   unsupported geometry types and lines with fewer than 2 coordinates
pub fn linestring_from_geojson(
    value: &Value,
    feature: &str,
) -> Result<(LineString<f64>, Option<Vec<f64>>), RoadEnvError> {
    let positions = match value {
        Value::LineString(positions) => positions,
        Value::MultiLineString(parts) => {
            if parts.len() > 1 {
                log::debug!(
                    "feature '{feature}' has {} line parts, only the first is used",
                    parts.len()
                );
            }
            parts.first().ok_or_else(|| {
                RoadEnvError::InvalidGeometry(
                    String::from(feature),
                    String::from("empty MultiLineString"),
                )
            })?
        }
        other => {
            return Err(RoadEnvError::InvalidGeometry(
                String::from(feature),
                format!("expected a line geometry, found {}", other.type_name()),
            ))
        }
    };

    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(positions.len());
    let mut elevations: Vec<f64> = Vec::with_capacity(positions.len());
    for position in positions.iter() {
        match position.as_slice() {
            [x, y] => coords.push(Coord { x: *x, y: *y }),
            [x, y, z, ..] => {
                coords.push(Coord { x: *x, y: *y });
                elevations.push(*z);
            }
            _ => {
                return Err(RoadEnvError::InvalidGeometry(
                    String::from(feature),
                    format!("position with {} components", position.len()),
                ))
            }
        }
    }
    if coords.len() < 2 {
        return Err(RoadEnvError::InvalidGeometry(
            String::from(feature),
            format!("line has {} coordinates, at least 2 required", coords.len()),
        ));
    }
    let elevation = if elevations.len() == coords.len() {
        Some(elevations)
    } else {
        None
    };
    Ok((LineString::new(coords), elevation))
}

/// reads a GeoJSON Point (or a MultiPoint with exactly one member).
pub fn point_from_geojson(value: &Value, feature: &str) -> Result<Point<f64>, RoadEnvError> {
    let position = match value {
        Value::Point(position) => position,
        Value::MultiPoint(positions) if positions.len() == 1 => &positions[0],
        other => {
            return Err(RoadEnvError::InvalidGeometry(
                String::from(feature),
                format!("expected a single point, found {}", other.type_name()),
            ))
        }
    };
    match position.as_slice() {
        [x, y, ..] => Ok(Point::new(*x, *y)),
        _ => Err(RoadEnvError::InvalidGeometry(
            String::from(feature),
            format!("position with {} components", position.len()),
        )),
    }
}

/// reads an attribute as a number, accepting JSON numbers and numeric strings.
/// non-finite values are treated as missing.
pub fn attribute_as_f64(attributes: &Attributes, key: &str) -> Option<f64> {
    let value = match attributes.get(key)? {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// reads a distance attribute that may carry a unit suffix, such as `"7.5m"`.
/// empty strings are treated as missing.
pub fn attribute_as_metres(attributes: &Attributes, key: &str) -> Option<f64> {
    match attributes.get(key)? {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            let number = trimmed.strip_suffix('m').unwrap_or(trimmed).trim();
            number.parse::<f64>().ok().filter(|v| v.is_finite())
        }
        _ => attribute_as_f64(attributes, key),
    }
}

/// reads an attribute as text. numbers and booleans are printed, null and
/// nested values are treated as missing.
pub fn attribute_as_string(attributes: &Attributes, key: &str) -> Option<String> {
    match attributes.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// finds a feature identifier, first from the named property (if any), then
/// from the GeoJSON feature id member.
pub fn feature_identifier(feature: &Feature, id_field: Option<&str>) -> Option<String> {
    let from_property = id_field.and_then(|field| {
        feature
            .properties
            .as_ref()
            .and_then(|props| attribute_as_string(props, field))
    });
    from_property.or_else(|| match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None,
    })
}
