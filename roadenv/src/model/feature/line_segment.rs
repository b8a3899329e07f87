use super::{feature_ops, Attributes, SegmentId};
use crate::model::RoadEnvError;
use geo::{Coord, Euclidean, Length, LineString};
use geojson::Feature;

/// a directed road segment, normalized at ingestion to a single ordered
/// coordinate sequence with optional per-vertex elevation.
#[derive(Debug, Clone)]
pub struct LineSegment {
    pub id: SegmentId,
    pub linestring: LineString<f64>,
    pub elevation: Option<Vec<f64>>,
    /// segment length in meters as declared by the source data
    pub length: f64,
    pub attributes: Attributes,
}

impl LineSegment {
    pub fn new(
        id: SegmentId,
        linestring: LineString<f64>,
        elevation: Option<Vec<f64>>,
        length: f64,
        attributes: Attributes,
    ) -> Result<LineSegment, RoadEnvError> {
        if linestring.0.len() < 2 {
            return Err(RoadEnvError::InvalidGeometry(
                id.to_string(),
                format!(
                    "line has {} coordinates, at least 2 required",
                    linestring.0.len()
                ),
            ));
        }
        if let Some(z) = &elevation {
            if z.len() != linestring.0.len() {
                return Err(RoadEnvError::InvalidGeometry(
                    id.to_string(),
                    format!(
                        "{} elevations provided for {} coordinates",
                        z.len(),
                        linestring.0.len()
                    ),
                ));
            }
        }
        if !length.is_finite() || length < 0.0 {
            return Err(RoadEnvError::InvalidAttributeValue {
                feature: id.to_string(),
                attribute: String::from("length"),
                value: length.to_string(),
            });
        }
        Ok(LineSegment {
            id,
            linestring,
            elevation,
            length,
            attributes,
        })
    }

    /// builds a segment from a GeoJSON feature.
    ///
    /// # Arguments
    ///
    /// * `feature`      - source feature
    /// * `index`        - position of the feature in its collection, for error reporting
    /// * `layer`        - name of the source layer, for error reporting
    /// * `id_field`     - property holding the segment identifier (falls back to the feature id)
    /// * `length_field` - property holding the length in meters. when absent, the
    ///   planar length of the geometry is used instead, which is only appropriate
    ///   for layers that do not feed the length-based descriptors.
    pub fn from_geojson(
        feature: &Feature,
        index: usize,
        layer: &str,
        id_field: Option<&str>,
        length_field: Option<&str>,
    ) -> Result<LineSegment, RoadEnvError> {
        let id = feature_ops::feature_identifier(feature, id_field)
            .map(SegmentId)
            .ok_or_else(|| RoadEnvError::MissingIdentifier {
                layer: String::from(layer),
                feature: index,
            })?;
        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            RoadEnvError::InvalidGeometry(id.to_string(), String::from("feature has no geometry"))
        })?;
        let (linestring, elevation) =
            feature_ops::linestring_from_geojson(&geometry.value, &id.0)?;
        let attributes = feature.properties.clone().unwrap_or_default();
        let length = match length_field {
            Some(field) => feature_ops::attribute_as_f64(&attributes, field).ok_or_else(|| {
                RoadEnvError::MissingAttribute {
                    feature: id.to_string(),
                    attribute: String::from(field),
                }
            })?,
            None => Euclidean.length(&linestring),
        };
        LineSegment::new(id, linestring, elevation, length, attributes)
    }

    pub fn start(&self) -> Coord<f64> {
        self.linestring.0[0]
    }

    pub fn end(&self) -> Coord<f64> {
        self.linestring.0[self.linestring.0.len() - 1]
    }

    /// elevation at the first and last vertex, if the segment has 3D coordinates.
    pub fn end_elevations(&self) -> Option<(f64, f64)> {
        match self.elevation.as_deref() {
            Some([first, .., last]) => Some((*first, *last)),
            _ => None,
        }
    }
}
