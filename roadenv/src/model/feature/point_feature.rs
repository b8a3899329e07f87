use super::{feature_ops, Attributes, FeatureId};
use crate::model::RoadEnvError;
use geo::Point;
use geojson::Feature;

/// a point-type infrastructure feature such as a crossing or bus stop.
#[derive(Debug, Clone)]
pub struct PointFeature {
    pub id: FeatureId,
    pub point: Point<f64>,
    pub attributes: Attributes,
}

impl PointFeature {
    pub fn new(id: FeatureId, point: Point<f64>, attributes: Attributes) -> PointFeature {
        PointFeature {
            id,
            point,
            attributes,
        }
    }

    /// builds a point from a GeoJSON feature. when no identifier is present the
    /// position of the feature in its collection becomes its identifier.
    pub fn from_geojson(
        feature: &Feature,
        index: usize,
        id_field: Option<&str>,
    ) -> Result<PointFeature, RoadEnvError> {
        let id = feature_ops::feature_identifier(feature, id_field)
            .map(FeatureId)
            .unwrap_or_else(|| FeatureId(index.to_string()));
        let geometry = feature.geometry.as_ref().ok_or_else(|| {
            RoadEnvError::InvalidGeometry(id.to_string(), String::from("feature has no geometry"))
        })?;
        let point = feature_ops::point_from_geojson(&geometry.value, &id.0)?;
        let attributes = feature.properties.clone().unwrap_or_default();
        Ok(PointFeature::new(id, point, attributes))
    }
}
