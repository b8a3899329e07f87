use super::MatchResult;
use crate::model::feature::{Attributes, FeatureId, PointFeature, SegmentId};
use geo::Point;

/// a point feature with its original attributes and the segment it matched.
/// with the many-to-many policy a point appears once per matched segment.
#[derive(Debug, Clone)]
pub struct MatchedPoint {
    pub point_id: FeatureId,
    pub attributes: Attributes,
    pub segment_id: SegmentId,
    pub snapped: Point<f64>,
    pub snap_distance: f64,
    pub arc_position: f64,
}

impl MatchedPoint {
    pub fn new(result: &MatchResult, feature: &PointFeature) -> MatchedPoint {
        MatchedPoint {
            point_id: result.point_id.clone(),
            attributes: feature.attributes.clone(),
            segment_id: result.segment_id.clone(),
            snapped: result.snapped,
            snap_distance: result.snap_distance,
            arc_position: result.arc_position,
        }
    }

    /// pairs each match with the feature it was computed for.
    pub fn from_results(results: &[MatchResult], features: &[PointFeature]) -> Vec<MatchedPoint> {
        results
            .iter()
            .filter_map(|r| {
                let feature = features.get(r.point_index)?;
                Some(MatchedPoint::new(r, feature))
            })
            .collect()
    }
}
