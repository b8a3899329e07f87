use crate::model::feature::{FeatureId, SegmentId};
use geo::Point;

/// association of one point feature with one road segment.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub point_id: FeatureId,
    /// position of the point in its input collection
    pub point_index: usize,
    pub segment_id: SegmentId,
    /// position of the segment in the road network
    pub segment_index: usize,
    /// the point projected onto the segment geometry
    pub snapped: Point<f64>,
    /// planar distance between the point and the segment, in meters
    pub snap_distance: f64,
    /// distance along the segment from its start to the snapped point, in meters
    pub arc_position: f64,
}
