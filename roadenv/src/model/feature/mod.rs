pub mod feature_ops;
mod feature_id;
mod feature_set;
mod line_segment;
mod point_feature;
mod segment_id;

pub use feature_id::FeatureId;
pub use feature_set::FeatureSet;
pub use line_segment::LineSegment;
pub use point_feature::PointFeature;
pub use segment_id::SegmentId;

/// attribute columns carried by a feature, as found in the source data.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// the road network that all other layers are matched against.
pub type SegmentNetwork = FeatureSet<LineSegment>;
pub type PointCollection = FeatureSet<PointFeature>;
pub type LineCollection = FeatureSet<LineSegment>;
