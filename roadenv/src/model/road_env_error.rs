use super::{feature::SegmentId, Crs};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadEnvError {
    #[error("invalid road environment configuration: {0}")]
    ConfigurationError(String),
    #[error("layer '{layer}' is in CRS {found} but the road network is in CRS {expected}")]
    CrsMismatch {
        layer: String,
        expected: Crs,
        found: Crs,
    },
    #[error("no coordinate reference system declared for layer '{0}'")]
    MissingCrs(String),
    #[error("feature {feature} in layer '{layer}' has no identifier")]
    MissingIdentifier { layer: String, feature: usize },
    #[error("feature '{feature}' is missing required attribute '{attribute}'")]
    MissingAttribute { feature: String, attribute: String },
    #[error("feature '{feature}' has invalid value for attribute '{attribute}': {value}")]
    InvalidAttributeValue {
        feature: String,
        attribute: String,
        value: String,
    },
    #[error("gradient requested but segment '{0}' has no elevation (Z) coordinates")]
    MissingElevation(SegmentId),
    #[error("invalid geometry for feature '{0}': {1}")]
    InvalidGeometry(String, String),
    #[error("segment id '{0}' appears more than once in the road network")]
    DuplicateSegmentId(SegmentId),
    #[error("buffer radius must be a positive, finite distance in meters, found {0}")]
    InvalidBufferRadius(f64),
    #[error("column '{0}' is introduced more than once in the road environment table")]
    ColumnCollision(String),
    #[error("{0}")]
    InternalError(String),
}
