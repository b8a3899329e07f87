mod column_encoding;
mod column_source;
mod crossing_type;
mod join_column;
mod layer_config;
mod reduction_policy;

pub use column_encoding::ColumnEncoding;
pub use column_source::ColumnSource;
pub use crossing_type::CrossingType;
pub use join_column::JoinColumn;
pub use layer_config::{LineJoin, LineLayerConfig, PointLayerConfig};
pub use reduction_policy::ReductionPolicy;
