//! per-segment geometric descriptors: gradient, sinuosity, bearing, relative
//! location and rounded key coordinates.
pub mod descriptor_ops;
mod segment_descriptor;

pub use descriptor_ops::OXFORD_CIRCUS;
pub use segment_descriptor::{describe_segments, SegmentDescriptor};
