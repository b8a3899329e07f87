mod segment_index;

pub use segment_index::{SegmentEnvelope, SegmentIndex};
