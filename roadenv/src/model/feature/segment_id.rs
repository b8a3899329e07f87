use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// stable identifier of a directed road segment, such as an OS Highways TOID.
#[derive(
    Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct SegmentId(pub String);

impl Display for SegmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SegmentId {
    fn from(value: &str) -> Self {
        SegmentId(String::from(value))
    }
}
