use super::{ColumnEncoding, ReductionPolicy};
use serde::{Deserialize, Serialize};

/// a column introduced onto the road network table by a join, with its
/// encoding, reduction and the value used for segments that received no match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinColumn {
    pub name: String,
    #[serde(default)]
    pub encoding: ColumnEncoding,
    #[serde(default)]
    pub reduction: ReductionPolicy,
    #[serde(default)]
    pub default: f64,
}

impl JoinColumn {
    pub fn new(name: &str, encoding: ColumnEncoding, reduction: ReductionPolicy) -> JoinColumn {
        JoinColumn {
            name: String::from(name),
            encoding,
            reduction,
            default: 0.0,
        }
    }

    /// an OR-reduced 0/1 column
    pub fn flag(name: &str) -> JoinColumn {
        JoinColumn::new(name, ColumnEncoding::Flag, ReductionPolicy::Or)
    }
}
