use crate::model::feature::SegmentId;
use std::collections::BTreeMap;

/// one matched attribute row, keyed by the segment it was matched to.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedRow {
    pub key: SegmentId,
    pub values: BTreeMap<String, f64>,
}

impl KeyedRow {
    pub fn new(key: SegmentId, values: BTreeMap<String, f64>) -> KeyedRow {
        KeyedRow { key, values }
    }
}
