use crate::model::{feature::SegmentId, layer::JoinColumn};

/// reduced attribute values for one segment, aligned with the columns of the
/// table it belongs to. a `None` cell means no matched row carried a value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedAttributes {
    pub segment_id: SegmentId,
    pub values: Vec<Option<f64>>,
}

/// one row per distinct segment id, sorted by segment id.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedTable {
    pub columns: Vec<JoinColumn>,
    pub rows: Vec<AggregatedAttributes>,
}

impl AggregatedTable {
    pub fn get(&self, segment_id: &SegmentId) -> Option<&AggregatedAttributes> {
        self.rows
            .binary_search_by(|row| row.segment_id.cmp(segment_id))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn value(&self, segment_id: &SegmentId, column: &str) -> Option<f64> {
        let col_idx = self.columns.iter().position(|c| c.name == column)?;
        self.get(segment_id).and_then(|row| row.values[col_idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
