use crate::model::feature::SegmentId;
use std::collections::HashMap;

/// the joined columns of the road network table after the fill step. every
/// segment has a value in every column.
#[derive(Debug, Clone)]
pub struct JoinedAttributes {
    pub segment_ids: Vec<SegmentId>,
    pub columns: Vec<String>,
    /// row-major, aligned with `segment_ids` and `columns`
    pub rows: Vec<Vec<f64>>,
    lookup: HashMap<SegmentId, usize>,
}

impl JoinedAttributes {
    pub fn new(
        segment_ids: Vec<SegmentId>,
        columns: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> JoinedAttributes {
        let lookup = segment_ids
            .iter()
            .enumerate()
            .map(|(idx, id)| (id.clone(), idx))
            .collect();
        JoinedAttributes {
            segment_ids,
            columns,
            rows,
            lookup,
        }
    }

    pub fn row(&self, segment_id: &SegmentId) -> Option<&[f64]> {
        self.lookup
            .get(segment_id)
            .map(|idx| self.rows[*idx].as_slice())
    }

    pub fn value(&self, segment_id: &SegmentId, column: &str) -> Option<f64> {
        let col_idx = self.columns.iter().position(|c| c == column)?;
        self.row(segment_id).map(|row| row[col_idx])
    }
}
