use crate::model::{
    feature::SegmentId,
    layer::JoinColumn,
    table::{AggregatedAttributes, AggregatedTable, KeyedRow},
    RoadEnvError,
};
use itertools::Itertools;
use std::collections::BTreeMap;

/// reduces matched attribute rows into one row per segment, using the
/// reduction policy declared on each column.
#[derive(Debug, Clone)]
pub struct AttributeAggregator {
    columns: Vec<JoinColumn>,
}

impl AttributeAggregator {
    pub fn new(columns: Vec<JoinColumn>) -> Result<AttributeAggregator, RoadEnvError> {
        if let Some(dup) = columns.iter().map(|c| &c.name).duplicates().next() {
            return Err(RoadEnvError::ColumnCollision(dup.clone()));
        }
        Ok(AttributeAggregator { columns })
    }

    pub fn columns(&self) -> &[JoinColumn] {
        &self.columns
    }

    /// groups `rows` by segment id and folds every column of each group.
    ///
    /// rows are visited in input order, so the `first` policy keeps the value
    /// of the earliest row that has one. values for undeclared columns are
    /// ignored. a column with no value in any row of a group stays `None`
    /// until the table is filled.
    pub fn aggregate(&self, rows: &[KeyedRow]) -> AggregatedTable {
        let mut groups: BTreeMap<&SegmentId, Vec<Option<f64>>> = BTreeMap::new();
        for row in rows.iter() {
            let acc = groups
                .entry(&row.key)
                .or_insert_with(|| vec![None; self.columns.len()]);
            for (cell, column) in acc.iter_mut().zip(self.columns.iter()) {
                if let Some(value) = row.values.get(&column.name) {
                    *cell = Some(column.reduction.reduce(*cell, *value));
                }
            }
        }
        let rows = groups
            .into_iter()
            .map(|(segment_id, values)| AggregatedAttributes {
                segment_id: segment_id.clone(),
                values,
            })
            .collect_vec();
        log::debug!(
            "aggregated matched rows onto {} segments across columns [{}]",
            rows.len(),
            self.columns.iter().map(|c| format!("{}:{}", c.name, c.reduction)).join(", ")
        );
        AggregatedTable {
            columns: self.columns.clone(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AttributeAggregator;
    use crate::model::{
        feature::SegmentId,
        layer::{ColumnEncoding, JoinColumn, ReductionPolicy},
        table::{KeyedRow, RoadEnvironmentTable},
        RoadEnvError,
    };
    use std::collections::BTreeMap;

    fn row(key: &str, values: &[(&str, f64)]) -> KeyedRow {
        let values = values
            .iter()
            .map(|(k, v)| (String::from(*k), *v))
            .collect::<BTreeMap<_, _>>();
        KeyedRow::new(SegmentId::from(key), values)
    }

    #[test]
    fn test_or_aggregation() {
        let aggregator = AttributeAggregator::new(vec![
            JoinColumn::flag("TRF_HUMP"),
            JoinColumn::flag("TRF_RAISED"),
        ])
        .expect("unique columns");
        let rows = vec![
            row("A", &[("TRF_HUMP", 1.0), ("TRF_RAISED", 0.0)]),
            row("A", &[("TRF_HUMP", 0.0), ("TRF_RAISED", 1.0)]),
        ];
        let table = aggregator.aggregate(&rows);
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(&SegmentId::from("A"), "TRF_HUMP"), Some(1.0));
        assert_eq!(table.value(&SegmentId::from("A"), "TRF_RAISED"), Some(1.0));
    }

    #[test]
    fn test_max_and_first() {
        let aggregator = AttributeAggregator::new(vec![
            JoinColumn::new("lanes", ColumnEncoding::Numeric, ReductionPolicy::Max),
            JoinColumn::new("width", ColumnEncoding::Numeric, ReductionPolicy::First),
        ])
        .expect("unique columns");
        let rows = vec![
            row("B", &[("lanes", 2.0)]),
            row("A", &[("lanes", 1.0), ("width", 3.5)]),
            row("B", &[("lanes", 3.0), ("width", 6.0)]),
            row("B", &[("width", 7.0)]),
        ];
        let table = aggregator.aggregate(&rows);
        assert_eq!(table.value(&SegmentId::from("B"), "lanes"), Some(3.0));
        assert_eq!(table.value(&SegmentId::from("B"), "width"), Some(6.0));
        assert_eq!(table.value(&SegmentId::from("A"), "width"), Some(3.5));
    }

    #[test]
    fn test_zero_rows_then_fill() {
        let columns = vec![JoinColumn::flag("bus_stop"), JoinColumn::flag("marked_crossing")];
        let aggregator = AttributeAggregator::new(columns).expect("unique columns");
        let table = aggregator.aggregate(&[]);
        assert!(table.is_empty());

        let ids = vec![SegmentId::from("A"), SegmentId::from("B")];
        let mut network = RoadEnvironmentTable::new(&ids).expect("unique ids");
        assert_eq!(network.join(&table).expect("join"), 0);
        let joined = network.fill();
        for id in ids.iter() {
            assert_eq!(joined.row(id), Some(&[0.0, 0.0][..]));
        }
    }

    #[test]
    fn test_duplicate_columns_rejected() {
        let columns = vec![JoinColumn::flag("bus_stop"), JoinColumn::flag("bus_stop")];
        match AttributeAggregator::new(columns) {
            Err(RoadEnvError::ColumnCollision(name)) => assert_eq!(name, "bus_stop"),
            other => panic!("expected column collision, found {other:?}"),
        }
    }
}
