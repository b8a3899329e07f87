use super::{AggregatedTable, JoinedAttributes};
use crate::model::{feature::SegmentId, layer::JoinColumn, RoadEnvError};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

/// the road network table during the join phase. every aggregated layer is
/// left-joined onto the network segments; cells stay `None` until [`fill`] runs
/// once, after all joins, and replaces every missing cell with the declared
/// default of its column.
///
/// [`fill`]: RoadEnvironmentTable::fill
#[derive(Debug, Clone)]
pub struct RoadEnvironmentTable {
    segment_ids: Vec<SegmentId>,
    lookup: HashMap<SegmentId, usize>,
    /// names already used by the network or its descriptors
    reserved: HashSet<String>,
    columns: Vec<JoinColumn>,
    /// column-major cells, one inner vector per joined column
    cells: Vec<Vec<Option<f64>>>,
}

impl RoadEnvironmentTable {
    pub fn new<'a>(
        segment_ids: impl IntoIterator<Item = &'a SegmentId>,
    ) -> Result<RoadEnvironmentTable, RoadEnvError> {
        let mut ids = vec![];
        let mut lookup = HashMap::new();
        for id in segment_ids.into_iter() {
            if lookup.insert(id.clone(), ids.len()).is_some() {
                return Err(RoadEnvError::DuplicateSegmentId(id.clone()));
            }
            ids.push(id.clone());
        }
        Ok(RoadEnvironmentTable {
            segment_ids: ids,
            lookup,
            reserved: HashSet::new(),
            columns: vec![],
            cells: vec![],
        })
    }

    /// names that joined columns may not take. fails if a name is given twice.
    pub fn with_reserved_columns<S: AsRef<str>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<RoadEnvironmentTable, RoadEnvError> {
        for name in names.into_iter() {
            let name = name.as_ref();
            if !self.reserved.insert(String::from(name)) {
                return Err(RoadEnvError::ColumnCollision(String::from(name)));
            }
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.segment_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segment_ids.is_empty()
    }

    pub fn columns(&self) -> &[JoinColumn] {
        &self.columns
    }

    /// left-joins an aggregated table onto the network by segment id. rows whose
    /// segment id is not in the network are discarded.
    ///
    /// # Returns
    ///
    /// * the number of network segments that received a row, or an error if
    ///   one of the incoming columns is already present on the table or is
    ///   reserved
    pub fn join(&mut self, table: &AggregatedTable) -> Result<usize, RoadEnvError> {
        for column in table.columns.iter() {
            let taken = self.reserved.contains(&column.name)
                || self.columns.iter().any(|c| c.name == column.name);
            if taken {
                return Err(RoadEnvError::ColumnCollision(column.name.clone()));
            }
        }
        if let Some(dup) = table.columns.iter().map(|c| &c.name).duplicates().next() {
            return Err(RoadEnvError::ColumnCollision(dup.clone()));
        }

        let offset = self.columns.len();
        for column in table.columns.iter() {
            self.columns.push(column.clone());
            self.cells.push(vec![None; self.segment_ids.len()]);
        }

        let mut n_joined = 0;
        let mut n_unknown = 0;
        for row in table.rows.iter() {
            match self.lookup.get(&row.segment_id) {
                Some(row_idx) => {
                    for (col_idx, value) in row.values.iter().enumerate() {
                        self.cells[offset + col_idx][*row_idx] = *value;
                    }
                    n_joined += 1;
                }
                None => n_unknown += 1,
            }
        }
        if n_unknown > 0 {
            log::warn!(
                "{n_unknown} aggregated rows reference segment ids not found in the network and were dropped"
            );
        }
        Ok(n_joined)
    }

    /// replaces every missing joined cell with the default of its column.
    pub fn fill(self) -> JoinedAttributes {
        let mut n_filled = 0;
        let rows = (0..self.segment_ids.len())
            .map(|row_idx| {
                self.columns
                    .iter()
                    .enumerate()
                    .map(|(col_idx, column)| match self.cells[col_idx][row_idx] {
                        Some(value) => value,
                        None => {
                            n_filled += 1;
                            column.default
                        }
                    })
                    .collect_vec()
            })
            .collect_vec();
        log::debug!(
            "filled {n_filled} missing cells across {} joined columns",
            self.columns.len()
        );
        let columns = self.columns.into_iter().map(|c| c.name).collect_vec();
        JoinedAttributes::new(self.segment_ids, columns, rows)
    }
}
