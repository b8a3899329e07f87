use super::{CrossingType, JoinColumn};
use crate::model::feature::{feature_ops, Attributes};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// declares how the features of a layer produce the columns that are joined
/// onto the road network table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ColumnSource {
    /// columns read directly from feature attributes
    Declared { columns: Vec<JoinColumn> },
    /// one-hot crossing classes taken from a crossing tag attribute
    CrossingType {
        #[serde(default = "ColumnSource::default_crossing_field")]
        tag_field: String,
    },
    /// a single flag set for every segment with at least one matched feature
    Presence { column: String },
}

impl ColumnSource {
    fn default_crossing_field() -> String {
        String::from("crossing")
    }

    pub fn join_columns(&self) -> Vec<JoinColumn> {
        match self {
            ColumnSource::Declared { columns } => columns.clone(),
            ColumnSource::CrossingType { .. } => CrossingType::ALL
                .iter()
                .map(|c| JoinColumn::flag(c.column_name()))
                .collect_vec(),
            ColumnSource::Presence { column } => vec![JoinColumn::flag(column)],
        }
    }

    /// computes the column values contributed by one matched feature. columns
    /// with no value for this feature are omitted.
    pub fn derive_values(&self, attributes: &Attributes) -> BTreeMap<String, f64> {
        match self {
            ColumnSource::Declared { columns } => columns
                .iter()
                .filter_map(|c| {
                    c.encoding
                        .encode(attributes, &c.name)
                        .map(|v| (c.name.clone(), v))
                })
                .collect(),
            ColumnSource::CrossingType { tag_field } => {
                let tag = feature_ops::attribute_as_string(attributes, tag_field);
                let class = CrossingType::from_tag(tag.as_deref());
                CrossingType::ALL
                    .iter()
                    .map(|c| {
                        let value = if *c == class { 1.0 } else { 0.0 };
                        (String::from(c.column_name()), value)
                    })
                    .collect()
            }
            ColumnSource::Presence { column } => BTreeMap::from([(column.clone(), 1.0)]),
        }
    }
}
