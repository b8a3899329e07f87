use crate::{
    algorithm::{
        descriptor::SegmentDescriptor,
        matching::{MatchSummary, MatchedPoint},
    },
    model::{
        feature::{Attributes, SegmentNetwork},
        table::JoinedAttributes,
    },
};
use serde_json::{json, Value};

/// descriptor columns of the exported table, in export order.
pub const DESCRIPTOR_COLUMNS: [&str; 8] = [
    "gradient",
    "sinuosity",
    "bearing",
    "relative_location",
    "start_x",
    "start_y",
    "end_x",
    "end_y",
];

/// the WKT geometry column closing each row of the exported table.
pub const GEOMETRY_COLUMN: &str = "geometry";

/// matched points of one point layer.
#[derive(Debug, Clone)]
pub struct MatchedLayer {
    pub name: String,
    pub points: Vec<MatchedPoint>,
    pub summary: MatchSummary,
}

/// how many network segments received values from a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSummary {
    pub name: String,
    pub n_features: usize,
    pub n_rows: usize,
    pub n_segments: usize,
}

/// result of a road environment run. all per-segment vectors are aligned with
/// `network.features`.
#[derive(Debug, Clone)]
pub struct RoadEnvironment {
    pub network: SegmentNetwork,
    /// property name that carries the segment identifier in exported data
    pub id_field: String,
    pub descriptors: Vec<SegmentDescriptor>,
    pub metre_fields: Vec<String>,
    pub metres: Vec<Vec<Option<f64>>>,
    pub attributes: JoinedAttributes,
    pub matched_layers: Vec<MatchedLayer>,
    pub layer_summaries: Vec<LayerSummary>,
}

impl RoadEnvironment {
    /// names of the derived columns, in export order: descriptors, parsed
    /// distances, then joined layer columns.
    pub fn column_names(&self) -> Vec<String> {
        DESCRIPTOR_COLUMNS
            .iter()
            .map(|c| String::from(*c))
            .chain(self.metre_fields.iter().cloned())
            .chain(self.attributes.columns.iter().cloned())
            .collect()
    }

    /// derived values of one segment, aligned with [`RoadEnvironment::column_names`].
    /// `None` marks an undefined descriptor or an unparseable distance.
    pub fn derived_values(&self, segment_idx: usize) -> Vec<Option<f64>> {
        let mut values = vec![];
        if let Some(d) = self.descriptors.get(segment_idx) {
            values.extend([
                d.gradient,
                d.sinuosity,
                Some(d.bearing as f64),
                Some(d.relative_location as f64),
                Some(d.start_x),
                Some(d.start_y),
                Some(d.end_x),
                Some(d.end_y),
            ]);
        }
        if let Some(m) = self.metres.get(segment_idx) {
            values.extend(m.iter().copied());
        }
        if let Some(segment) = self.network.features.get(segment_idx) {
            if let Some(row) = self.attributes.row(&segment.id) {
                values.extend(row.iter().map(|v| Some(*v)));
            }
        }
        values
    }

    /// the original properties of a segment overlaid with its derived values.
    pub fn segment_properties(&self, segment_idx: usize) -> Attributes {
        let mut properties = self
            .network
            .features
            .get(segment_idx)
            .map(|s| s.attributes.clone())
            .unwrap_or_default();
        let derived = self.column_names().into_iter().zip(self.derived_values(segment_idx));
        for (name, value) in derived {
            let value = match value {
                Some(v) => json!(v),
                None => Value::Null,
            };
            properties.insert(name, value);
        }
        properties
    }
}
