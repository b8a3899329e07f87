use super::ColumnSource;
use crate::model::Crs;
use serde::{Deserialize, Serialize};

/// a point layer (crossings, bus stops, traffic calming) to match onto the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointLayerConfig {
    pub name: String,
    pub file: String,
    pub crs: Option<Crs>,
    pub id_field: Option<String>,
    /// overrides the run-level buffer radius for this layer
    pub buffer_radius: Option<f64>,
    /// overrides the run-level closest-only policy for this layer
    pub select_first_only: Option<bool>,
    pub columns: ColumnSource,
}

/// how a line layer is associated with road network segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum LineJoin {
    /// vertices of each line are snapped onto the nearest segment
    Spatial { buffer_radius: Option<f64> },
    /// the layer already carries the segment id in an attribute
    Attribute { key_field: String },
}

/// a line layer (cycle lanes, bus lanes) whose attributes are transferred
/// onto the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineLayerConfig {
    pub name: String,
    pub file: String,
    pub crs: Option<Crs>,
    pub id_field: Option<String>,
    pub join: LineJoin,
    pub columns: ColumnSource,
}
