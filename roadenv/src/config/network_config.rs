use crate::model::Crs;
use serde::{Deserialize, Serialize};

/// where the road network is read from and which of its properties carry the
/// segment identifier and length.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub file: String,
    pub crs: Option<Crs>,
    pub id_field: String,
    /// property holding the segment length in meters. when unset the planar
    /// length of the geometry is used.
    pub length_field: Option<String>,
    /// properties holding distances with a unit suffix (`"6.2m"`) that are
    /// exported as plain numbers, such as road widths
    pub metre_fields: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            file: String::new(),
            crs: None,
            id_field: String::from("TOID"),
            length_field: Some(String::from("length")),
            metre_fields: vec![],
        }
    }
}
