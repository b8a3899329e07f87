use super::NetworkConfig;
use crate::model::{
    layer::{LineJoin, LineLayerConfig, PointLayerConfig},
    Crs, RoadEnvCliError, RoadEnvError,
};
use geo::Coord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// defines the inputs and behaviors of a road environment run
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct RoadEnvConfiguration {
    /// planar CRS assumed for any input that does not declare its own
    pub crs: Crs,
    pub network: NetworkConfig,
    /// maximum snap distance in meters
    pub buffer_radius: f64,
    /// keep only the closest segment for each point
    pub select_first_only: bool,
    /// [x, y] that relative location is measured from
    pub reference_point: [f64; 2],
    pub compute_gradient: bool,
    pub point_layers: Vec<PointLayerConfig>,
    pub line_layers: Vec<LineLayerConfig>,
    pub overwrite: bool,
}

impl Default for RoadEnvConfiguration {
    fn default() -> Self {
        Self {
            crs: Crs::default(),
            network: NetworkConfig::default(),
            buffer_radius: 15.0,
            select_first_only: true,
            reference_point: [529028.0, 181223.0],
            compute_gradient: true,
            point_layers: vec![],
            line_layers: vec![],
            overwrite: false,
        }
    }
}

impl RoadEnvConfiguration {
    pub fn reference_coord(&self) -> Coord<f64> {
        let [x, y] = self.reference_point;
        Coord { x, y }
    }

    pub fn point_layer_buffer(&self, layer: &PointLayerConfig) -> f64 {
        layer.buffer_radius.unwrap_or(self.buffer_radius)
    }

    pub fn point_layer_select_first_only(&self, layer: &PointLayerConfig) -> bool {
        layer.select_first_only.unwrap_or(self.select_first_only)
    }

    /// checks the configuration before any data is read: buffer radii must be
    /// positive, the reference point finite and layer names unique.
    pub fn validate(&self) -> Result<(), RoadEnvError> {
        let radii = std::iter::once(("run", Some(self.buffer_radius)))
            .chain(
                self.point_layers
                    .iter()
                    .map(|l| (l.name.as_str(), l.buffer_radius)),
            )
            .chain(self.line_layers.iter().map(|l| match l.join {
                LineJoin::Spatial { buffer_radius } => (l.name.as_str(), buffer_radius),
                LineJoin::Attribute { .. } => (l.name.as_str(), None),
            }));
        for (name, radius) in radii {
            if let Some(r) = radius {
                if !(r.is_finite() && r > 0.0) {
                    log::error!("buffer radius {r} configured for '{name}' is invalid");
                    return Err(RoadEnvError::InvalidBufferRadius(r));
                }
            }
        }
        if !self.reference_point.iter().all(|v| v.is_finite()) {
            return Err(RoadEnvError::ConfigurationError(format!(
                "reference point {:?} is not finite",
                self.reference_point
            )));
        }
        let names = self
            .point_layers
            .iter()
            .map(|l| &l.name)
            .chain(self.line_layers.iter().map(|l| &l.name));
        if let Some(dup) = names.duplicates().next() {
            return Err(RoadEnvError::ConfigurationError(format!(
                "layer name '{dup}' is used more than once"
            )));
        }
        Ok(())
    }
}

impl TryFrom<&String> for RoadEnvConfiguration {
    type Error = RoadEnvCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let read = |f: &String| {
            std::fs::read_to_string(f).map_err(|e| {
                RoadEnvCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })
        };
        if f.ends_with(".toml") {
            let s = read(f)?;
            toml::from_str(&s).map_err(|e| {
                RoadEnvCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = read(f)?;
            serde_json::from_str(&s).map_err(|e| {
                RoadEnvCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(RoadEnvCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
