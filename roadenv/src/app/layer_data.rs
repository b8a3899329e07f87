use crate::model::{
    feature::{Attributes, LineCollection, PointCollection},
    layer::{ColumnSource, LineLayerConfig, PointLayerConfig},
    Crs,
};

/// an input layer loaded into memory, ready to be matched onto the network.
#[derive(Debug, Clone)]
pub enum LayerData {
    Points {
        config: PointLayerConfig,
        points: PointCollection,
    },
    /// line features joined spatially through their vertices
    Lines {
        config: LineLayerConfig,
        lines: LineCollection,
    },
    /// records that name their segment in an attribute, geometry unused
    KeyedRecords {
        config: LineLayerConfig,
        crs: Crs,
        records: Vec<Attributes>,
    },
}

impl LayerData {
    pub fn name(&self) -> &str {
        match self {
            LayerData::Points { config, .. } => &config.name,
            LayerData::Lines { config, .. } => &config.name,
            LayerData::KeyedRecords { config, .. } => &config.name,
        }
    }

    pub fn crs(&self) -> &Crs {
        match self {
            LayerData::Points { points, .. } => &points.crs,
            LayerData::Lines { lines, .. } => &lines.crs,
            LayerData::KeyedRecords { crs, .. } => crs,
        }
    }

    pub fn columns(&self) -> &ColumnSource {
        match self {
            LayerData::Points { config, .. } => &config.columns,
            LayerData::Lines { config, .. } => &config.columns,
            LayerData::KeyedRecords { config, .. } => &config.columns,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            LayerData::Points { points, .. } => points.len(),
            LayerData::Lines { lines, .. } => lines.len(),
            LayerData::KeyedRecords { records, .. } => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
