use super::{road_environment::GEOMETRY_COLUMN, MatchedLayer, RoadEnvironment};
use crate::model::{feature::Attributes, Crs, RoadEnvCliError};
use csv::QuoteStyle;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use kdam::tqdm;
use serde_json::json;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use wkt::ToWkt;

pub trait RoadEnvWriter {
    /// writes the matched point layers, the descriptor table and the joined
    /// road environment table into a shared directory.
    fn write_outputs(&self, output_directory: &Path, overwrite: bool)
        -> Result<(), RoadEnvCliError>;
}

pub mod filenames {
    pub const SEGMENT_DESCRIPTORS: &str = "segment_descriptors.csv";
    pub const ROAD_ENVIRONMENT_GEOJSON: &str = "road_environment.geojson";
    pub const ROAD_ENVIRONMENT_CSV: &str = "road_environment.csv";

    pub fn matched_layer(layer: &str) -> String {
        format!("{layer}_matched.geojson")
    }
}

impl RoadEnvWriter for RoadEnvironment {
    fn write_outputs(
        &self,
        output_directory: &Path,
        overwrite: bool,
    ) -> Result<(), RoadEnvCliError> {
        let layer_paths = self
            .matched_layers
            .iter()
            .map(|layer| output_directory.join(filenames::matched_layer(&layer.name)))
            .collect::<Vec<_>>();
        let descriptor_path = output_directory.join(filenames::SEGMENT_DESCRIPTORS);
        let table_path = output_directory.join(filenames::ROAD_ENVIRONMENT_CSV);
        let geojson_path = output_directory.join(filenames::ROAD_ENVIRONMENT_GEOJSON);
        if !overwrite {
            let fixed = [&descriptor_path, &table_path, &geojson_path];
            ensure_absent(layer_paths.iter().chain(fixed))?;
        }
        if !output_directory.is_dir() {
            std::fs::create_dir_all(output_directory)?;
        }

        for (layer, path) in self.matched_layers.iter().zip(layer_paths.iter()) {
            let collection = matched_layer_collection(layer, &self.id_field, &self.network.crs);
            write_geojson(path, &collection)?;
            log::info!("wrote {} matched points to {}", layer.points.len(), path.display());
        }

        let mut descriptor_writer = create_writer(&descriptor_path)?;
        for descriptor in self.descriptors.iter() {
            descriptor_writer.serialize(descriptor)?;
        }
        descriptor_writer.flush()?;

        let mut table_writer = create_writer(&table_path)?;
        let mut header = vec![self.id_field.clone()];
        header.extend(self.column_names());
        header.push(String::from(GEOMETRY_COLUMN));
        table_writer.write_record(&header)?;
        let iter = tqdm!(
            self.network.features.iter().enumerate(),
            total = self.network.len(),
            desc = "write road environment table"
        );
        for (idx, segment) in iter {
            let mut record = vec![segment.id.to_string()];
            record.extend(
                self.derived_values(idx)
                    .into_iter()
                    .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
            );
            record.push(segment.linestring.to_wkt().to_string());
            table_writer.write_record(&record)?;
        }
        eprintln!();
        table_writer.flush()?;

        let features = self
            .network
            .features
            .iter()
            .enumerate()
            .map(|(idx, segment)| {
                let positions = segment
                    .linestring
                    .0
                    .iter()
                    .enumerate()
                    .map(|(i, c)| match segment.elevation.as_ref().and_then(|z| z.get(i)) {
                        Some(z) => vec![c.x, c.y, *z],
                        None => vec![c.x, c.y],
                    })
                    .collect();
                let mut properties = self.segment_properties(idx);
                properties.insert(self.id_field.clone(), json!(segment.id.0));
                feature(Value::LineString(positions), properties)
            })
            .collect();
        write_geojson(&geojson_path, &collection(features, &self.network.crs))?;
        log::info!(
            "wrote road environment for {} segments to {}",
            self.network.len(),
            output_directory.display()
        );
        Ok(())
    }
}

fn matched_layer_collection(layer: &MatchedLayer, id_field: &str, crs: &Crs) -> FeatureCollection {
    let features = layer
        .points
        .iter()
        .map(|m| {
            let mut properties = m.attributes.clone();
            properties.insert(String::from(id_field), json!(m.segment_id.0));
            properties.insert(String::from("snap_distance"), json!(m.snap_distance));
            properties.insert(String::from("arc_position"), json!(m.arc_position));
            let mut f = feature(
                Value::Point(vec![m.snapped.x(), m.snapped.y()]),
                properties,
            );
            f.id = Some(geojson::feature::Id::String(m.point_id.0.clone()));
            f
        })
        .collect();
    collection(features, crs)
}

fn feature(value: Value, properties: Attributes) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

/// a collection tagged with the legacy named CRS member so that desktop GIS
/// tools keep the projected coordinates in place.
fn collection(features: Vec<Feature>, crs: &Crs) -> FeatureCollection {
    let mut foreign_members = serde_json::Map::new();
    foreign_members.insert(
        String::from("crs"),
        json!({ "type": "name", "properties": { "name": crs.name() } }),
    );
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(foreign_members),
    }
}

/// fails on the first path that already exists. runs before any output is
/// written so that a refused run leaves the directory untouched.
fn ensure_absent<'a>(
    mut paths: impl Iterator<Item = &'a PathBuf>,
) -> Result<(), RoadEnvCliError> {
    match paths.find(|path| path.exists()) {
        Some(path) => Err(RoadEnvCliError::OutputExists(
            path.to_string_lossy().to_string(),
        )),
        None => Ok(()),
    }
}

fn create_writer(path: &Path) -> Result<csv::Writer<File>, RoadEnvCliError> {
    let file = File::create(path)?;
    let writer = csv::WriterBuilder::new()
        .has_headers(true)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(file);
    Ok(writer)
}

fn write_geojson(path: &Path, collection: &FeatureCollection) -> Result<(), RoadEnvCliError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;
    Ok(())
}
