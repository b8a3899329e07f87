use super::LayerData;
use crate::{
    config::RoadEnvConfiguration,
    model::{
        feature::{
            feature_ops, FeatureSet, LineCollection, LineSegment, PointCollection, PointFeature,
            SegmentNetwork,
        },
        layer::{LineJoin, LineLayerConfig, PointLayerConfig},
        Crs, RoadEnvCliError, RoadEnvError,
    },
};
use geojson::{feature::Id, FeatureCollection, GeoJson};
use kdam::tqdm;
use std::path::Path;

/// reads a GeoJSON file as a feature collection. a single feature is read as a
/// collection of one.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection, RoadEnvCliError> {
    let filename = path.to_string_lossy().to_string();
    let contents = std::fs::read_to_string(path)
        .map_err(|e| RoadEnvCliError::InputError(filename.clone(), e.to_string()))?;
    let geojson = contents.parse::<GeoJson>()?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(feature) => Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => Err(RoadEnvCliError::InputError(
            filename,
            String::from("expected a FeatureCollection, found a bare geometry"),
        )),
    }
}

/// the CRS named by the legacy `crs` member of a collection, if any.
pub fn declared_crs(collection: &FeatureCollection) -> Option<Crs> {
    collection
        .foreign_members
        .as_ref()?
        .get("crs")?
        .get("properties")?
        .get("name")?
        .as_str()
        .map(Crs::new)
        .filter(|crs| !crs.is_empty())
}

/// picks the CRS of a layer: the file's own declaration wins over the layer
/// configuration, which wins over the run configuration. fails when none of
/// them names a reference system.
fn resolve_crs(
    collection: &FeatureCollection,
    layer_crs: Option<&Crs>,
    run_crs: &Crs,
    layer: &str,
) -> Result<Crs, RoadEnvError> {
    let layer_crs = layer_crs.filter(|crs| !crs.is_empty());
    let crs = match (declared_crs(collection), layer_crs) {
        (Some(declared), Some(configured)) if &declared != configured => {
            log::warn!(
                "layer '{layer}' file declares CRS {declared} but is configured as {configured}, using {declared}"
            );
            declared
        }
        (Some(declared), _) => declared,
        (None, Some(configured)) => configured.clone(),
        (None, None) => run_crs.clone(),
    };
    if crs.is_empty() {
        Err(RoadEnvError::MissingCrs(String::from(layer)))
    } else {
        Ok(crs)
    }
}

pub fn read_network(conf: &RoadEnvConfiguration) -> Result<SegmentNetwork, RoadEnvCliError> {
    let network = &conf.network;
    if network.file.is_empty() {
        return Err(RoadEnvCliError::ConfigurationError(String::from(
            "no road network file configured",
        )));
    }
    log::info!("reading road network from {}", network.file);
    let collection = read_feature_collection(Path::new(&network.file))?;
    let crs = resolve_crs(&collection, network.crs.as_ref(), &conf.crs, "network")?;
    let iter = tqdm!(
        collection.features.iter().enumerate(),
        total = collection.features.len(),
        desc = "read road network"
    );
    let segments = iter
        .map(|(idx, feature)| {
            LineSegment::from_geojson(
                feature,
                idx,
                "network",
                Some(&network.id_field),
                network.length_field.as_deref(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    eprintln!();
    let n_flat = segments.iter().filter(|s| s.elevation.is_none()).count();
    log::info!(
        "read {} segments in {crs}, {n_flat} without elevation",
        segments.len()
    );
    Ok(FeatureSet::new("network", crs, segments))
}

pub fn read_point_layer(
    layer: &PointLayerConfig,
    conf: &RoadEnvConfiguration,
) -> Result<PointCollection, RoadEnvCliError> {
    log::info!("reading point layer '{}' from {}", layer.name, layer.file);
    let collection = read_feature_collection(Path::new(&layer.file))?;
    let crs = resolve_crs(&collection, layer.crs.as_ref(), &conf.crs, &layer.name)?;
    let points = collection
        .features
        .iter()
        .enumerate()
        .map(|(idx, feature)| PointFeature::from_geojson(feature, idx, layer.id_field.as_deref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FeatureSet::new(&layer.name, crs, points))
}

/// reads a line layer. spatially joined layers become line collections, and
/// features without an identifier are named by their position. attribute
/// joined layers keep only their properties.
pub fn read_line_layer(
    layer: &LineLayerConfig,
    conf: &RoadEnvConfiguration,
) -> Result<LayerData, RoadEnvCliError> {
    log::info!("reading line layer '{}' from {}", layer.name, layer.file);
    let collection = read_feature_collection(Path::new(&layer.file))?;
    let crs = resolve_crs(&collection, layer.crs.as_ref(), &conf.crs, &layer.name)?;
    match layer.join {
        LineJoin::Attribute { .. } => {
            let records = collection
                .features
                .into_iter()
                .map(|f| f.properties.unwrap_or_default())
                .collect();
            Ok(LayerData::KeyedRecords {
                config: layer.clone(),
                crs,
                records,
            })
        }
        LineJoin::Spatial { .. } => {
            let id_field = layer.id_field.as_deref();
            let lines = collection
                .features
                .into_iter()
                .enumerate()
                .map(|(idx, mut feature)| {
                    if feature_ops::feature_identifier(&feature, id_field).is_none() {
                        feature.id = Some(Id::String(idx.to_string()));
                    }
                    LineSegment::from_geojson(&feature, idx, &layer.name, id_field, None)
                })
                .collect::<Result<Vec<_>, _>>()?;
            let lines: LineCollection = FeatureSet::new(&layer.name, crs, lines);
            Ok(LayerData::Lines {
                config: layer.clone(),
                lines,
            })
        }
    }
}

/// reads every configured layer, point layers first.
pub fn read_layers(conf: &RoadEnvConfiguration) -> Result<Vec<LayerData>, RoadEnvCliError> {
    let mut layers = vec![];
    for layer in conf.point_layers.iter() {
        let points = read_point_layer(layer, conf)?;
        layers.push(LayerData::Points {
            config: layer.clone(),
            points,
        });
    }
    for layer in conf.line_layers.iter() {
        layers.push(read_line_layer(layer, conf)?);
    }
    Ok(layers)
}
