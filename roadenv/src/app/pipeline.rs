use super::{
    road_environment::{DESCRIPTOR_COLUMNS, GEOMETRY_COLUMN},
    LayerData, LayerSummary, MatchedLayer, RoadEnvironment,
};
use crate::{
    algorithm::{
        aggregation::AttributeAggregator,
        descriptor::describe_segments,
        matching::{LineToLineMatcher, MatchPolicy, MatchedPoint, PointToLineMatcher},
        spatial_index::SegmentIndex,
    },
    config::RoadEnvConfiguration,
    model::{
        feature::{feature_ops, Attributes, SegmentNetwork},
        layer::{ColumnSource, LineJoin},
        table::{KeyedRow, RoadEnvironmentTable},
        RoadEnvError,
    },
};
use itertools::Itertools;

/// wires the spatial index, matchers, descriptors and aggregation together
/// over data that is already in memory.
pub struct RoadEnvironmentPipeline<'a> {
    conf: &'a RoadEnvConfiguration,
}

impl<'a> RoadEnvironmentPipeline<'a> {
    pub fn new(conf: &'a RoadEnvConfiguration) -> RoadEnvironmentPipeline<'a> {
        RoadEnvironmentPipeline { conf }
    }

    /// runs the batch computation.
    ///
    /// every layer must share the CRS of the network. the spatial index is
    /// built once and shared by all matchers. each layer is matched, reduced
    /// to one row per segment and left-joined onto the network table. missing
    /// cells are filled with their column default once, after the last join.
    pub fn run(
        &self,
        network: SegmentNetwork,
        layers: Vec<LayerData>,
    ) -> Result<RoadEnvironment, RoadEnvError> {
        for layer in layers.iter() {
            network.crs.ensure_matches(layer.crs(), layer.name())?;
        }
        let mut table = RoadEnvironmentTable::new(network.features.iter().map(|s| &s.id))?
            .with_reserved_columns(self.reserved_columns(&network))?;

        log::info!("building spatial index over {} segments", network.len());
        let index = SegmentIndex::build(&network.features)?;

        log::info!("computing segment descriptors");
        let descriptors = describe_segments(
            &network.features,
            &self.conf.reference_coord(),
            self.conf.compute_gradient,
        )?;
        let metres = network
            .features
            .iter()
            .map(|s| {
                self.conf
                    .network
                    .metre_fields
                    .iter()
                    .map(|f| feature_ops::attribute_as_metres(&s.attributes, f))
                    .collect_vec()
            })
            .collect_vec();

        let mut matched_layers = vec![];
        let mut layer_summaries = vec![];
        for layer in layers.iter() {
            log::info!("matching layer '{}' with {} features", layer.name(), layer.len());
            let columns = layer.columns();
            let rows = match layer {
                LayerData::Points { config, points } => {
                    let matcher = PointToLineMatcher::new(&network.features, &index);
                    let matches = matcher.match_points(
                        &points.features,
                        self.conf.point_layer_buffer(config),
                        MatchPolicy::from(self.conf.point_layer_select_first_only(config)),
                    )?;
                    let rows = matches
                        .results
                        .iter()
                        .filter_map(|m| {
                            let point = points.features.get(m.point_index)?;
                            let values = columns.derive_values(&point.attributes);
                            Some(KeyedRow::new(m.segment_id.clone(), values))
                        })
                        .collect_vec();
                    matched_layers.push(MatchedLayer {
                        name: config.name.clone(),
                        points: MatchedPoint::from_results(&matches.results, &points.features),
                        summary: matches.summary,
                    });
                    rows
                }
                LayerData::Lines { config, lines } => {
                    let buffer_radius = match &config.join {
                        LineJoin::Spatial { buffer_radius } => {
                            buffer_radius.unwrap_or(self.conf.buffer_radius)
                        }
                        LineJoin::Attribute { .. } => {
                            return Err(RoadEnvError::ConfigurationError(format!(
                                "layer '{}' is joined by attribute but was loaded as lines",
                                config.name
                            )))
                        }
                    };
                    let matcher = LineToLineMatcher::new(&network.features, &index);
                    matcher
                        .match_lines(&lines.features, buffer_radius)?
                        .into_iter()
                        .map(|row| KeyedRow::new(row.target_id, columns.derive_values(&row.attributes)))
                        .collect_vec()
                }
                LayerData::KeyedRecords {
                    config, records, ..
                } => {
                    let key_field = match &config.join {
                        LineJoin::Attribute { key_field } => key_field,
                        LineJoin::Spatial { .. } => {
                            return Err(RoadEnvError::ConfigurationError(format!(
                                "layer '{}' is joined spatially but was loaded as records",
                                config.name
                            )))
                        }
                    };
                    keyed_rows(records, key_field, columns, &config.name)
                }
            };

            let aggregator = AttributeAggregator::new(columns.join_columns())?;
            let aggregated = aggregator.aggregate(&rows);
            let n_segments = table.join(&aggregated)?;
            log::info!(
                "layer '{}': {} matched rows reduced onto {} segments",
                layer.name(),
                rows.len(),
                n_segments
            );
            layer_summaries.push(LayerSummary {
                name: String::from(layer.name()),
                n_features: layer.len(),
                n_rows: rows.len(),
                n_segments,
            });
        }

        let attributes = table.fill();
        Ok(RoadEnvironment {
            id_field: self.conf.network.id_field.clone(),
            metre_fields: self.conf.network.metre_fields.clone(),
            network,
            descriptors,
            metres,
            attributes,
            matched_layers,
            layer_summaries,
        })
    }

    /// names a joined layer column may not take: the exported id, descriptor,
    /// distance and geometry columns plus every network attribute.
    fn reserved_columns(&self, network: &SegmentNetwork) -> Vec<String> {
        let exported = std::iter::once(self.conf.network.id_field.as_str())
            .chain(DESCRIPTOR_COLUMNS)
            .chain(self.conf.network.metre_fields.iter().map(String::as_str))
            .chain(std::iter::once(GEOMETRY_COLUMN))
            .map(String::from)
            .collect_vec();
        let attributes = network
            .features
            .iter()
            .flat_map(|s| s.attributes.keys())
            .filter(|k| !exported.contains(*k))
            .unique()
            .cloned()
            .collect_vec();
        exported.into_iter().chain(attributes).collect_vec()
    }
}

/// rows for records that carry their segment id in `key_field`. records
/// without a key cannot be joined and are skipped.
fn keyed_rows(
    records: &[Attributes],
    key_field: &str,
    columns: &ColumnSource,
    layer: &str,
) -> Vec<KeyedRow> {
    let rows = records
        .iter()
        .filter_map(|attributes| {
            let key = feature_ops::attribute_as_string(attributes, key_field)?;
            Some(KeyedRow::new(key.as_str().into(), columns.derive_values(attributes)))
        })
        .collect_vec();
    let n_missing = records.len() - rows.len();
    if n_missing > 0 {
        log::warn!("layer '{layer}': {n_missing} records have no '{key_field}' and were skipped");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::RoadEnvironmentPipeline;
    use crate::{
        app::LayerData,
        config::RoadEnvConfiguration,
        model::{
            feature::{
                Attributes, FeatureId, FeatureSet, LineSegment, PointFeature, SegmentId,
            },
            layer::{ColumnSource, JoinColumn, LineJoin, LineLayerConfig, PointLayerConfig},
            Crs, RoadEnvError,
        },
    };
    use geo::{line_string, Point};
    use serde_json::json;

    fn attrs(value: serde_json::Value) -> Attributes {
        value.as_object().cloned().unwrap_or_default()
    }

    fn network() -> FeatureSet<LineSegment> {
        let a = LineSegment::new(
            SegmentId::from("A"),
            line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)],
            Some(vec![10.0, 8.0]),
            100.0,
            attrs(json!({"roadWidthAverage": "7.5m"})),
        )
        .expect("test invariant: valid segment");
        let b = LineSegment::new(
            SegmentId::from("B"),
            line_string![(x: 100.0, y: 0.0), (x: 100.0, y: 100.0)],
            Some(vec![8.0, 8.0]),
            100.0,
            attrs(json!({"roadWidthAverage": ""})),
        )
        .expect("test invariant: valid segment");
        FeatureSet::new("network", Crs::default(), vec![a, b])
    }

    fn point_layer(name: &str, columns: ColumnSource) -> PointLayerConfig {
        PointLayerConfig {
            name: String::from(name),
            file: format!("{name}.geojson"),
            crs: None,
            id_field: None,
            buffer_radius: None,
            select_first_only: None,
            columns,
        }
    }

    fn crossings() -> LayerData {
        let points = vec![
            PointFeature::new(
                FeatureId::from("c1"),
                Point::new(50.0, 5.0),
                attrs(json!({"crossing": "zebra"})),
            ),
            PointFeature::new(
                FeatureId::from("c2"),
                Point::new(20.0, -3.0),
                attrs(json!({"crossing": "traffic_signals"})),
            ),
            PointFeature::new(
                FeatureId::from("c3"),
                Point::new(500.0, 500.0),
                attrs(json!({"crossing": "zebra"})),
            ),
        ];
        LayerData::Points {
            config: point_layer(
                "crossings",
                ColumnSource::CrossingType {
                    tag_field: String::from("crossing"),
                },
            ),
            points: FeatureSet::new("crossings", Crs::default(), points),
        }
    }

    fn cycle_lanes() -> LayerData {
        LayerData::KeyedRecords {
            config: LineLayerConfig {
                name: String::from("cycle_lanes"),
                file: String::from("cycle_lanes.geojson"),
                crs: None,
                id_field: None,
                join: LineJoin::Attribute {
                    key_field: String::from("OS_Highway"),
                },
                columns: ColumnSource::Declared {
                    columns: vec![JoinColumn::flag("CLT_CARR"), JoinColumn::flag("CLT_SEGREG")],
                },
            },
            crs: Crs::default(),
            records: vec![
                attrs(json!({"OS_Highway": "B", "CLT_CARR": "TRUE", "CLT_SEGREG": "FALSE"})),
                attrs(json!({"OS_Highway": "B", "CLT_CARR": "FALSE", "CLT_SEGREG": "TRUE"})),
                attrs(json!({"OS_Highway": "Z", "CLT_CARR": "TRUE"})),
                attrs(json!({"CLT_CARR": "TRUE"})),
            ],
        }
    }

    #[test]
    fn test_pipeline_joins_and_fills() {
        let mut conf = RoadEnvConfiguration::default();
        conf.buffer_radius = 10.0;
        conf.network.metre_fields = vec![String::from("roadWidthAverage")];
        let bus_stops = LayerData::Points {
            config: point_layer(
                "bus_stops",
                ColumnSource::Presence {
                    column: String::from("bus_stop"),
                },
            ),
            points: FeatureSet::new(
                "bus_stops",
                Crs::default(),
                vec![PointFeature::new(
                    FeatureId::from("s1"),
                    Point::new(104.0, 40.0),
                    Attributes::new(),
                )],
            ),
        };
        let layers = vec![crossings(), bus_stops, cycle_lanes()];
        let env = RoadEnvironmentPipeline::new(&conf)
            .run(network(), layers)
            .expect("pipeline run");

        let a = SegmentId::from("A");
        let b = SegmentId::from("B");
        assert_eq!(env.attributes.value(&a, "marked_crossing"), Some(1.0));
        assert_eq!(env.attributes.value(&a, "signalled_crossing"), Some(1.0));
        assert_eq!(env.attributes.value(&a, "unmarked_crossing"), Some(0.0));
        assert_eq!(env.attributes.value(&a, "bus_stop"), Some(0.0));
        assert_eq!(env.attributes.value(&b, "bus_stop"), Some(1.0));
        assert_eq!(env.attributes.value(&b, "CLT_CARR"), Some(1.0));
        assert_eq!(env.attributes.value(&b, "CLT_SEGREG"), Some(1.0));
        assert_eq!(env.attributes.value(&a, "CLT_CARR"), Some(0.0));
        assert_eq!(env.attributes.value(&b, "marked_crossing"), Some(0.0));

        assert_eq!(env.descriptors[0].gradient, Some(2.0));
        assert_eq!(env.descriptors[1].bearing, 0);
        assert_eq!(env.metres, vec![vec![Some(7.5)], vec![None]]);

        match &env.matched_layers[..] {
            [crossings, bus_stops] => {
                assert_eq!(crossings.points.len(), 2);
                assert_eq!(crossings.summary.n_unmatched_points(), 1);
                assert_eq!(bus_stops.points[0].segment_id, b);
            }
            other => panic!("expected two matched point layers, found {}", other.len()),
        }
        let summaries = env
            .layer_summaries
            .iter()
            .map(|s| (s.name.as_str(), s.n_rows, s.n_segments))
            .collect::<Vec<_>>();
        assert_eq!(
            summaries,
            vec![("crossings", 2, 1), ("bus_stops", 1, 1), ("cycle_lanes", 3, 1)]
        );
    }

    #[test]
    fn test_crs_mismatch_is_fatal() {
        let conf = RoadEnvConfiguration::default();
        let layer = LayerData::Points {
            config: point_layer(
                "stops",
                ColumnSource::Presence {
                    column: String::from("bus_stop"),
                },
            ),
            points: FeatureSet::new("stops", Crs::new("EPSG:4326"), vec![]),
        };
        match RoadEnvironmentPipeline::new(&conf).run(network(), vec![layer]) {
            Err(RoadEnvError::CrsMismatch { layer, .. }) => assert_eq!(layer, "stops"),
            other => panic!("expected CRS mismatch, found {:?}", other.err()),
        }
    }

    #[test]
    fn test_column_collision_between_layers() {
        let conf = RoadEnvConfiguration::default();
        let presence = |name: &str| LayerData::Points {
            config: point_layer(
                name,
                ColumnSource::Presence {
                    column: String::from("bus_stop"),
                },
            ),
            points: FeatureSet::new(name, Crs::default(), vec![]),
        };
        let layers = vec![presence("stops_a"), presence("stops_b")];
        match RoadEnvironmentPipeline::new(&conf).run(network(), layers) {
            Err(RoadEnvError::ColumnCollision(c)) => assert_eq!(c, "bus_stop"),
            other => panic!("expected column collision, found {:?}", other.err()),
        }
    }

    #[test]
    fn test_column_shadowing_network_rejected() {
        let conf = RoadEnvConfiguration::default();
        let declared = |name: &str, column: &str| LayerData::Points {
            config: point_layer(
                name,
                ColumnSource::Declared {
                    columns: vec![JoinColumn::flag(column)],
                },
            ),
            points: FeatureSet::new(name, Crs::default(), vec![]),
        };
        for column in ["gradient", "roadWidthAverage", "TOID", "geometry"] {
            let layers = vec![declared("calming", column)];
            match RoadEnvironmentPipeline::new(&conf).run(network(), layers) {
                Err(RoadEnvError::ColumnCollision(c)) => assert_eq!(c, column),
                other => panic!("expected collision on {column}, found {:?}", other.err()),
            }
        }

        let mut conf = RoadEnvConfiguration::default();
        conf.network.metre_fields = vec![String::from("bearing")];
        match RoadEnvironmentPipeline::new(&conf).run(network(), vec![]) {
            Err(RoadEnvError::ColumnCollision(c)) => assert_eq!(c, "bearing"),
            other => panic!("expected collision on metre field, found {:?}", other.err()),
        }
    }
}
