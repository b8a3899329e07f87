use super::{MatchPolicy, PointToLineMatcher};
use crate::{
    algorithm::spatial_index::SegmentIndex,
    model::{
        feature::{Attributes, FeatureId, LineSegment, PointFeature, SegmentId},
        RoadEnvError,
    },
};
use itertools::Itertools;

/// attributes of a source line transferred onto a target segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LineMatchRow {
    pub target_id: SegmentId,
    pub source_id: SegmentId,
    pub attributes: Attributes,
}

/// associates the lines of a second layer (cycle lanes, bus lanes) with road
/// segments by snapping every vertex of each source line onto the closest
/// target segment.
pub struct LineToLineMatcher<'a> {
    targets: &'a [LineSegment],
    matcher: PointToLineMatcher<'a>,
}

impl<'a> LineToLineMatcher<'a> {
    pub fn new(targets: &'a [LineSegment], index: &'a SegmentIndex) -> LineToLineMatcher<'a> {
        LineToLineMatcher {
            targets,
            matcher: PointToLineMatcher::new(targets, index),
        }
    }

    /// matches source lines onto the target network.
    ///
    /// every vertex is matched with the closest policy. since all vertices of
    /// a source line carry the same attributes, rows are unique per
    /// (target, source) pair, which is the same as deduplicating on every
    /// retained column.
    ///
    /// # Returns
    ///
    /// * one row per distinct (target segment, source line) pair, ordered by
    ///   the first vertex that produced it
    pub fn match_lines(
        &self,
        sources: &[LineSegment],
        buffer_radius: f64,
    ) -> Result<Vec<LineMatchRow>, RoadEnvError> {
        let (vertices, owners): (Vec<PointFeature>, Vec<usize>) = sources
            .iter()
            .enumerate()
            .flat_map(|(source_idx, source)| {
                source.linestring.points().map(move |point| {
                    let vertex =
                        PointFeature::new(FeatureId(source.id.0.clone()), point, Attributes::new());
                    (vertex, source_idx)
                })
            })
            .unzip();
        log::debug!(
            "decomposed {} source lines into {} vertices",
            sources.len(),
            vertices.len()
        );

        let matches = self
            .matcher
            .match_points(&vertices, buffer_radius, MatchPolicy::Closest)?;

        let rows = matches
            .results
            .iter()
            .map(|m| (m.segment_index, owners[m.point_index]))
            .unique()
            .filter_map(|(target_idx, source_idx)| {
                let target = self.targets.get(target_idx)?;
                let source = sources.get(source_idx)?;
                Some(LineMatchRow {
                    target_id: target.id.clone(),
                    source_id: source.id.clone(),
                    attributes: source.attributes.clone(),
                })
            })
            .collect_vec();
        log::info!(
            "{} of {} source lines matched onto {} segment pairs",
            rows.iter().map(|r| &r.source_id).unique().count(),
            sources.len(),
            rows.len()
        );
        Ok(rows)
    }
}

/// builds a spatial index over `targets` and matches `sources` against it.
pub fn match_lines_to_lines(
    targets: &[LineSegment],
    sources: &[LineSegment],
    buffer_radius: f64,
) -> Result<Vec<LineMatchRow>, RoadEnvError> {
    let index = SegmentIndex::build(targets)?;
    LineToLineMatcher::new(targets, &index).match_lines(sources, buffer_radius)
}

#[cfg(test)]
mod tests {
    use super::match_lines_to_lines;
    use crate::model::feature::{Attributes, LineSegment, SegmentId};
    use geo::{line_string, Euclidean, Length, LineString};
    use serde_json::json;

    fn segment(id: &str, linestring: LineString<f64>, attributes: Attributes) -> LineSegment {
        let length = Euclidean.length(&linestring);
        LineSegment::new(SegmentId::from(id), linestring, None, length, attributes)
            .expect("test invariant: valid segment")
    }

    fn lane(kind: &str) -> Attributes {
        json!({ "lane_type": kind })
            .as_object()
            .cloned()
            .unwrap_or_default()
    }

    fn targets() -> Vec<LineSegment> {
        vec![
            segment(
                "A",
                line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)],
                Attributes::new(),
            ),
            segment(
                "B",
                line_string![(x: 100.0, y: 0.0), (x: 100.0, y: 100.0)],
                Attributes::new(),
            ),
        ]
    }

    #[test]
    fn test_vertices_on_one_segment_deduplicated() {
        let sources = vec![segment(
            "S1",
            line_string![(x: 10.0, y: 2.0), (x: 50.0, y: 2.0), (x: 90.0, y: 2.0)],
            lane("mandatory"),
        )];
        let rows = match_lines_to_lines(&targets(), &sources, 10.0).expect("match");
        match &rows[..] {
            [row] => {
                assert_eq!(row.target_id, SegmentId::from("A"));
                assert_eq!(row.source_id, SegmentId::from("S1"));
                assert_eq!(row.attributes.get("lane_type"), Some(&json!("mandatory")));
            }
            other => panic!("expected one deduplicated row, found {other:?}"),
        }
    }

    #[test]
    fn test_source_spanning_two_segments() {
        let sources = vec![
            segment(
                "S2",
                line_string![(x: 20.0, y: -2.0), (x: 102.0, y: 60.0)],
                lane("advisory"),
            ),
            segment(
                "far",
                line_string![(x: 500.0, y: 500.0), (x: 600.0, y: 500.0)],
                lane("track"),
            ),
        ];
        let rows = match_lines_to_lines(&targets(), &sources, 10.0).expect("match");
        let pairs = rows
            .iter()
            .map(|r| (r.target_id.0.as_str(), r.source_id.0.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(pairs, vec![("A", "S2"), ("B", "S2")]);
    }
}
