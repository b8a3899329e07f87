use super::{projection_ops, MatchPolicy, MatchResult, MatchSummary};
use crate::{
    algorithm::spatial_index::SegmentIndex,
    model::{
        feature::{LineSegment, PointFeature},
        RoadEnvError,
    },
};
use geo::{Distance, Euclidean, Point};
use itertools::Itertools;
use kdam::tqdm;

/// a segment that passed the exact distance test for some point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub segment_index: usize,
    pub distance: f64,
}

/// output of matching a point collection against the road network.
#[derive(Debug, Clone)]
pub struct PointMatches {
    pub results: Vec<MatchResult>,
    pub summary: MatchSummary,
}

/// matches point features onto the nearest road segments within a buffer
/// radius, using a prebuilt [`SegmentIndex`] over the same segments.
pub struct PointToLineMatcher<'a> {
    segments: &'a [LineSegment],
    index: &'a SegmentIndex,
}

impl<'a> PointToLineMatcher<'a> {
    pub fn new(segments: &'a [LineSegment], index: &'a SegmentIndex) -> PointToLineMatcher<'a> {
        PointToLineMatcher { segments, index }
    }

    /// finds the segments that qualify for a point.
    ///
    /// the spatial index is queried with the point's bounding box inflated by
    /// `buffer_radius`, then each candidate is verified with the exact planar
    /// distance and discarded if farther than `buffer_radius`. survivors are
    /// sorted by ascending distance. the sort is stable, so equidistant
    /// segments keep the order the index returned them in, which is arbitrary.
    ///
    /// # Arguments
    ///
    /// * `point`         - location to match
    /// * `buffer_radius` - maximum snap distance in meters
    /// * `policy`        - keep only the closest segment, or all within the buffer
    ///
    /// # Returns
    ///
    /// * qualifying segments, closest first. empty if nothing is within the buffer.
    pub fn candidates(
        &self,
        point: &Point<f64>,
        buffer_radius: f64,
        policy: MatchPolicy,
    ) -> Vec<Candidate> {
        let mut candidates = self
            .index
            .query_within(point, buffer_radius)
            .into_iter()
            .filter_map(|segment_index| {
                let segment = self.segments.get(segment_index)?;
                let distance = Euclidean.distance(point, &segment.linestring);
                if distance <= buffer_radius {
                    Some(Candidate {
                        segment_index,
                        distance,
                    })
                } else {
                    None
                }
            })
            .collect_vec();
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        if policy == MatchPolicy::Closest {
            candidates.truncate(1);
        }
        candidates
    }

    /// projects a point onto a candidate segment.
    ///
    /// # Returns
    ///
    /// * the arc-length position of the projection and the coordinate on the
    ///   segment at that position
    pub fn snap(
        &self,
        point: &Point<f64>,
        candidate: &Candidate,
    ) -> Result<(f64, Point<f64>), RoadEnvError> {
        let segment = self.segments.get(candidate.segment_index).ok_or_else(|| {
            RoadEnvError::InternalError(format!(
                "candidate segment index {} not in network of {} segments",
                candidate.segment_index,
                self.segments.len()
            ))
        })?;
        let invalid = |reason: &str| {
            RoadEnvError::InvalidGeometry(segment.id.to_string(), String::from(reason))
        };
        let arc_position = projection_ops::locate(&segment.linestring, point)
            .ok_or_else(|| invalid("cannot project a non-finite coordinate onto line"))?;
        let snapped = projection_ops::interpolate(&segment.linestring, arc_position)
            .ok_or_else(|| invalid("cannot interpolate along empty line"))?;
        Ok((arc_position, snapped))
    }

    /// matches every point in a collection. points with no segment within the
    /// buffer are left out of the results and counted in the summary.
    pub fn match_points(
        &self,
        points: &[PointFeature],
        buffer_radius: f64,
        policy: MatchPolicy,
    ) -> Result<PointMatches, RoadEnvError> {
        validate_buffer_radius(buffer_radius)?;
        let mut results = vec![];
        let mut n_matched_points = 0;
        let iter = tqdm!(
            points.iter().enumerate(),
            total = points.len(),
            desc = "match points to segments"
        );
        for (point_index, feature) in iter {
            let candidates = self.candidates(&feature.point, buffer_radius, policy);
            if !candidates.is_empty() {
                n_matched_points += 1;
            }
            for candidate in candidates.iter() {
                let (arc_position, snapped) = self.snap(&feature.point, candidate)?;
                let segment = &self.segments[candidate.segment_index];
                results.push(MatchResult {
                    point_id: feature.id.clone(),
                    point_index,
                    segment_id: segment.id.clone(),
                    segment_index: candidate.segment_index,
                    snapped,
                    snap_distance: candidate.distance,
                    arc_position,
                });
            }
        }
        eprintln!();

        let summary = MatchSummary {
            n_points: points.len(),
            n_matched_points,
            n_results: results.len(),
        };
        log::info!("{summary}");
        Ok(PointMatches { results, summary })
    }
}

/// builds a spatial index over `segments` and matches `points` against it.
pub fn match_points_to_lines(
    segments: &[LineSegment],
    points: &[PointFeature],
    buffer_radius: f64,
    select_first_only: bool,
) -> Result<PointMatches, RoadEnvError> {
    let index = SegmentIndex::build(segments)?;
    let matcher = PointToLineMatcher::new(segments, &index);
    matcher.match_points(points, buffer_radius, MatchPolicy::from(select_first_only))
}

pub fn validate_buffer_radius(buffer_radius: f64) -> Result<(), RoadEnvError> {
    if buffer_radius.is_finite() && buffer_radius > 0.0 {
        Ok(())
    } else {
        Err(RoadEnvError::InvalidBufferRadius(buffer_radius))
    }
}

#[cfg(test)]
mod tests {
    use super::{match_points_to_lines, MatchPolicy, PointToLineMatcher};
    use crate::algorithm::spatial_index::SegmentIndex;
    use crate::model::{
        feature::{FeatureId, LineSegment, PointFeature, SegmentId},
        RoadEnvError,
    };
    use geo::{line_string, Euclidean, Length, LineString, Point};

    fn segment(id: &str, linestring: LineString<f64>) -> LineSegment {
        let length = Euclidean.length(&linestring);
        LineSegment::new(SegmentId::from(id), linestring, None, length, Default::default())
            .expect("test invariant: valid segment")
    }

    fn point(id: &str, x: f64, y: f64) -> PointFeature {
        PointFeature::new(FeatureId::from(id), Point::new(x, y), Default::default())
    }

    fn two_segment_network() -> Vec<LineSegment> {
        vec![
            segment("A", line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)]),
            segment("B", line_string![(x: 100.0, y: 0.0), (x: 100.0, y: 100.0)]),
        ]
    }

    #[test]
    fn test_end_to_end_two_segments() {
        let segments = two_segment_network();
        let points = vec![point("p", 50.0, 5.0)];
        let matches = match_points_to_lines(&segments, &points, 10.0, true).expect("match");
        match &matches.results[..] {
            [m] => {
                assert_eq!(m.segment_id, SegmentId::from("A"));
                assert!((m.snap_distance - 5.0).abs() < 1e-9);
                assert!((m.snapped.x() - 50.0).abs() < 1e-9);
                assert!(m.snapped.y().abs() < 1e-9);
                assert!((m.arc_position - 50.0).abs() < 1e-9);
            }
            other => panic!("expected exactly one match, found {other:?}"),
        }
        assert_eq!(matches.summary.n_unmatched_points(), 0);
    }

    #[test]
    fn test_point_on_line_snaps_to_itself() {
        let segments = vec![segment(
            "L",
            line_string![(x: 0.0, y: 0.0), (x: 30.0, y: 40.0), (x: 90.0, y: 40.0)],
        )];
        let on_line = [(15.0, 20.0), (30.0, 40.0), (61.5, 40.0), (0.0, 0.0)];
        for radius in [0.5, 10.0, 1000.0] {
            let points = on_line
                .iter()
                .enumerate()
                .map(|(i, (x, y))| point(&i.to_string(), *x, *y))
                .collect::<Vec<_>>();
            let matches = match_points_to_lines(&segments, &points, radius, true).expect("match");
            assert_eq!(matches.results.len(), on_line.len());
            for m in matches.results.iter() {
                let (x, y) = on_line[m.point_index];
                assert!(m.snap_distance.abs() < 1e-9, "snap distance {}", m.snap_distance);
                assert!((m.snapped.x() - x).abs() < 1e-9 && (m.snapped.y() - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_point_outside_buffer_is_dropped() {
        let segments = two_segment_network();
        let points = vec![point("near", 50.0, 5.0), point("far", 50.0, 40.0)];
        let matches = match_points_to_lines(&segments, &points, 15.0, true).expect("match");
        assert_eq!(matches.results.len(), 1);
        assert_eq!(matches.results[0].point_id, FeatureId::from("near"));
        assert_eq!(matches.summary.n_points, 2);
        assert_eq!(matches.summary.n_unmatched_points(), 1);
    }

    #[test]
    fn test_closest_of_two_candidates() {
        // candidate lines at distance 3 and 7 from the point
        let segments = vec![
            segment("seven", line_string![(x: 0.0, y: 7.0), (x: 100.0, y: 7.0)]),
            segment("three", line_string![(x: 0.0, y: -3.0), (x: 100.0, y: -3.0)]),
        ];
        let points = vec![point("p", 50.0, 0.0)];
        let closest = match_points_to_lines(&segments, &points, 10.0, true).expect("match");
        assert_eq!(closest.results.len(), 1);
        assert_eq!(closest.results[0].segment_id, SegmentId::from("three"));
        assert!((closest.results[0].snap_distance - 3.0).abs() < 1e-9);

        let all = match_points_to_lines(&segments, &points, 10.0, false).expect("match");
        let ids = all.results.iter().map(|m| m.segment_id.0.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["three", "seven"]);
    }

    #[test]
    fn test_bbox_false_positive_rejected() {
        // the point is inside the diagonal's bounding box but 35 m from the line
        let segments = vec![segment(
            "diag",
            line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 100.0)],
        )];
        let index = SegmentIndex::build(&segments).expect("index");
        let matcher = PointToLineMatcher::new(&segments, &index);
        let candidates = matcher.candidates(&Point::new(75.0, 25.0), 20.0, MatchPolicy::Closest);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_zero_length_line() {
        let segments = vec![segment(
            "stub",
            line_string![(x: 10.0, y: 10.0), (x: 10.0, y: 10.0)],
        )];
        let points = vec![point("p", 13.0, 14.0)];
        let matches = match_points_to_lines(&segments, &points, 10.0, true).expect("match");
        match &matches.results[..] {
            [m] => {
                assert_eq!(m.arc_position, 0.0);
                assert_eq!(m.snapped, Point::new(10.0, 10.0));
                assert!((m.snap_distance - 5.0).abs() < 1e-9);
            }
            other => panic!("expected exactly one match, found {other:?}"),
        }
    }

    #[test]
    fn test_invalid_buffer_radius() {
        let segments = two_segment_network();
        let points = vec![point("p", 50.0, 5.0)];
        for radius in [0.0, -1.0, f64::NAN] {
            match match_points_to_lines(&segments, &points, radius, true) {
                Err(RoadEnvError::InvalidBufferRadius(_)) => {}
                other => panic!("expected invalid buffer radius, found {other:?}"),
            }
        }
    }
}
