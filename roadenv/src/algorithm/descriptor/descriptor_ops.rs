use crate::model::{feature::LineSegment, RoadEnvError};
use geo::{Coord, Distance, Euclidean};

/// Oxford Circus in British National Grid, the default reference point for
/// relative location.
pub const OXFORD_CIRCUS: Coord<f64> = Coord {
    x: 529028.0,
    y: 181223.0,
};

/// average gradient in percent, positive when the segment descends from its
/// start to its end, rounded to one decimal.
///
/// # Returns
///
/// * `Ok(None)` when the declared length is not positive, or an error when the
///   segment has no elevation data
pub fn gradient(segment: &LineSegment) -> Result<Option<f64>, RoadEnvError> {
    let (z_start, z_end) = segment
        .end_elevations()
        .ok_or_else(|| RoadEnvError::MissingElevation(segment.id.clone()))?;
    if segment.length <= 0.0 {
        log::debug!("segment '{}' has zero length, gradient undefined", segment.id);
        return Ok(None);
    }
    Ok(Some(round_to(100.0 * (z_start - z_end) / segment.length, 1)))
}

/// ratio of path length to the straight-line distance between the endpoints,
/// rounded to two decimals. 1 is straight; loops grow without bound.
/// undefined when the endpoints coincide.
pub fn sinuosity(start: &Coord<f64>, end: &Coord<f64>, length: f64) -> Option<f64> {
    let baseline = Euclidean.distance(*start, *end);
    if baseline == 0.0 {
        return None;
    }
    Some(round_to(length / baseline, 2))
}

/// direction from start to end in whole degrees clockwise from north, in [0, 360).
///
/// NOTE: this is the great-circle initial bearing formula evaluated on planar
/// easting/northing values as if they were degrees of longitude/latitude. it
/// is an approximation kept so that outputs stay comparable with existing
/// reference datasets. due north is 0 and due east is 90, other directions
/// drift from the true planar azimuth.
pub fn bearing(start: &Coord<f64>, end: &Coord<f64>) -> u16 {
    let (y1, y2) = (start.y.to_radians(), end.y.to_radians());
    let dx = (end.x - start.x).to_radians();
    let x = y2.cos() * dx.sin();
    let y = y1.cos() * y2.sin() - y1.sin() * y2.cos() * dx.cos();
    let degrees = (x.atan2(y).to_degrees() + 360.0) % 360.0;
    degrees.trunc() as u16
}

/// distance from the midpoint of the segment endpoints to `reference`,
/// truncated to whole meters.
pub fn relative_location(start: &Coord<f64>, end: &Coord<f64>, reference: &Coord<f64>) -> u64 {
    let midpoint = Coord {
        x: (start.x + end.x) / 2.0,
        y: (start.y + end.y) / 2.0,
    };
    Euclidean.distance(midpoint, *reference).trunc() as u64
}

/// endpoints rounded to whole meters, used to pair directed segments with
/// datasets that only publish one record per direction. halves round to the
/// even neighbour so that keys agree with those datasets.
pub fn key_coordinates(start: &Coord<f64>, end: &Coord<f64>) -> (Coord<f64>, Coord<f64>) {
    let round = |c: &Coord<f64>| Coord {
        x: c.x.round_ties_even(),
        y: c.y.round_ties_even(),
    };
    (round(start), round(end))
}

/// rounds to `decimals` places, halves to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::feature::SegmentId;
    use geo::{coord, line_string};

    fn coord(x: f64, y: f64) -> Coord<f64> {
        coord! { x: x, y: y }
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        assert_eq!(bearing(&coord(0.0, 0.0), &coord(0.0, 100.0)), 0);
        assert_eq!(bearing(&coord(0.0, 0.0), &coord(100.0, 0.0)), 90);
        assert_eq!(bearing(&coord(0.0, 100.0), &coord(0.0, 0.0)), 180);
        assert_eq!(bearing(&coord(100.0, 0.0), &coord(0.0, 0.0)), 270);
    }

    #[test]
    fn test_bearing_coincident_endpoints() {
        assert_eq!(bearing(&coord(5.0, 5.0), &coord(5.0, 5.0)), 0);
    }

    #[test]
    fn test_sinuosity() {
        assert_eq!(sinuosity(&coord(0.0, 0.0), &coord(30.0, 40.0), 50.0), Some(1.0));
        // quarter circle of radius 100
        let arc = std::f64::consts::FRAC_PI_2 * 100.0;
        assert_eq!(sinuosity(&coord(100.0, 0.0), &coord(0.0, 100.0), arc), Some(1.11));
        assert_eq!(sinuosity(&coord(3.0, 3.0), &coord(3.0, 3.0), 12.0), None);
    }

    #[test]
    fn test_relative_location() {
        let start = coord(529028.0 - 300.0, 181223.0);
        let end = coord(529028.0 - 300.0, 181223.0 + 800.0);
        // midpoint is (-300, +400) from the reference
        assert_eq!(relative_location(&start, &end, &OXFORD_CIRCUS), 500);
        let near = coord(529028.9, 181223.0);
        assert_eq!(relative_location(&near, &near, &OXFORD_CIRCUS), 0);
    }

    #[test]
    fn test_gradient() {
        let segment = LineSegment::new(
            SegmentId::from("hill"),
            line_string![(x: 0.0, y: 0.0), (x: 50.0, y: 0.0), (x: 100.0, y: 0.0)],
            Some(vec![12.0, 11.0, 9.0]),
            120.0,
            Default::default(),
        )
        .expect("test invariant: valid segment");
        assert_eq!(gradient(&segment).expect("has elevation"), Some(2.5));
    }

    #[test]
    fn test_gradient_zero_length() {
        let segment = LineSegment::new(
            SegmentId::from("stub"),
            line_string![(x: 0.0, y: 0.0), (x: 0.0, y: 0.0)],
            Some(vec![1.0, 1.0]),
            0.0,
            Default::default(),
        )
        .expect("test invariant: valid segment");
        assert_eq!(gradient(&segment).expect("has elevation"), None);
    }

    #[test]
    fn test_gradient_without_elevation() {
        let segment = LineSegment::new(
            SegmentId::from("flat"),
            line_string![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0)],
            None,
            10.0,
            Default::default(),
        )
        .expect("test invariant: valid segment");
        match gradient(&segment) {
            Err(RoadEnvError::MissingElevation(id)) => assert_eq!(id, SegmentId::from("flat")),
            other => panic!("expected missing elevation, found {other:?}"),
        }
    }

    #[test]
    fn test_key_coordinates() {
        let (s, e) = key_coordinates(&coord(10.4, 20.6), &coord(-3.6, 7.49));
        assert_eq!((s.x, s.y, e.x, e.y), (10.0, 21.0, -4.0, 7.0));
    }

    #[test]
    fn test_key_coordinates_ties_round_to_even() {
        let (s, e) = key_coordinates(&coord(100.5, 181223.5), &coord(-2.5, 3.5));
        assert_eq!((s.x, s.y, e.x, e.y), (100.0, 181224.0, -2.0, 4.0));
    }

    #[test]
    fn test_gradient_tie_rounds_to_even() {
        // 100 * 0.25 / 100 = 0.25 sits exactly between 0.2 and 0.3
        let segment = LineSegment::new(
            SegmentId::from("tie"),
            line_string![(x: 100.5, y: 0.0), (x: 200.5, y: 0.0)],
            Some(vec![0.25, 0.0]),
            100.0,
            Default::default(),
        )
        .expect("test invariant: valid segment");
        assert_eq!(gradient(&segment).expect("has elevation"), Some(0.2));
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-0.125, 2), -0.12);
    }
}
