//! arc-length projection of points onto lines, and the inverse interpolation.
//! zero-length lines and zero-length pieces of a line never divide by zero:
//! they project to the start of the piece.
use geo::{Euclidean, InterpolateLine, Length, LineLocatePoint, LineString, Point};

/// distance along `linestring`, from its start, to the point on the line
/// closest to `point`. when several positions are equally close the earliest
/// one is returned. a zero-length line projects to position 0.
///
/// # Returns
///
/// * `None` when the point or the line has non-finite coordinates
pub fn locate(linestring: &LineString<f64>, point: &Point<f64>) -> Option<f64> {
    let length = Euclidean.length(linestring);
    if length == 0.0 {
        return Some(0.0);
    }
    let fraction = linestring.line_locate_point(point)?;
    Some(fraction * length)
}

/// coordinate at distance `position` along `linestring`. positions beyond
/// either end are clamped onto the line.
pub fn interpolate(linestring: &LineString<f64>, position: f64) -> Option<Point<f64>> {
    Euclidean.point_at_distance_from_start(linestring, position)
}
