use crate::model::{feature::LineSegment, RoadEnvError};
use geo::{BoundingRect, Point, Rect};
use itertools::Itertools;
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

/// bounding box of a segment tagged with the segment's position in the network.
pub type SegmentEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// bounding-box index over the segments of a road network.
///
/// this is the over-approximate first phase of a spatial search: a query
/// returns every segment whose bounding box intersects the query box, which
/// includes segments whose geometry is in fact farther away. callers verify
/// candidates with an exact distance test. the order of returned candidates
/// is whatever the R-tree traversal produces and carries no meaning.
pub struct SegmentIndex {
    rtree: RTree<SegmentEnvelope>,
}

impl SegmentIndex {
    /// bulk loads an R-tree with the bounding boxes of every segment.
    pub fn build(segments: &[LineSegment]) -> Result<SegmentIndex, RoadEnvError> {
        let envelopes = segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let rect = segment.linestring.bounding_rect().ok_or_else(|| {
                    RoadEnvError::InvalidGeometry(
                        segment.id.to_string(),
                        String::from("cannot compute bounds of empty line"),
                    )
                })?;
                let envelope = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                Ok(GeomWithData::new(envelope, index))
            })
            .collect::<Result<Vec<_>, RoadEnvError>>()?;
        log::debug!("built spatial index over {} segments", envelopes.len());
        Ok(SegmentIndex {
            rtree: RTree::bulk_load(envelopes),
        })
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }

    /// segment indices whose bounding boxes intersect the query box.
    pub fn query(&self, bbox: &Rect<f64>) -> Vec<usize> {
        let envelope =
            AABB::from_corners([bbox.min().x, bbox.min().y], [bbox.max().x, bbox.max().y]);
        self.rtree
            .locate_in_envelope_intersecting(&envelope)
            .map(|obj| obj.data)
            .collect_vec()
    }

    /// segment indices that could lie within `radius` of `point`, found by
    /// querying with the point's bounding box inflated by `radius` on all sides.
    pub fn query_within(&self, point: &Point<f64>, radius: f64) -> Vec<usize> {
        let bbox = Rect::new(
            (point.x() - radius, point.y() - radius),
            (point.x() + radius, point.y() + radius),
        );
        self.query(&bbox)
    }
}
