use super::descriptor_ops;
use crate::model::{
    feature::{LineSegment, SegmentId},
    RoadEnvError,
};
use geo::Coord;
use kdam::tqdm;
use serde::{Deserialize, Serialize};

/// geometric descriptors of one road segment. serializes as one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDescriptor {
    pub segment_id: SegmentId,
    /// percent, positive downhill. `None` when not computed or degenerate.
    pub gradient: Option<f64>,
    pub sinuosity: Option<f64>,
    pub bearing: u16,
    pub relative_location: u64,
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

impl SegmentDescriptor {
    /// computes every descriptor for a segment.
    ///
    /// # Arguments
    ///
    /// * `segment`          - road segment with its declared length
    /// * `reference`        - point that relative location is measured from
    /// * `compute_gradient` - when true, a segment without elevation is an error
    pub fn new(
        segment: &LineSegment,
        reference: &Coord<f64>,
        compute_gradient: bool,
    ) -> Result<SegmentDescriptor, RoadEnvError> {
        let start = segment.start();
        let end = segment.end();
        let gradient = if compute_gradient {
            descriptor_ops::gradient(segment)?
        } else {
            None
        };
        let sinuosity = descriptor_ops::sinuosity(&start, &end, segment.length);
        if sinuosity.is_none() {
            log::debug!(
                "segment '{}' starts and ends at the same coordinate, sinuosity undefined",
                segment.id
            );
        }
        let (key_start, key_end) = descriptor_ops::key_coordinates(&start, &end);
        Ok(SegmentDescriptor {
            segment_id: segment.id.clone(),
            gradient,
            sinuosity,
            bearing: descriptor_ops::bearing(&start, &end),
            relative_location: descriptor_ops::relative_location(&start, &end, reference),
            start_x: key_start.x,
            start_y: key_start.y,
            end_x: key_end.x,
            end_y: key_end.y,
        })
    }
}

/// computes descriptors for every segment of the network, in network order.
pub fn describe_segments(
    segments: &[LineSegment],
    reference: &Coord<f64>,
    compute_gradient: bool,
) -> Result<Vec<SegmentDescriptor>, RoadEnvError> {
    let iter = tqdm!(
        segments.iter(),
        total = segments.len(),
        desc = "segment descriptors"
    );
    let descriptors = iter
        .map(|segment| SegmentDescriptor::new(segment, reference, compute_gradient))
        .collect::<Result<Vec<_>, _>>()?;
    eprintln!();
    let n_loops = descriptors.iter().filter(|d| d.sinuosity.is_none()).count();
    if n_loops > 0 {
        log::warn!("{n_loops} segments have coincident endpoints and no sinuosity");
    }
    Ok(descriptors)
}
