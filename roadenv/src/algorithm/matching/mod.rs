mod line_to_line;
mod match_policy;
mod match_result;
mod match_summary;
mod matched_point;
mod point_to_line;
pub mod projection_ops;

pub use line_to_line::{LineMatchRow, LineToLineMatcher};
pub use match_policy::MatchPolicy;
pub use match_result::MatchResult;
pub use match_summary::MatchSummary;
pub use matched_point::MatchedPoint;
pub use point_to_line::{Candidate, PointMatches, PointToLineMatcher};
