use std::fmt::Display;

/// counts used to audit a matching run. unmatched points are not errors but
/// their number must stay observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSummary {
    pub n_points: usize,
    pub n_matched_points: usize,
    pub n_results: usize,
}

impl MatchSummary {
    pub fn n_unmatched_points(&self) -> usize {
        self.n_points - self.n_matched_points
    }
}

impl Display for MatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} points matched ({} dropped outside buffer), {} matches",
            self.n_matched_points,
            self.n_points,
            self.n_unmatched_points(),
            self.n_results
        )
    }
}
