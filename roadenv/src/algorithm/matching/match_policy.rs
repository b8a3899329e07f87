use serde::{Deserialize, Serialize};

/// which of the candidate segments within the buffer are kept for a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// only the closest segment
    #[default]
    Closest,
    /// every segment within the buffer radius
    AllWithinBuffer,
}

impl From<bool> for MatchPolicy {
    /// maps a `select_first_only` flag onto a policy
    fn from(select_first_only: bool) -> Self {
        if select_first_only {
            MatchPolicy::Closest
        } else {
            MatchPolicy::AllWithinBuffer
        }
    }
}
