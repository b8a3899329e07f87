use serde::{Deserialize, Serialize};

/// how several matched values for the same segment are reduced to one value.
/// declared per column, never inferred from the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReductionPolicy {
    /// logical OR: 1 if any value is non-zero, else 0
    #[default]
    Or,
    /// largest value
    Max,
    /// value of the first row, in input order
    First,
}

impl std::fmt::Display for ReductionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReductionPolicy::Or => write!(f, "or"),
            ReductionPolicy::Max => write!(f, "max"),
            ReductionPolicy::First => write!(f, "first"),
        }
    }
}

impl ReductionPolicy {
    /// folds one more value into the running reduction.
    pub fn reduce(&self, acc: Option<f64>, value: f64) -> f64 {
        use ReductionPolicy as R;
        match (self, acc) {
            (R::Or, None) => as_flag(value),
            (R::Or, Some(a)) => a.max(as_flag(value)),
            (R::Max, None) => value,
            (R::Max, Some(a)) => a.max(value),
            (R::First, None) => value,
            (R::First, Some(a)) => a,
        }
    }
}

fn as_flag(value: f64) -> f64 {
    if value != 0.0 {
        1.0
    } else {
        0.0
    }
}
