use super::RoadEnvError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// name of a coordinate reference system, normalized so that equivalent
/// spellings of an EPSG code compare equal, e.g. `epsg:27700`,
/// `EPSG:27700` and `urn:ogc:def:crs:EPSG::27700`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Crs(String);

impl Crs {
    /// British National Grid, the planar CRS used for London road data.
    pub const BRITISH_NATIONAL_GRID: &'static str = "EPSG:27700";

    pub fn new(name: &str) -> Crs {
        let upper = name.trim().to_uppercase();
        if upper.contains("EPSG") {
            if let Some(code) = upper.rsplit(':').next() {
                if !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()) {
                    return Crs(format!("EPSG:{code}"));
                }
            }
        }
        Crs(upper)
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// true when no reference system is named, e.g. `crs = ""` in a config.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// fails if `found` is not the same reference system as this one. spatial
    /// comparisons across reference systems are never coerced.
    pub fn ensure_matches(&self, found: &Crs, layer: &str) -> Result<(), RoadEnvError> {
        if self == found {
            Ok(())
        } else {
            Err(RoadEnvError::CrsMismatch {
                layer: String::from(layer),
                expected: self.clone(),
                found: found.clone(),
            })
        }
    }
}

impl Default for Crs {
    fn default() -> Self {
        Crs::new(Crs::BRITISH_NATIONAL_GRID)
    }
}

impl Display for Crs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Crs {
    fn from(value: String) -> Self {
        Crs::new(&value)
    }
}

impl From<&str> for Crs {
    fn from(value: &str) -> Self {
        Crs::new(value)
    }
}

impl From<Crs> for String {
    fn from(value: Crs) -> Self {
        value.0
    }
}
