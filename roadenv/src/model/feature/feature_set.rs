use crate::model::Crs;

/// a named collection of features that all share one coordinate reference system.
#[derive(Debug, Clone)]
pub struct FeatureSet<F> {
    pub name: String,
    pub crs: Crs,
    pub features: Vec<F>,
}

impl<F> FeatureSet<F> {
    pub fn new(name: &str, crs: Crs, features: Vec<F>) -> FeatureSet<F> {
        FeatureSet {
            name: String::from(name),
            crs,
            features,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
