pub mod aggregation;
pub mod descriptor;
pub mod matching;
pub mod spatial_index;
