mod aggregated_table;
mod joined_attributes;
mod keyed_row;
mod road_environment_table;

pub use aggregated_table::{AggregatedAttributes, AggregatedTable};
pub use joined_attributes::JoinedAttributes;
pub use keyed_row::KeyedRow;
pub use road_environment_table::RoadEnvironmentTable;
