mod crs;
pub mod feature;
pub mod layer;
mod road_env_cli_error;
mod road_env_error;
pub mod table;

pub use crs::Crs;
pub use road_env_cli_error::RoadEnvCliError;
pub use road_env_error::RoadEnvError;
