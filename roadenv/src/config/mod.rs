mod network_config;
mod road_env;

pub use network_config::NetworkConfig;
pub use road_env::RoadEnvConfiguration;
