mod layer_data;
mod pipeline;
pub mod reader;
mod road_environment;
pub mod writer;

pub use layer_data::LayerData;
pub use pipeline::RoadEnvironmentPipeline;
pub use road_environment::{LayerSummary, MatchedLayer, RoadEnvironment};
pub use writer::RoadEnvWriter;

use crate::{config::RoadEnvConfiguration, model::RoadEnvCliError};
use std::path::Path;

/// reads every configured input, runs the pipeline and writes all outputs.
pub fn run(
    conf: &RoadEnvConfiguration,
    output_directory: &Path,
) -> Result<RoadEnvironment, RoadEnvCliError> {
    conf.validate()?;
    let network = reader::read_network(conf)?;
    let layers = reader::read_layers(conf)?;
    let environment = RoadEnvironmentPipeline::new(conf).run(network, layers)?;
    for layer in environment.layer_summaries.iter() {
        log::info!(
            "layer '{}': {} features, {} rows, {} segments",
            layer.name,
            layer.n_features,
            layer.n_rows,
            layer.n_segments
        );
    }
    environment.write_outputs(output_directory, conf.overwrite)?;
    Ok(environment)
}
