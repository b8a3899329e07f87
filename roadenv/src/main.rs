use clap::{Parser, Subcommand};
use roadenv::{app, config::RoadEnvConfiguration, model::RoadEnvCliError};
use std::path::Path;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct RoadEnvAppArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    /// match infrastructure layers onto a road network and compute segment descriptors
    Run {
        #[arg(long, help = "path to .toml or .json file with the road environment run configuration")]
        configuration_file: String,
        #[arg(long, help = "road network GeoJSON file, overrides the configured network file")]
        network_file: Option<String>,
        #[arg(long, help = "output path for matched layers and road environment tables")]
        output_directory: String,
    },
}

pub fn run(app: &App) -> Result<(), RoadEnvCliError> {
    env_logger::init();
    match app {
        App::Run {
            configuration_file,
            network_file,
            output_directory,
        } => {
            log::info!("reading road environment configuration from {configuration_file}");
            let mut conf = RoadEnvConfiguration::try_from(configuration_file)?;
            if let Some(f) = network_file {
                conf.network.file = f.clone();
            }
            match app::run(&conf, Path::new(output_directory)) {
                Ok(_) => {
                    eprintln!("finished.");
                    Ok(())
                }
                Err(e) => {
                    log::error!("roadenv failed: {e}");
                    Err(e)
                }
            }
        }
    }
}

fn main() {
    let args = RoadEnvAppArguments::parse();
    if let Err(e) = run(&args.app) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
