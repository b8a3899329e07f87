use super::RoadEnvError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoadEnvCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading input file {0}: {1}")]
    InputError(String, String),
    #[error("output file {0} already exists, set 'overwrite' to replace it")]
    OutputExists(String),
    #[error("road environment run failed: {source}")]
    RoadEnvError {
        #[from]
        source: RoadEnvError,
    },
    #[error("failure reading or writing file: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure decoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("failure decoding GeoJSON: {source}")]
    GeoJsonError {
        #[from]
        source: geojson::Error,
    },
    #[error("failure writing CSV: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
}
