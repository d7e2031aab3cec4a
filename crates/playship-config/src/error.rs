use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "config file not found: {0}\n\
        playship looks for playship.local.yaml, .playship.local.yaml, playship.yaml or .playship.yaml\n\
        in the current directory, then ~/.config/playship/config.yaml.\n\
        PLAYSHIP_CONFIG or --config can point at a file directly"
    )]
    ConfigFileNotFound(PathBuf),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid {field}: {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
