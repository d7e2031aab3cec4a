//! Pipeline configuration model

use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::PathBuf;

pub const DEFAULT_LOCAL_IMAGE_NAME: &str = "discord-playbot";
pub const DEFAULT_REMOTE_NAMESPACE: &str = "timoliukko42";
pub const DEFAULT_BUILD_DEFINITION: &str = "Dockerfile";
pub const DEFAULT_BUILD_CONTEXT: &str = ".";
pub const DEFAULT_COMPOSE_DEFINITION: &str = "docker-compose.yml";

/// Everything the pipeline needs to know about the image and the environment.
///
/// Passed to the pipeline at construction time. Every field has a default,
/// so an empty config file (or none at all) reproduces the stock behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Local image name, without tag (e.g. `discord-playbot`)
    pub local_image_name: String,
    /// Registry namespace the remote reference is derived under
    pub remote_namespace: String,
    /// Dockerfile handed to `docker build -f`
    pub build_definition_path: PathBuf,
    /// Build context directory
    pub build_context_root: PathBuf,
    /// Compose file handed to `docker compose -f`
    pub compose_definition_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            local_image_name: DEFAULT_LOCAL_IMAGE_NAME.to_string(),
            remote_namespace: DEFAULT_REMOTE_NAMESPACE.to_string(),
            build_definition_path: PathBuf::from(DEFAULT_BUILD_DEFINITION),
            build_context_root: PathBuf::from(DEFAULT_BUILD_CONTEXT),
            compose_definition_path: PathBuf::from(DEFAULT_COMPOSE_DEFINITION),
        }
    }
}

impl PipelineConfig {
    /// Applies one override layer on top of the current values.
    ///
    /// Layers are applied lowest priority first, so later calls win.
    pub fn merge(mut self, overrides: PipelineOverrides) -> Self {
        if let Some(name) = overrides.local_image_name {
            self.local_image_name = name;
        }
        if let Some(namespace) = overrides.remote_namespace {
            self.remote_namespace = namespace;
        }
        if let Some(path) = overrides.build_definition_path {
            self.build_definition_path = path;
        }
        if let Some(path) = overrides.build_context_root {
            self.build_context_root = path;
        }
        if let Some(path) = overrides.compose_definition_path {
            self.compose_definition_path = path;
        }
        self
    }

    /// Rejects values that would produce malformed image references.
    pub fn validate(&self) -> Result<()> {
        let name = &self.local_image_name;
        if name.is_empty() {
            return Err(ConfigError::Invalid {
                field: "local_image_name",
                message: "must not be empty".to_string(),
            });
        }
        if let Some(c) = name
            .chars()
            .find(|c| *c == ':' || *c == '/' || c.is_whitespace())
        {
            return Err(ConfigError::Invalid {
                field: "local_image_name",
                message: format!("'{}' contains '{}'", name, c),
            });
        }

        let namespace = &self.remote_namespace;
        if namespace.is_empty() {
            return Err(ConfigError::Invalid {
                field: "remote_namespace",
                message: "must not be empty".to_string(),
            });
        }
        // registry hosts with ports (localhost:5000/team) are fine here
        if namespace.chars().any(char::is_whitespace) || namespace.ends_with('/') {
            return Err(ConfigError::Invalid {
                field: "remote_namespace",
                message: format!("'{}' is not a valid namespace", namespace),
            });
        }

        Ok(())
    }
}

/// One configuration layer: a config file, or the environment and CLI flags.
///
/// `None` leaves the lower layer's value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineOverrides {
    pub local_image_name: Option<String>,
    pub remote_namespace: Option<String>,
    pub build_definition_path: Option<PathBuf>,
    pub build_context_root: Option<PathBuf>,
    pub compose_definition_path: Option<PathBuf>,
}

impl PipelineOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
