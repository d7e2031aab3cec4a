use crate::GlobalArgs;
use playship_config::{PipelineConfig, PipelineOverrides};
use std::path::{Path, PathBuf};

/// A blank value (`PLAYSHIP_IMAGE=` in a `.env` file) counts as unset.
fn non_blank(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

impl GlobalArgs {
    /// Flags and their environment variables, as one override layer
    fn overrides(&self) -> PipelineOverrides {
        PipelineOverrides {
            local_image_name: non_blank(&self.image),
            remote_namespace: non_blank(&self.namespace),
            build_definition_path: non_blank(&self.dockerfile).map(PathBuf::from),
            build_context_root: non_blank(&self.context).map(PathBuf::from),
            compose_definition_path: non_blank(&self.compose_file).map(PathBuf::from),
        }
    }
}

/// Layers defaults < config file < environment < CLI flags.
///
/// clap already resolves the last two into `args`.
pub fn resolve(args: &GlobalArgs, current_dir: &Path) -> anyhow::Result<PipelineConfig> {
    let config_file = match &args.config {
        Some(path) => Some(path.clone()),
        None => playship_config::find_config_file(current_dir)?,
    };

    let mut config = PipelineConfig::default();

    if let Some(path) = &config_file {
        tracing::debug!("Using config file: {}", path.display());
        config = config.merge(playship_config::load_overrides(path)?);
    }

    let overrides = args.overrides();
    if !overrides.is_empty() {
        tracing::debug!("Command line overrides: {:?}", overrides);
    }
    config = config.merge(overrides);

    config.validate()?;
    tracing::debug!("Pipeline config: {:?}", config);
    Ok(config)
}
