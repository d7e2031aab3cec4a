//! Target resolution and execution.
//!
//! ```text
//! push ──▶ build        up      down      prune
//! ```
//!
//! A requested target runs after its prerequisites, each at most once,
//! strictly one after another. The first failure stops the run; `prune`
//! collects the failures of its sub-steps instead.

use crate::docker::{ComposeAction, DockerCli, ResourceClass};
use crate::error::{PipelineError, PipelineResult, PruneStepFailure, TargetError};
use crate::graph::{GraphError, TargetGraph};
use crate::image::{ImageNames, Version};
use crate::runner::CommandRunner;
use crate::target::{Params, TargetName};
use colored::Colorize;
use playship_config::PipelineConfig;

/// Printed by `build` when no version was given
pub const NO_VERSION_NOTICE: &str = "No version specified, skipping version tag.";

/// The dependency graph of the five targets
pub fn default_graph() -> TargetGraph<TargetName> {
    let mut graph = TargetGraph::new();
    for target in TargetName::ALL {
        graph.add_target(target);
    }
    graph.add_prerequisite(TargetName::Push, TargetName::Build);
    graph
}

/// Targets that ran, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub executed: Vec<TargetName>,
}

pub struct Pipeline<R> {
    config: PipelineConfig,
    images: ImageNames,
    docker: DockerCli<R>,
    graph: TargetGraph<TargetName>,
}

impl<R: CommandRunner> Pipeline<R> {
    pub fn new(config: PipelineConfig, docker: DockerCli<R>) -> Self {
        let images = ImageNames::new(&config.local_image_name, &config.remote_namespace);
        let graph = default_graph();
        debug_assert!(graph.is_acyclic());

        Self {
            config,
            images,
            docker,
            graph,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn images(&self) -> &ImageNames {
        &self.images
    }

    pub fn docker(&self) -> &DockerCli<R> {
        &self.docker
    }

    /// Execution order for `target`, prerequisites first
    pub fn plan(&self, target: TargetName) -> Result<Vec<TargetName>, GraphError> {
        self.graph.plan(target)
    }

    /// Runs `target` and everything it depends on.
    pub async fn run(&self, target: TargetName, params: &Params) -> Result<RunReport, TargetError> {
        let order = self.plan(target).map_err(|error| TargetError {
            target,
            error: error.into(),
        })?;
        tracing::debug!("Execution plan for {}: {:?}", target, order);

        let mut report = RunReport::default();
        for step in order {
            println!("{} {}", "■".cyan(), step.as_str().bold());
            tracing::info!("Running target: {}", step);

            self.execute(step, params)
                .await
                .map_err(|error| TargetError {
                    target: step,
                    error,
                })?;

            tracing::info!("Target finished: {}", step);
            report.executed.push(step);
        }

        Ok(report)
    }

    async fn execute(&self, target: TargetName, params: &Params) -> PipelineResult<()> {
        match target {
            TargetName::Build => self.build(params.version.as_ref()).await,
            TargetName::Push => self.push().await,
            TargetName::Up => self.compose(ComposeAction::Up).await,
            TargetName::Down => self.compose(ComposeAction::Down).await,
            TargetName::Prune => self.prune().await,
        }
    }

    /// Builds `name:latest`, then aliases it as `name:<version>` when a
    /// version is given.
    pub async fn build(&self, version: Option<&Version>) -> PipelineResult<()> {
        let latest = self.images.latest();

        self.docker
            .build(
                &self.config.build_definition_path,
                &self.config.build_context_root,
                &latest,
            )
            .await
            .map_err(PipelineError::BuildFailure)?;
        println!("  {} {}", "✓".green(), latest);

        match version {
            Some(version) => {
                let versioned = self.images.versioned(version);
                self.docker
                    .tag(&latest, &versioned)
                    .await
                    .map_err(|failure| PipelineError::TagFailure {
                        from: latest.clone(),
                        to: versioned.clone(),
                        failure,
                    })?;
                println!("  {} {}", "✓".green(), versioned);
            }
            None => {
                println!("{}", NO_VERSION_NOTICE);
            }
        }

        Ok(())
    }

    /// Tags the local `latest` under the remote namespace and pushes it.
    ///
    /// Only `latest` is pushed; version tags stay local.
    pub async fn push(&self) -> PipelineResult<()> {
        let latest = self.images.latest();
        let remote = self.images.remote_latest();

        self.docker
            .tag(&latest, &remote)
            .await
            .map_err(|failure| PipelineError::TagFailure {
                from: latest.clone(),
                to: remote.clone(),
                failure,
            })?;

        self.docker
            .push(&remote)
            .await
            .map_err(|failure| PipelineError::PushFailure {
                image: remote.clone(),
                failure,
            })?;
        println!("  {} {}", "✓".green(), remote);

        Ok(())
    }

    pub async fn compose(&self, action: ComposeAction) -> PipelineResult<()> {
        self.docker
            .compose(&self.config.compose_definition_path, action)
            .await
            .map_err(|failure| PipelineError::ComposeFailure { action, failure })
    }

    /// Reclaims unused images, system resources and volumes, in that order.
    ///
    /// A failing step does not stop the following ones.
    pub async fn prune(&self) -> PipelineResult<()> {
        let mut failures = Vec::new();

        for class in ResourceClass::ALL {
            match self.docker.prune(class).await {
                Ok(()) => println!("  {} {}", "✓".green(), class),
                Err(failure) => {
                    tracing::warn!("Pruning {} failed: {}", class, failure);
                    println!("  {} {}", "✗".red(), class);
                    failures.push(PruneStepFailure { class, failure });
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::PruneFailure(failures))
        }
    }
}
