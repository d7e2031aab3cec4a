//! playship build pipeline
//!
//! Builds the image, tags it with an optional version, pushes `latest` to the
//! registry namespace and drives the compose environment, all through the
//! docker CLI. Targets and their prerequisites form a small graph that is
//! resolved before anything runs.

pub mod docker;
pub mod error;
pub mod graph;
pub mod image;
pub mod pipeline;
pub mod runner;
pub mod target;

pub use docker::{ComposeAction, DockerCli, ResourceClass, resolve_docker_binary};
pub use error::{CommandError, PipelineError, PipelineResult, PruneStepFailure, TargetError};
pub use graph::{GraphError, TargetGraph};
pub use image::{ImageNames, ImageRef, Version};
pub use pipeline::{NO_VERSION_NOTICE, Pipeline, RunReport, default_graph};
pub use runner::{CommandLine, CommandRunner, DryRunRunner, ProcessRunner};
pub use target::{Params, TargetName};
