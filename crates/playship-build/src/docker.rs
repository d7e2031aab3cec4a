//! docker CLI command lines
//!
//! Build engine, registry client, compose orchestrator and cleanup are all
//! reached through the `docker` binary.

use crate::error::CommandError;
use crate::image::ImageRef;
use crate::runner::{CommandLine, CommandRunner};
use std::fmt;
use std::path::Path;

/// Environment variable overriding the docker binary
pub const DOCKER_BIN_ENV: &str = "DOCKER_BIN";

pub fn resolve_docker_binary() -> String {
    std::env::var(DOCKER_BIN_ENV)
        .ok()
        .filter(|bin| !bin.trim().is_empty())
        .unwrap_or_else(|| "docker".to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeAction {
    /// (re)build images and start the environment
    Up,
    /// stop and remove the environment
    Down,
}

impl ComposeAction {
    fn args(self) -> &'static [&'static str] {
        match self {
            ComposeAction::Up => &["up", "--build"],
            ComposeAction::Down => &["down"],
        }
    }
}

impl fmt::Display for ComposeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeAction::Up => f.write_str("up"),
            ComposeAction::Down => f.write_str("down"),
        }
    }
}

/// Resource classes reclaimed by `prune`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceClass {
    Images,
    System,
    Volumes,
}

impl ResourceClass {
    /// Cleanup order
    pub const ALL: [ResourceClass; 3] = [
        ResourceClass::Images,
        ResourceClass::System,
        ResourceClass::Volumes,
    ];

    fn docker_object(self) -> &'static str {
        match self {
            ResourceClass::Images => "image",
            ResourceClass::System => "system",
            ResourceClass::Volumes => "volume",
        }
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceClass::Images => f.write_str("images"),
            ResourceClass::System => f.write_str("system"),
            ResourceClass::Volumes => f.write_str("volumes"),
        }
    }
}

/// Builds docker command lines and hands them to a [`CommandRunner`]
pub struct DockerCli<R> {
    runner: R,
    program: String,
}

impl<R: CommandRunner> DockerCli<R> {
    pub fn new(runner: R, program: impl Into<String>) -> Self {
        Self {
            runner,
            program: program.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn command(&self) -> CommandLine {
        CommandLine::new(&self.program)
    }

    /// `docker build -f <definition> -t <image> <context>`
    pub async fn build(
        &self,
        definition: &Path,
        context: &Path,
        image: &ImageRef,
    ) -> Result<(), CommandError> {
        tracing::info!("Building image: {}", image);
        let command = self
            .command()
            .arg("build")
            .arg("-f")
            .arg(path_arg(definition))
            .arg("-t")
            .arg(image.to_string())
            .arg(path_arg(context));
        self.runner.run(&command).await
    }

    /// `docker tag <source> <target>`, an alias without rebuilding
    pub async fn tag(&self, source: &ImageRef, target: &ImageRef) -> Result<(), CommandError> {
        tracing::info!("Tagging {} as {}", source, target);
        let command = self
            .command()
            .arg("tag")
            .arg(source.to_string())
            .arg(target.to_string());
        self.runner.run(&command).await
    }

    /// `docker push <image>`
    pub async fn push(&self, image: &ImageRef) -> Result<(), CommandError> {
        tracing::info!("Pushing image: {}", image);
        let command = self.command().arg("push").arg(image.to_string());
        self.runner.run(&command).await
    }

    /// `docker compose -f <definition> up --build` / `down`
    pub async fn compose(
        &self,
        definition: &Path,
        action: ComposeAction,
    ) -> Result<(), CommandError> {
        tracing::info!("compose {} ({})", action, definition.display());
        let command = self
            .command()
            .arg("compose")
            .arg("-f")
            .arg(path_arg(definition))
            .args(action.args().iter().copied());
        self.runner.run(&command).await
    }

    /// `docker <image|system|volume> prune -f`
    pub async fn prune(&self, class: ResourceClass) -> Result<(), CommandError> {
        tracing::info!("Pruning unused {}", class);
        let command = self
            .command()
            .arg(class.docker_object())
            .arg("prune")
            .arg("-f");
        self.runner.run(&command).await
    }
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
