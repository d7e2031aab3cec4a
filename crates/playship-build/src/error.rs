use crate::docker::{ComposeAction, ResourceClass};
use crate::graph::GraphError;
use crate::image::ImageRef;
use crate::target::TargetName;
use thiserror::Error;

/// Exit code for problems detected before any external tool runs
pub const USAGE_EXIT_CODE: i32 = 2;

/// Exit code when the external tool could not be started at all
pub const SPAWN_EXIT_CODE: i32 = 127;

/// One failed external invocation
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("`{command}` exited with status {code}")]
    Exited { command: String, code: i32 },

    #[error("`{command}` was terminated by a signal")]
    Terminated { command: String },

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl CommandError {
    /// The status the invoking shell should see
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Exited { code, .. } => *code,
            CommandError::Terminated { .. } => 1,
            CommandError::Spawn { .. } => SPAWN_EXIT_CODE,
        }
    }
}

/// A prune sub-step that did not succeed
#[derive(Debug, Error)]
#[error("{class}: {failure}")]
pub struct PruneStepFailure {
    pub class: ResourceClass,
    #[source]
    pub failure: CommandError,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("build failed: {0}")]
    BuildFailure(#[source] CommandError),

    #[error("tagging {from} as {to} failed: {failure}")]
    TagFailure {
        from: ImageRef,
        to: ImageRef,
        #[source]
        failure: CommandError,
    },

    #[error("push of {image} failed: {failure}")]
    PushFailure {
        image: ImageRef,
        #[source]
        failure: CommandError,
    },

    #[error("compose {action} failed: {failure}")]
    ComposeFailure {
        action: ComposeAction,
        #[source]
        failure: CommandError,
    },

    #[error("prune failed for {}", describe_prune_failures(.0))]
    PruneFailure(Vec<PruneStepFailure>),

    #[error("invalid version '{label}': {reason} (rejected before running docker)")]
    InvalidVersion { label: String, reason: String },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl PipelineError {
    /// Exit code of the first failing external invocation, or
    /// [`USAGE_EXIT_CODE`] when nothing external was run.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::BuildFailure(failure)
            | PipelineError::TagFailure { failure, .. }
            | PipelineError::PushFailure { failure, .. }
            | PipelineError::ComposeFailure { failure, .. } => failure.exit_code(),
            PipelineError::PruneFailure(steps) => steps
                .first()
                .map(|step| step.failure.exit_code())
                .unwrap_or(1),
            PipelineError::InvalidVersion { .. } | PipelineError::Graph(_) => USAGE_EXIT_CODE,
        }
    }
}

fn describe_prune_failures(steps: &[PruneStepFailure]) -> String {
    steps
        .iter()
        .map(|step| step.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A pipeline failure together with the target whose action failed
#[derive(Debug, Error)]
#[error("target `{target}` failed: {error}")]
pub struct TargetError {
    pub target: TargetName,
    #[source]
    pub error: PipelineError,
}

impl TargetError {
    pub fn exit_code(&self) -> i32 {
        self.error.exit_code()
    }
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn exited(code: i32) -> CommandError {
        CommandError::Exited {
            command: "docker build".to_string(),
            code,
        }
    }

    #[test]
    fn test_command_error_exit_codes() {
        assert_eq!(exited(3).exit_code(), 3);
        assert_eq!(
            CommandError::Terminated {
                command: "docker push".to_string()
            }
            .exit_code(),
            1
        );
        let spawn = CommandError::Spawn {
            command: "docker".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(spawn.exit_code(), SPAWN_EXIT_CODE);
    }

    #[test]
    fn test_prune_failure_reports_first_code_and_all_classes() {
        let error = PipelineError::PruneFailure(vec![
            PruneStepFailure {
                class: ResourceClass::Images,
                failure: exited(4),
            },
            PruneStepFailure {
                class: ResourceClass::Volumes,
                failure: exited(5),
            },
        ]);

        assert_eq!(error.exit_code(), 4);
        let message = error.to_string();
        assert!(message.contains("images"));
        assert!(message.contains("volumes"));
        assert!(!message.contains("system"));
    }

    #[test]
    fn test_usage_errors() {
        let error = PipelineError::InvalidVersion {
            label: "a b".to_string(),
            reason: "invalid character ' '".to_string(),
        };
        assert_eq!(error.exit_code(), USAGE_EXIT_CODE);
        assert_eq!(
            error.to_string(),
            "invalid version 'a b': invalid character ' ' (rejected before running docker)"
        );
    }

    #[test]
    fn test_target_error_names_target() {
        let error = TargetError {
            target: TargetName::Build,
            error: PipelineError::BuildFailure(exited(2)),
        };
        assert_eq!(error.exit_code(), 2);
        assert!(
            error
                .to_string()
                .starts_with("target `build` failed: build failed")
        );
    }
}
