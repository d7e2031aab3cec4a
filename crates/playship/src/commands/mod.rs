pub mod plan;
pub mod run;

use playship_build::error::USAGE_EXIT_CODE;
use playship_build::{PipelineError, TargetError};
use playship_config::ConfigError;

/// Maps an error to the process exit status.
///
/// Pipeline failures carry the exit code of the external tool that failed.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<TargetError>() {
        return err.exit_code();
    }
    if let Some(err) = err.downcast_ref::<PipelineError>() {
        return err.exit_code();
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return USAGE_EXIT_CODE;
    }
    1
}
