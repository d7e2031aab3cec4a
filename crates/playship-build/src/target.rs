//! Target names and invocation parameters

use crate::error::PipelineResult;
use crate::graph::GraphError;
use crate::image::Version;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TargetName {
    Build,
    Push,
    Up,
    Down,
    Prune,
}

impl TargetName {
    pub const ALL: [TargetName; 5] = [
        TargetName::Build,
        TargetName::Push,
        TargetName::Up,
        TargetName::Down,
        TargetName::Prune,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TargetName::Build => "build",
            TargetName::Push => "push",
            TargetName::Up => "up",
            TargetName::Down => "down",
            TargetName::Prune => "prune",
        }
    }
}

impl fmt::Display for TargetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetName {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetName::ALL
            .into_iter()
            .find(|target| target.as_str() == s)
            .ok_or_else(|| GraphError::UnknownTarget(s.to_string()))
    }
}

/// Parameters of one invocation.
///
/// `version` is the only one recognized; everything else is accepted and
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pub version: Option<Version>,
}

impl Params {
    pub fn with_version(version: Version) -> Self {
        Self {
            version: Some(version),
        }
    }

    /// Parses make-style `key=value` assignments.
    ///
    /// `version=` with an empty value leaves the version unset. When the same
    /// key is given twice the last one wins.
    pub fn from_assignments<I, S>(assignments: I) -> PipelineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Params::default();

        for assignment in assignments {
            let assignment = assignment.as_ref();
            match assignment.split_once('=') {
                Some(("version", value)) => {
                    params.version = Version::from_param(value)?;
                }
                Some((key, _)) => {
                    tracing::debug!("Ignoring unrecognized parameter '{}'", key);
                }
                None => {
                    tracing::debug!("Ignoring argument without '=': '{}'", assignment);
                }
            }
        }

        Ok(params)
    }
}
