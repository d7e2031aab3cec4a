//! Image references and version labels

use crate::error::PipelineError;
use std::fmt;

/// Tag recreated on every build
pub const LATEST_TAG: &str = "latest";

const MAX_TAG_LEN: usize = 128;

/// A validated version label, used as an extra image tag.
///
/// Docker tag rules apply: at most 128 characters, ASCII alphanumerics,
/// `.`, `-` and `_` only, and no leading `.` or `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn parse(label: &str) -> Result<Self, PipelineError> {
        let invalid = |reason: String| PipelineError::InvalidVersion {
            label: label.to_string(),
            reason,
        };

        if label.is_empty() {
            return Err(invalid("version must not be empty".to_string()));
        }

        if label.len() > MAX_TAG_LEN {
            return Err(invalid(format!(
                "too long ({} characters, max {})",
                label.len(),
                MAX_TAG_LEN
            )));
        }

        if label.starts_with('.') || label.starts_with('-') {
            return Err(invalid("must not start with '.' or '-'".to_string()));
        }

        if let Some(c) = label
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '.' && *c != '-' && *c != '_')
        {
            return Err(invalid(format!("invalid character '{}'", c)));
        }

        Ok(Self(label.to_string()))
    }

    /// Interprets a raw `version=` value. An empty value counts as absent.
    pub fn from_param(value: &str) -> Result<Option<Self>, PipelineError> {
        if value.is_empty() {
            return Ok(None);
        }
        Self::parse(value).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `[namespace/]name:tag`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub namespace: Option<String>,
    pub name: String,
    pub tag: String,
}

impl ImageRef {
    pub fn local(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
            tag: tag.into(),
        }
    }

    /// Same name and namespace, different tag
    pub fn with_tag(&self, tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..self.clone()
        }
    }

    /// Same name and tag, placed under a registry namespace
    pub fn in_namespace(&self, namespace: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            ..self.clone()
        }
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{}/{}:{}", namespace, self.name, self.tag),
            None => write!(f, "{}:{}", self.name, self.tag),
        }
    }
}

/// The references one pipeline works with, derived from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageNames {
    local_name: String,
    remote_namespace: String,
}

impl ImageNames {
    pub fn new(local_name: impl Into<String>, remote_namespace: impl Into<String>) -> Self {
        Self {
            local_name: local_name.into(),
            remote_namespace: remote_namespace.into(),
        }
    }

    /// `name:latest`
    pub fn latest(&self) -> ImageRef {
        ImageRef::local(&self.local_name, LATEST_TAG)
    }

    /// `name:<version>`
    pub fn versioned(&self, version: &Version) -> ImageRef {
        self.latest().with_tag(version.as_str())
    }

    /// `namespace/name:latest`, always derived from the local `latest` reference
    pub fn remote_latest(&self) -> ImageRef {
        self.latest().in_namespace(&self.remote_namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_accepts_semver_like_labels() {
        for label in ["1.2.0", "v1", "2024_10_01", "rc-1", "latest"] {
            let version = Version::parse(label).unwrap();
            assert_eq!(version.as_str(), label);
        }
    }

    #[test]
    fn test_version_rejects_empty() {
        assert!(matches!(
            Version::parse(""),
            Err(PipelineError::InvalidVersion { .. })
        ));
    }

    #[test]
    fn test_version_rejects_leading_dot_or_dash() {
        assert!(Version::parse(".1").is_err());
        assert!(Version::parse("-rc").is_err());
    }

    #[test]
    fn test_version_rejects_invalid_characters() {
        let err = Version::parse("1.2 beta").unwrap_err();
        assert!(err.to_string().contains("invalid character ' '"));
        assert!(Version::parse("feature/x").is_err());
        assert!(Version::parse("a:b").is_err());
    }

    #[test]
    fn test_version_rejects_too_long() {
        let label = "a".repeat(129);
        let err = Version::parse(&label).unwrap_err();
        assert!(err.to_string().contains("too long"));
        assert!(Version::parse(&"a".repeat(128)).is_ok());
    }

    #[test]
    fn test_version_from_param_empty_is_absent() {
        assert_eq!(Version::from_param("").unwrap(), None);
        assert_eq!(
            Version::from_param("1.2.0").unwrap(),
            Some(Version::parse("1.2.0").unwrap())
        );
    }

    #[test]
    fn test_image_ref_display() {
        let image = ImageRef::local("discord-playbot", "latest");
        assert_eq!(image.to_string(), "discord-playbot:latest");

        let remote = image.in_namespace("timoliukko42");
        assert_eq!(remote.to_string(), "timoliukko42/discord-playbot:latest");
    }

    #[test]
    fn test_image_names() {
        let names = ImageNames::new("discord-playbot", "timoliukko42");
        let version = Version::parse("1.2.0").unwrap();

        assert_eq!(names.latest().to_string(), "discord-playbot:latest");
        assert_eq!(
            names.versioned(&version).to_string(),
            "discord-playbot:1.2.0"
        );
        assert_eq!(
            names.remote_latest().to_string(),
            "timoliukko42/discord-playbot:latest"
        );
    }

    #[test]
    fn test_remote_is_derived_from_local_latest() {
        let names = ImageNames::new("bot", "ghcr.io/team");
        let remote = names.remote_latest();
        assert_eq!(remote.name, names.latest().name);
        assert_eq!(remote.tag, LATEST_TAG);
        assert_eq!(remote.namespace.as_deref(), Some("ghcr.io/team"));
    }
}
