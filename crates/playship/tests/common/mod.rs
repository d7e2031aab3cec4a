use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const ENV_OVERRIDES: [&str; 7] = [
    "PLAYSHIP_CONFIG",
    "PLAYSHIP_IMAGE",
    "PLAYSHIP_NAMESPACE",
    "PLAYSHIP_DOCKERFILE",
    "PLAYSHIP_CONTEXT",
    "PLAYSHIP_COMPOSE_FILE",
    "DOCKER_BIN",
];

/// A scratch project directory with its own HOME, so no user config leaks in
pub struct TestProject {
    pub root: TempDir,
}

impl TestProject {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        Self { root }
    }

    #[allow(dead_code)]
    pub fn path(&self) -> PathBuf {
        self.root.path().to_path_buf()
    }

    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        fs::write(self.root.path().join("playship.yaml"), content).unwrap();
    }

    /// `playship` running inside the project, with a clean environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("playship").unwrap();
        cmd.current_dir(self.root.path())
            .env("HOME", self.root.path())
            .env("XDG_CONFIG_HOME", self.root.path().join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        for var in ENV_OVERRIDES {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Installs a stand-in docker binary that records its arguments.
    ///
    /// It exits with `exit_code` when its first argument is `fail_on`.
    #[allow(dead_code)]
    #[cfg(unix)]
    pub fn fake_docker(&self, fail_on: Option<(&str, i32)>) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let (fail_on, exit_code) = fail_on.unwrap_or(("", 0));
        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{log}'\n\
             if [ -n '{fail_on}' ] && [ \"$1\" = '{fail_on}' ]; then\n\
             \texit {exit_code}\n\
             fi\n\
             exit 0\n",
            log = self.calls_log().display(),
        );

        let path = self.root.path().join("fake-docker");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// Argument lines the fake docker received, in order
    #[allow(dead_code)]
    pub fn docker_calls(&self) -> Vec<String> {
        fs::read_to_string(self.calls_log())
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    fn calls_log(&self) -> PathBuf {
        self.root.path().join("docker-calls.log")
    }
}
