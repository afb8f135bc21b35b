//! Locating, building and running the helper executable.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};

/// Environment variable the helper reads to pick a device.
pub const VISIBLE_DEVICE_ENV: &str = "EGL_VISIBLE_DEVICE";

/// Overrides [`HelperConfig::executable`].
pub const HELPER_ENV: &str = "EGLPROBE_HELPER";

/// Overrides [`HelperConfig::build_script`].
pub const BUILD_SCRIPT_ENV: &str = "EGLPROBE_BUILD_SCRIPT";

/// Where the helper lives and how to produce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelperConfig {
    /// Compiled helper, run with no arguments.
    pub executable: PathBuf,

    /// Script run with `bash` when `executable` is missing.
    pub build_script: PathBuf,

    /// Variable set to the device index for per-device runs.
    pub device_env: String,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("./EGL_options.o"),
            build_script: PathBuf::from("./build.sh"),
            device_env: VISIBLE_DEVICE_ENV.to_owned(),
        }
    }
}

impl HelperConfig {
    /// Defaults with [`HELPER_ENV`] and [`BUILD_SCRIPT_ENV`] applied.
    pub fn from_env() -> Self {
        Self::default().with_overrides(
            std::env::var_os(HELPER_ENV).map(PathBuf::from),
            std::env::var_os(BUILD_SCRIPT_ENV).map(PathBuf::from),
        )
    }

    pub fn with_overrides(mut self, executable: Option<PathBuf>, build_script: Option<PathBuf>) -> Self {
        if let Some(path) = executable.filter(|p| !p.as_os_str().is_empty()) {
            self.executable = path;
        }
        if let Some(path) = build_script.filter(|p| !p.as_os_str().is_empty()) {
            self.build_script = path;
        }
        self
    }
}

/// The process operations the enumerator performs, one at a time.
pub trait Launcher {
    /// Whether the compiled helper is already present.
    fn artifact_exists(&self) -> bool;

    /// Runs the build script. The outcome is not reported back.
    fn build(&mut self);

    /// Runs the helper with the inherited environment and returns its stderr.
    fn discover(&mut self) -> Result<String>;

    /// Runs the helper with the device variable set to `index` and waits for it.
    ///
    /// Only a failure to launch is an error; the exit status is ignored.
    fn run_device(&mut self, index: usize) -> Result<()>;
}

/// [`Launcher`] backed by real child processes.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    config: HelperConfig,
}

impl ProcessLauncher {
    pub fn new(config: HelperConfig) -> Self {
        Self { config }
    }
}

impl Launcher for ProcessLauncher {
    fn artifact_exists(&self) -> bool {
        self.config.executable.is_file()
    }

    fn build(&mut self) {
        let script = &self.config.build_script;
        log::info!("{} not found; running {}", self.config.executable.display(), script.display());

        match Command::new("bash").arg(script).status() {
            Ok(status) if status.success() => log::debug!("build finished"),
            Ok(status) => log::warn!("build script exited with {status}; continuing"),
            Err(err) => log::warn!("could not run build script: {err}; continuing"),
        }
    }

    fn discover(&mut self) -> Result<String> {
        let output = Command::new(&self.config.executable)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .with_context(|| format!("failed to run {}", self.config.executable.display()))?;

        log::debug!("discovery run exited with {}", output.status);
        Ok(String::from_utf8_lossy(&output.stderr).into_owned())
    }

    fn run_device(&mut self, index: usize) -> Result<()> {
        let status = Command::new(&self.config.executable)
            .env(&self.config.device_env, index.to_string())
            .status()
            .with_context(|| {
                format!("failed to run {} for device {index}", self.config.executable.display())
            })?;

        log::debug!("device {index} run exited with {status}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let config = HelperConfig::default();
        assert_eq!(config.executable, PathBuf::from("./EGL_options.o"));
        assert_eq!(config.build_script, PathBuf::from("./build.sh"));
        assert_eq!(config.device_env, "EGL_VISIBLE_DEVICE");
    }

    #[test]
    fn overrides_replace_paths() {
        let config = HelperConfig::default()
            .with_overrides(Some("/opt/egl/egl-options".into()), Some(PathBuf::new()));
        assert_eq!(config.executable, PathBuf::from("/opt/egl/egl-options"));
        assert_eq!(config.build_script, PathBuf::from("./build.sh"));
    }

    #[test]
    fn artifact_check_uses_the_filesystem() {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

        let present = ProcessLauncher::new(HelperConfig {
            executable: manifest.join("Cargo.toml"),
            ..HelperConfig::default()
        });
        assert!(present.artifact_exists());

        let absent = ProcessLauncher::new(HelperConfig {
            executable: manifest.join("no-such-helper.o"),
            ..HelperConfig::default()
        });
        assert!(!absent.artifact_exists());

        // A directory is not an executable artifact.
        let dir = ProcessLauncher::new(HelperConfig {
            executable: manifest,
            ..HelperConfig::default()
        });
        assert!(!dir.artifact_exists());
    }

    #[test]
    fn launching_a_missing_helper_fails() {
        let mut launcher = ProcessLauncher::new(HelperConfig {
            executable: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("no-such-helper.o"),
            ..HelperConfig::default()
        });
        assert!(launcher.discover().is_err());
        assert!(launcher.run_device(0).is_err());
    }
}
