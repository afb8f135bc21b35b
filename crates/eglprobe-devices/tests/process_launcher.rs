//! Drives `ProcessLauncher` against a shell-script helper.
//!
//! Kept in its own test binary: the script is written and then executed, and
//! no other test in this process may fork while its descriptor is open.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use eglprobe_devices::{HelperConfig, Launcher, ProcessLauncher, enumerate_devices};

/// Writes an executable helper that logs the device variable it sees to
/// `log`, prints one line on stdout and reports three devices on stderr.
fn write_helper(dir: &Path, log: &Path) -> std::path::PathBuf {
    let helper = dir.join("EGL_options.o");
    let script = format!(
        "#!/bin/sh\n\
         echo \"dev=[${{EGL_VISIBLE_DEVICE-unset}}]\" >> '{}'\n\
         echo \"stdout line\"\n\
         echo \"using device 0 of 3 devices\" >&2\n",
        log.display()
    );
    std::fs::write(&helper, script).unwrap();
    std::fs::set_permissions(&helper, std::fs::Permissions::from_mode(0o755)).unwrap();
    helper
}

#[test]
fn real_helper_runs_once_per_device() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("devices.log");
    let helper = write_helper(dir.path(), &log);

    let mut launcher = ProcessLauncher::new(HelperConfig {
        executable: helper,
        build_script: dir.path().join("no-such-build.sh"),
        ..HelperConfig::default()
    });
    assert!(launcher.artifact_exists());

    // ── discovery returns stderr only ─────────────────────────────────────

    let stderr = launcher.discover().unwrap();
    assert_eq!(stderr, "using device 0 of 3 devices\n");
    std::fs::remove_file(&log).unwrap();

    // ── full enumeration ──────────────────────────────────────────────────

    let mut out = Vec::<u8>::new();
    let count = enumerate_devices(&mut launcher, &mut out).unwrap();
    assert_eq!(count, 3);

    let inherited = std::env::var("EGL_VISIBLE_DEVICE").unwrap_or_else(|_| "unset".to_owned());
    assert_eq!(
        std::fs::read_to_string(&log).unwrap(),
        format!("dev=[{inherited}]\ndev=[0]\ndev=[1]\ndev=[2]\n")
    );

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "----------Default-------------\n\
         number of EGL devices: 3\n\
         ----------Option #1 (id=0)-------------\n\
         \n\
         ----------Option #2 (id=1)-------------\n\
         \n\
         ----------Option #3 (id=2)-------------\n\
         \n"
    );
}
