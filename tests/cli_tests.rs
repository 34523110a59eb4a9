//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Binary with config and runtime dirs pointed at a scratch directory
fn share_indicator_bin(scratch: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("share-indicator").expect("binary builds");
    cmd.env("XDG_CONFIG_HOME", scratch.path().join("config"))
        .env("XDG_RUNTIME_DIR", scratch.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_output() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn run_help_lists_options() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--backend"))
        .stdout(predicate::str::contains("--work-area"))
        .stdout(predicate::str::contains("--thickness"))
        .stdout(predicate::str::contains("--asset"));
}

#[test]
fn version_output() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("share-indicator"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_help() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("path"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_path_uses_xdg_config_home() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("share-indicator"))
        .stdout(predicate::str::contains("config.toml"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_init_set_get_list() {
    let scratch = TempDir::new().unwrap();

    share_indicator_bin(&scratch)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(scratch
        .path()
        .join("config/share-indicator/config.toml")
        .exists());

    share_indicator_bin(&scratch)
        .args(["config", "set", "border_thickness", "7"])
        .assert()
        .success();

    share_indicator_bin(&scratch)
        .args(["config", "get", "border_thickness"])
        .assert()
        .success()
        .stdout("7\n");

    share_indicator_bin(&scratch)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("channel: jitsi-screen-sharing-marker"))
        .stdout(predicate::str::contains("backend: headless"))
        .stdout(predicate::str::contains("logging.level: info"));
}

#[cfg(target_os = "linux")]
#[test]
fn config_get_unset_key() {
    let scratch = TempDir::new().unwrap();
    share_indicator_bin(&scratch)
        .args(["config", "get", "asset"])
        .assert()
        .success()
        .stdout("(not set)\n");
}

#[cfg(unix)]
mod running {
    use super::*;
    use std::path::Path;
    use std::process::{Child, Stdio};
    use std::time::{Duration, Instant};

    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    const WAIT: Duration = Duration::from_secs(10);

    fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < WAIT {
            if condition() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(50));
        }
        false
    }

    fn spawn_indicator(scratch: &TempDir) -> Child {
        std::process::Command::new(assert_cmd::cargo::cargo_bin("share-indicator"))
            .args(["run", "--backend", "headless", "--work-area", "0,0,1280,720"])
            .env("XDG_CONFIG_HOME", scratch.path().join("config"))
            .env("XDG_RUNTIME_DIR", scratch.path())
            .env("NO_COLOR", "1")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("indicator starts")
    }

    fn status_output(scratch: &TempDir) -> String {
        let output = share_indicator_bin(scratch).arg("status").output().unwrap();
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    fn socket_ready(dir: &Path) -> bool {
        dir.join("share-indicator.sock").exists()
    }

    #[test]
    fn open_close_and_shutdown() {
        let scratch = TempDir::new().unwrap();
        let mut child = spawn_indicator(&scratch);
        assert!(wait_for(|| socket_ready(scratch.path())), "socket never appeared");

        share_indicator_bin(&scratch)
            .args(["send", "open"])
            .assert()
            .success();
        assert!(
            wait_for(|| {
                let status = status_output(&scratch);
                ["top", "bottom", "left", "right"]
                    .iter()
                    .all(|p| status.contains(&format!("{}: visible", p)))
            }),
            "overlays never became visible"
        );

        share_indicator_bin(&scratch)
            .args(["send", "close"])
            .assert()
            .success();
        assert!(wait_for(|| status_output(&scratch).contains("top: absent")));

        // A second instance is refused while the first holds the PID file
        share_indicator_bin(&scratch)
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("already running"));

        kill(Pid::from_raw(child.id() as i32), Signal::SIGTERM).unwrap();
        let output = child.wait_with_output().unwrap();
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Indicator stopped"), "stderr: {}", stderr);
        assert!(!socket_ready(scratch.path()));
    }

    #[test]
    fn stop_screen_share_changes_nothing() {
        let scratch = TempDir::new().unwrap();
        let mut child = spawn_indicator(&scratch);
        assert!(wait_for(|| socket_ready(scratch.path())));

        share_indicator_bin(&scratch)
            .args(["send", "stop", "--payload", "{\"reason\":\"toolbar\"}"])
            .assert()
            .success();
        share_indicator_bin(&scratch)
            .args(["send", "unknown-event"])
            .assert()
            .success();

        let status = status_output(&scratch);
        assert!(status.contains("top: absent"), "status: {}", status);
        assert!(status.contains("right: absent"), "status: {}", status);

        kill(Pid::from_raw(child.id() as i32), Signal::SIGINT).unwrap();
        assert!(child.wait().unwrap().success());
    }
}
