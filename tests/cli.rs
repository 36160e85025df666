use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

const ENV_VARS: &[&str] = &[
    "GRACE_PERIOD",
    "GRACE_PERIOD_SECONDS",
    "DOCKER_SOCKET",
    "EXCLUDE_FROM_GC",
    "DGC_QUIET",
    "DGC_FORCE",
    "DGC_REMOVE_VOLUMES",
    "DGC_NO_PRUNE",
    "DGC_ALL",
    "DGC_ACTIVE_ONLY",
    "DGC_TIMEOUT",
    "RUST_LOG",
];

fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("dgc").unwrap();
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn unreachable_socket(dir: &TempDir) -> String {
    format!("unix://{}", dir.path().join("docker.sock").display())
}

#[test]
fn help_lists_flags() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--grace"))
        .stdout(contains("--socket"))
        .stdout(contains("--exclude"))
        .stdout(contains("--remove-volumes"))
        .stdout(contains("--no-prune"))
        .stdout(contains("--all"));
}

#[test]
fn negative_grace_is_rejected() {
    cmd().arg("--grace=-1h").assert().failure();
}

#[test]
fn grace_from_environment_is_validated() {
    cmd().env("GRACE_PERIOD", "whenever").assert().failure();
}

#[test]
fn grace_seconds_from_environment_is_validated() {
    cmd()
        .env("GRACE_PERIOD_SECONDS", "ninety")
        .assert()
        .failure()
        .stderr(contains("GRACE_PERIOD_SECONDS"));
}

#[test]
fn unsupported_socket_is_fatal() {
    cmd()
        .args(["--socket", "ssh://build-host"])
        .assert()
        .failure()
        .stderr(contains("unsupported engine endpoint"));
}

#[test]
fn missing_exclude_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("excludes");

    cmd()
        .arg("--exclude")
        .arg(&missing)
        .args(["--socket", "unix:///nonexistent/docker.sock"])
        .assert()
        .failure()
        .stderr(contains("Failed to load exclusions"))
        .stdout(contains("Deleted").not());
}

#[test]
fn unreachable_engine_is_fatal() {
    let dir = TempDir::new().unwrap();
    let socket = unreachable_socket(&dir);

    cmd()
        .args(["--socket", &socket, "--all", "--force"])
        .assert()
        .failure()
        .stdout(contains("Deleted").not());
}

#[test]
fn verbose_keeps_rust_log_directives() {
    let dir = TempDir::new().unwrap();
    let socket = unreachable_socket(&dir);

    cmd()
        .env("RUST_LOG", "warn")
        .args(["--socket", &socket])
        .assert()
        .failure()
        .stderr(contains("Starting garbage collection").not());

    cmd()
        .env("RUST_LOG", "warn,dgc::coordinator=off")
        .args(["--socket", &socket, "--verbose"])
        .assert()
        .failure()
        .stderr(contains("Starting garbage collection"))
        .stderr(contains("Getting a list of images").not());
}
