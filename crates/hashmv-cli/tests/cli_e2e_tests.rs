//! End-to-end tests for the hashmv binary: flags in, filesystem and exit code out.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Isolated XDG dirs so tests never read the user's config or write their log.
struct Env {
    xdg: TempDir,
    hold: TempDir,
    web: TempDir,
}

impl Env {
    fn new() -> Self {
        Self {
            xdg: TempDir::new().unwrap(),
            hold: TempDir::new().unwrap(),
            web: TempDir::new().unwrap(),
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hashmv"));
        cmd.env("XDG_CONFIG_HOME", self.xdg.path().join("config"))
            .env("XDG_CONFIG_DIRS", self.xdg.path().join("etc"))
            .env("XDG_STATE_HOME", self.xdg.path().join("state"))
            .env_remove("RUST_LOG");
        cmd
    }

    fn write_config(&self, toml: &str) {
        let dir = self.xdg.path().join("config").join("hashmv");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), toml).unwrap();
    }

    fn web_entries(&self) -> usize {
        fs::read_dir(self.web.path()).unwrap().count()
    }
}

#[test]
fn moves_file_and_prints_name() {
    let env = Env::new();
    fs::write(env.hold.path().join("hello.txt"), b"hello\n").unwrap();

    env.cmd()
        .args(["-f", "hello.txt", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .arg("--print")
        .assert()
        .success()
        .stdout("f572d396fae9206628714fb2ce00f72e94f2258f.txt\n");

    assert!(!env.hold.path().join("hello.txt").exists());
    assert!(env
        .web
        .path()
        .join("f572d396fae9206628714fb2ce00f72e94f2258f.txt")
        .exists());
}

#[test]
fn silent_without_print() {
    let env = Env::new();
    fs::write(env.hold.path().join("data"), b"abc").unwrap();

    env.cmd()
        .args(["--file", "data", "--hold"])
        .arg(env.hold.path())
        .arg("--web")
        .arg(env.web.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    assert_eq!(env.web_entries(), 1);
}

#[test]
fn oversized_file_deleted_exit_zero() {
    let env = Env::new();
    fs::write(env.hold.path().join("big.bin"), vec![0u8; 1024 * 1024 + 1]).unwrap();

    env.cmd()
        .args(["-f", "big.bin", "-m", "1", "-p", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!env.hold.path().join("big.bin").exists());
    assert_eq!(env.web_entries(), 0);
}

#[test]
fn missing_hold_dir_exits_one() {
    let env = Env::new();

    env.cmd()
        .args(["-f", "x", "-d", "/nonexistent/hashmv-hold", "-w"])
        .arg(env.web.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("hold directory not found"));
    assert_eq!(env.web_entries(), 0);
}

#[test]
fn missing_web_dir_keeps_source() {
    let env = Env::new();
    fs::write(env.hold.path().join("x"), b"payload").unwrap();

    env.cmd()
        .args(["-f", "x", "-m", "0", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.hold.path().join("missing-web"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("web directory not found"));
    assert!(env.hold.path().join("x").exists());
}

#[test]
fn missing_source_file_fails_with_io_code() {
    let env = Env::new();

    env.cmd()
        .args(["-f", "gone.txt", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("gone.txt"));
}

#[test]
fn config_default_max_is_used() {
    let env = Env::new();
    env.write_config("default_max_mib = 0\n");
    fs::write(env.hold.path().join("tiny"), b"1").unwrap();

    env.cmd()
        .args(["-f", "tiny", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .assert()
        .success();
    assert!(!env.hold.path().join("tiny").exists());
    assert_eq!(env.web_entries(), 0);
}

#[test]
fn malformed_config_fails() {
    let env = Env::new();
    env.write_config("default_max_mib = [");
    fs::write(env.hold.path().join("a"), b"1").unwrap();

    env.cmd()
        .args(["-f", "a", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("parse config"));
    assert!(env.hold.path().join("a").exists());
}

#[test]
fn writes_log_file_under_state_home() {
    let env = Env::new();
    fs::write(env.hold.path().join("a.txt"), b"logged").unwrap();

    env.cmd()
        .args(["-f", "a.txt", "-d"])
        .arg(env.hold.path())
        .arg("-w")
        .arg(env.web.path())
        .assert()
        .success();

    let log = fs::read_to_string(env.xdg.path().join("state/hashmv/hashmv.log")).unwrap();
    assert!(log.contains("moved file"), "{log}");
}

#[test]
fn missing_dir_wins_over_bad_config() {
    let env = Env::new();
    env.write_config("not toml at all [");

    env.cmd()
        .args(["-f", "x", "-d", "/nonexistent/hashmv-hold", "-w"])
        .arg(env.web.path())
        .assert()
        .code(1);
}

#[test]
fn stderr_fallback_reports_error_once() {
    let env = Env::new();
    // A regular file where the state dir should be forces the stderr logger.
    let blocked = env.xdg.path().join("state-is-a-file");
    fs::write(&blocked, b"").unwrap();

    let out = env
        .cmd()
        .env("XDG_STATE_HOME", &blocked)
        .args(["-f", "x", "-d", "/nonexistent/hashmv-hold", "-w"])
        .arg(env.web.path())
        .assert()
        .code(1)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8(out).unwrap();
    assert!(stderr.contains("log file unavailable"), "{stderr}");
    assert_eq!(stderr.matches("hold directory not found").count(), 1, "{stderr}");
}
