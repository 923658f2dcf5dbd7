use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn optionterm_bin() -> &'static str {
    env!("CARGO_BIN_EXE_optionterm")
}

fn run(args: &[&str], config_dir: &Path) -> Output {
    Command::new(optionterm_bin())
        .args(args)
        .env("OPTIONTERM_CONFIG_DIR", config_dir)
        .output()
        .expect("run optionterm")
}

fn unique_dir(suffix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("optionterm-cli-{suffix}-{nanos}"));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn dump(args: &[&str], config_dir: &Path) -> serde_json::Value {
    let output = run(args, config_dir);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("settings json")
}

#[test]
fn help_lists_interactive_and_logging_flags() {
    let dir = unique_dir("help");
    let output = run(&["--help"], &dir);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in [
        "--settings-file",
        "--palette",
        "--no-color",
        "--anchor",
        "--list-anchors",
        "--dump-settings",
        "--logs",
        "--no-logs",
        "--log-timings",
    ] {
        assert!(stdout.contains(flag), "missing {flag} in help");
    }
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn dump_settings_without_file_prints_defaults() {
    let dir = unique_dir("defaults");
    let settings = dump(&["--dump-settings"], &dir);
    assert_eq!(settings["anticache"], false);
    assert_eq!(settings["refresh_server_playback"], true);
    assert_eq!(settings["default_display_mode"], "auto");
    assert_eq!(settings["palette"], "dark");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn dump_settings_reads_file_and_applies_palette_override() {
    let dir = unique_dir("file");
    let path = dir.join("custom.toml");
    fs::write(
        &path,
        "kill = true\nscripts = [\"dump.py -q\"]\npalette = \"light\"\n",
    )
    .expect("write settings");
    let path_arg = path.to_string_lossy().to_string();
    let settings = dump(
        &[
            "--dump-settings",
            "--settings-file",
            &path_arg,
            "--palette",
            "solarized_dark",
        ],
        &dir,
    );
    assert_eq!(settings["kill"], true);
    assert_eq!(settings["scripts"][0], "dump.py -q");
    assert_eq!(settings["palette"], "solarized_dark");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn invalid_settings_file_fails_with_context() {
    let dir = unique_dir("invalid");
    let path = dir.join("bad.toml");
    fs::write(&path, "tcp_hosts = [\"(oops\"]\n").expect("write settings");
    let path_arg = path.to_string_lossy().to_string();
    let output = run(&["--dump-settings", "--settings-file", &path_arg], &dir);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid regex"), "stderr: {stderr}");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn list_anchors_prints_most_recent_first() {
    let dir = unique_dir("anchors");
    let output = run(
        &[
            "--anchor",
            "/foo=200",
            "--anchor",
            "/bar=400",
            "--list-anchors",
        ],
        &dir,
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "/bar=400\n/foo=200\n");
    let _ = fs::remove_dir_all(dir);
}

#[test]
fn malformed_anchor_is_rejected_by_the_cli() {
    let dir = unique_dir("bad-anchor");
    let output = run(&["--anchor", "no-separator", "--list-anchors"], &dir);
    assert!(!output.status.success());
    let _ = fs::remove_dir_all(dir);
}
