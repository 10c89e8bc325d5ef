use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// Helper to get a Command for the `statusline` binary, isolated from the
// host config, home directory and log settings.
fn statusline(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("statusline").expect("binary exists");
    cmd.env("STATUSLINE_CONFIG", dir.path().join("config.toml"))
        .env("HOME", dir.path())
        .env_remove("NO_COLOR")
        .env_remove("STATUSLINE_LOG");
    cmd
}

/// Config with every external collaborator switched off.
fn quiet_config(dir: &TempDir) {
    std::fs::write(
        dir.path().join("config.toml"),
        "[segments]\nusage = false\nweekly = false\ntasks = false\nmcp = false\n",
    )
    .unwrap();
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("failed to run");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// -----------------------------------------------------------------------
// Basic CLI
// -----------------------------------------------------------------------

#[test]
fn help_shows_description() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("powerline status line"));
}

#[test]
fn version_shows_semver() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn no_args_shows_usage() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// -----------------------------------------------------------------------
// Render
// -----------------------------------------------------------------------

#[test]
fn render_empty_object_prints_two_lines() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    let stdout = stdout_of(statusline(&dir).arg("render").write_stdin("{}"));
    let lines: Vec<&str> = stdout.split_terminator('\n').collect();
    assert_eq!(lines.len(), 2, "expected two lines, got: {:?}", lines);
    assert!(stdout.ends_with('\n'));
    assert!(lines[0].contains("Claude"));
}

#[test]
fn render_no_stdin_exits_zero() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    statusline(&dir).arg("render").assert().success();
}

#[test]
fn render_garbage_stdin_exits_zero() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    statusline(&dir)
        .arg("render")
        .write_stdin("not json at all")
        .assert()
        .success()
        .stdout(predicate::str::contains("Claude"));
}

#[test]
fn render_no_color_has_no_ansi() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    let stdout = stdout_of(
        statusline(&dir)
            .args(["render", "--no-color"])
            .write_stdin(r#"{"model": {"display_name": "Opus 4.5"}}"#),
    );
    assert!(
        !stdout.contains('\x1b'),
        "output must contain no ANSI escapes with --no-color: {:?}",
        stdout
    );
    assert!(stdout.contains("Opus"));
}

#[test]
fn render_respects_no_color_env() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    let stdout = stdout_of(
        statusline(&dir)
            .arg("render")
            .env("NO_COLOR", "1")
            .write_stdin("{}"),
    );
    assert!(!stdout.contains('\x1b'));
}

#[test]
fn render_colored_by_default() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    let stdout = stdout_of(statusline(&dir).arg("render").write_stdin("{}"));
    assert!(stdout.contains("\x1b[48;5;"));
}

#[test]
fn render_shows_session_data() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    let input = serde_json::json!({
        "model": {"display_name": "Sonnet 4"},
        "workspace": {"current_dir": dir.path()},
        "context_window": {"total_input_tokens": 50000, "total_output_tokens": 0,
                           "context_window_size": 200000},
        "cost": {"total_lines_added": 7, "total_lines_removed": 3}
    });
    let stdout = stdout_of(
        statusline(&dir)
            .args(["render", "--no-color"])
            .write_stdin(input.to_string()),
    );
    let first = stdout.lines().next().unwrap();
    assert!(first.contains("Sonnet"));
    assert!(first.contains("25%"));
    assert!(first.contains("+7"));
    assert!(first.contains("-3"));
}

#[test]
fn render_update_notice_only_when_newer() {
    let dir = TempDir::new().unwrap();
    quiet_config(&dir);
    statusline(&dir)
        .args(["render", "--no-color", "--update", "v999.0.0"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("v999.0.0"));

    statusline(&dir)
        .args(["render", "--no-color", "--update", "0.0.1"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout(predicate::str::contains("v0.0.1").not());
}

#[test]
fn render_reads_project_mcp_servers() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[segments]\nusage = false\nweekly = false\ntasks = false\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join(".mcp.json"),
        r#"{"mcpServers": {"playwright": {}, "sqlite": {"disabled": true}}}"#,
    )
    .unwrap();
    let input = serde_json::json!({"workspace": {"current_dir": dir.path()}});
    let stdout = stdout_of(
        statusline(&dir)
            .args(["render", "--no-color"])
            .write_stdin(input.to_string()),
    );
    let second = stdout.lines().nth(1).unwrap();
    assert!(second.contains("playwright"));
    assert!(second.contains("sqlite"));
}

#[test]
fn render_survives_broken_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "bar_style = [").unwrap();
    let stdout = stdout_of(
        statusline(&dir)
            .args(["render", "--no-color", "--log-level", "off"])
            .write_stdin("{}"),
    );
    assert_eq!(stdout.matches('\n').count(), 2);
}

// -----------------------------------------------------------------------
// Preview
// -----------------------------------------------------------------------

#[test]
fn preview_shows_sample() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["preview", "--no-color", "--percent", "77"])
        .assert()
        .success()
        .stdout(predicate::str::contains("77%"))
        .stdout(predicate::str::contains("main"));
}

#[test]
fn preview_rejects_out_of_range_percent() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .args(["preview", "--percent", "101"])
        .assert()
        .failure();
}

#[test]
fn preview_accepts_styles() {
    let dir = TempDir::new().unwrap();
    for style in ["heavy", "braille", "block"] {
        statusline(&dir)
            .args(["preview", "--no-color", "--style", style])
            .assert()
            .success();
    }
}

// -----------------------------------------------------------------------
// Config
// -----------------------------------------------------------------------

#[test]
fn config_prints_defaults() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bar_style = \"heavy\""))
        .stdout(predicate::str::contains("path_max_len = 30"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn config_reflects_file_and_warns() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "bar_style = \"block\"\npath_max_len = 4\n",
    )
    .unwrap();
    statusline(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("bar_style = \"block\""))
        .stderr(predicate::str::contains("path_max_len"));
}

#[test]
fn config_applies_icon_env_override() {
    let dir = TempDir::new().unwrap();
    statusline(&dir)
        .arg("config")
        .env("STATUSLINE_ICON_GIT", "no")
        .assert()
        .success()
        .stdout(predicate::str::contains("git = false"));
}
