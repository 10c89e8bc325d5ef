use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args as ClapArgs;

use crate::collect::{git, mcp, system, tasks, usage};
use crate::config::{self, StatuslineConfig};
use crate::model::{RenderSpec, SessionInput, UpdateNotice};
use crate::render::{BarStyle, Powerline};

use super::logging;

/// Upper bound on the stdin payload.
const MAX_STDIN: u64 = 65536;

// ---------------------------------------------------------------------------
// Clap Args
// ---------------------------------------------------------------------------

/// Arguments for the `statusline render` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,

    /// Progress bar style (overrides the config file)
    #[arg(long, value_enum)]
    pub style: Option<BarStyle>,

    /// Announce this release if it is newer than the running binary
    #[arg(long, value_name = "VERSION")]
    pub update: Option<String>,

    /// Logging verbosity for stderr: off, error, warn, info, debug.
    #[arg(long)]
    pub log_level: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point. Wraps `run_inner` in `catch_unwind` so that panics
/// are swallowed and the process always exits 0.
pub fn run(args: Args) -> Result<()> {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| run_inner(args)));

    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            tracing::debug!(error = %e, "render failed");
            print!("\n\n");
            Ok(())
        }
        Err(_) => {
            print!("\n\n");
            Ok(())
        }
    }
}

fn run_inner(args: Args) -> Result<()> {
    let loaded = config::load();
    logging::init(args.log_level.as_deref(), &loaded.config.log_level);
    for problem in &loaded.problems {
        tracing::warn!("{problem}");
    }
    let config = loaded.config;

    let theme = super::theme(args.no_color);
    let input = parse_stdin();
    let home = dirs::home_dir().map(|h| h.to_string_lossy().into_owned());

    let mut spec = build_spec(&input, &config, home.as_deref(), Utc::now());
    spec.update = args
        .update
        .as_deref()
        .and_then(|v| update_notice(v, env!("CARGO_PKG_VERSION")));

    let powerline = Powerline::new(theme, args.style.unwrap_or(config.bar_style))
        .with_path_max_len(config.path_max_len)
        .with_home(home);

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(powerline.render(&spec).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Stdin parsing
// ---------------------------------------------------------------------------

/// Parse session JSON from stdin. Returns default on empty/malformed input.
/// Reads at most 64KB so a runaway producer cannot stall the status line.
fn parse_stdin() -> SessionInput {
    let mut buf = Vec::with_capacity(MAX_STDIN as usize);
    if let Err(e) = std::io::stdin().lock().take(MAX_STDIN).read_to_end(&mut buf) {
        tracing::debug!(error = %e, "reading stdin failed");
    }
    SessionInput::from_slice(&buf)
}

// ---------------------------------------------------------------------------
// Gathering
// ---------------------------------------------------------------------------

/// Assemble the render spec from stdin data and every enabled collaborator.
/// Collaborator failures are logged and replaced by neutral values.
fn build_spec(
    input: &SessionInput,
    config: &StatuslineConfig,
    home: Option<&str>,
    now: DateTime<Utc>,
) -> RenderSpec {
    let dir = PathBuf::from(input.working_dir());
    let mut spec = RenderSpec::new(
        input.model_info(),
        input.context_progress(),
        input.working_dir(),
        now,
    );
    spec.system = system::detect();
    spec.icons = config.icons.into();

    match git::vcs_state(&dir) {
        Ok(vcs) => spec.vcs = vcs,
        Err(e) => tracing::debug!(error = %e, "no VCS state"),
    }
    spec.changes = if spec.vcs.is_in_repo() {
        git::diff_changes(&dir).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "git diff failed, using session counters");
            input.code_changes()
        })
    } else {
        input.code_changes()
    };

    let segments = config.segments;
    if segments.usage || segments.weekly {
        let path = config.usage_path(home);
        match usage::read_snapshot(Path::new(&path)) {
            Ok(snapshot) => {
                spec.session_usage = segments.usage.then_some(snapshot.session);
                spec.weekly_usage = segments.weekly.then_some(snapshot.weekly);
            }
            Err(e) => tracing::debug!(path = %path, error = %e, "no usage snapshot"),
        }
    }

    if segments.mcp {
        spec.pills = mcp::collect(&mcp::McpSources::for_project(&dir));
    }

    if segments.tasks {
        let session_dir = config.session_dir.trim();
        let session_dir = (!session_dir.is_empty()).then(|| Path::new(session_dir));
        spec.tasks = tasks::collect(session_dir);
    }

    tracing::debug!(
        in_repo = spec.vcs.is_in_repo(),
        pills = spec.pills.len(),
        tasks = spec.tasks.is_some(),
        "gathered render spec"
    );
    spec
}

/// An update notice when `candidate` is a strictly newer semver than
/// `current`. A leading `v` is accepted.
pub fn update_notice(candidate: &str, current: &str) -> Option<UpdateNotice> {
    let parse = |v: &str| semver::Version::parse(v.trim().trim_start_matches('v'));
    match (parse(candidate), parse(current)) {
        (Ok(new), Ok(cur)) if new > cur => Some(UpdateNotice {
            version: new.to_string(),
        }),
        (Err(e), _) => {
            tracing::debug!(candidate, error = %e, "ignoring unparseable update version");
            None
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_update_notice_newer() {
        let notice = update_notice("v1.4.0", "1.3.9").unwrap();
        assert_eq!(notice.version, "1.4.0");
    }

    #[test]
    fn test_update_notice_same_or_older() {
        assert!(update_notice("1.3.9", "1.3.9").is_none());
        assert!(update_notice("1.2.0", "1.3.9").is_none());
    }

    #[test]
    fn test_update_notice_prerelease_is_older() {
        assert!(update_notice("2.0.0-rc.1", "2.0.0").is_none());
        assert!(update_notice("2.0.0", "2.0.0-rc.1").is_some());
    }

    #[test]
    fn test_update_notice_garbage() {
        assert!(update_notice("latest", "1.0.0").is_none());
    }

    #[test]
    fn test_build_spec_with_everything_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let json = serde_json::json!({
            "model": {"display_name": "Sonnet 4"},
            "workspace": {"current_dir": dir.path()},
            "context_window": {"used_percentage": 12.7},
            "cost": {"total_lines_added": 5, "total_lines_removed": 2}
        });
        let input = SessionInput::from_slice(json.to_string().as_bytes());

        let mut config = StatuslineConfig::default();
        config.segments.usage = false;
        config.segments.weekly = false;
        config.segments.mcp = false;
        config.segments.tasks = false;
        config.icons.git = false;

        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let spec = build_spec(&input, &config, None, now);

        assert_eq!(spec.model.name, "Sonnet");
        assert_eq!(spec.context.percent(), 12);
        assert!(!spec.vcs.is_in_repo());
        assert_eq!(spec.changes.added, 5);
        assert_eq!(spec.changes.removed, 2);
        assert!(spec.session_usage.is_none());
        assert!(spec.pills.is_empty());
        assert!(spec.tasks.is_none());
        assert!(!spec.icons.git);
        assert_eq!(spec.now, now);
    }

    #[test]
    fn test_build_spec_reads_usage_snapshot() {
        let home = tempfile::tempdir().unwrap();
        let usage_file = home.path().join("usage.json");
        std::fs::write(
            &usage_file,
            r#"{"five_hour": {"utilization": 33.3, "resets_at": "2026-01-01T03:00:00Z"},
                "seven_day": {"utilization": 5, "resets_at": "2026-01-04T00:00:00Z"}}"#,
        )
        .unwrap();

        let mut config = StatuslineConfig::default();
        config.usage_file = usage_file.to_string_lossy().into_owned();
        config.segments.weekly = false;
        config.segments.mcp = false;
        config.segments.tasks = false;

        let input = SessionInput::from_slice(b"{}");
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let spec = build_spec(&input, &config, None, now);

        let session = spec.session_usage.unwrap();
        assert_eq!(session.utilization().percent(), 33);
        assert!(session.is_valid());
        assert!(spec.weekly_usage.is_none());
    }
}
