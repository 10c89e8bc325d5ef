//! Task tracker data: an active hierarchical session file, or per-project
//! counts from the `task` CLI.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::SystemTime;

use serde::Deserialize;

use crate::error::{Result, StatuslineError};
use crate::model::{
    LegacyProject, SessionProject, TaskGroup, TaskItem, TaskProject, TaskStatus,
};

const TASK_BINARY: &str = "task";

/// Longest task name shown before truncation with an ellipsis.
pub const MAX_TASK_NAME: usize = 15;

// ---------------------------------------------------------------------------
// Session file shape
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SessionFile {
    project: String,
    current_task: String,
    epics: Vec<EpicEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EpicEntry {
    id: u32,
    name: String,
    status: String,
    tasks: Vec<TaskEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TaskEntry {
    id: String,
    name: String,
    status: String,
    parallel: bool,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn is_installed() -> bool {
    which::which(TASK_BINARY).is_ok()
}

/// Everything the task pill needs, or `None` when there is nothing to show.
/// The legacy list is only gathered when no session is active.
pub fn collect(session_dir: Option<&Path>) -> Option<TaskProject> {
    if !is_installed() {
        tracing::debug!("task tracker not installed");
        return None;
    }

    let session = session_dir.and_then(|dir| {
        active_session(dir).unwrap_or_else(|e| {
            tracing::debug!(dir = %dir.display(), error = %e, "no active task session");
            None
        })
    });

    let legacy = match session {
        Some(_) => Vec::new(),
        None => legacy_projects().unwrap_or_else(|e| {
            tracing::debug!(error = %e, "task project listing failed");
            Vec::new()
        }),
    };

    TaskProject::select(session, legacy)
}

// ---------------------------------------------------------------------------
// Hierarchical sessions
// ---------------------------------------------------------------------------

/// The most recently modified `*.json` file in `dir`, if any.
pub fn newest_session_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        // Entries can vanish between listing and stat; skip them.
        let meta = match std::fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping session entry");
                continue;
            }
        };
        if !meta.is_file() {
            continue;
        }
        let Ok(modified) = meta.modified() else { continue };
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}

pub fn active_session(dir: &Path) -> Result<Option<SessionProject>> {
    match newest_session_file(dir)? {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)?;
            parse_session(&contents).map(Some)
        }
        None => Ok(None),
    }
}

pub fn parse_session(json: &str) -> Result<SessionProject> {
    let file: SessionFile = serde_json::from_str(json)?;

    let groups = file
        .epics
        .into_iter()
        .map(|epic| {
            let items = epic
                .tasks
                .into_iter()
                .map(|t| TaskItem {
                    id: t.id,
                    name: truncate_name(&t.name),
                    status: TaskStatus::from_label(&t.status),
                    parallel: t.parallel,
                })
                .collect();
            let mut group = TaskGroup::with_items(epic.id, epic.name, items);
            if !epic.status.is_empty() {
                group.status = TaskStatus::from_label(&epic.status);
            }
            group
        })
        .collect();

    Ok(SessionProject {
        name: file.project,
        groups,
        current_task: (!file.current_task.is_empty()).then_some(file.current_task),
    })
}

/// Names longer than [`MAX_TASK_NAME`] characters keep one less and end in `…`.
pub fn truncate_name(name: &str) -> String {
    if name.chars().count() <= MAX_TASK_NAME {
        return name.to_string();
    }
    let mut out: String = name.chars().take(MAX_TASK_NAME - 1).collect();
    out.push('…');
    out
}

// ---------------------------------------------------------------------------
// Legacy projects
// ---------------------------------------------------------------------------

fn task(args: &[&str]) -> Result<String> {
    let output = Command::new(TASK_BINARY)
        .args(["rc.confirmation=off", "rc.verbose=nothing"])
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(StatuslineError::Command {
            program: format!("{TASK_BINARY} {}", args.join(" ")),
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn count(project: &str, status: &str) -> u32 {
    let project = format!("project:{project}");
    let status = format!("status:{status}");
    task(&[project.as_str(), status.as_str(), "count"])
        .map(|out| parse_count(&out))
        .unwrap_or(0)
}

/// Projects with pending work, short-named and sorted.
pub fn legacy_projects() -> Result<Vec<LegacyProject>> {
    let names = parse_project_list(&task(&["_unique", "project"])?);
    let mut projects = Vec::with_capacity(names.len());
    for name in names {
        let pending = count(&name, "pending");
        if pending == 0 {
            continue;
        }
        let completed = count(&name, "completed");
        projects.push(LegacyProject::new(short_project_name(&name), pending, completed));
    }
    projects.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(projects)
}

pub fn parse_project_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

pub fn parse_count(output: &str) -> u32 {
    output.trim().parse().unwrap_or(0)
}

/// `Epic1.Auth` → `Auth`.
pub fn short_project_name(name: &str) -> &str {
    name.rsplit_once('.').map_or(name, |(_, last)| last)
}
