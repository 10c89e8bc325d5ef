//! Working-tree state from the `git` CLI.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, StatuslineError};
use crate::model::{CodeChanges, VcsState};

/// Run `git -C <dir> <args>` and return stdout.
fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(StatuslineError::Command {
            program: format!("git {}", args.join(" ")),
            status: output.status.to_string(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Branch and dirty counts. An error from `branch --show-current` means the
/// directory is not a repository; a failed `status` only zeroes the counts.
pub fn vcs_state(dir: &Path) -> Result<VcsState> {
    let branch = git(dir, &["branch", "--show-current"])?.trim().to_string();
    if branch.is_empty() {
        return Ok(VcsState::default());
    }

    let (modified, untracked) = match git(dir, &["status", "--porcelain"]) {
        Ok(out) => parse_porcelain(&out),
        Err(e) => {
            tracing::debug!(error = %e, "git status failed");
            (0, 0)
        }
    };

    Ok(VcsState {
        branch,
        modified,
        untracked,
    })
}

/// Lines added and removed against `HEAD`.
pub fn diff_changes(dir: &Path) -> Result<CodeChanges> {
    git(dir, &["diff", "--numstat", "HEAD"]).map(|out| parse_numstat(&out))
}

/// `(modified, untracked)` from `git status --porcelain`.
pub fn parse_porcelain(output: &str) -> (u32, u32) {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .fold((0, 0), |(modified, untracked), line| {
            if line.starts_with("??") {
                (modified, untracked + 1)
            } else {
                (modified + 1, untracked)
            }
        })
}

/// Sum of `git diff --numstat` columns. Binary files report `-` and count
/// as zero.
pub fn parse_numstat(output: &str) -> CodeChanges {
    let mut changes = CodeChanges::default();
    for line in output.lines() {
        let mut cols = line.split('\t');
        let (Some(added), Some(removed)) = (cols.next(), cols.next()) else {
            continue;
        };
        changes.added += added.trim().parse::<u64>().unwrap_or(0);
        changes.removed += removed.trim().parse::<u64>().unwrap_or(0);
    }
    changes
}
