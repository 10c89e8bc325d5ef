use chrono::{DateTime, Utc};

use super::changes::CodeChanges;
use super::progress::Progress;
use super::tasks::TaskProject;
use super::usage::UsageWindow;

/// Model identity as shown in the model segment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelInfo {
    pub name: String,
    pub version: Option<String>,
}

impl ModelInfo {
    /// Split a display name at the first space: `"Opus 4.5"` becomes
    /// `("Opus", Some("4.5"))`.
    pub fn from_display_name(display_name: &str) -> Self {
        match display_name.split_once(' ') {
            Some((name, version)) if !version.is_empty() => Self {
                name: name.to_string(),
                version: Some(version.to_string()),
            },
            _ => Self {
                name: display_name.trim_end().to_string(),
                version: None,
            },
        }
    }

    /// Name plus version; used for model-family lookup.
    pub fn full_name(&self) -> String {
        match &self.version {
            Some(v) => format!("{} {}", self.name, v),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OsKind {
    Linux,
    MacOs,
    Windows,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SystemInfo {
    pub os: OsKind,
    pub in_container: bool,
}

/// Version-control state. An empty branch means "not in a repository".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VcsState {
    pub branch: String,
    pub modified: u32,
    pub untracked: u32,
}

impl VcsState {
    pub fn is_in_repo(&self) -> bool {
        !self.branch.is_empty()
    }
}

/// An auxiliary service shown as a capsule on line two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pill {
    pub name: String,
    pub enabled: bool,
}

impl Pill {
    pub fn new(name: impl Into<String>, enabled: bool) -> Self {
        Self {
            name: name.into(),
            enabled,
        }
    }
}

/// Per-category icon visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconToggles {
    pub os: bool,
    pub path: bool,
    pub git: bool,
    pub model: bool,
}

impl Default for IconToggles {
    fn default() -> Self {
        Self {
            os: true,
            path: true,
            git: true,
            model: true,
        }
    }
}

/// A newer release is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateNotice {
    pub version: String,
}

/// Everything one render needs, gathered before the composer runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSpec {
    pub model: ModelInfo,
    pub context: Progress,
    pub session_usage: Option<UsageWindow>,
    pub weekly_usage: Option<UsageWindow>,
    pub system: SystemInfo,
    pub path: String,
    pub vcs: VcsState,
    pub changes: CodeChanges,
    pub pills: Vec<Pill>,
    pub tasks: Option<TaskProject>,
    pub icons: IconToggles,
    pub update: Option<UpdateNotice>,
    /// Single clock reading shared by every cursor in the render.
    pub now: DateTime<Utc>,
}

impl RenderSpec {
    /// A spec with only the required parts filled in.
    pub fn new(model: ModelInfo, context: Progress, path: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            model,
            context,
            session_usage: None,
            weekly_usage: None,
            system: SystemInfo::default(),
            path: path.into(),
            vcs: VcsState::default(),
            changes: CodeChanges::default(),
            pills: Vec::new(),
            tasks: None,
            icons: IconToggles::default(),
            update: None,
            now,
        }
    }
}
