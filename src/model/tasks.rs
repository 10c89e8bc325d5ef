use super::progress::Progress;

/// State of a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Parse a tracker status label. `DONE` and `WIP` are recognised
    /// case-insensitively; anything else is still to do.
    pub fn from_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("done") {
            TaskStatus::Done
        } else if label.eq_ignore_ascii_case("wip") {
            TaskStatus::InProgress
        } else {
            TaskStatus::Todo
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    /// May run alongside other tasks. Shown as a marker, never used in bar arithmetic.
    pub parallel: bool,
}

/// Where a group's totals come from. A group either lists its tasks or
/// carries bare counts, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupTasks {
    Items(Vec<TaskItem>),
    Counts { total: u32, done: u32 },
}

/// An epic: an ordered group of tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskGroup {
    pub id: u32,
    pub name: String,
    pub status: TaskStatus,
    pub tasks: GroupTasks,
}

impl TaskGroup {
    pub fn with_items(id: u32, name: impl Into<String>, items: Vec<TaskItem>) -> Self {
        let status = group_status(&items);
        Self {
            id,
            name: name.into(),
            status,
            tasks: GroupTasks::Items(items),
        }
    }

    pub fn with_counts(id: u32, name: impl Into<String>, total: u32, done: u32) -> Self {
        Self {
            id,
            name: name.into(),
            status: if total > 0 && done >= total {
                TaskStatus::Done
            } else {
                TaskStatus::Todo
            },
            tasks: GroupTasks::Counts {
                total,
                done: done.min(total),
            },
        }
    }

    pub fn total(&self) -> u32 {
        match &self.tasks {
            GroupTasks::Items(items) => items.len() as u32,
            GroupTasks::Counts { total, .. } => *total,
        }
    }

    pub fn done(&self) -> u32 {
        match &self.tasks {
            GroupTasks::Items(items) => items
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count() as u32,
            GroupTasks::Counts { done, .. } => *done,
        }
    }

    /// First task in progress, if the group lists its tasks.
    pub fn in_progress(&self) -> Option<&TaskItem> {
        match &self.tasks {
            GroupTasks::Items(items) => items.iter().find(|t| t.status == TaskStatus::InProgress),
            GroupTasks::Counts { .. } => None,
        }
    }

    pub fn items(&self) -> &[TaskItem] {
        match &self.tasks {
            GroupTasks::Items(items) => items,
            GroupTasks::Counts { .. } => &[],
        }
    }
}

fn group_status(items: &[TaskItem]) -> TaskStatus {
    if items.iter().any(|t| t.status == TaskStatus::InProgress) {
        TaskStatus::InProgress
    } else if !items.is_empty() && items.iter().all(|t| t.status == TaskStatus::Done) {
        TaskStatus::Done
    } else {
        TaskStatus::Todo
    }
}

/// A project with an active epic/task session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionProject {
    pub name: String,
    pub groups: Vec<TaskGroup>,
    pub current_task: Option<String>,
}

impl SessionProject {
    pub fn total(&self) -> u32 {
        self.groups.iter().map(TaskGroup::total).sum()
    }

    pub fn done(&self) -> u32 {
        self.groups.iter().map(TaskGroup::done).sum()
    }

    /// The task named by `current_task`, searched across every group.
    pub fn current_task_item(&self) -> Option<&TaskItem> {
        let id = self.current_task.as_deref()?;
        self.groups
            .iter()
            .flat_map(TaskGroup::items)
            .find(|t| t.id == id)
    }
}

/// A flat project with only pending/completed counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyProject {
    pub name: String,
    pub pending: u32,
    pub completed: u32,
}

impl LegacyProject {
    pub fn new(name: impl Into<String>, pending: u32, completed: u32) -> Self {
        Self {
            name: name.into(),
            pending,
            completed,
        }
    }

    pub fn total(&self) -> u32 {
        self.pending + self.completed
    }

    pub fn progress(&self) -> Progress {
        Progress::from_ratio(u64::from(self.completed), u64::from(self.total()))
    }
}

/// Task-tracker data for one render. A hierarchical session replaces the
/// legacy list outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskProject {
    Legacy(Vec<LegacyProject>),
    Session(SessionProject),
}

impl TaskProject {
    /// Prefer the active session; otherwise the legacy list, if non-empty.
    pub fn select(session: Option<SessionProject>, legacy: Vec<LegacyProject>) -> Option<Self> {
        match session {
            Some(project) => Some(TaskProject::Session(project)),
            None if legacy.is_empty() => None,
            None => Some(TaskProject::Legacy(legacy)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, status: TaskStatus) -> TaskItem {
        TaskItem {
            id: id.to_string(),
            name: format!("task {id}"),
            status,
            parallel: false,
        }
    }

    #[test]
    fn test_status_from_label() {
        assert_eq!(TaskStatus::from_label("DONE"), TaskStatus::Done);
        assert_eq!(TaskStatus::from_label("done"), TaskStatus::Done);
        assert_eq!(TaskStatus::from_label("Wip"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from_label("TODO"), TaskStatus::Todo);
        assert_eq!(TaskStatus::from_label("blocked"), TaskStatus::Todo);
        assert_eq!(TaskStatus::from_label(""), TaskStatus::Todo);
    }

    #[test]
    fn test_group_totals_from_items() {
        let group = TaskGroup::with_items(
            1,
            "Auth",
            vec![
                task("1.1", TaskStatus::Done),
                task("1.2", TaskStatus::InProgress),
                task("1.3", TaskStatus::Todo),
            ],
        );
        assert_eq!(group.total(), 3);
        assert_eq!(group.done(), 1);
        assert_eq!(group.in_progress().map(|t| t.id.as_str()), Some("1.2"));
        assert_eq!(group.status, TaskStatus::InProgress);
    }

    #[test]
    fn test_group_totals_from_counts() {
        let group = TaskGroup::with_counts(2, "Legacy", 5, 9);
        assert_eq!(group.total(), 5);
        assert_eq!(group.done(), 5);
        assert!(group.in_progress().is_none());
        assert!(group.items().is_empty());
        assert_eq!(group.status, TaskStatus::Done);
    }

    #[test]
    fn test_first_in_progress_wins() {
        let group = TaskGroup::with_items(
            1,
            "Api",
            vec![
                task("a", TaskStatus::Todo),
                task("b", TaskStatus::InProgress),
                task("c", TaskStatus::InProgress),
            ],
        );
        assert_eq!(group.in_progress().map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn test_session_project_sums_and_current_task() {
        let project = SessionProject {
            name: "shop".into(),
            groups: vec![
                TaskGroup::with_items(1, "A", vec![task("1.1", TaskStatus::Done)]),
                TaskGroup::with_items(
                    2,
                    "B",
                    vec![task("2.1", TaskStatus::InProgress), task("2.2", TaskStatus::Todo)],
                ),
                TaskGroup::with_counts(3, "C", 4, 2),
            ],
            current_task: Some("2.1".into()),
        };
        assert_eq!(project.total(), 7);
        assert_eq!(project.done(), 3);
        assert_eq!(project.current_task_item().map(|t| t.name.as_str()), Some("task 2.1"));
    }

    #[test]
    fn test_current_task_missing() {
        let project = SessionProject {
            current_task: Some("9.9".into()),
            ..Default::default()
        };
        assert!(project.current_task_item().is_none());
    }

    #[test]
    fn test_legacy_progress() {
        let p = LegacyProject::new("web", 3, 1);
        assert_eq!(p.total(), 4);
        assert_eq!(p.progress().percent(), 25);
        assert_eq!(LegacyProject::new("empty", 0, 0).progress().percent(), 0);
    }

    #[test]
    fn test_select_prefers_session() {
        let legacy = vec![LegacyProject::new("web", 1, 1)];
        let picked = TaskProject::select(Some(SessionProject::default()), legacy.clone());
        assert!(matches!(picked, Some(TaskProject::Session(_))));

        let picked = TaskProject::select(None, legacy);
        assert!(matches!(picked, Some(TaskProject::Legacy(ref l)) if l.len() == 1));

        assert!(TaskProject::select(None, Vec::new()).is_none());
    }
}
