//! Powerline composer: turns a [`RenderSpec`] into the two-line status line.
//!
//! Line one is a chain of coloured segments joined by arrows whose fill is
//! the background of the next *present* segment. Line two is a row of
//! self-contained capsules separated by spaces.

use std::fmt::Write as FmtWrite;

use crate::model::{LegacyProject, Pill, RenderSpec, SessionProject, TaskProject, UsageWindow};

use super::bar::{render_bar, render_bar_with_cursor, BarStyle};
use super::path::{truncate_path, DEFAULT_MAX_PATH};
use super::segmented::render_segmented;
use super::theme::{
    os_icon, Color, SegmentColors, Theme, ICON_FOLDER, ICON_GIT_BRANCH, ICON_MODEL,
    ICON_TASKS, ICON_UPDATE, ICON_WEEKLY, LEFT_ROUND, PARALLEL_MARK, RIGHT_ROUND, SEP_RIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Os,
    Model,
    SessionUsage,
    WeeklyUsage,
    Path,
    Vcs,
    Added,
    Removed,
}

/// A present segment of line one, content already rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub colors: SegmentColors,
    pub content: String,
}

/// The composer. Holds only read-only configuration; rendering is a pure
/// function of the spec.
#[derive(Debug, Clone)]
pub struct Powerline {
    theme: Theme,
    style: BarStyle,
    path_max_len: usize,
    home: Option<String>,
}

impl Powerline {
    pub fn new(theme: Theme, style: BarStyle) -> Self {
        Self {
            theme,
            style,
            path_max_len: DEFAULT_MAX_PATH,
            home: None,
        }
    }

    pub fn with_path_max_len(mut self, max_len: usize) -> Self {
        self.path_max_len = max_len;
        self
    }

    /// Home directory to abbreviate as `~` in the path segment.
    pub fn with_home(mut self, home: Option<String>) -> Self {
        self.home = home;
        self
    }

    #[cfg(test)]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Both lines, each newline-terminated.
    pub fn render(&self, spec: &RenderSpec) -> String {
        format!("{}\n{}\n", self.line_one(spec), self.line_two(spec))
    }

    pub fn line_one(&self, spec: &RenderSpec) -> String {
        let segments = self.line_one_segments(spec);
        tracing::trace!(
            segments = ?segments.iter().map(|s| s.kind).collect::<Vec<_>>(),
            "composing line one"
        );
        chain(&segments, &self.theme)
    }

    /// Segments of line one in order, absent ones already dropped.
    pub fn line_one_segments(&self, spec: &RenderSpec) -> Vec<Segment> {
        let declared = [
            Some(self.os_segment(spec)),
            Some(self.model_segment(spec)),
            spec.session_usage
                .filter(UsageWindow::is_valid)
                .map(|w| self.usage_segment(SegmentKind::SessionUsage, &w, spec)),
            spec.weekly_usage
                .filter(UsageWindow::is_valid)
                .map(|w| self.usage_segment(SegmentKind::WeeklyUsage, &w, spec)),
            Some(self.path_segment(spec)),
            self.vcs_segment(spec),
            spec.changes.has_added().then(|| Segment {
                kind: SegmentKind::Added,
                colors: self.theme.palette.added,
                content: format!(" +{} ", spec.changes.added),
            }),
            spec.changes.has_removed().then(|| Segment {
                kind: SegmentKind::Removed,
                colors: self.theme.palette.removed,
                content: format!(" -{} ", spec.changes.removed),
            }),
        ];
        declared.into_iter().flatten().collect()
    }

    pub fn line_two(&self, spec: &RenderSpec) -> String {
        let mut items: Vec<String> = Vec::new();
        match &spec.tasks {
            Some(TaskProject::Session(project)) => items.push(self.session_pill(project)),
            Some(TaskProject::Legacy(projects)) => {
                items.extend(projects.iter().map(|p| self.legacy_pill(p)));
            }
            None => {}
        }
        items.extend(spec.pills.iter().map(|p| self.aux_pill(p)));
        if let Some(update) = &spec.update {
            let version = update.version.trim_start_matches('v');
            items.push(self.capsule(
                self.theme.palette.update,
                true,
                &format!(" {ICON_UPDATE} v{version} "),
            ));
        }
        items.join(" ")
    }

    // -----------------------------------------------------------------------
    // Line one segments
    // -----------------------------------------------------------------------

    fn os_segment(&self, spec: &RenderSpec) -> Segment {
        let content = if spec.icons.os {
            format!(" {} ", os_icon(spec.system.os, spec.system.in_container))
        } else {
            "  ".to_string()
        };
        Segment {
            kind: SegmentKind::Os,
            colors: self.theme.palette.os,
            content,
        }
    }

    fn model_segment(&self, spec: &RenderSpec) -> Segment {
        let colors = self.theme.model_colors(&spec.model.full_name());
        let icon = spec.icons.model.then_some(ICON_MODEL);
        let mut content = labelled(icon, &spec.model.name);
        let _ = write!(
            content,
            "{} {}{}%{} ",
            render_bar(spec.context, self.style),
            self.theme.fg(self.theme.severity_color(spec.context.severity())),
            spec.context.percent(),
            self.theme.fg(colors.text),
        );
        Segment {
            kind: SegmentKind::Model,
            colors,
            content,
        }
    }

    fn usage_segment(&self, kind: SegmentKind, window: &UsageWindow, spec: &RenderSpec) -> Segment {
        let (colors, icon) = match kind {
            SegmentKind::WeeklyUsage => (self.theme.palette.weekly, Some(ICON_WEEKLY)),
            _ => (self.theme.palette.session, None),
        };
        let utilization = window.utilization();
        let bar = match self.style {
            BarStyle::Heavy => render_bar_with_cursor(
                utilization,
                window.cursor_position(spec.now),
                &format!("{}{}", self.theme.fg(self.theme.palette.cursor), self.theme.bold()),
                self.theme.reset(),
                &self.theme.body(colors),
            ),
            style => render_bar(utilization, style),
        };
        let pace = if window.is_on_track(spec.now) {
            colors.text
        } else {
            self.theme.palette.severity_critical
        };
        let text = format!(
            "{bar} {}{}%{}",
            self.theme.fg(pace),
            utilization.percent(),
            self.theme.fg(colors.text),
        );
        Segment {
            kind,
            colors,
            content: labelled(icon, &text),
        }
    }

    fn path_segment(&self, spec: &RenderSpec) -> Segment {
        let path = truncate_path(&spec.path, self.path_max_len, self.home.as_deref());
        let icon = spec.icons.path.then_some(ICON_FOLDER);
        Segment {
            kind: SegmentKind::Path,
            colors: self.theme.palette.path,
            content: labelled(icon, &path),
        }
    }

    fn vcs_segment(&self, spec: &RenderSpec) -> Option<Segment> {
        let vcs = &spec.vcs;
        if !vcs.is_in_repo() {
            return None;
        }
        let icon = spec.icons.git.then_some(ICON_GIT_BRANCH);
        let mut content = labelled(icon, &vcs.branch);
        content.pop();
        if vcs.modified > 0 {
            let _ = write!(content, " !{}", vcs.modified);
        }
        if vcs.untracked > 0 {
            let _ = write!(content, " ?{}", vcs.untracked);
        }
        content.push(' ');
        Some(Segment {
            kind: SegmentKind::Vcs,
            colors: self.theme.palette.vcs,
            content,
        })
    }

    // -----------------------------------------------------------------------
    // Line two capsules
    // -----------------------------------------------------------------------

    fn capsule(&self, colors: SegmentColors, bold: bool, content: &str) -> String {
        let t = &self.theme;
        format!(
            "{cap}{LEFT_ROUND}{reset}{bg}{fg}{bold}{content}{reset}{cap}{RIGHT_ROUND}{reset}",
            cap = t.fg(colors.bg),
            bg = t.bg(colors.bg),
            fg = t.fg(colors.text),
            bold = if bold { t.bold() } else { "" },
            reset = t.reset(),
        )
    }

    fn aux_pill(&self, pill: &Pill) -> String {
        self.capsule(self.theme.pill_colors(pill.enabled), false, &format!(" {} ", pill.name))
    }

    /// Left cap and `icon name` in the task colours, then the opening of the
    /// inset capsule. Callers append the inset body.
    fn task_pill_head(&self, name: &str) -> String {
        let t = &self.theme;
        let colors = t.palette.tasks;
        format!(
            "{cap}{LEFT_ROUND}{reset}{body} {ICON_TASKS} {name} {reset}{bg}{inset}{LEFT_ROUND}{reset}",
            cap = t.fg(colors.bg),
            body = t.body(colors),
            bg = t.bg(colors.bg),
            inset = t.fg(t.palette.inset_bg),
            reset = t.reset(),
        )
    }

    fn task_pill_tail(&self) -> String {
        let t = &self.theme;
        format!("{}{RIGHT_ROUND}{}", t.fg(t.palette.inset_bg), t.reset())
    }

    fn legacy_pill(&self, project: &LegacyProject) -> String {
        let t = &self.theme;
        let progress = project.progress();
        let bar_color = if progress.is_complete() {
            t.palette.tasks.text
        } else {
            t.palette.incomplete
        };
        let mut out = self.task_pill_head(&project.name);
        let _ = write!(
            out,
            "{inset}{bar_fg} {bar} {reset}{inset}{text}{bold}{done}/{total} {reset}",
            inset = t.bg(t.palette.inset_bg),
            bar_fg = t.fg(bar_color),
            bar = render_bar(progress, BarStyle::Heavy),
            text = t.fg(t.palette.inset_text),
            bold = t.bold(),
            done = project.completed,
            total = project.total(),
            reset = t.reset(),
        );
        out.push_str(&self.task_pill_tail());
        out
    }

    fn session_pill(&self, project: &SessionProject) -> String {
        let t = &self.theme;
        let mut out = self.task_pill_head(&project.name);
        let _ = write!(
            out,
            "{inset} {bar} {text}{bold}{done}/{total}",
            inset = t.bg(t.palette.inset_bg),
            bar = render_segmented(&project.groups, t),
            text = t.fg(t.palette.inset_text),
            bold = t.bold(),
            done = project.done(),
            total = project.total(),
        );
        if let Some(task) = project.current_task_item() {
            let _ = write!(out, " {}{}", t.fg(t.palette.current_task), task.name);
            if task.parallel {
                let _ = write!(out, " {PARALLEL_MARK}");
            }
        }
        let _ = write!(out, " {}", t.reset());
        out.push_str(&self.task_pill_tail());
        out
    }
}

/// `" icon text "` or `" text "`.
fn labelled(icon: Option<&str>, text: &str) -> String {
    match icon {
        Some(icon) => format!(" {icon} {text} "),
        None => format!(" {text} "),
    }
}

/// Background of the segment following each one, `None` for the last.
pub fn next_backgrounds(segments: &[Segment]) -> Vec<Option<Color>> {
    segments
        .iter()
        .skip(1)
        .map(|s| Some(s.colors.bg))
        .chain(std::iter::once(None))
        .take(segments.len())
        .collect()
}

/// Join present segments: a rounded cap before the first, and after each an
/// arrow in its own background colour filled with the next background. The
/// last arrow has no fill.
pub fn chain(segments: &[Segment], theme: &Theme) -> String {
    let mut out = String::with_capacity(segments.len() * 48);
    let reset = theme.reset();
    if let Some(first) = segments.first() {
        let _ = write!(out, "{}{LEFT_ROUND}{reset}", theme.fg(first.colors.bg));
    }
    for (segment, next_bg) in segments.iter().zip(next_backgrounds(segments)) {
        let _ = write!(out, "{}{}{reset}", theme.body(segment.colors), segment.content);
        let fill = next_bg.map(|bg| theme.bg(bg)).unwrap_or_default();
        let _ = write!(out, "{fill}{}{SEP_RIGHT}{reset}", theme.fg(segment.colors.bg));
    }
    out
}
