//! One bar for a whole epic/task hierarchy, partitioned per group.

use crate::model::TaskGroup;

use super::theme::Theme;

const MIN_GROUP_WIDTH: u32 = 2;
const MAX_GROUP_WIDTH: u32 = 8;

pub const DONE_GLYPH: char = '\u{2588}';
pub const IN_PROGRESS_GLYPH: char = '\u{2593}';
pub const TODO_GLYPH: char = '\u{2591}';
pub const DIVIDER_GLYPH: char = '\u{2502}';
pub const OPEN_GLYPH: char = '\u{2595}';
pub const CLOSE_GLYPH: char = '\u{258F}';

/// Cell counts for one group's partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupCells {
    pub done: u32,
    pub in_progress: u32,
    pub todo: u32,
}

impl GroupCells {
    pub fn width(&self) -> u32 {
        self.done + self.in_progress + self.todo
    }
}

/// Partition widths for a group: width is its task count clamped to 2..=8,
/// done cells are proportional, and one cell marks a task in progress.
pub fn layout_group(group: &TaskGroup) -> GroupCells {
    let total = group.total();
    let width = total.clamp(MIN_GROUP_WIDTH, MAX_GROUP_WIDTH);
    let mut done = if total == 0 {
        0
    } else {
        (u64::from(group.done()) * u64::from(width) / u64::from(total)) as u32
    };
    let in_progress = u32::from(group.in_progress().is_some());
    if in_progress == 1 && done + in_progress > width && done > 0 {
        done -= 1;
    }
    GroupCells {
        done,
        in_progress,
        todo: width.saturating_sub(done + in_progress),
    }
}

/// Render every group left to right, dividers between neighbours, wrapped
/// in border glyphs. Colours are left set to the todo colour at the end;
/// callers restore their own.
pub fn render_segmented(groups: &[TaskGroup], theme: &Theme) -> String {
    let palette = &theme.palette;
    let layouts: Vec<GroupCells> = groups.iter().map(layout_group).collect();
    let glyphs: u32 = layouts.iter().map(GroupCells::width).sum();
    let mut out = String::with_capacity(glyphs as usize * 3 + (layouts.len() + 2) * 16);
    out.push_str(&theme.fg(palette.divider));
    out.push(OPEN_GLYPH);
    for (i, cells) in layouts.into_iter().enumerate() {
        if i > 0 {
            out.push_str(&theme.fg(palette.divider));
            out.push(DIVIDER_GLYPH);
        }
        push_run(&mut out, theme.fg(palette.done), DONE_GLYPH, cells.done);
        push_run(&mut out, theme.fg(palette.in_progress), IN_PROGRESS_GLYPH, cells.in_progress);
        push_run(&mut out, theme.fg(palette.todo), TODO_GLYPH, cells.todo);
    }
    out.push_str(&theme.fg(palette.divider));
    out.push(CLOSE_GLYPH);
    out
}

fn push_run(out: &mut String, sgr: String, glyph: char, count: u32) {
    if count == 0 {
        return;
    }
    out.push_str(&sgr);
    out.extend(std::iter::repeat(glyph).take(count as usize));
}
