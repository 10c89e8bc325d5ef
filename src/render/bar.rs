//! Fixed-width progress bars.

use serde::{Deserialize, Serialize};

use crate::model::Progress;

/// Every style renders exactly this many cells.
pub const BAR_WIDTH: usize = 10;
/// Sub-steps per cell for the granular styles.
const STEPS_PER_CELL: usize = 8;
const PERCENT_MAX: usize = 100;

pub const HEAVY_FULL: char = '\u{2501}';
pub const HEAVY_EMPTY: char = '\u{2500}';

/// Fill levels 0..=8 for the braille style.
const BRAILLE_GLYPHS: [char; STEPS_PER_CELL + 1] = [
    ' ', '\u{2801}', '\u{2803}', '\u{2807}', '\u{2847}', '\u{28C7}', '\u{28E7}', '\u{28F7}',
    '\u{28FF}',
];
/// Fill levels 0..=8 for the block style.
const BLOCK_GLYPHS: [char; STEPS_PER_CELL + 1] = [
    ' ', '\u{258F}', '\u{258E}', '\u{258D}', '\u{258C}', '\u{258B}', '\u{258A}', '\u{2589}',
    '\u{2588}',
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BarStyle {
    /// Heavy/light box-drawing lines, whole cells only
    #[default]
    Heavy,
    /// Braille dots, 8 steps per cell
    Braille,
    /// Eighth blocks, 8 steps per cell
    Block,
}

/// Render `progress` as a bar of [`BAR_WIDTH`] glyphs.
pub fn render_bar(progress: Progress, style: BarStyle) -> String {
    bar_cells(progress, style).iter().collect()
}

/// The individual cells of [`render_bar`].
pub fn bar_cells(progress: Progress, style: BarStyle) -> [char; BAR_WIDTH] {
    match style {
        BarStyle::Heavy => heavy_cells(progress),
        BarStyle::Braille => granular_levels(progress).map(|l| BRAILLE_GLYPHS[l as usize]),
        BarStyle::Block => granular_levels(progress).map(|l| BLOCK_GLYPHS[l as usize]),
    }
}

fn heavy_cells(progress: Progress) -> [char; BAR_WIDTH] {
    let filled = usize::from(progress.percent()) * BAR_WIDTH / PERCENT_MAX;
    std::array::from_fn(|i| if i < filled { HEAVY_FULL } else { HEAVY_EMPTY })
}

/// Per-cell fill level in `0..=8` shared by the granular styles.
pub fn granular_levels(progress: Progress) -> [u8; BAR_WIDTH] {
    let total_steps = BAR_WIDTH * STEPS_PER_CELL;
    let filled_steps = usize::from(progress.percent()) * total_steps / PERCENT_MAX;
    std::array::from_fn(|i| {
        let cell_steps = filled_steps.saturating_sub(i * STEPS_PER_CELL);
        cell_steps.min(STEPS_PER_CELL) as u8
    })
}

/// Cell index the burn-rate cursor lands on. May be `BAR_WIDTH` at 100%,
/// in which case no cell is marked.
pub fn cursor_cell(cursor_percent: u8) -> usize {
    usize::from(cursor_percent) * BAR_WIDTH / PERCENT_MAX
}

/// Heavy bar with one cell recoloured as the burn-rate cursor.
///
/// `cursor_sgr` starts the cursor cell; `reset` then `restore` bring back the
/// surrounding segment's colours so later cells render normally.
pub fn render_bar_with_cursor(
    progress: Progress,
    cursor_percent: u8,
    cursor_sgr: &str,
    reset: &str,
    restore: &str,
) -> String {
    let cursor = cursor_cell(cursor_percent);
    let mut out = String::with_capacity(BAR_WIDTH * 4 + cursor_sgr.len() + restore.len());
    for (i, cell) in heavy_cells(progress).into_iter().enumerate() {
        if i == cursor {
            out.push_str(cursor_sgr);
            out.push(HEAVY_FULL);
            out.push_str(reset);
            out.push_str(restore);
        } else {
            out.push(cell);
        }
    }
    out
}
