//! Colour and glyph lookup tables.
//!
//! A [`Theme`] is built once and handed to the composer. Nothing here is
//! global or mutable: a plain theme renders the same layout with every SGR
//! code replaced by the empty string.

use crate::model::{OsKind, Severity};

// ---------------------------------------------------------------------------
// Glyphs
// ---------------------------------------------------------------------------

/// Right-pointing powerline arrow.
pub const SEP_RIGHT: &str = "\u{E0B0}";
/// Left rounded cap.
pub const LEFT_ROUND: &str = "\u{E0B6}";
/// Right rounded cap.
pub const RIGHT_ROUND: &str = "\u{E0B4}";

pub const ICON_LINUX: &str = "\u{F17C}";
pub const ICON_DOCKER: &str = "\u{F308}";
pub const ICON_APPLE: &str = "\u{F179}";
pub const ICON_WINDOWS: &str = "\u{F17A}";
pub const ICON_DESKTOP: &str = "\u{F108}";
pub const ICON_FOLDER: &str = "\u{F07B}";
pub const ICON_GIT_BRANCH: &str = "\u{E0A0}";
pub const ICON_MODEL: &str = "\u{F2DB}";
pub const ICON_TASKS: &str = "\u{F0AE}";
pub const ICON_UPDATE: &str = "\u{F019}";
pub const ICON_WEEKLY: &str = "\u{F073}";
/// Follows the current task name when it may run in parallel.
pub const PARALLEL_MARK: &str = "\u{21C9}";

// ---------------------------------------------------------------------------
// SGR
// ---------------------------------------------------------------------------

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// Index into the 256-colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8);

/// Background and text colour of one segment or pill. The separator and cap
/// glyphs are drawn in the background colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentColors {
    pub bg: Color,
    pub text: Color,
}

impl SegmentColors {
    pub const fn new(bg: u8, text: u8) -> Self {
        Self {
            bg: Color(bg),
            text: Color(text),
        }
    }
}

/// Colours for a model family, matched by case-insensitive substring.
#[derive(Debug, Clone)]
pub struct ModelFamily {
    pub needle: &'static str,
    pub colors: SegmentColors,
}

#[derive(Debug, Clone)]
pub struct Palette {
    pub os: SegmentColors,
    pub path: SegmentColors,
    pub vcs: SegmentColors,
    pub session: SegmentColors,
    pub weekly: SegmentColors,
    pub added: SegmentColors,
    pub removed: SegmentColors,
    pub model_families: Vec<ModelFamily>,
    pub model_default: SegmentColors,
    pub pill_enabled: SegmentColors,
    pub pill_disabled: SegmentColors,
    pub tasks: SegmentColors,
    pub update: SegmentColors,
    /// Background of the nested progress capsule inside task pills.
    pub inset_bg: Color,
    pub inset_text: Color,
    pub incomplete: Color,
    pub cursor: Color,
    pub done: Color,
    pub in_progress: Color,
    pub todo: Color,
    pub divider: Color,
    pub current_task: Color,
    pub severity_low: Color,
    pub severity_medium: Color,
    pub severity_high: Color,
    pub severity_critical: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            os: SegmentColors::new(255, 232),
            path: SegmentColors::new(111, 25),
            vcs: SegmentColors::new(116, 30),
            session: SegmentColors::new(189, 60),
            weekly: SegmentColors::new(252, 240),
            added: SegmentColors::new(114, 28),
            removed: SegmentColors::new(174, 124),
            model_families: vec![
                ModelFamily {
                    needle: "haiku",
                    colors: SegmentColors::new(218, 168),
                },
                ModelFamily {
                    needle: "sonnet",
                    colors: SegmentColors::new(183, 97),
                },
                ModelFamily {
                    needle: "opus",
                    colors: SegmentColors::new(222, 172),
                },
            ],
            model_default: SegmentColors::new(255, 232),
            pill_enabled: SegmentColors::new(116, 30),
            pill_disabled: SegmentColors::new(250, 240),
            tasks: SegmentColors::new(147, 55),
            update: SegmentColors::new(229, 94),
            inset_bg: Color(255),
            inset_text: Color(232),
            incomplete: Color(245),
            cursor: Color(166),
            done: Color(34),
            in_progress: Color(214),
            todo: Color(240),
            divider: Color(245),
            current_task: Color(44),
            severity_low: Color(28),
            severity_medium: Color(136),
            severity_high: Color(166),
            severity_critical: Color(160),
        }
    }
}

/// Palette plus the switch that decides whether SGR codes are emitted.
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    color: bool,
}

impl Theme {
    pub fn ansi256() -> Self {
        Self {
            palette: Palette::default(),
            color: true,
        }
    }

    pub fn plain() -> Self {
        Self {
            palette: Palette::default(),
            color: false,
        }
    }

    pub fn fg(&self, c: Color) -> String {
        if self.color {
            format!("\x1b[38;5;{}m", c.0)
        } else {
            String::new()
        }
    }

    pub fn bg(&self, c: Color) -> String {
        if self.color {
            format!("\x1b[48;5;{}m", c.0)
        } else {
            String::new()
        }
    }

    pub fn reset(&self) -> &'static str {
        if self.color {
            RESET
        } else {
            ""
        }
    }

    pub fn bold(&self) -> &'static str {
        if self.color {
            BOLD
        } else {
            ""
        }
    }

    /// Background, text colour and bold for a segment body.
    pub fn body(&self, colors: SegmentColors) -> String {
        format!("{}{}{}", self.bg(colors.bg), self.fg(colors.text), self.bold())
    }

    /// Colours for a model name. First family whose needle occurs in the
    /// lowercased name wins; otherwise the default.
    pub fn model_colors(&self, full_name: &str) -> SegmentColors {
        let lower = full_name.to_lowercase();
        self.palette
            .model_families
            .iter()
            .find(|f| lower.contains(f.needle))
            .map(|f| f.colors)
            .unwrap_or(self.palette.model_default)
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Low => self.palette.severity_low,
            Severity::Medium => self.palette.severity_medium,
            Severity::High => self.palette.severity_high,
            Severity::Critical => self.palette.severity_critical,
        }
    }

    pub fn pill_colors(&self, enabled: bool) -> SegmentColors {
        if enabled {
            self.palette.pill_enabled
        } else {
            self.palette.pill_disabled
        }
    }
}

/// Icon for the host OS. A Linux container shows the container icon.
pub fn os_icon(os: OsKind, in_container: bool) -> &'static str {
    match os {
        OsKind::Linux if in_container => ICON_DOCKER,
        OsKind::Linux => ICON_LINUX,
        OsKind::MacOs => ICON_APPLE,
        OsKind::Windows => ICON_WINDOWS,
        OsKind::Unknown => ICON_DESKTOP,
    }
}
