use serde::Deserialize;

use super::changes::CodeChanges;
use super::progress::Progress;
use super::spec::ModelInfo;

const DEFAULT_MODEL_NAME: &str = "Claude";
const DEFAULT_WORKING_DIR: &str = "~";
const DEFAULT_CONTEXT_WINDOW: u64 = 200_000;

/// Session metadata piped in on each statusline tick. Every field is
/// optional and unknown fields are ignored.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SessionInput {
    pub model: InputModel,
    pub workspace: InputWorkspace,
    pub context_window: InputContext,
    pub cost: InputCost,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct InputModel {
    pub display_name: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct InputWorkspace {
    pub current_dir: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct InputContext {
    pub total_input_tokens: u64,
    pub total_output_tokens: u64,
    pub context_window_size: u64,
    pub used_percentage: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct InputCost {
    pub total_lines_added: u64,
    pub total_lines_removed: u64,
}

impl SessionInput {
    /// Parse stdin bytes. Empty or malformed input yields the defaults.
    pub fn from_slice(buf: &[u8]) -> Self {
        if buf.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        match serde_json::from_slice(buf) {
            Ok(input) => input,
            Err(e) => {
                tracing::debug!("ignoring malformed session input: {e}");
                Self::default()
            }
        }
    }

    pub fn model_info(&self) -> ModelInfo {
        let name = self.model.display_name.trim();
        if name.is_empty() {
            ModelInfo::from_display_name(DEFAULT_MODEL_NAME)
        } else {
            ModelInfo::from_display_name(name)
        }
    }

    pub fn working_dir(&self) -> &str {
        if self.workspace.current_dir.is_empty() {
            DEFAULT_WORKING_DIR
        } else {
            &self.workspace.current_dir
        }
    }

    pub fn context_window_size(&self) -> u64 {
        match self.context_window.context_window_size {
            0 => DEFAULT_CONTEXT_WINDOW,
            n => n,
        }
    }

    pub fn total_tokens(&self) -> u64 {
        self.context_window
            .total_input_tokens
            .saturating_add(self.context_window.total_output_tokens)
    }

    /// Context usage. The precomputed percentage wins because cumulative
    /// token totals overshoot the window after compaction.
    pub fn context_progress(&self) -> Progress {
        match self.context_window.used_percentage {
            Some(pct) if pct.is_finite() => Progress::clamp_percent(pct as i64),
            _ => Progress::from_ratio(self.total_tokens(), self.context_window_size()),
        }
    }

    pub fn code_changes(&self) -> CodeChanges {
        CodeChanges::new(self.cost.total_lines_added, self.cost.total_lines_removed)
    }
}
