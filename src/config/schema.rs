use serde::{Deserialize, Serialize};

use crate::model::IconToggles;
use crate::render::BarStyle;

/// Paths shorter than this leave almost nothing after `.../` truncation.
const MIN_SENSIBLE_PATH_LEN: usize = 8;

/// User-configurable statusline settings.
/// A missing file is not an error; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatuslineConfig {
    /// Progress bar glyph set. Default: heavy
    pub bar_style: BarStyle,

    /// Longest path shown before leading components are elided. Default: 30
    pub path_max_len: usize,

    /// Directory holding hierarchical task session files.
    pub session_dir: String,

    /// Snapshot of the usage API response. `~` expands to the home directory.
    pub usage_file: String,

    /// Log filter used when neither `--log-level` nor `STATUSLINE_LOG` is set.
    pub log_level: String,

    pub icons: IconsConfig,
    pub segments: SegmentsConfig,
}

impl Default for StatuslineConfig {
    fn default() -> Self {
        Self {
            bar_style: BarStyle::Heavy,
            path_max_len: 30,
            session_dir: "/workspace/.claude/sessions".to_string(),
            usage_file: "~/.cache/powerline-status/usage.json".to_string(),
            log_level: "warn".to_string(),
            icons: IconsConfig::default(),
            segments: SegmentsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconsConfig {
    pub os: bool,
    pub path: bool,
    pub git: bool,
    pub model: bool,
}

impl Default for IconsConfig {
    fn default() -> Self {
        Self {
            os: true,
            path: true,
            git: true,
            model: true,
        }
    }
}

impl From<IconsConfig> for IconToggles {
    fn from(icons: IconsConfig) -> Self {
        IconToggles {
            os: icons.os,
            path: icons.path,
            git: icons.git,
            model: icons.model,
        }
    }
}

/// Which optional collaborators feed the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentsConfig {
    pub usage: bool,
    pub weekly: bool,
    pub tasks: bool,
    pub mcp: bool,
}

impl Default for SegmentsConfig {
    fn default() -> Self {
        Self {
            usage: true,
            weekly: true,
            tasks: true,
            mcp: true,
        }
    }
}

impl StatuslineConfig {
    /// Non-fatal problems with otherwise usable values.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.path_max_len > 0 && self.path_max_len < MIN_SENSIBLE_PATH_LEN {
            warnings.push(format!(
                "path_max_len = {} is very short; paths will mostly render as `.../<dir>`",
                self.path_max_len
            ));
        }
        if self.session_dir.trim().is_empty() {
            warnings.push("session_dir is empty; hierarchical task projects are disabled".into());
        }
        warnings
    }

    /// `usage_file` with a leading `~` replaced by `home`.
    pub fn usage_path(&self, home: Option<&str>) -> String {
        expand_home(&self.usage_file, home)
    }
}

fn expand_home(path: &str, home: Option<&str>) -> String {
    match (path.strip_prefix('~'), home) {
        (Some(rest), Some(home)) if rest.is_empty() || rest.starts_with('/') => {
            format!("{home}{rest}")
        }
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config: StatuslineConfig = toml::from_str("").unwrap();
        assert_eq!(config, StatuslineConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config: StatuslineConfig = toml::from_str(
            r#"
bar_style = "braille"

[icons]
git = false

[segments]
mcp = false
"#,
        )
        .unwrap();
        assert_eq!(config.bar_style, BarStyle::Braille);
        assert_eq!(config.path_max_len, 30);
        assert!(!config.icons.git);
        assert!(config.icons.os);
        assert!(!config.segments.mcp);
        assert!(config.segments.usage);
    }

    #[test]
    fn test_unknown_bar_style_rejected() {
        assert!(toml::from_str::<StatuslineConfig>(r#"bar_style = "dots""#).is_err());
    }

    #[test]
    fn test_serializes_back_to_toml() {
        let text = toml::to_string(&StatuslineConfig::default()).unwrap();
        assert!(text.contains("bar_style = \"heavy\""));
        assert!(text.contains("[icons]"));
        let back: StatuslineConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, StatuslineConfig::default());
    }

    #[test]
    fn test_validate_short_path() {
        let config = StatuslineConfig {
            path_max_len: 5,
            ..Default::default()
        };
        let warnings = config.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("path_max_len"));
    }

    #[test]
    fn test_validate_default_is_clean() {
        assert!(StatuslineConfig::default().validate().is_empty());
        let zero = StatuslineConfig {
            path_max_len: 0,
            ..Default::default()
        };
        assert!(zero.validate().is_empty());
    }

    #[test]
    fn test_icons_into_toggles() {
        let toggles: IconToggles = IconsConfig {
            os: false,
            path: true,
            git: false,
            model: true,
        }
        .into();
        assert!(!toggles.os && toggles.path && !toggles.git && toggles.model);
    }

    #[test]
    fn test_usage_path_expansion() {
        let config = StatuslineConfig::default();
        assert_eq!(
            config.usage_path(Some("/home/u")),
            "/home/u/.cache/powerline-status/usage.json"
        );
        assert_eq!(config.usage_path(None), "~/.cache/powerline-status/usage.json");
        assert_eq!(expand_home("~other/x", Some("/home/u")), "~other/x");
        assert_eq!(expand_home("/abs", Some("/home/u")), "/abs");
    }
}
