pub mod schema;

use std::path::{Path, PathBuf};

use crate::error::Result;

// Re-exported for the CLI subcommands.
#[allow(unused_imports)]
pub use schema::{IconsConfig, SegmentsConfig, StatuslineConfig};

/// Overrides the config file location (used by tests and wrappers).
pub const CONFIG_ENV: &str = "STATUSLINE_CONFIG";

/// Per-icon environment overrides, applied after the file.
const ICON_ENV: [&str; 4] = [
    "STATUSLINE_ICON_OS",
    "STATUSLINE_ICON_PATH",
    "STATUSLINE_ICON_GIT",
    "STATUSLINE_ICON_MODEL",
];

/// Result of loading: the effective config plus anything worth logging once
/// the subscriber is up.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: Option<PathBuf>,
    pub config: StatuslineConfig,
    pub problems: Vec<String>,
}

/// Resolve the config path: `STATUSLINE_CONFIG`, else
/// `<config dir>/powerline-status/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("powerline-status").join("config.toml")))
}

/// Load the config without ever failing. Missing file means defaults;
/// unreadable or unparseable file means defaults plus a recorded problem.
pub fn load() -> LoadedConfig {
    let path = config_path();
    let mut problems = Vec::new();

    let mut config = match path.as_deref() {
        Some(p) if p.exists() => match load_from(p) {
            Ok(config) => config,
            Err(e) => {
                problems.push(format!("ignoring {}: {e}", p.display()));
                StatuslineConfig::default()
            }
        },
        _ => StatuslineConfig::default(),
    };

    apply_icon_env(&mut config, |name| std::env::var(name).ok());
    problems.extend(config.validate());

    LoadedConfig {
        path,
        config,
        problems,
    }
}

/// Read and parse one config file.
pub fn load_from(path: &Path) -> Result<StatuslineConfig> {
    let contents = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&contents)?)
}

/// Apply `STATUSLINE_ICON_*` overrides using `lookup` to read variables.
pub fn apply_icon_env(config: &mut StatuslineConfig, lookup: impl Fn(&str) -> Option<String>) {
    let icons = &mut config.icons;
    let slots = [&mut icons.os, &mut icons.path, &mut icons.git, &mut icons.model];
    for (name, slot) in ICON_ENV.into_iter().zip(slots) {
        if let Some(value) = lookup(name).as_deref().and_then(parse_bool) {
            *slot = value;
        }
    }
}

/// `false`, `0` and `no` (trimmed, any case) are false, any other non-empty
/// value is true, and an empty value is no override at all.
pub fn parse_bool(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let lower = value.to_ascii_lowercase();
    Some(!matches!(lower.as_str(), "false" | "0" | "no"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool(" NO "), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("False"), Some(false));
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(true));
        assert_eq!(parse_bool(""), None);
        assert_eq!(parse_bool("   "), None);
    }

    #[test]
    fn test_icon_env_overrides() {
        let mut config = StatuslineConfig::default();
        apply_icon_env(
            &mut config,
            env(&[("STATUSLINE_ICON_GIT", "no"), ("STATUSLINE_ICON_OS", "")]),
        );
        assert!(!config.icons.git);
        assert!(config.icons.os);
        assert!(config.icons.path);
        assert!(config.icons.model);
    }

    #[test]
    fn test_icon_env_can_reenable() {
        let mut config = StatuslineConfig::default();
        config.icons.model = false;
        apply_icon_env(&mut config, env(&[("STATUSLINE_ICON_MODEL", "yes")]));
        assert!(config.icons.model);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "path_max_len = 40\nbar_style = \"block\"\n").unwrap();
        let config = load_from(&path).unwrap();
        assert_eq!(config.path_max_len, 40);
        assert_eq!(config.bar_style, crate::render::BarStyle::Block);
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "path_max_len = \"long\"").unwrap();
        assert!(matches!(
            load_from(&path),
            Err(crate::error::StatuslineError::TomlParse(_))
        ));
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_from(&dir.path().join("nope.toml")),
            Err(crate::error::StatuslineError::Io(_))
        ));
    }
}
