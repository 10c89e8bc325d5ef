//! Tracing setup. Everything goes to stderr; stdout belongs to the status
//! line.

/// Log filter override read when `--log-level` is absent.
pub const LOG_ENV: &str = "STATUSLINE_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Map a user-supplied level onto a filter directive.
fn normalize(level: &str) -> Option<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Some("off"),
        "error" => Some("error"),
        "warn" | "warning" => Some("warn"),
        "info" => Some("info"),
        "debug" => Some("debug"),
        "trace" => Some("trace"),
        _ => None,
    }
}

/// First recognised level among the flag, the environment and the config
/// file, else `warn`.
pub fn resolve_level(flag: Option<&str>, env: Option<&str>, config: &str) -> &'static str {
    [flag, env, Some(config)]
        .into_iter()
        .flatten()
        .find_map(normalize)
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr subscriber. A second call is a no-op.
pub fn init(flag: Option<&str>, config_level: &str) {
    let env = std::env::var(LOG_ENV).ok();
    let level = resolve_level(flag, env.as_deref(), config_level);
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_wins() {
        assert_eq!(resolve_level(Some("debug"), Some("info"), "error"), "debug");
    }

    #[test]
    fn test_env_then_config() {
        assert_eq!(resolve_level(None, Some("INFO"), "error"), "info");
        assert_eq!(resolve_level(None, None, "error"), "error");
    }

    #[test]
    fn test_unknown_levels_fall_through() {
        assert_eq!(resolve_level(Some("loud"), Some(""), "off"), "off");
        assert_eq!(resolve_level(None, None, "chatty"), "warn");
    }

    #[test]
    fn test_repeated_init_is_harmless() {
        init(Some("off"), "warn");
        init(Some("debug"), "warn");
    }
}
