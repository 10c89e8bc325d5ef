const ELLIPSIS: &str = "...";
pub const DEFAULT_MAX_PATH: usize = 30;

/// Shorten `path` for display: a leading `home` becomes `~`, then leading
/// components are dropped behind `.../` until it fits in `max_len` chars.
/// The floor is `.../<last component>` even if that is still too long.
pub fn truncate_path(path: &str, max_len: usize, home: Option<&str>) -> String {
    let max_len = if max_len == 0 { DEFAULT_MAX_PATH } else { max_len };

    let under_home = home
        .filter(|home| !home.is_empty())
        .and_then(|home| path.strip_prefix(home))
        .filter(|rest| rest.is_empty() || rest.starts_with('/'));
    let path = match under_home {
        Some(rest) => format!("~{rest}"),
        None => path.to_string(),
    };

    if path.chars().count() <= max_len {
        return path;
    }

    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.first() == Some(&"") {
        segments.remove(0);
    }

    while segments.len() > 1 {
        segments.remove(0);
        let candidate = format!("{}/{}", ELLIPSIS, segments.join("/"));
        if candidate.chars().count() <= max_len {
            return candidate;
        }
    }

    match segments.first() {
        Some(last) => format!("{}/{}", ELLIPSIS, last),
        None => path,
    }
}
