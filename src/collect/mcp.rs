//! MCP server pills merged from every Claude settings scope.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::model::Pill;

const USER_CONFIG_FILE: &str = ".claude.json";
const PROJECT_CONFIG_FILE: &str = ".mcp.json";

/// `{"mcpServers": {...}}`, the shape of `.mcp.json` and `managed-mcp.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServersFile {
    #[serde(rename = "mcpServers")]
    mcp_servers: BTreeMap<String, Value>,
}

/// The parts of `~/.claude.json` that list servers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserFile {
    #[serde(rename = "mcpServers")]
    mcp_servers: BTreeMap<String, Value>,
    projects: HashMap<String, ProjectEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProjectEntry {
    #[serde(rename = "mcpServers")]
    mcp_servers: BTreeMap<String, Value>,
    #[serde(rename = "disabledMcpServers")]
    disabled_mcp_servers: Vec<String>,
}

/// Files consulted, in precedence order.
#[derive(Debug, Clone)]
pub struct McpSources {
    pub managed: PathBuf,
    pub user: Option<PathBuf>,
    pub project_dir: PathBuf,
}

impl McpSources {
    pub fn for_project(project_dir: &Path) -> Self {
        Self {
            managed: managed_config_path(),
            user: dirs::home_dir().map(|h| h.join(USER_CONFIG_FILE)),
            project_dir: project_dir.to_path_buf(),
        }
    }
}

/// Enterprise managed config location for this platform.
pub fn managed_config_path() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support/ClaudeCode/managed-mcp.json")
    } else if cfg!(target_os = "windows") {
        PathBuf::from(r"C:\ProgramData\ClaudeCode\managed-mcp.json")
    } else {
        PathBuf::from("/etc/claude-code/managed-mcp.json")
    }
}

/// One server layer: names sorted, each with its own `disabled` flag.
type Layer = Vec<(String, bool)>;

fn layer(servers: &BTreeMap<String, Value>) -> Layer {
    servers
        .iter()
        .map(|(name, entry)| {
            let disabled = entry
                .get("disabled")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            (name.clone(), disabled)
        })
        .collect()
}

fn read_json<T: serde::de::DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Read a file, logging and skipping it on any failure.
fn read_or_skip<T: serde::de::DeserializeOwned + Default>(path: &Path) -> T {
    read_json(path).unwrap_or_else(|e| {
        tracing::debug!(path = %path.display(), error = %e, "skipping MCP config");
        T::default()
    })
}

/// All configured servers as pills, first occurrence of a name winning.
pub fn collect(sources: &McpSources) -> Vec<Pill> {
    let managed: ServersFile = read_or_skip(&sources.managed);
    let mut user: UserFile = sources
        .user
        .as_deref()
        .map(read_or_skip::<UserFile>)
        .unwrap_or_default();
    let project: ServersFile = read_or_skip(&sources.project_dir.join(PROJECT_CONFIG_FILE));

    let key = sources.project_dir.to_string_lossy();
    let local = user.projects.remove(key.as_ref()).unwrap_or_default();

    let layers = [
        layer(&managed.mcp_servers),
        layer(&user.mcp_servers),
        layer(&local.mcp_servers),
        layer(&project.mcp_servers),
    ];
    merge(&layers, &local.disabled_mcp_servers)
}

/// Merge layers in order. A server is disabled by its own flag or by being
/// listed in `disabled`.
pub fn merge(layers: &[Layer], disabled: &[String]) -> Vec<Pill> {
    let disabled: HashSet<&str> = disabled.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut pills = Vec::new();
    for (name, off) in layers.iter().flatten() {
        if !seen.insert(name.as_str()) {
            continue;
        }
        let enabled = !off && !disabled.contains(name.as_str());
        pills.push(Pill::new(name.clone(), enabled));
    }
    pills
}
