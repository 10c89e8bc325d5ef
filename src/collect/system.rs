//! Host OS and container detection.

use std::path::Path;

use crate::model::{OsKind, SystemInfo};

/// Filesystem access used by container detection, swappable in tests.
pub trait SystemProbe {
    fn path_exists(&self, path: &str) -> bool;
    fn read_file(&self, path: &str) -> Option<String>;
}

/// Probe backed by the real filesystem.
pub struct HostProbe;

impl SystemProbe for HostProbe {
    fn path_exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn read_file(&self, path: &str) -> Option<String> {
        std::fs::read_to_string(path).ok()
    }
}

/// OS kind of the compile target.
pub fn current_os() -> OsKind {
    if cfg!(target_os = "linux") {
        OsKind::Linux
    } else if cfg!(target_os = "macos") {
        OsKind::MacOs
    } else if cfg!(target_os = "windows") {
        OsKind::Windows
    } else {
        OsKind::Unknown
    }
}

pub fn detect() -> SystemInfo {
    detect_with_probe(current_os(), &HostProbe)
}

pub fn detect_with_probe(os: OsKind, probe: &dyn SystemProbe) -> SystemInfo {
    SystemInfo {
        os,
        in_container: in_container(probe),
    }
}

/// `/.dockerenv` exists, or PID 1's cgroup mentions docker.
fn in_container(probe: &dyn SystemProbe) -> bool {
    if probe.path_exists("/.dockerenv") {
        return true;
    }
    probe
        .read_file("/proc/1/cgroup")
        .map(|c| c.contains("docker"))
        .unwrap_or(false)
}
