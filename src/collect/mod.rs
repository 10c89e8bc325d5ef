//! Best-effort data sources for one render. Failures degrade to neutral
//! values at the call site.

pub mod git;
pub mod mcp;
pub mod system;
pub mod tasks;
pub mod usage;
