pub mod changes;
pub mod input;
pub mod progress;
pub mod spec;
pub mod tasks;
pub mod usage;

pub use changes::CodeChanges;
pub use input::SessionInput;
pub use progress::{Progress, Severity};
pub use spec::{IconToggles, ModelInfo, OsKind, Pill, RenderSpec, SystemInfo, UpdateNotice, VcsState};
// GroupTasks is matched on inside the model and renderer modules directly.
#[allow(unused_imports)]
pub use tasks::{
    GroupTasks, LegacyProject, SessionProject, TaskGroup, TaskItem, TaskProject,
    TaskStatus,
};
pub use usage::UsageWindow;
