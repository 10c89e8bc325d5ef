use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use clap::Args as ClapArgs;

use crate::collect::system;
use crate::config;
use crate::model::{
    CodeChanges, ModelInfo, Pill, Progress, RenderSpec, SessionProject, TaskGroup,
    TaskItem, TaskProject, TaskStatus, UpdateNotice, UsageWindow, VcsState,
};
use crate::render::{BarStyle, Powerline};

/// Arguments for the `statusline preview` subcommand.
#[derive(ClapArgs)]
pub struct Args {
    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long)]
    pub no_color: bool,

    /// Progress bar style (overrides the config file)
    #[arg(long, value_enum)]
    pub style: Option<BarStyle>,

    /// Context window usage shown by the sample
    #[arg(long, default_value_t = 42, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub percent: u8,
}

/// Render a fixed sample so fonts and colours can be checked without a
/// session.
pub fn run(args: Args) -> Result<()> {
    let loaded = config::load();
    let config = loaded.config;

    let powerline = Powerline::new(super::theme(args.no_color), args.style.unwrap_or(config.bar_style))
        .with_path_max_len(config.path_max_len);

    let mut spec = sample_spec(args.percent, Utc::now());
    spec.icons = config.icons.into();
    print!("{}", powerline.render(&spec));
    Ok(())
}

fn item(id: &str, name: &str, status: TaskStatus) -> TaskItem {
    TaskItem {
        id: id.to_string(),
        name: name.to_string(),
        status,
        parallel: false,
    }
}

/// A spec exercising every segment and pill.
pub fn sample_spec(percent: u8, now: DateTime<Utc>) -> RenderSpec {
    let mut spec = RenderSpec::new(
        ModelInfo::from_display_name("Opus 4.5"),
        Progress::clamp_percent(i64::from(percent)),
        "~/src/powerline-status",
        now,
    );
    spec.system = system::detect();
    spec.session_usage = Some(UsageWindow::session(35, Some(now + TimeDelta::minutes(150))));
    spec.weekly_usage = Some(UsageWindow::weekly(60, Some(now + TimeDelta::days(4))));
    spec.vcs = VcsState {
        branch: "main".to_string(),
        modified: 2,
        untracked: 1,
    };
    spec.changes = CodeChanges::new(48, 12);
    spec.pills = vec![Pill::new("github", true), Pill::new("postgres", false)];
    spec.tasks = Some(TaskProject::Session(SessionProject {
        name: "preview".to_string(),
        groups: vec![
            TaskGroup::with_items(
                1,
                "Setup",
                vec![
                    item("1.1", "scaffold", TaskStatus::Done),
                    item("1.2", "ci", TaskStatus::Done),
                ],
            ),
            TaskGroup::with_items(
                2,
                "Render",
                vec![
                    item("2.1", "bars", TaskStatus::Done),
                    item("2.2", "segments", TaskStatus::InProgress),
                    item("2.3", "pills", TaskStatus::Todo),
                ],
            ),
            TaskGroup::with_counts(3, "Release", 4, 0),
        ],
        current_task: Some("2.2".to_string()),
    }));
    spec.update = Some(UpdateNotice {
        version: "9.9.9".to_string(),
    });
    spec
}
