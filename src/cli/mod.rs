pub mod config_cmd;
pub mod logging;
pub mod output;
pub mod preview;
pub mod render;

use clap::{Parser, Subcommand};

use crate::render::Theme;

/// Two-line powerline status line for Claude Code sessions
#[derive(Parser)]
#[command(name = "statusline", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read session JSON from stdin and print the status line
    Render(render::Args),

    /// Print a sample status line to check fonts and colours
    Preview(preview::Args),

    /// Show the config file location and effective settings
    Config(config_cmd::Args),
}

/// 256-colour theme unless `--no-color` or `NO_COLOR` says otherwise.
/// Also pins `colored` so helper output agrees with the status line.
pub fn theme(no_color: bool) -> Theme {
    if no_color || std::env::var("NO_COLOR").is_ok() {
        colored::control::set_override(false);
        Theme::plain()
    } else {
        Theme::ansi256()
    }
}
