mod cli;
mod collect;
mod config;
mod error;
mod model;
mod render;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render(args) => cli::render::run(args),
        Command::Preview(args) => cli::preview::run(args),
        Command::Config(args) => cli::config_cmd::run(args),
    }
}
