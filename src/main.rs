mod cli;
mod config;
mod domain;
mod export;

use anyhow::Result;
use clap::Parser;

use cli::Cli;
use config::Config;
use domain::vcs::GitClient;
use export::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log.filter())
        .init();

    let ctx = Context {
        config: Config::load(&cli.config)?,
        vcs: GitClient,
        repos_dir: cli.repos_dir,
        out_dir: cli.out_dir,
        since: cli.since,
    };
    ctx.run()
}
