use anyhow::{Context, Result};
use clap::Parser;

use tetris_themes::cli::{Cli, Command};
use tetris_themes::config::Config;
use tetris_themes::name_provider::{FixedName, PromptName};
use tetris_themes::source::LocalThemeSource;
use tetris_themes::tracing_setup;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init_global(cli.log_file.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    let source = match &cli.dir {
        Some(dir) => LocalThemeSource::new(dir),
        None => LocalThemeSource::current_dir().context("Failed to get working directory")?,
    };
    tracing::debug!("Theme directory: {}", source.base_dir().display());

    let job = match &cli.command {
        Command::Single {
            name: Some(name), ..
        } => cli.command.job(&config, Some(&mut FixedName(name.clone()))),
        Command::Single { name: None, .. } => {
            cli.command.job(&config, Some(&mut PromptName::stdio()))
        }
        Command::Batch { .. } => cli.command.job(&config, None),
    }
    .context("Failed to determine theme name")?;

    let report = job.run_with_progress(&source, |progress| {
        if let Some(line) = cli.command.progress_line(progress) {
            println!("{line}");
        }
    })?;

    println!("{}", cli.command.summary(&report));
    Ok(())
}
