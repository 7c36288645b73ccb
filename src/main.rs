use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use resourcelist::config::ProjectConfig;
use resourcelist::{GenerationOutcome, ResourceListBuilder};

/// Generate resource list files for the lists configured in a project.
#[derive(Debug, Parser)]
#[command(name = "resourcelist", version, about)]
struct Cli {
  /// Project directory; relative paths in the configuration resolve against it.
  #[arg(long, default_value = ".")]
  project_dir: PathBuf,

  /// Configuration file; defaults to `resourcelist.config.json` in the project directory.
  #[arg(long)]
  config: Option<PathBuf>,

  /// Also generate the built-in pipelet and ORM lists.
  #[arg(long)]
  cartridge: bool,

  /// Only generate the named list. May be repeated.
  #[arg(long = "list", value_name = "NAME")]
  lists: Vec<String>,

  /// Log every entry written.
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  match run(&cli) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(err) => {
      eprintln!("error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .init();
}

fn run(cli: &Cli) -> Result<bool> {
  let project_dir = std::path::absolute(&cli.project_dir)
    .with_context(|| format!("failed to resolve {}", cli.project_dir.display()))?;

  let mut config = match &cli.config {
    Some(path) => ProjectConfig::from_path(path)?,
    None => ProjectConfig::discover(&project_dir)?,
  };
  config.cartridge |= cli.cartridge;

  let layout = config.to_layout(&project_dir);
  let lists = config.to_lists(&layout)?;
  if lists.is_empty() {
    tracing::info!("no resource lists configured in {}", project_dir.display());
    return Ok(true);
  }

  let builder = ResourceListBuilder::new(&layout);
  let report = if cli.lists.is_empty() {
    builder.build(&lists)
  } else {
    builder.build_only(&lists, &cli.lists)?
  };

  for list in &report.lists {
    match &list.outcome {
      Ok(GenerationOutcome::Written { path, entries }) => {
        println!("{}: {} entries -> {}", list.task_name, entries.len(), path.display());
      }
      Ok(GenerationOutcome::Empty { .. }) => {
        println!("{}: no matching files", list.task_name);
      }
      Err(err) => println!("{}: FAILED: {err}", list.task_name),
    }
  }

  Ok(report.is_success())
}
