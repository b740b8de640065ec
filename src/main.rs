use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

mod cli;
mod overlay;
mod simulate;

use cli::Cli;
use cli::commands::{Commands, OverrideArg};
use loadwatch::config::Config;

fn setup_logging(cli: &Cli, config: &Config) {
    let default_level = if cli.is_verbose() { "debug" } else { config.log_level.as_str() };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        eprintln!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        None => handle_simulate_command(None, OverrideArg::Auto, false, config),
        Some(Commands::Simulate { tasks, mode, json }) => handle_simulate_command(*tasks, *mode, *json, config),
        Some(Commands::Config) => handle_config_command(config),
    }
}

fn handle_simulate_command(
    tasks: Option<usize>,
    override_arg: OverrideArg,
    json: bool,
    config: &Config,
) -> Result<()> {
    let tasks = tasks.unwrap_or(config.simulate.tasks);
    info!("Simulate: tasks={} override={:?}", tasks, override_arg);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let summary = runtime.block_on(simulate::run(config, tasks, override_arg.as_state(), json))?;

    if !json {
        println!(
            "{} {} succeeded, {} failed, {} change events, overlay shown {} time(s)",
            "Summary:".green(),
            summary.succeeded,
            summary.failed,
            summary.changes,
            summary.overlay_shown
        );
    }
    Ok(())
}

fn handle_config_command(config: &Config) -> Result<()> {
    let yaml = config.to_yaml().context("Failed to render configuration")?;
    print!("{}", yaml);
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&cli, &config);

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
