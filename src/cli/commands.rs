use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, RunArgs};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, Settings};
use crate::domain::{combat_tree, SampleMode, Walk};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::traits::StdoutSink;
use crate::tree_traits::TreeNodeConvert;

pub const BANNER: &str = "Decision Tree Demo (Ctrl+C to exit)";

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run(args)) => _run(cli, args),
        Some(Commands::Show { random }) => _show(*random),
        Some(Commands::Routes) => _routes(),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => _run(cli, &RunArgs::default()),
    }
}

/// Command line flags override every config layer.
pub fn apply_run_args(mut settings: Settings, args: &RunArgs) -> Settings {
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(input) = args.input {
        settings.input_mode = input;
    }
    if args.strict {
        settings.strict_input = true;
    }
    settings
}

fn sample_mode(random: bool) -> SampleMode {
    if random {
        SampleMode::Random
    } else {
        SampleMode::Interactive
    }
}

/// `N Y => A1. Seek out enemies.`
pub fn route_line(route: &Walk<'_>) -> String {
    let keys = route
        .answers()
        .map(|answer| if answer { "Y" } else { "N" })
        .collect::<Vec<_>>()
        .join(" ");
    let outcome = route
        .action
        .map(|action| action.text().to_string())
        .unwrap_or_else(|| "(no decision)".to_string());
    format!("{} => {}", keys, outcome)
}

#[instrument(skip(cli))]
fn _run(cli: &Cli, args: &RunArgs) -> CliResult<()> {
    let settings = apply_run_args(Settings::load(cli.config.as_deref())?, args);
    debug!(?settings, "effective settings");
    let tree = combat_tree(sample_mode(args.random))?;

    let container = ServiceContainer::new(settings);
    let mut service = container.decision_service();

    output::header(BANNER);
    let outcome = service.run(&tree, &mut StdoutSink)?;

    if outcome.action.is_none() {
        output::warning("no decision reached");
    }
    if args.explain {
        output::header("Answers:");
        for entry in &outcome.trail {
            output::answer(&entry.question, entry.answer);
        }
    }
    Ok(())
}

#[instrument]
fn _show(random: bool) -> CliResult<()> {
    let tree = combat_tree(sample_mode(random))?;
    output::info(&tree.to_tree_string());
    Ok(())
}

#[instrument]
fn _routes() -> CliResult<()> {
    let tree = combat_tree(SampleMode::Interactive)?;
    let routes = tree.routes();
    debug!("found {} routes", routes.len());
    for route in &routes {
        output::info(&route_line(route));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = Settings::load(cli.config.as_deref())?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::info(&format!("global: {}", path.display())),
                None => output::warning("cannot determine global config directory"),
            }
            if let Some(path) = &cli.config {
                output::info(&format!("file:   {}", path.display()));
            }
        }
    }
    Ok(())
}

fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
