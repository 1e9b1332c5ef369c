//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::InputMode;

/// Binary decision tree demo: answer yes/no questions, get one action
#[derive(Parser, Debug)]
#[command(name = "dtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/dtree/dtree.toml)
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk the sample tree once and perform the chosen action (default)
    Run(RunArgs),

    /// Print the sample tree
    Show {
        /// Show the random-decision variant
        #[arg(long)]
        random: bool,
    },

    /// List every answer sequence and the outcome it leads to
    Routes,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Flip a coin at every decision instead of asking
    #[arg(long)]
    pub random: bool,

    /// Seed for random decisions
    #[arg(long)]
    pub seed: Option<u64>,

    /// How answers are read
    #[arg(long, value_enum)]
    pub input: Option<InputMode>,

    /// Fail when input is closed instead of answering no
    #[arg(long)]
    pub strict: bool,

    /// Print the answered questions after the action
    #[arg(short, long)]
    pub explain: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_run_flags_when_parsing_then_populated() {
        let cli = Cli::try_parse_from([
            "dtree", "-dd", "run", "--random", "--seed", "7", "--input", "line", "--explain",
        ])
        .unwrap();
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.random);
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.input, Some(InputMode::Line));
                assert!(args.explain);
                assert!(!args.strict);
            }
            other => panic!("expected run, got {:?}", other),
        }
    }

    #[test]
    fn given_no_subcommand_when_parsing_then_none() {
        let cli = Cli::try_parse_from(["dtree"]).unwrap();
        assert!(cli.command.is_none());
    }
}
