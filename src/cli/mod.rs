//! CLI Module
//!
//! Command-line interface for the blog writer using Clap v4.

mod commands;

use crate::config::Config;
use crate::logging::{self, LogTarget};
use anyhow::Result;
use clap::{Parser, Subcommand};

/// AI Blog Writer - seed keyword to finished article, one pick at a time
#[derive(Parser, Debug)]
#[command(name = "blogwriter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BLOGWRITER_CONFIG")]
    pub config: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive wizard (default)
    Tui,

    /// Run the whole wizard non-interactively
    Run {
        /// Seed keyword
        keyword: String,

        /// Which suggested keyword to pick (1-based)
        #[arg(long = "keyword", value_name = "N", default_value = "1")]
        keyword_pick: usize,

        /// Which suggested title to pick (1-based)
        #[arg(long = "title", value_name = "N", default_value = "1")]
        title_pick: usize,

        /// Which suggested topic to pick (1-based)
        #[arg(long = "topic", value_name = "N", default_value = "1")]
        topic_pick: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the result to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Show the effective configuration
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

/// Main CLI entry point
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Init writes defaults and never reads the existing file, so a broken one
    // can still be replaced
    let config = if matches!(cli.command, Some(Commands::Init { .. })) {
        Config::default()
    } else {
        let config = match cli.config {
            Some(ref path) => Config::load_from_path(path)?,
            None => Config::load()?,
        };
        config.validate()?;
        config
    };

    // The wizard owns the terminal, so it logs to a file
    let target = match cli.command {
        None | Some(Commands::Tui) => LogTarget::File,
        _ => LogTarget::Stderr,
    };
    let _log_guard = logging::init(&config.logging, target, cli.debug)?;
    if cli.debug {
        tracing::debug!("Debug mode enabled");
    }

    match cli.command {
        None | Some(Commands::Tui) => commands::cmd_tui(&config).await,
        Some(Commands::Run {
            keyword,
            keyword_pick,
            title_pick,
            topic_pick,
            format,
            output,
        }) => {
            let picks = commands::Picks {
                keyword: keyword_pick,
                title: title_pick,
                topic: topic_pick,
            };
            commands::cmd_run(&config, &keyword, picks, format, output.as_deref()).await
        }
        Some(Commands::Init { force }) => commands::cmd_init(cli.config.as_deref(), force),
        Some(Commands::Config) => commands::cmd_config(&config, cli.config.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_config_path_can_come_from_env() {
        use clap::CommandFactory;
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|a| a.get_id() == "config")
            .unwrap();
        assert_eq!(
            arg.get_env(),
            Some(std::ffi::OsStr::new("BLOGWRITER_CONFIG"))
        );
    }

    #[test]
    fn test_run_defaults_pick_first_options() {
        let cli = Cli::parse_from(["blogwriter", "run", "coffee"]);
        match cli.command {
            Some(Commands::Run {
                keyword,
                keyword_pick,
                title_pick,
                topic_pick,
                format,
                output,
            }) => {
                assert_eq!(keyword, "coffee");
                assert_eq!((keyword_pick, title_pick, topic_pick), (1, 1, 1));
                assert_eq!(format, OutputFormat::Text);
                assert!(output.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_run_picks_and_format() {
        let cli = Cli::parse_from([
            "blogwriter",
            "--debug",
            "run",
            "coffee",
            "--keyword",
            "2",
            "--topic",
            "3",
            "--format",
            "markdown",
        ]);
        assert!(cli.debug);
        assert!(matches!(
            cli.command,
            Some(Commands::Run {
                keyword_pick: 2,
                title_pick: 1,
                topic_pick: 3,
                format: OutputFormat::Markdown,
                ..
            })
        ));
    }
}
