//! Command implementations

use super::OutputFormat;
use crate::config::Config;
use crate::error::WizardError;
use crate::tui::{self, App};
use crate::wizard::{Completion, HistoryEntry, Orchestrator, Stage, StageRequest, WizardController};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// 1-based option picks for the non-interactive run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picks {
    pub keyword: usize,
    pub title: usize,
    pub topic: usize,
}

impl Default for Picks {
    fn default() -> Self {
        Self {
            keyword: 1,
            title: 1,
            topic: 1,
        }
    }
}

/// Interactive wizard
pub(super) async fn cmd_tui(config: &Config) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    let app = App::new(orchestrator, config.export.clone());
    tui::run(app).await
}

/// Walk every stage without a UI and print the article
pub(super) async fn cmd_run(
    config: &Config,
    seed: &str,
    picks: Picks,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let orchestrator = Orchestrator::from_config(config)?;
    let entry = generate(&orchestrator, seed, picks).await?;
    let rendered = format_entry(&entry, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {}", path))?;
            eprintln!("Saved to {}", path);
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Drive the controller from seed to content, taking the requested option at
/// each pick stage
pub(crate) async fn generate(
    orchestrator: &Orchestrator,
    seed: &str,
    picks: Picks,
) -> Result<HistoryEntry> {
    let mut controller = WizardController::new();

    let request = controller.submit_seed(seed)?;
    step(orchestrator, &mut controller, request).await?;

    for (stage, pick) in [
        (Stage::SelectKeyword, picks.keyword),
        (Stage::SelectTitle, picks.title),
        (Stage::SelectTopic, picks.topic),
    ] {
        let value = pick_option(controller.current_options(), pick, stage)?;
        tracing::info!("{}: {}", stage, value);
        let request = controller.select_option(stage, &value)?;
        step(orchestrator, &mut controller, request).await?;
    }

    controller
        .history()
        .last()
        .cloned()
        .context("No article was generated")
}

async fn step(
    orchestrator: &Orchestrator,
    controller: &mut WizardController,
    request: StageRequest,
) -> Result<()> {
    let stage = request.ticket.stage;
    match orchestrator.advance(controller, request).await {
        Completion::Advanced(stage) => {
            tracing::debug!("Now at {:?}", stage);
            Ok(())
        }
        Completion::Failed(message) => Err(WizardError::RequestFailure { stage, message }.into()),
        Completion::Stale => anyhow::bail!("Request result was discarded"),
    }
}

/// Take the `pick`-th (1-based) option
fn pick_option(options: &[String], pick: usize, stage: Stage) -> Result<String> {
    if pick == 0 {
        anyhow::bail!("Option numbers start at 1");
    }
    options.get(pick - 1).cloned().with_context(|| {
        format!(
            "{}: asked for option {} but only {} were returned",
            stage,
            pick,
            options.len()
        )
    })
}

pub(crate) fn format_entry(entry: &HistoryEntry, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Text => format!(
            "Keyword: {}\nTitle: {}\nTopic: {}\nSEO Score: {}/100\n\n{}",
            entry.selected_keyword,
            entry.selected_title,
            entry.selected_topic,
            entry.seo_score,
            entry.content
        ),
        OutputFormat::Json => serde_json::to_string_pretty(entry)?,
        OutputFormat::Markdown => format!(
            "# {}\n\n{}\n\n---\n\n*Keyword: {} | Topic: {} | SEO Score: {}/100*",
            entry.selected_title,
            entry.content,
            entry.selected_keyword,
            entry.selected_topic,
            entry.seo_score
        ),
    };
    Ok(rendered)
}

/// Write the default configuration file, to `custom_path` or the system location.
/// The existing file is never read, so a broken one can be replaced with `--force`.
pub(super) fn cmd_init(custom_path: Option<&str>, force: bool) -> Result<()> {
    let path = match custom_path {
        Some(path) => PathBuf::from(path),
        None => Config::system_config_path(),
    };
    init_at(&path, force)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

fn init_at(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    Config::default().save(path)
}

/// Print the effective configuration
pub(super) fn cmd_config(config: &Config, custom_path: Option<&str>) -> Result<()> {
    let source = match custom_path {
        Some(path) => path.to_string(),
        None => Config::system_config_path().display().to_string(),
    };
    let body = toml::to_string_pretty(config).context("Failed to serialize config to TOML")?;
    println!("# {}\n{}", source, body);
    Ok(())
}
