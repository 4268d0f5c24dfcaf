//! CLI command definitions.
//!
//! Writing commands share the global flags in [`GlobalArgs`] and the
//! per-request agent overrides in [`OverrideArgs`].

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use letterly_agents::{AgentOverrides, AgentSettings};
use letterly_llm::{FallbackInvoker, InvokerConfig, OpenRouterProvider};
use letterly_tasks::LetterAssistant;

pub mod agents;
pub mod configure;
pub mod detect;
pub mod generate;
pub mod match_suggestions;
pub mod models;
pub mod recommend_length;
pub mod refine;
pub mod suggest;
pub mod sync_notes;

/// Letterly - turn rough notes into finished letters
#[derive(Parser)]
#[command(name = "letterly")]
#[command(version, about = "Letterly - turn rough notes into finished letters")]
#[command(long_about = r#"
Letterly turns rough notes into finished letters with a team of small
LLM agents served through OpenRouter. Each agent tries its primary model
first and falls back to its backup models when a model is rate limited
or unavailable.

COMMANDS:
  agents            → List agents and their models
  models            → List the model catalog
  configure         → Store per-agent model/instruction defaults
  generate          → Write a letter from rough notes
  refine            → Update rough notes from feedback
  suggest           → Suggest improvements to notes and draft
  recommend-length  → Recommend Short, Medium or Long
  sync-notes        → Find points added while editing the letter
  detect-tone       → Detect a tone change request
  detect-image      → Detect an illustration request
  match-suggestions → Match a chat message to review suggestions

ENVIRONMENT:
  OPENROUTER_API_KEY    API key (required for writing commands)
  LETTERLY_BASE_URL     Override the OpenRouter endpoint
  NEXT_PUBLIC_SITE_URL  Site URL sent as HTTP-Referer
  RUST_LOG              Log filter (default: letterly=info,warn)

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid input or arguments
  3 - LLM not configured
  4 - Every model failed
  5 - Provider rejected the request
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Workspace holding `.letterly/settings.json`
    #[arg(short, long, global = true, default_value = ".")]
    pub workspace: PathBuf,

    /// Wait between fallback models, in milliseconds
    #[arg(long, global = true, default_value_t = 1000)]
    pub cooldown_ms: u64,

    /// Give up on a single model after this many seconds
    #[arg(long, global = true)]
    pub attempt_timeout: Option<u64>,
}

impl GlobalArgs {
    pub fn load_settings(&self) -> Result<AgentSettings> {
        AgentSettings::load(&self.workspace).with_context(|| {
            format!(
                "Failed to load settings from {}",
                AgentSettings::path(&self.workspace).display()
            )
        })
    }

    pub fn invoker_config(&self) -> InvokerConfig {
        let config = InvokerConfig::default().cooldown(Duration::from_millis(self.cooldown_ms));
        match self.attempt_timeout {
            Some(secs) => config.attempt_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }

    /// Assistant backed by OpenRouter, with the workspace's agent settings.
    pub fn assistant(&self) -> Result<LetterAssistant> {
        let provider = OpenRouterProvider::from_env()?;
        let invoker = FallbackInvoker::with_config(Arc::new(provider), self.invoker_config());
        Ok(LetterAssistant::new(invoker).with_settings(self.load_settings()?))
    }
}

/// Per-request agent customization.
#[derive(Args, Clone, Debug, Default)]
pub struct OverrideArgs {
    /// Use this model first instead of the agent's primary
    #[arg(short, long)]
    pub model: Option<String>,

    /// Replace the agent's system instruction
    #[arg(short, long, allow_hyphen_values = true)]
    pub instruction: Option<String>,
}

impl OverrideArgs {
    pub fn overrides(&self) -> AgentOverrides {
        AgentOverrides::from_parts(self.model.clone(), self.instruction.clone())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List agents and their models
    Agents(agents::AgentsArgs),

    /// List the model catalog
    Models(models::ModelsArgs),

    /// Store per-agent defaults in the workspace settings
    Configure(configure::ConfigureArgs),

    /// Write a letter from rough notes
    Generate(generate::GenerateArgs),

    /// Update rough notes from feedback
    Refine(refine::RefineArgs),

    /// Suggest improvements to notes and draft
    Suggest(suggest::SuggestArgs),

    /// Recommend a letter length
    #[command(name = "recommend-length")]
    RecommendLength(recommend_length::RecommendLengthArgs),

    /// Find points added while editing the letter
    #[command(name = "sync-notes")]
    SyncNotes(sync_notes::SyncNotesArgs),

    /// Detect a tone change request in a message
    #[command(name = "detect-tone")]
    DetectTone(detect::DetectToneArgs),

    /// Detect an illustration request in a message
    #[command(name = "detect-image")]
    DetectImage(detect::DetectImageArgs),

    /// Match a chat message to review suggestions
    #[command(name = "match-suggestions")]
    MatchSuggestions(match_suggestions::MatchSuggestionsArgs),
}

/// Text given inline, read from a file, or piped on stdin.
pub fn read_input(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer)
}

/// Print `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "letterly",
            "generate",
            "--notes",
            "- thank Sam",
            "--cooldown-ms",
            "0",
            "--attempt-timeout",
            "30",
            "--json",
        ])
        .unwrap();

        let config = cli.global.invoker_config();
        assert_eq!(config.cooldown, Duration::ZERO);
        assert_eq!(config.attempt_timeout, Some(Duration::from_secs(30)));
        assert!(cli.global.json);
    }

    #[test]
    fn test_bullet_notes_parse_as_values() {
        let parse = |args: &[&str]| Cli::try_parse_from(args).map(|cli| cli.command);

        match parse(&["letterly", "generate", "--notes", "- thank Sam"]).unwrap() {
            Commands::Generate(args) => assert_eq!(args.notes.as_deref(), Some("- thank Sam")),
            _ => panic!("expected generate"),
        }
        match parse(&["letterly", "suggest", "--notes", "- meet Friday"]).unwrap() {
            Commands::Suggest(args) => assert_eq!(args.notes.as_deref(), Some("- meet Friday")),
            _ => panic!("expected suggest"),
        }
        match parse(&["letterly", "refine", "- remove the budget point", "--notes", "- budget"])
            .unwrap()
        {
            Commands::Refine(args) => {
                assert_eq!(args.feedback, "- remove the budget point");
                assert_eq!(args.notes.as_deref(), Some("- budget"));
            }
            _ => panic!("expected refine"),
        }
        assert!(parse(&["letterly", "sync-notes", "letter.txt", "--notes", "- a"]).is_ok());
        assert!(parse(&["letterly", "recommend-length", "--notes", "- a"]).is_ok());
        assert!(parse(&["letterly", "detect-tone", "- make it formal"]).is_ok());
        assert!(parse(&["letterly", "detect-image", "- add a drawing of a cat"]).is_ok());
    }

    #[test]
    fn test_match_suggestions_collects_suggestions_in_order() {
        let cli = Cli::try_parse_from([
            "letterly",
            "match-suggestions",
            "make it formal",
            "--suggestion",
            "Add a date",
            "--suggestion",
            "- Use a formal tone",
        ])
        .unwrap();

        match cli.command {
            Commands::MatchSuggestions(args) => {
                assert_eq!(args.message, "make it formal");
                assert_eq!(args.suggestions, vec!["Add a date", "- Use a formal tone"]);
            }
            _ => panic!("expected match-suggestions"),
        }
    }

    #[test]
    fn test_blank_override_is_ignored() {
        let args = OverrideArgs {
            model: Some("  ".into()),
            instruction: Some("Be brief.".into()),
        };
        let overrides = args.overrides();
        assert_eq!(overrides.model, None);
        assert_eq!(overrides.instruction.as_deref(), Some("Be brief."));
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "- thank Sam\n").unwrap();

        assert_eq!(read_input(None, Some(&path)).unwrap(), "- thank Sam\n");
        assert_eq!(read_input(Some("inline".into()), Some(&path)).unwrap(), "inline");
    }
}
