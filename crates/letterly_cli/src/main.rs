//! Letterly CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid input or arguments
//! - 3: LLM not configured
//! - 4: Every model failed
//! - 5: Provider rejected the request

use std::process::ExitCode;

use clap::Parser;
use letterly_agents::AgentError;
use letterly_llm::InvokeError;
use letterly_tasks::TaskError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_INPUT: u8 = 2;
    pub const NOT_CONFIGURED: u8 = 3;
    pub const MODELS_EXHAUSTED: u8 = 4;
    pub const PROVIDER_ERROR: u8 = 5;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let global = cli.global.clone();
    let result = match cli.command {
        Commands::Agents(args) => commands::agents::execute(args, &global).await,
        Commands::Models(args) => commands::models::execute(args, &global).await,
        Commands::Configure(args) => commands::configure::execute(args, &global).await,
        Commands::Generate(args) => commands::generate::execute(args, &global).await,
        Commands::Refine(args) => commands::refine::execute(args, &global).await,
        Commands::Suggest(args) => commands::suggest::execute(args, &global).await,
        Commands::RecommendLength(args) => {
            commands::recommend_length::execute(args, &global).await
        }
        Commands::SyncNotes(args) => commands::sync_notes::execute(args, &global).await,
        Commands::DetectTone(args) => commands::detect::tone(args, &global).await,
        Commands::DetectImage(args) => commands::detect::image(args, &global).await,
        Commands::MatchSuggestions(args) => {
            commands::match_suggestions::execute(args, &global).await
        }
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_logging(cli: &Cli) {
    let default_directives = if cli.global.verbose {
        "letterly=debug,warn"
    } else if cli.global.quiet {
        "error"
    } else {
        "letterly=info,warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let (plain, json) = if cli.global.log_json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (
            Some(fmt::layer().with_target(false).with_writer(std::io::stderr)),
            None,
        )
    };

    // Ignore a subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .try_init();
}

fn invoke_exit_code(e: &InvokeError) -> u8 {
    match e {
        InvokeError::NotConfigured => ExitCodes::NOT_CONFIGURED,
        InvokeError::AllModelsExhausted { .. } | InvokeError::NoModelsAvailable(_) => {
            ExitCodes::MODELS_EXHAUSTED
        }
        InvokeError::Provider(_) => ExitCodes::PROVIDER_ERROR,
        InvokeError::Agent(_)
        | InvokeError::IncompatibleAgentKind { .. }
        | InvokeError::InvalidRequest(_) => ExitCodes::INVALID_INPUT,
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if let Some(task) = e.downcast_ref::<TaskError>() {
        return match task {
            TaskError::InvalidInput(_) | TaskError::Agent(_) => ExitCodes::INVALID_INPUT,
            TaskError::Invoke(inner) => invoke_exit_code(inner),
        };
    }
    if let Some(invoke) = e.downcast_ref::<InvokeError>() {
        return invoke_exit_code(invoke);
    }
    if let Some(agent) = e.downcast_ref::<AgentError>() {
        return match agent {
            AgentError::Io(_) => ExitCodes::GENERAL_ERROR,
            _ => ExitCodes::INVALID_INPUT,
        };
    }
    ExitCodes::GENERAL_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use letterly_llm::ProviderError;

    #[test]
    fn test_exit_codes_follow_error_kind() {
        let not_configured = anyhow::Error::new(TaskError::Invoke(InvokeError::NotConfigured));
        assert_eq!(categorize_error(&not_configured), ExitCodes::NOT_CONFIGURED);

        let exhausted = anyhow::Error::new(InvokeError::AllModelsExhausted {
            attempted: vec!["m1".into(), "m2".into()],
            last: ProviderError::from_status("m2", 503, "unavailable"),
        });
        assert_eq!(categorize_error(&exhausted), ExitCodes::MODELS_EXHAUSTED);

        let invalid = anyhow::Error::new(TaskError::invalid_input("Rough notes are required"));
        assert_eq!(categorize_error(&invalid), ExitCodes::INVALID_INPUT);

        let other = anyhow::anyhow!("disk full");
        assert_eq!(categorize_error(&other), ExitCodes::GENERAL_ERROR);
    }
}
