//! Suggest command - Suggest improvements to notes and draft.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use letterly_tasks::{LetterLength, SuggestRequest};

use super::{print_json, read_input, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct SuggestArgs {
    /// Rough notes (read from --notes-file or stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    pub notes: Option<String>,

    /// File holding the rough notes
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// File holding the current draft letter
    #[arg(long)]
    draft: Option<PathBuf>,

    /// What the letter is for
    #[arg(long)]
    context: Option<String>,

    #[arg(long)]
    to: Option<String>,

    #[arg(long)]
    tone: Option<String>,

    #[arg(long)]
    length: Option<LetterLength>,

    #[arg(long)]
    style_example: Option<String>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn execute(args: SuggestArgs, global: &GlobalArgs) -> Result<()> {
    let rough_notes = read_input(args.notes, args.notes_file.as_deref())?;
    let generated_letter = match &args.draft {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => None,
    };

    let request = SuggestRequest {
        rough_notes,
        context: args.context,
        recipient: args.to,
        generated_letter,
        tone: args.tone,
        length: args.length,
        style_example: args.style_example,
        overrides: args.overrides.overrides(),
    };

    let result = global.assistant()?.suggest(&request).await?;

    if global.json {
        return print_json(&result);
    }

    if result.suggestions.is_empty() && !global.quiet {
        eprintln!("No suggestions.");
    }
    for suggestion in &result.suggestions {
        println!("- {}", suggestion);
    }
    Ok(())
}
