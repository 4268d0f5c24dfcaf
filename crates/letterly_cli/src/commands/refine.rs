//! Refine command - Update rough notes from feedback.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use letterly_tasks::{ConversationTurn, RefineRequest};

use super::{print_json, read_input, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct RefineArgs {
    /// Feedback to apply to the notes
    #[arg(allow_hyphen_values = true)]
    pub feedback: String,

    /// Current rough notes (read from --notes-file or stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    pub notes: Option<String>,

    /// File holding the rough notes
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// JSON file with earlier turns: [{"role": "user", "text": "..."}]
    #[arg(long)]
    history: Option<PathBuf>,

    /// Tone currently selected
    #[arg(long)]
    current_tone: Option<String>,

    /// Tones the user can already pick from
    #[arg(long = "tone", value_name = "TONE")]
    existing_tones: Vec<String>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn execute(args: RefineArgs, global: &GlobalArgs) -> Result<()> {
    let rough_notes = read_input(args.notes, args.notes_file.as_deref())?;

    let conversation_history: Vec<ConversationTurn> = match &args.history {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Invalid conversation history in {}", path.display()))?
        }
        None => Vec::new(),
    };

    let request = RefineRequest {
        rough_notes,
        instructions: args.feedback,
        conversation_history,
        current_tone: args.current_tone,
        existing_tones: args.existing_tones,
        overrides: args.overrides.overrides(),
    };

    let refined = global.assistant()?.refine(&request).await?;

    if global.json {
        return print_json(&refined);
    }

    println!("{}", refined.text);
    if let Some(tone) = &refined.detected_tone {
        eprintln!("Tone change requested: {}", tone);
    }
    if !global.quiet {
        eprintln!("(model: {})", refined.used_model);
    }
    Ok(())
}
