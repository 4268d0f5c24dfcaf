//! Sync-notes command - Find points added while editing the letter.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use letterly_tasks::SyncNotesRequest;

use super::{print_json, read_input, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct SyncNotesArgs {
    /// File holding the edited letter
    letter: PathBuf,

    /// Current rough notes (read from --notes-file or stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    notes: Option<String>,

    /// File holding the rough notes
    #[arg(long)]
    notes_file: Option<PathBuf>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn execute(args: SyncNotesArgs, global: &GlobalArgs) -> Result<()> {
    let edited_letter = std::fs::read_to_string(&args.letter)
        .with_context(|| format!("Failed to read {}", args.letter.display()))?;

    let request = SyncNotesRequest {
        edited_letter,
        rough_notes: read_input(args.notes, args.notes_file.as_deref())?,
        overrides: args.overrides.overrides(),
    };

    let result = global.assistant()?.sync_notes(&request).await?;

    if global.json {
        return print_json(&result);
    }
    for point in &result.new_points {
        println!("- {}", point);
    }
    Ok(())
}
