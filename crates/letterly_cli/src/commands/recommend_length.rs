//! Recommend-length command - Recommend Short, Medium or Long.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use letterly_agents::AgentOverrides;
use letterly_tasks::RecommendLengthRequest;

use super::{print_json, read_input, GlobalArgs};

#[derive(Args)]
pub struct RecommendLengthArgs {
    /// Rough notes (read from --notes-file or stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    notes: Option<String>,

    /// File holding the rough notes
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// Replace the agent's system instruction
    #[arg(short, long)]
    instruction: Option<String>,
}

pub async fn execute(args: RecommendLengthArgs, global: &GlobalArgs) -> Result<()> {
    let request = RecommendLengthRequest {
        rough_notes: read_input(args.notes, args.notes_file.as_deref())?,
        overrides: AgentOverrides::from_parts(None, args.instruction),
    };

    let result = global.assistant()?.recommend_length(&request).await?;

    if global.json {
        return print_json(&result);
    }
    println!("{}", result.recommendation);
    Ok(())
}
