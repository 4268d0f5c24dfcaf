//! Match-suggestions command - Find the review suggestions a chat message addresses.

use anyhow::Result;
use clap::Args;

use letterly_tasks::MatchSuggestionsRequest;

use super::{print_json, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct MatchSuggestionsArgs {
    /// The chat message
    #[arg(allow_hyphen_values = true)]
    pub message: String,

    /// A review suggestion (repeat for each one, in order)
    #[arg(long = "suggestion", value_name = "TEXT", allow_hyphen_values = true)]
    pub suggestions: Vec<String>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn execute(args: MatchSuggestionsArgs, global: &GlobalArgs) -> Result<()> {
    let request = MatchSuggestionsRequest {
        chat_input: args.message,
        suggestions: args.suggestions,
        overrides: args.overrides.overrides(),
    };
    let result = global.assistant()?.match_suggestions(&request).await?;

    if global.json {
        return print_json(&result);
    }
    if result.matched_suggestions.is_empty() {
        println!("No matching suggestions");
    }
    for matched in &result.matched_suggestions {
        println!(
            "{:.2}  {}",
            matched.score, request.suggestions[matched.index]
        );
    }
    Ok(())
}
