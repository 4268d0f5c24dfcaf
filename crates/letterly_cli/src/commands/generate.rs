//! Generate command - Write a letter from rough notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use letterly_tasks::{GenerateRequest, LetterLength};

use super::{print_json, read_input, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct GenerateArgs {
    /// Rough notes (read from --notes-file or stdin when omitted)
    #[arg(long, allow_hyphen_values = true)]
    pub notes: Option<String>,

    /// File holding the rough notes
    #[arg(long)]
    notes_file: Option<PathBuf>,

    /// Who the letter is for
    #[arg(long)]
    to: Option<String>,

    /// Who the letter is from
    #[arg(long)]
    from: Option<String>,

    /// Tone of the letter
    #[arg(long, default_value = "Professional")]
    tone: String,

    /// Letter length (Short, Medium, Long)
    #[arg(long, default_value = "Medium")]
    length: LetterLength,

    /// Output language
    #[arg(long)]
    language: Option<String>,

    /// A sample of writing to imitate
    #[arg(long)]
    style_example: Option<String>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn execute(args: GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let notes = read_input(args.notes, args.notes_file.as_deref())?;

    let mut request = GenerateRequest::new(notes)
        .tone(args.tone)
        .length(args.length)
        .overrides(args.overrides.overrides());
    request.recipient = args.to;
    request.sender = args.from;
    request.language = args.language;
    request.style_example = args.style_example;

    let letter = global.assistant()?.generate(&request).await?;

    if global.json {
        return print_json(&letter);
    }

    println!("{}", letter.text);
    if let Some(subject) = &letter.image_subject {
        eprintln!("Illustration requested: {}", subject);
    }
    if !global.quiet {
        eprintln!("(model: {})", letter.used_model);
    }
    Ok(())
}
