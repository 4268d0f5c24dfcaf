//! Detect commands - Tone change and illustration requests.

use anyhow::Result;
use clap::Args;

use letterly_tasks::{DetectImageRequest, DetectToneRequest};

use super::{print_json, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct DetectToneArgs {
    /// The user's message
    #[arg(allow_hyphen_values = true)]
    message: String,

    /// Tones the user can already pick from
    #[arg(long = "tone", value_name = "TONE")]
    existing_tones: Vec<String>,

    #[command(flatten)]
    overrides: OverrideArgs,
}

#[derive(Args)]
pub struct DetectImageArgs {
    /// The user's message
    #[arg(allow_hyphen_values = true)]
    message: String,

    #[command(flatten)]
    overrides: OverrideArgs,
}

pub async fn tone(args: DetectToneArgs, global: &GlobalArgs) -> Result<()> {
    let request = DetectToneRequest {
        message: args.message,
        existing_tones: args.existing_tones,
        overrides: args.overrides.overrides(),
    };
    let result = global.assistant()?.detect_tone(&request).await?;

    if global.json {
        return print_json(&result);
    }
    match &result.tone {
        Some(tone) if result.is_new_tone => println!("{} (new)", tone),
        Some(tone) => println!("{}", tone),
        None => println!("No tone change requested"),
    }
    Ok(())
}

pub async fn image(args: DetectImageArgs, global: &GlobalArgs) -> Result<()> {
    let request = DetectImageRequest {
        message: args.message,
        overrides: args.overrides.overrides(),
    };
    let result = global.assistant()?.detect_image(&request).await?;

    if global.json {
        return print_json(&result);
    }
    match &result.image_subject {
        Some(subject) => println!("{}", subject),
        None => println!("No illustration requested"),
    }
    Ok(())
}
