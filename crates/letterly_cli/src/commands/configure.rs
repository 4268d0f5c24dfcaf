//! Configure command - Store per-agent defaults for a workspace.

use anyhow::Result;
use clap::Args;
use tracing::info;

use letterly_agents::{AgentId, AgentOverrides, AgentRegistry};

use super::{print_json, GlobalArgs, OverrideArgs};

#[derive(Args)]
pub struct ConfigureArgs {
    /// Agent to configure (e.g. generate, detect-tone, SYNC_NOTES)
    agent: AgentId,

    #[command(flatten)]
    overrides: OverrideArgs,

    /// Remove the stored defaults for this agent
    #[arg(long, conflicts_with_all = ["model", "instruction"])]
    reset: bool,
}

pub async fn execute(args: ConfigureArgs, global: &GlobalArgs) -> Result<()> {
    let mut settings = global.load_settings()?;

    let overrides = if args.reset {
        AgentOverrides::default()
    } else {
        let requested = args.overrides.overrides();
        if requested.is_empty() {
            // Nothing to change: show what is stored.
            let current = settings.overrides_for(args.agent);
            if global.json {
                return print_json(&current);
            }
            println!("{}", args.agent);
            println!("   model: {}", current.model.as_deref().unwrap_or("(default)"));
            println!(
                "   instruction: {}",
                current.instruction.as_deref().unwrap_or("(default)")
            );
            return Ok(());
        }
        requested.or(&settings.overrides_for(args.agent))
    };

    // Reject a model the agent cannot use before it is stored.
    AgentRegistry::builtin().resolve(args.agent, &overrides)?;

    settings.set(args.agent, overrides);
    let path = settings.save(&global.workspace)?;
    info!("Saved settings for {} to {}", args.agent, path.display());

    if !global.quiet {
        println!("Updated {} in {}", args.agent, path.display());
    }
    Ok(())
}
