//! Agents command - List the agents and their models.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use letterly_agents::{AgentConfig, AgentRegistry};
use letterly_llm::attempt_sequence;

use super::{print_json, GlobalArgs};

#[derive(Args)]
pub struct AgentsArgs {
    /// Include hidden helper agents
    #[arg(short, long)]
    all: bool,

    /// Show agents as configured for this workspace
    #[arg(long)]
    effective: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AgentSummary<'a> {
    key: &'a str,
    name: &'a str,
    display_name: &'a str,
    kind: &'a str,
    description: &'a str,
    models: Vec<String>,
    hidden: bool,
}

impl<'a> AgentSummary<'a> {
    fn new(agent: &'a AgentConfig) -> Self {
        Self {
            key: agent.id.key(),
            name: agent.id.as_str(),
            display_name: &agent.display_name,
            kind: agent.kind.as_str(),
            description: &agent.description,
            models: attempt_sequence(agent),
            hidden: agent.hidden,
        }
    }
}

pub async fn execute(args: AgentsArgs, global: &GlobalArgs) -> Result<()> {
    let registry = AgentRegistry::builtin();

    let agents: Vec<AgentConfig> = if args.effective {
        let settings = global.load_settings()?;
        registry
            .list_agents(args.all)
            .into_iter()
            .map(|agent| registry.resolve(agent.id, &settings.overrides_for(agent.id)))
            .collect::<Result<_, _>>()?
    } else {
        registry.list_agents(args.all).into_iter().cloned().collect()
    };

    let summaries: Vec<AgentSummary> = agents.iter().map(AgentSummary::new).collect();

    if global.json {
        return print_json(&summaries);
    }

    for summary in &summaries {
        let hidden = if summary.hidden { " (hidden)" } else { "" };
        println!("{} [{}]{}", summary.display_name, summary.name, hidden);
        if !global.quiet {
            println!("   {}", summary.description);
        }
        println!("   {}: {}", summary.kind, summary.models.join(" → "));
    }

    Ok(())
}
