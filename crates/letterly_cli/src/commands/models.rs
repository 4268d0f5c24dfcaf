//! Models command - List the model catalog.

use anyhow::Result;
use clap::Args;

use letterly_agents::{AgentRegistry, ModelDescriptor, ModelKind};

use super::{print_json, GlobalArgs};

#[derive(Args)]
pub struct ModelsArgs {
    /// Only list models of this kind (chat, embedding, image)
    #[arg(short, long)]
    kind: Option<ModelKind>,

    /// Only list free-tier models
    #[arg(long)]
    free: bool,
}

pub async fn execute(args: ModelsArgs, global: &GlobalArgs) -> Result<()> {
    let registry = AgentRegistry::builtin();
    let kinds = match args.kind {
        Some(kind) => vec![kind],
        None => ModelKind::all(),
    };

    let models: Vec<&ModelDescriptor> = kinds
        .into_iter()
        .flat_map(|kind| registry.list_models(kind))
        .filter(|model| !args.free || model.is_free())
        .collect();

    if global.json {
        return print_json(&models);
    }

    for model in models {
        println!("{:<48} {:<10} {}", model.id, model.kind.as_str(), model.display_name);
    }
    Ok(())
}
