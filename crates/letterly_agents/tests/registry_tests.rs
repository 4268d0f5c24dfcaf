//! Integration tests for the built-in agent catalog and workspace settings.

use letterly_agents::{
    AgentError, AgentId, AgentOverrides, AgentRegistry, AgentSettings, ModelKind,
};

#[test]
fn test_every_agent_is_registered() {
    let registry = AgentRegistry::builtin();
    assert_eq!(registry.len(), AgentId::all().len());

    for id in AgentId::all() {
        let agent = registry.get(id).unwrap();
        assert_eq!(agent.id, id);
        assert!(!agent.primary_model.is_empty());
        assert!(!agent.instruction.is_empty(), "{} has no instruction", id);
    }
}

#[test]
fn test_chat_agents_use_chat_models() {
    let registry = AgentRegistry::builtin();
    for agent in registry.list_agents(true) {
        for model in std::iter::once(&agent.primary_model).chain(&agent.fallback_models) {
            if let Some(descriptor) = registry.find_model(model) {
                assert_eq!(
                    descriptor.kind, agent.kind,
                    "{} lists {} of the wrong kind",
                    agent.id, model
                );
            }
        }
    }
}

#[test]
fn test_hidden_agents_are_listed_on_request() {
    let registry = AgentRegistry::builtin();
    let visible = registry.list_agents(false);
    let all = registry.list_agents(true);

    assert!(visible.len() < all.len());
    assert!(visible.iter().all(|a| !a.hidden));
    assert!(all.iter().any(|a| a.id == AgentId::DetectTone));
}

#[test]
fn test_resolve_never_changes_the_registry() {
    let registry = AgentRegistry::builtin();
    let before = registry.get(AgentId::Refine).unwrap().clone();

    let custom = registry
        .resolve(
            AgentId::Refine,
            &AgentOverrides::new()
                .with_model("openai/gpt-oss-20b")
                .with_instruction("Only fix typos."),
        )
        .unwrap();

    assert_eq!(custom.primary_model, "openai/gpt-oss-20b");
    assert_eq!(custom.instruction, "Only fix typos.");
    assert_eq!(custom.fallback_models, before.fallback_models);
    assert_eq!(registry.get(AgentId::Refine).unwrap(), &before);
}

#[test]
fn test_resolve_rejects_embedding_model_for_chat_agent() {
    let err = AgentRegistry::builtin()
        .resolve(
            AgentId::Generate,
            &AgentOverrides::new().with_model("openai/text-embedding-3-small"),
        )
        .unwrap_err();

    match err {
        AgentError::IncompatibleModel {
            expected, actual, ..
        } => {
            assert_eq!(expected, ModelKind::Chat);
            assert_eq!(actual, ModelKind::Embedding);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_lookup_by_wire_key_and_name() {
    let registry = AgentRegistry::builtin();
    assert_eq!(
        registry.get_by_name("DETECT_IMAGE_REQUEST").unwrap().id,
        AgentId::DetectImage
    );
    assert_eq!(
        registry.get_by_name("recommend-length").unwrap().id,
        AgentId::RecommendLength
    );
    assert!(matches!(
        registry.get_by_name("translator"),
        Err(AgentError::UnknownAgent(_))
    ));
}

#[test]
fn test_settings_feed_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let mut settings = AgentSettings::default();
    settings.set(
        AgentId::SyncNotes,
        AgentOverrides::new().with_instruction("List at most two points."),
    );
    settings.save(dir.path()).unwrap();

    let loaded = AgentSettings::load(dir.path()).unwrap();
    let agent = AgentRegistry::builtin()
        .resolve(AgentId::SyncNotes, &loaded.overrides_for(AgentId::SyncNotes))
        .unwrap();

    assert_eq!(agent.instruction, "List at most two points.");
    assert_eq!(
        agent.primary_model,
        AgentRegistry::builtin()
            .get(AgentId::SyncNotes)
            .unwrap()
            .primary_model
    );
}
