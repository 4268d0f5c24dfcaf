//! Workspace settings holding default per-agent overrides.
//!
//! Settings live in `.letterly/settings.json`:
//!
//! ```json
//! {
//!   "agents": {
//!     "generate": { "model": "openai/gpt-oss-120b", "instruction": "Sign off warmly." }
//!   }
//! }
//! ```
//!
//! They only ever feed [`AgentOverrides`] into a request; the registry's
//! built-in defaults are not touched.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AgentError, AgentResult};
use crate::roles::{AgentId, AgentOverrides};

const SETTINGS_DIR: &str = ".letterly";
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSettings {
    #[serde(default)]
    pub agents: BTreeMap<AgentId, AgentOverrides>,
}

impl AgentSettings {
    /// Path of the settings file under a workspace root.
    pub fn path(workspace_root: &Path) -> PathBuf {
        workspace_root.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Load settings for a workspace. A missing file yields empty settings.
    pub fn load(workspace_root: &Path) -> AgentResult<Self> {
        Self::load_from(&Self::path(workspace_root))
    }

    pub fn load_from(path: &Path) -> AgentResult<Self> {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let settings: AgentSettings = serde_json::from_str(&content).map_err(|e| {
            AgentError::Settings(format!("{}: {}", path.display(), e))
        })?;

        info!(
            "Loaded settings from {} ({} agent overrides)",
            path.display(),
            settings.agents.len()
        );
        Ok(settings)
    }

    /// Write settings under a workspace root, creating the directory if needed.
    pub fn save(&self, workspace_root: &Path) -> AgentResult<PathBuf> {
        let path = Self::path(workspace_root);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        Ok(path)
    }

    /// Default overrides for an agent (empty when none are configured).
    pub fn overrides_for(&self, id: AgentId) -> AgentOverrides {
        self.agents.get(&id).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, id: AgentId, overrides: AgentOverrides) {
        if overrides.is_empty() {
            self.agents.remove(&id);
        } else {
            self.agents.insert(id, overrides);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let settings = AgentSettings::load(dir.path()).unwrap();
        assert!(settings.agents.is_empty());
        assert!(settings.overrides_for(AgentId::Generate).is_empty());
    }

    #[test]
    fn test_load_accepts_either_id_form() {
        let dir = TempDir::new().unwrap();
        let path = AgentSettings::path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"{ "agents": {
                "generate": { "model": "openai/gpt-oss-120b" },
                "DETECT_TONE_REQUEST": { "instruction": "Only reply with a tone." }
            } }"#,
        )
        .unwrap();

        let settings = AgentSettings::load(dir.path()).unwrap();
        assert_eq!(
            settings.overrides_for(AgentId::Generate).model.as_deref(),
            Some("openai/gpt-oss-120b")
        );
        assert_eq!(
            settings.overrides_for(AgentId::DetectTone).instruction.as_deref(),
            Some("Only reply with a tone.")
        );
    }

    #[test]
    fn test_malformed_settings() {
        let dir = TempDir::new().unwrap();
        let path = AgentSettings::path(dir.path());
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "agents": { "haiku": {} } }"#).unwrap();

        let err = AgentSettings::load(dir.path()).unwrap_err();
        assert!(matches!(err, AgentError::Settings(_)));
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut settings = AgentSettings::default();
        settings.set(AgentId::Suggest, AgentOverrides::new().with_model("openai/gpt-oss-20b"));
        settings.set(AgentId::Refine, AgentOverrides::new());

        settings.save(dir.path()).unwrap();
        let loaded = AgentSettings::load(dir.path()).unwrap();

        assert_eq!(loaded, settings);
        assert!(!loaded.agents.contains_key(&AgentId::Refine));
    }
}
