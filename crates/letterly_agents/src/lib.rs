//! # letterly_agents
//!
//! Agent registry for the Letterly writing assistant.
//!
//! Every task the assistant performs (drafting a letter, refining notes,
//! proposing suggestions, ...) is owned by an *agent*: a named role with a
//! default model, an ordered fallback chain and a default instruction.
//!
//! ## Overview
//!
//! - [`ModelDescriptor`] / [`MODELS`]: the catalog of known models, grouped by
//!   [`ModelKind`]. Used to present compatible choices, never during invocation.
//! - [`AgentConfig`]: one immutable configuration per [`AgentId`].
//! - [`AgentRegistry`]: read-only lookup plus the copy-and-override
//!   [`AgentRegistry::resolve`] used for per-request customization.
//! - [`AgentSettings`]: optional `.letterly/settings.json` holding default
//!   per-agent overrides.
//!
//! The built-in registry is created once per process and shared freely:
//!
//! ```rust
//! use letterly_agents::{AgentId, AgentOverrides, AgentRegistry};
//!
//! let registry = AgentRegistry::builtin();
//! let custom = registry
//!     .resolve(AgentId::Generate, &AgentOverrides::new().with_instruction("Sign off with Cheerio!"))
//!     .unwrap();
//!
//! assert_eq!(custom.instruction, "Sign off with Cheerio!");
//! assert_ne!(registry.get(AgentId::Generate).unwrap().instruction, custom.instruction);
//! ```

pub mod catalog;
pub mod error;
pub mod instructions;
pub mod registry;
pub mod roles;
pub mod settings;

pub use catalog::{ModelDescriptor, ModelKind, MODELS};
pub use error::{AgentError, AgentResult};
pub use registry::AgentRegistry;
pub use roles::{AgentConfig, AgentId, AgentOverrides};
pub use settings::AgentSettings;
