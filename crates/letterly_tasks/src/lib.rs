//! # letterly_tasks
//!
//! Task handlers for the Letterly writing assistant.
//!
//! Each handler turns a typed request (rough notes, tone, feedback, ...)
//! into a `[system, user]` message pair for one agent, runs it through the
//! [`FallbackInvoker`](letterly_llm::FallbackInvoker) and interprets the text
//! that comes back.
//!
//! | Task | Agent | Output |
//! |------|-------|--------|
//! | [`LetterAssistant::generate`] | `GENERATE` | Letter text |
//! | [`LetterAssistant::refine`] | `REFINE` | Updated rough notes (+ detected tone) |
//! | [`LetterAssistant::suggest`] | `SUGGEST` | Up to a few improvement suggestions |
//! | [`LetterAssistant::recommend_length`] | `RECOMMEND_LENGTH` | Short / Medium / Long |
//! | [`LetterAssistant::sync_notes`] | `SYNC_NOTES` | New note points found in an edited letter |
//! | [`LetterAssistant::detect_tone`] | `DETECT_TONE_REQUEST` | Requested tone, if any |
//! | [`LetterAssistant::detect_image`] | `DETECT_IMAGE_REQUEST` | Image subject, if any |
//! | [`LetterAssistant::match_suggestions`] | `MATCH_SUGGESTIONS` | Suggestions a chat message addresses |

pub mod assistant;
pub mod error;
pub mod parse;
pub mod prompts;
pub mod requests;

pub use assistant::LetterAssistant;
pub use error::{TaskError, TaskResult};
pub use requests::*;
