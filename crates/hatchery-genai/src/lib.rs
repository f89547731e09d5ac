//! Generative-AI client for the Hatchery collection game.
//!
//! Produces new creatures and evolutions from remote text and image
//! models. The controller depends only on the [`CreatureGenerator`]
//! contract.
//!
//! # Architecture
//!
//! ```text
//! PromptEngine --> TextBackend (JSON schema) --> parse --> ImageBackend
//! ```
//!
//! The text model never chooses the rarity: it is rolled locally and handed
//! to the prompt, so every creature lands on one of the eight tiers.

pub mod config;
pub mod error;
pub mod generator;
pub mod image;
pub mod llm;
pub mod parse;
pub mod prompt;

// Re-export primary types for convenience.
pub use config::{BackendType, GeneratorConfig, ImageBackendConfig, TextBackendConfig};
pub use error::GenerationError;
pub use generator::{CreatureGenerator, HttpGenerator};
pub use image::ImageBackend;
pub use llm::{TextBackend, build_http_client, create_text_backend};
pub use parse::{CreatureSketch, parse_creature_sketch, parse_evolution_text};
pub use prompt::{PromptEngine, RenderedPrompt};
