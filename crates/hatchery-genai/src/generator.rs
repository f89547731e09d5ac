//! The generation client contract and its HTTP implementation.

use core::future::Future;

use chrono::Utc;
use hatchery_economy::roll_rarity;
use hatchery_types::{Creature, CreatureId, CreatureStatus, EvolutionText, ImagePayload, Rarity};
use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::image::ImageBackend;
use crate::llm::{TextBackend, build_http_client, create_text_backend};
use crate::parse::{creature_schema, evolution_schema, parse_creature_sketch, parse_evolution_text};
use crate::prompt::PromptEngine;

/// Source of all creative content.
///
/// Futures are `Send` so workflows can be driven from Axum handlers.
pub trait CreatureGenerator: Send + Sync + 'static {
    /// Synthesize a brand new creature: fresh identity, name, rarity,
    /// description, artwork, `created_at = now`, status owned.
    fn generate_creature(&self) -> impl Future<Output = Result<Creature, GenerationError>> + Send;

    /// Text for an evolution of the named creature: exactly a name, a
    /// description, and a stats summary.
    fn generate_evolution_text(
        &self,
        creature_name: &str,
        rarity: Rarity,
    ) -> impl Future<Output = Result<EvolutionText, GenerationError>> + Send;

    /// One square image of the evolved form.
    fn generate_evolution_image(
        &self,
        creature_name: &str,
        evolved_name: &str,
        rarity: Rarity,
    ) -> impl Future<Output = Result<ImagePayload, GenerationError>> + Send;
}

/// [`CreatureGenerator`] backed by remote text and image APIs.
pub struct HttpGenerator {
    text: TextBackend,
    image: ImageBackend,
    prompts: PromptEngine,
}

impl HttpGenerator {
    /// Assemble a generator from already-built parts.
    pub const fn new(text: TextBackend, image: ImageBackend, prompts: PromptEngine) -> Self {
        Self {
            text,
            image,
            prompts,
        }
    }

    /// Build the HTTP client, backends, and prompt engine from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Config`] if the HTTP client cannot be
    /// built, or [`GenerationError::Template`] if a template override is
    /// unreadable or invalid.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, GenerationError> {
        let client = build_http_client(config.request_timeout)?;
        let text = create_text_backend(client.clone(), &config.text);
        let image = ImageBackend::new(client, &config.image);
        let prompts = match &config.templates_dir {
            Some(dir) => PromptEngine::with_overrides(dir)?,
            None => PromptEngine::builtin()?,
        };
        Ok(Self::new(text, image, prompts))
    }

    /// Name of the text backend, for logging.
    pub const fn text_backend_name(&self) -> &str {
        self.text.name()
    }
}

impl CreatureGenerator for HttpGenerator {
    async fn generate_creature(&self) -> Result<Creature, GenerationError> {
        let rarity = roll_rarity(&mut rand::rng());
        let prompt = self.prompts.creature_text(rarity)?;
        let raw = self
            .text
            .complete_json(&prompt, "creature", &creature_schema())
            .await?;
        let sketch = parse_creature_sketch(&raw)?;
        debug!(creature = %sketch.name, %rarity, "creature text generated");

        let image_prompt =
            self.prompts
                .creature_image(&sketch.name, &sketch.description, rarity)?;
        let image = self.image.generate(&image_prompt).await?;

        Ok(Creature {
            id: CreatureId::new(),
            name: sketch.name,
            rarity,
            status: CreatureStatus::Owned,
            description: sketch.description,
            image,
            created_at: Utc::now(),
            evolution: None,
        })
    }

    async fn generate_evolution_text(
        &self,
        creature_name: &str,
        rarity: Rarity,
    ) -> Result<EvolutionText, GenerationError> {
        let prompt = self.prompts.evolution_text(creature_name, rarity)?;
        let raw = self
            .text
            .complete_json(&prompt, "evolution", &evolution_schema())
            .await?;
        parse_evolution_text(&raw)
    }

    async fn generate_evolution_image(
        &self,
        creature_name: &str,
        evolved_name: &str,
        rarity: Rarity,
    ) -> Result<ImagePayload, GenerationError> {
        let prompt = self
            .prompts
            .evolution_image(creature_name, evolved_name, rarity)?;
        self.image.generate(&prompt).await
    }
}
