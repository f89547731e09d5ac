//! Prompt template loading and rendering via `minijinja`.
//!
//! Built-in templates are compiled into the binary. A templates directory
//! can override any of them so operators can tune the creature style
//! without recompiling.

use hatchery_types::Rarity;
use minijinja::{Environment, context};

use crate::error::GenerationError;

/// Template names and their compiled-in defaults.
const BUILTIN_TEMPLATES: [(&str, &str); 5] = [
    ("system.j2", include_str!("../templates/system.j2")),
    ("creature.j2", include_str!("../templates/creature.j2")),
    ("creature_image.j2", include_str!("../templates/creature_image.j2")),
    ("evolution_text.j2", include_str!("../templates/evolution_text.j2")),
    ("evolution_image.j2", include_str!("../templates/evolution_image.j2")),
];

/// A rendered chat prompt ready to send to a text backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message.
    pub system: String,
    /// User message.
    pub user: String,
}

/// Manages prompt template loading and rendering.
pub struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    /// An engine using only the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if a built-in template fails to
    /// compile.
    pub fn builtin() -> Result<Self, GenerationError> {
        let mut env = Environment::new();
        for (name, source) in BUILTIN_TEMPLATES {
            add_template(&mut env, name, source.to_owned())?;
        }
        Ok(Self { env })
    }

    /// Built-in templates, with any file of the same name in `dir` taking
    /// precedence.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::Template`] if an override exists but
    /// cannot be read or compiled.
    pub fn with_overrides(dir: &str) -> Result<Self, GenerationError> {
        let mut engine = Self::builtin()?;
        for (name, _) in BUILTIN_TEMPLATES {
            let path = std::path::Path::new(dir).join(name);
            if !path.exists() {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|e| {
                GenerationError::Template(format!("failed to read {}: {e}", path.display()))
            })?;
            add_template(&mut engine.env, name, source)?;
            tracing::debug!(template = name, dir, "prompt template overridden");
        }
        Ok(engine)
    }

    /// Prompt asking for a new creature's name and description.
    pub fn creature_text(&self, rarity: Rarity) -> Result<RenderedPrompt, GenerationError> {
        Ok(RenderedPrompt {
            system: self.render("system.j2", context! {})?,
            user: self.render("creature.j2", context! { rarity => rarity.label() })?,
        })
    }

    /// Image prompt for a new creature.
    pub fn creature_image(
        &self,
        name: &str,
        description: &str,
        rarity: Rarity,
    ) -> Result<String, GenerationError> {
        self.render(
            "creature_image.j2",
            context! { name, description, rarity => rarity.label() },
        )
    }

    /// Prompt asking for an evolution's name, description, and stats.
    pub fn evolution_text(
        &self,
        name: &str,
        rarity: Rarity,
    ) -> Result<RenderedPrompt, GenerationError> {
        Ok(RenderedPrompt {
            system: self.render("system.j2", context! {})?,
            user: self.render(
                "evolution_text.j2",
                context! { name, rarity => rarity.label() },
            )?,
        })
    }

    /// Image prompt for an evolution.
    pub fn evolution_image(
        &self,
        name: &str,
        evolved_name: &str,
        rarity: Rarity,
    ) -> Result<String, GenerationError> {
        self.render(
            "evolution_image.j2",
            context! { name, evolved_name, rarity => rarity.label() },
        )
    }

    fn render(&self, template: &str, ctx: minijinja::Value) -> Result<String, GenerationError> {
        self.env
            .get_template(template)
            .map_err(|e| GenerationError::Template(format!("missing {template}: {e}")))?
            .render(ctx)
            .map(|text| text.trim().to_owned())
            .map_err(|e| GenerationError::Template(format!("{template} render failed: {e}")))
    }
}

fn add_template(
    env: &mut Environment<'static>,
    name: &'static str,
    source: String,
) -> Result<(), GenerationError> {
    env.add_template_owned(name, source)
        .map_err(|e| GenerationError::Template(format!("failed to add {name}: {e}")))
}
