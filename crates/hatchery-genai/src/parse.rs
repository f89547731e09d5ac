//! Strict parsing of text-model replies.
//!
//! The text model is asked for a JSON object with a fixed set of required
//! string fields. Replies are accepted either as bare JSON or wrapped in a
//! markdown code block; anything else, including missing, extra, non-string,
//! or blank fields, is a [`GenerationError::MalformedText`] carrying the raw
//! reply.

use hatchery_types::EvolutionText;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::GenerationError;

/// Name and description for a freshly generated creature.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatureSketch {
    /// Creature name.
    pub name: String,
    /// Flavour text.
    pub description: String,
}

/// Wire shape of an evolution reply.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEvolution {
    name: String,
    description: String,
    stats: String,
}

/// JSON schema for [`CreatureSketch`] replies.
pub fn creature_schema() -> serde_json::Value {
    string_object_schema(&["name", "description"])
}

/// JSON schema for evolution replies: exactly `name`, `description`, `stats`.
pub fn evolution_schema() -> serde_json::Value {
    string_object_schema(&["name", "description", "stats"])
}

/// Parse an evolution reply into [`EvolutionText`].
pub fn parse_evolution_text(raw: &str) -> Result<EvolutionText, GenerationError> {
    let parsed: RawEvolution = parse_strict(raw)?;
    require_non_blank(raw, &[
        ("name", parsed.name.as_str()),
        ("description", parsed.description.as_str()),
        ("stats", parsed.stats.as_str()),
    ])?;
    Ok(EvolutionText {
        name: parsed.name.trim().to_owned(),
        description: parsed.description.trim().to_owned(),
        stats: parsed.stats.trim().to_owned(),
    })
}

/// Parse a creature reply into a [`CreatureSketch`].
pub fn parse_creature_sketch(raw: &str) -> Result<CreatureSketch, GenerationError> {
    let parsed: CreatureSketch = parse_strict(raw)?;
    require_non_blank(raw, &[
        ("name", parsed.name.as_str()),
        ("description", parsed.description.as_str()),
    ])?;
    Ok(CreatureSketch {
        name: parsed.name.trim().to_owned(),
        description: parsed.description.trim().to_owned(),
    })
}

/// Try a direct parse, then a parse of the first fenced code block.
fn parse_strict<T: DeserializeOwned>(raw: &str) -> Result<T, GenerationError> {
    let trimmed = raw.trim();

    let direct_err = match serde_json::from_str::<T>(trimmed) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => e,
    };

    if let Some(inner) = extract_json_from_codeblock(trimmed)
        && let Ok(parsed) = serde_json::from_str::<T>(inner)
    {
        return Ok(parsed);
    }

    Err(GenerationError::MalformedText {
        raw: raw.to_owned(),
        reason: direct_err.to_string(),
    })
}

fn require_non_blank(raw: &str, fields: &[(&str, &str)]) -> Result<(), GenerationError> {
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(GenerationError::MalformedText {
            raw: raw.to_owned(),
            reason: format!("field `{field}` is blank"),
        });
    }
    Ok(())
}

/// Extract the body of a ```` ```json ```` (or bare ```` ``` ````) block.
fn extract_json_from_codeblock(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = text.get(start.checked_add(3)?..)?;
    let body_start = after_fence.find('\n').map_or(0, |i| i.saturating_add(1));
    let body = after_fence.get(body_start..)?;
    let end = body.find("```")?;
    body.get(..end).map(str::trim)
}

fn string_object_schema(fields: &[&str]) -> serde_json::Value {
    let properties: serde_json::Map<String, serde_json::Value> = fields
        .iter()
        .map(|f| ((*f).to_owned(), serde_json::json!({ "type": "string" })))
        .collect();
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": fields,
        "additionalProperties": false
    })
}
