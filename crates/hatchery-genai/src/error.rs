//! Error types for the generation client.
//!
//! Uses `thiserror` for typed errors that surface through the generation
//! pipeline: prompt rendering, HTTP calls, response parsing.

/// Errors that can occur while generating creature content.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// A backend returned an error status or was unreachable.
    #[error("generation backend error: {0}")]
    Backend(String),

    /// The text model's reply was not the required JSON object.
    ///
    /// Carries the raw reply so the failure can be diagnosed.
    #[error("could not parse generated text ({reason}); raw response: {raw}")]
    MalformedText {
        /// The unparsed model output.
        raw: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A backend response had an unexpected shape.
    #[error("malformed generation response: {0}")]
    Malformed(String),

    /// Failed to load or render a prompt template.
    #[error("template error: {0}")]
    Template(String),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),
}
