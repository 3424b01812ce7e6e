//! Error types for the library API.

use thiserror::Error;

/// Caller supplied empty or out-of-range required fields.
///
/// These are surfaced before any external call is made and are never
/// retried.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A required text field (role, audience, intent, initial input) is empty.
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// A chain was submitted without any steps.
    #[error("a chain needs at least one step")]
    NoSteps,

    /// A chain step has an empty template. Steps are numbered from 1.
    #[error("step {0} has an empty template")]
    EmptyStepTemplate(usize),

    /// Temperature is outside the [0.0, 1.0] range.
    #[error("temperature must be within 0.0..=1.0 (got {0})")]
    TemperatureOutOfRange(f32),

    /// max_tokens must be strictly positive.
    #[error("max_tokens must be greater than zero")]
    ZeroMaxTokens,
}

/// A template references an unrecognized placeholder or is not a
/// well-formed pattern. The template has to be fixed by whoever edits it.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TemplateError {
    /// A brace-delimited token outside the recognized field set.
    #[error("unknown placeholder '{{{0}}}' (recognized: role, audience, tone, intent)")]
    UnknownPlaceholder(String),

    /// The pattern itself cannot be interpreted (stray braces, empty token).
    #[error("malformed template: {0}")]
    Malformed(String),
}

/// Anything the renderer can fail with.
#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// The model client reported an internal failure.
///
/// The chain executor never propagates this as an error: it is converted
/// to an error-text response so a run always completes with a full trace.
#[derive(Error, Debug)]
pub enum ModelCallError {
    /// The underlying LLM backend returned an error.
    #[error("{0}")]
    Backend(String),

    /// The client was assembled from an invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Errors from the history (log) store.
///
/// Always recoverable at the boundary: a failed append or update must never
/// discard an already-computed run result.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store directory layout could not be created.
    #[error("failed to initialize store: {0}")]
    Init(String),

    /// No log entry exists under the given key.
    #[error("log entry '{0}' not found")]
    NotFound(String),

    /// An underlying file I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to serialize or deserialize an entry.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
