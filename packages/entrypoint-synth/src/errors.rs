//! Error types for entrypoint-synth
//!
//! Fatal conditions abort synthesis and surface as [`SynthesisError`].
//! Recoverable ones (unresolvable handler, placeholder values, returns that
//! cannot reach the sink) never become errors; they are reported as
//! `SynthesisWarning`s on the outcome.

use std::fmt;
use thiserror::Error;

use crate::config::ConfigError;
use crate::features::symbol_resolution::ResolveError;

/// Error kinds, stable across message changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed method descriptor or type name
    Parse,
    /// Class or method not found in the symbol table
    UnresolvedSymbol,
    /// Source/sink method has the wrong shape
    TypeMismatch,
    /// Invalid configuration
    Config,
    /// Host loader failure (I/O, malformed class model)
    Loader,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::UnresolvedSymbol => "unresolved_symbol",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::Config => "config",
            ErrorKind::Loader => "loader",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Malformed descriptor or type text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{input}': {reason}")]
pub struct ParseError {
    pub input: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Which configured endpoint failed the shape check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Sink,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "taint source"),
            Endpoint::Sink => write!(f, "sink"),
        }
    }
}

/// Main error type for synthesis
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// Malformed descriptor; no method identity to reason about
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Symbol resolution failed where it cannot be skipped
    #[error("Resolution error: {0}")]
    Resolve(#[from] ResolveError),

    /// Source does not return a string, or sink takes no string
    #[error("Type mismatch for {endpoint} {descriptor}: {detail}")]
    TypeMismatch {
        endpoint: Endpoint,
        descriptor: String,
        detail: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SynthesisError {
    pub fn type_mismatch(
        endpoint: Endpoint,
        descriptor: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        SynthesisError::TypeMismatch {
            endpoint,
            descriptor: descriptor.into(),
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SynthesisError::Parse(_) => ErrorKind::Parse,
            SynthesisError::Resolve(err) => err.kind(),
            SynthesisError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            SynthesisError::Config(_) => ErrorKind::Config,
        }
    }
}

/// Result type alias for synthesis operations
pub type Result<T> = std::result::Result<T, SynthesisError>;
