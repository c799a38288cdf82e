use std::io;
use std::sync::Arc;

/// An interpreter invariant violation: the term tree being evaluated is
/// malformed, or an acquired capability failed at use time. Every variant
/// names the term it was raised from.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("{term}: {name} is not bound")]
    UnboundName { term: String, name: String },
    #[error("{term}: {name} is {found}, expected a closure")]
    NotAClosure {
        term: String,
        name: String,
        found: String,
    },
    #[error("{term}: {name} is {found}, expected a variant")]
    NotAVariant {
        term: String,
        name: String,
        found: String,
    },
    #[error("{term}: can't find case for variant {tag}")]
    NoMatchingCase { term: String, tag: String },
    #[error("{term}: {primitive}: expected {expected} arg(s), got {found}")]
    Arity {
        term: String,
        primitive: String,
        expected: usize,
        found: usize,
    },
    #[error("{term}: {primitive}: {message}")]
    Primitive {
        term: String,
        primitive: String,
        message: String,
    },
    #[error("{term}: {resource}: {source}")]
    Io {
        term: String,
        resource: String,
        source: Arc<io::Error>,
    },
}

impl RuntimeError {
    /// Identity of the term the violation was raised from.
    pub fn term(&self) -> &str {
        match self {
            RuntimeError::UnboundName { term, .. }
            | RuntimeError::NotAClosure { term, .. }
            | RuntimeError::NotAVariant { term, .. }
            | RuntimeError::NoMatchingCase { term, .. }
            | RuntimeError::Arity { term, .. }
            | RuntimeError::Primitive { term, .. }
            | RuntimeError::Io { term, .. } => term,
        }
    }
}
