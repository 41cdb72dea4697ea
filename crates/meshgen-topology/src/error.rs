//! Topology compiler error types.

use meshgen_core::DocumentError;
use thiserror::Error;

/// Result type alias for topology compilation.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors that abort a compilation. There is no partial output: the
/// first error ends the run.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("no candidate distant partner for cache group '{group}': {reason}")]
    NoCandidate { group: String, reason: &'static str },

    #[error("cache group '{0}' not in distant partner map")]
    MissingPartner(String),

    #[error("no edge servers in cache group '{0}'")]
    EmptyGroup(String),

    #[error("health port must be non-zero")]
    InvalidHealthPort,

    #[error("generating {context} rule for '{target}': {source}")]
    Rule {
        target: String,
        context: &'static str,
        source: Box<TopologyError>,
    },
}

impl TopologyError {
    pub(crate) fn no_candidate(group: &str, reason: &'static str) -> Self {
        TopologyError::NoCandidate {
            group: group.to_string(),
            reason,
        }
    }

    pub(crate) fn rule(target: &str, context: &'static str, source: TopologyError) -> Self {
        TopologyError::Rule {
            target: target.to_string(),
            context,
            source: Box::new(source),
        }
    }
}
