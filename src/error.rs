use std::num::ParseIntError;

use thiserror::Error;

/// The text was not one of the accepted boolean literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("parsing {value:?}: invalid syntax")]
pub struct ParseBoolError {
    pub value: String,
}

/// Why a present annotation value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidValue {
    #[error(transparent)]
    Bool(#[from] ParseBoolError),

    #[error("parsing {value:?}: {source}")]
    Int {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("{kind} {namespace}/{name} '{key}' contains invalid {expected}: {cause}, ignoring")]
    Malformed {
        kind: String,
        namespace: String,
        name: String,
        key: String,
        expected: &'static str,
        #[source]
        cause: InvalidValue,
    },
}

impl AnnotationError {
    pub fn key(&self) -> &str {
        match self {
            AnnotationError::Malformed { key, .. } => key,
        }
    }
}
