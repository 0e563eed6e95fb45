//! Umbrella error for a generator run.
//!
//! Nothing is recovered internally: the first error aborts the run.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::ReferenceError;
use crate::render::SerializeError;
use crate::validation::{ParseError, ValidationError};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid blueprint: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error("container {} already exists", .0.display())]
    Collision(PathBuf),

    #[error("failed to serialize {document}: {source}")]
    Serialize {
        document: String,
        #[source]
        source: SerializeError,
    },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
