//! SQL script loading pipeline.
//!
//! # Responsibility
//! - Split raw script text into discrete executable statements.
//! - Resolve named schema/seed resources and submit them as batches.
//!
//! # Invariants
//! - Statement splitting never validates SQL; it only finds boundaries.
//! - A resource is either applied as one whole batch or not at all.

use crate::repo::project_repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod loader;
pub mod splitter;

pub type ScriptResult<T> = Result<T, ScriptError>;

/// Error raised while locating or applying a script resource.
#[derive(Debug)]
pub enum ScriptError {
    /// No script resource is registered under the requested name.
    ResourceNotFound { name: String },
    /// Batch execution failed; the repository has already rolled back.
    Repo(RepoError),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ResourceNotFound { name } => {
                write!(f, "script resource not found: `{name}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ResourceNotFound { .. } => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ScriptError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}
