//! Project use-case service.
//!
//! # Responsibility
//! - Provide the four operations the CLI calls: bootstrap, add, list,
//!   fetch by id.
//!
//! # Invariants
//! - A missing project on the by-id fetch is a value (`Ok(None)`), not an
//!   error; only unexpected failures use the error channel.

use crate::model::project::{Project, ProjectId};
use crate::repo::project_repo::{ProjectRepository, RepoError};
use crate::script::loader::SchemaLoader;
use crate::script::ScriptError;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Schema/seed bootstrap failure.
    Script(ScriptError),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Script(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Script(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ScriptError> for ProjectServiceError {
    fn from(value: ScriptError) -> Self {
        Self::Script(value)
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Project service facade over a repository implementation.
pub struct ProjectService<R: ProjectRepository> {
    repo: R,
}

impl<R: ProjectRepository> ProjectService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Drops, recreates and seeds all tables from the embedded scripts.
    pub fn create_and_populate_tables(&mut self) -> Result<(), ProjectServiceError> {
        SchemaLoader::new(&mut self.repo).bootstrap()?;
        Ok(())
    }

    /// Persists a new project and returns it with its assigned id.
    pub fn add_project(&mut self, project: &Project) -> Result<Project, ProjectServiceError> {
        let saved = self.repo.insert_project(project)?;
        info!(
            "event=project_insert module=service status=ok project_id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Lists all projects ordered by name, scalar fields only.
    pub fn fetch_projects(&mut self) -> Result<Vec<Project>, ProjectServiceError> {
        Ok(self.repo.fetch_all_projects()?)
    }

    /// Fetches one fully assembled project, or `None` when the id is unknown.
    pub fn fetch_project_by_id(
        &mut self,
        project_id: ProjectId,
    ) -> Result<Option<Project>, ProjectServiceError> {
        Ok(self.repo.fetch_project_by_id(project_id)?)
    }
}
