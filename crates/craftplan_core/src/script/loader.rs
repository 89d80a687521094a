//! Schema/seed bootstrap loader.
//!
//! # Responsibility
//! - Load the schema script, then the seed script, each as one batch.
//! - Fail fast on a missing resource or a failed batch.
//!
//! # Invariants
//! - Resource order is fixed: schema before seed data.
//! - A failed batch leaves nothing applied; the repository rolls back.

use super::catalog::{resource_text, SCHEMA_RESOURCE, SEED_RESOURCE};
use super::splitter::split_statements;
use super::ScriptResult;
use crate::repo::project_repo::ProjectRepository;
use log::{error, info};

/// Loads the shipped schema and seed scripts through a repository.
pub struct SchemaLoader<'repo, R: ProjectRepository> {
    repo: &'repo mut R,
}

impl<'repo, R: ProjectRepository> SchemaLoader<'repo, R> {
    pub fn new(repo: &'repo mut R) -> Self {
        Self { repo }
    }

    /// Creates and populates all tables from the embedded scripts.
    ///
    /// # Errors
    /// - `ResourceNotFound` when a named script is not registered.
    /// - `Repo` when batch execution fails; the failed batch is fully
    ///   rolled back and the seed script is not attempted after a failed
    ///   schema script.
    pub fn bootstrap(&mut self) -> ScriptResult<()> {
        self.load_resource(SCHEMA_RESOURCE)?;
        self.load_resource(SEED_RESOURCE)?;
        Ok(())
    }

    fn load_resource(&mut self, name: &str) -> ScriptResult<()> {
        let text = resource_text(name)?;
        let statements = split_statements(text);
        info!(
            "event=schema_bootstrap module=script status=start resource={name} statements={}",
            statements.len()
        );

        if let Err(err) = self.repo.execute_batch(&statements) {
            error!("event=schema_bootstrap module=script status=error resource={name} error={err}");
            return Err(err.into());
        }

        info!("event=schema_bootstrap module=script status=ok resource={name}");
        Ok(())
    }
}
