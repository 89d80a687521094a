//! Project repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the four persistence operations the CLI layer relies on:
//!   insert, list, by-id fetch, batch execution.
//! - Own transaction boundaries, parameter binding and rollback.
//!
//! # Invariants
//! - Write paths call `Project::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Rollback is best-effort: a failed rollback is logged and swallowed
//!   so the original error is the one surfaced.

use crate::db::DbError;
use crate::model::project::{HoursMinutes, Project, ProjectId, ProjectValidationError};
use crate::repo::assemble::attach_children;
use log::warn;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PROJECT_SELECT_SQL: &str = "SELECT
    project_id,
    project_name,
    estimated_minutes,
    actual_minutes,
    difficulty,
    notes
FROM project";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for project persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted project data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for project persistence operations.
pub trait ProjectRepository {
    /// Persists an unsaved project and returns it with the store-assigned id.
    fn insert_project(&mut self, project: &Project) -> RepoResult<Project>;
    /// Lists all projects ordered by name, scalar fields only.
    fn fetch_all_projects(&mut self) -> RepoResult<Vec<Project>>;
    /// Fetches one fully assembled aggregate, or `None` when no row matches.
    fn fetch_project_by_id(&mut self, project_id: ProjectId) -> RepoResult<Option<Project>>;
    /// Executes a statement batch atomically inside one transaction.
    fn execute_batch(&mut self, statements: &[String]) -> RepoResult<()>;
}

/// SQLite-backed project repository.
///
/// Holds its connection exclusively for the repository lifetime; each
/// operation opens exactly one transaction on it.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn insert_project(&mut self, project: &Project) -> RepoResult<Project> {
        project.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match insert_project_in_tx(&tx, project) {
            Ok(project_id) => {
                tx.commit()?;
                let mut saved = project.clone();
                saved.id = Some(project_id);
                Ok(saved)
            }
            Err(err) => {
                rollback_logged(tx);
                Err(err)
            }
        }
    }

    fn fetch_all_projects(&mut self) -> RepoResult<Vec<Project>> {
        let tx = self.conn.transaction()?;
        match fetch_all_in_tx(&tx) {
            Ok(projects) => {
                tx.commit()?;
                Ok(projects)
            }
            Err(err) => {
                rollback_logged(tx);
                Err(err)
            }
        }
    }

    fn fetch_project_by_id(&mut self, project_id: ProjectId) -> RepoResult<Option<Project>> {
        let tx = self.conn.transaction()?;
        match fetch_by_id_in_tx(&tx, project_id) {
            Ok(found) => {
                tx.commit()?;
                Ok(found)
            }
            Err(err) => {
                rollback_logged(tx);
                Err(err)
            }
        }
    }

    fn execute_batch(&mut self, statements: &[String]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        match run_batch_in_tx(&tx, statements) {
            Ok(()) => {
                tx.commit()?;
                Ok(())
            }
            Err(err) => {
                rollback_logged(tx);
                Err(err)
            }
        }
    }
}

/// Rolls a failed transaction back, keeping the original error dominant.
fn rollback_logged(tx: Transaction<'_>) {
    if let Err(rollback_err) = tx.rollback() {
        warn!("event=tx_rollback module=repo status=error error={rollback_err}");
    }
}

fn insert_project_in_tx(tx: &Transaction<'_>, project: &Project) -> RepoResult<ProjectId> {
    tx.execute(
        "INSERT INTO project (
            project_name,
            estimated_minutes,
            actual_minutes,
            difficulty,
            notes
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            project.name.as_str(),
            project.estimated.total_minutes(),
            project.actual.total_minutes(),
            project.difficulty,
            project.notes.as_deref(),
        ],
    )?;

    Ok(tx.last_insert_rowid())
}

fn fetch_all_in_tx(tx: &Transaction<'_>) -> RepoResult<Vec<Project>> {
    let mut stmt = tx.prepare(&format!("{PROJECT_SELECT_SQL} ORDER BY project_name;"))?;
    let mut rows = stmt.query([])?;
    let mut projects = Vec::new();

    while let Some(row) = rows.next()? {
        projects.push(parse_project_row(row)?);
    }

    Ok(projects)
}

fn fetch_by_id_in_tx(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Option<Project>> {
    let mut stmt = tx.prepare(&format!("{PROJECT_SELECT_SQL} WHERE project_id = ?1;"))?;
    let mut rows = stmt.query([project_id])?;

    let mut project = match rows.next()? {
        Some(row) => parse_project_row(row)?,
        None => return Ok(None),
    };
    drop(rows);
    drop(stmt);

    // Children come from the same transaction so the aggregate is one
    // consistent snapshot.
    attach_children(tx, &mut project)?;
    Ok(Some(project))
}

fn run_batch_in_tx(tx: &Transaction<'_>, statements: &[String]) -> RepoResult<()> {
    for statement in statements {
        tx.execute_batch(statement)?;
    }
    Ok(())
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let project_id: ProjectId = row.get("project_id")?;
    let estimated = duration_from_row(row, "estimated_minutes")?;
    let actual = duration_from_row(row, "actual_minutes")?;

    let difficulty_raw: i64 = row.get("difficulty")?;
    let difficulty = u8::try_from(difficulty_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid difficulty value `{difficulty_raw}` in project.difficulty"
        ))
    })?;

    let mut project = Project::new(
        row.get::<_, String>("project_name")?,
        estimated,
        actual,
        difficulty,
        row.get("notes")?,
    );
    project.id = Some(project_id);
    project.validate()?;
    Ok(project)
}

fn duration_from_row(row: &Row<'_>, column: &str) -> RepoResult<HoursMinutes> {
    let raw: i64 = row.get(column)?;
    let total_minutes = u32::try_from(raw).map_err(|_| {
        RepoError::InvalidData(format!("negative duration `{raw}` in project.{column}"))
    })?;
    Ok(HoursMinutes::from_minutes(total_minutes))
}
