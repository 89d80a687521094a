//! Aggregate assembly for the by-id project fetch.
//!
//! # Responsibility
//! - Fetch a project's materials, steps and categories against the open
//!   transaction and attach them to the aggregate.
//!
//! # Invariants
//! - All three child queries run on the caller's transaction, never on a
//!   fresh connection.
//! - Any child query failure propagates so the caller rolls back; there
//!   is no partially assembled result.

use crate::model::project::{Category, Material, Project, ProjectId, Step};
use crate::repo::project_repo::{RepoError, RepoResult};
use rusqlite::{Row, Transaction};

/// Attaches material, step and category collections to a fetched project.
pub fn attach_children(tx: &Transaction<'_>, project: &mut Project) -> RepoResult<()> {
    let project_id = project.id.ok_or_else(|| {
        RepoError::InvalidData("cannot assemble children for an unsaved project".to_string())
    })?;

    project.materials = fetch_materials(tx, project_id)?;
    project.steps = fetch_steps(tx, project_id)?;
    project.categories = fetch_categories(tx, project_id)?;
    Ok(())
}

/// Materials in display order, storage order breaking ties.
fn fetch_materials(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Vec<Material>> {
    let mut stmt = tx.prepare(
        "SELECT
            material_id,
            project_id,
            material_order,
            material_name,
            num_required,
            cost
         FROM material
         WHERE project_id = ?1
         ORDER BY material_order, material_id;",
    )?;

    let mut rows = stmt.query([project_id])?;
    let mut materials = Vec::new();
    while let Some(row) = rows.next()? {
        materials.push(parse_material_row(row)?);
    }
    Ok(materials)
}

/// Steps in sequence order, storage order breaking ties.
fn fetch_steps(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Vec<Step>> {
    let mut stmt = tx.prepare(
        "SELECT
            step_id,
            project_id,
            step_order,
            step_text
         FROM step
         WHERE project_id = ?1
         ORDER BY step_order, step_id;",
    )?;

    let mut rows = stmt.query([project_id])?;
    let mut steps = Vec::new();
    while let Some(row) = rows.next()? {
        steps.push(parse_step_row(row)?);
    }
    Ok(steps)
}

/// Categories related through the join table, ordered by name.
fn fetch_categories(tx: &Transaction<'_>, project_id: ProjectId) -> RepoResult<Vec<Category>> {
    let mut stmt = tx.prepare(
        "SELECT c.category_id, c.category_name
         FROM project_category pc
         JOIN category c USING (category_id)
         WHERE pc.project_id = ?1
         ORDER BY c.category_name;",
    )?;

    let mut rows = stmt.query([project_id])?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next()? {
        categories.push(Category {
            id: row.get("category_id")?,
            name: row.get("category_name")?,
        });
    }
    Ok(categories)
}

fn parse_material_row(row: &Row<'_>) -> RepoResult<Material> {
    let order_raw: i64 = row.get("material_order")?;
    let display_order = u32::try_from(order_raw).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid order value `{order_raw}` in material.material_order"
        ))
    })?;

    let quantity = match row.get::<_, Option<i64>>("num_required")? {
        Some(raw) => Some(u32::try_from(raw).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid quantity value `{raw}` in material.num_required"
            ))
        })?),
        None => None,
    };

    Ok(Material {
        id: row.get("material_id")?,
        project_id: row.get("project_id")?,
        display_order,
        name: row.get("material_name")?,
        quantity,
        cost: row.get("cost")?,
    })
}

fn parse_step_row(row: &Row<'_>) -> RepoResult<Step> {
    let order_raw: i64 = row.get("step_order")?;
    let step_order = u32::try_from(order_raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid order value `{order_raw}` in step.step_order"))
    })?;

    Ok(Step {
        id: row.get("step_id")?,
        project_id: row.get("project_id")?,
        step_order,
        instructions: row.get("step_text")?,
    })
}
