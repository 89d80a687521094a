use craftplan_core::script::catalog::{resource_text, SCHEMA_RESOURCE};
use craftplan_core::{
    open_db_in_memory, split_statements, HoursMinutes, Project, ProjectRepository,
    ProjectValidationError, RepoError, SchemaLoader, SqliteProjectRepository,
};
use rusqlite::Connection;

#[test]
fn insert_round_trip_preserves_scalars_and_empty_children() {
    let mut conn = schema_only_db();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let project = Project::new(
        "Chair",
        HoursMinutes::from_minutes(120),
        HoursMinutes::from_minutes(90),
        5,
        Some("test".to_string()),
    );
    let saved = repo.insert_project(&project).unwrap();
    let project_id = saved.id.expect("insert assigns an id");

    let loaded = repo.fetch_project_by_id(project_id).unwrap().unwrap();
    assert_eq!(loaded.name, "Chair");
    assert_eq!(loaded.estimated, HoursMinutes::from_minutes(120));
    assert_eq!(loaded.estimated.hours, 2);
    assert_eq!(loaded.estimated.minutes, 0);
    assert_eq!(loaded.actual.hours, 1);
    assert_eq!(loaded.actual.minutes, 30);
    assert_eq!(loaded.difficulty, 5);
    assert_eq!(loaded.notes.as_deref(), Some("test"));

    // Empty, not null: the collections exist and hold nothing.
    assert!(loaded.materials.is_empty());
    assert!(loaded.steps.is_empty());
    assert!(loaded.categories.is_empty());
}

#[test]
fn fetch_by_id_for_unknown_id_returns_none() {
    let mut conn = schema_only_db();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let found = repo.fetch_project_by_id(424_242).unwrap();
    assert!(found.is_none());
}

#[test]
fn fetch_all_orders_projects_by_name() {
    let mut conn = schema_only_db();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    for name in ["Zeta", "Alpha", "Mu"] {
        let project = Project::new(
            name,
            HoursMinutes::zero(),
            HoursMinutes::zero(),
            1,
            None,
        );
        repo.insert_project(&project).unwrap();
    }

    let projects = repo.fetch_all_projects().unwrap();
    let names: Vec<&str> = projects.iter().map(|project| project.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Mu", "Zeta"]);

    // The list view carries scalar fields only.
    assert!(projects.iter().all(|project| project.materials.is_empty()));
}

#[test]
fn validation_failures_reject_the_insert_before_sql() {
    let mut conn = schema_only_db();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let blank = Project::new("   ", HoursMinutes::zero(), HoursMinutes::zero(), 5, None);
    let err = repo.insert_project(&blank).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProjectValidationError::EmptyName)
    ));

    let too_hard = Project::new("Deck", HoursMinutes::zero(), HoursMinutes::zero(), 11, None);
    let err = repo.insert_project(&too_hard).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProjectValidationError::DifficultyOutOfRange(11))
    ));

    drop(repo);
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM project;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn seeded_aggregate_assembles_all_child_collections() {
    let mut conn = seeded_db();
    let mut repo = SqliteProjectRepository::new(&mut conn);

    let project = repo.fetch_project_by_id(1).unwrap().unwrap();
    assert_eq!(project.name, "Hang a closet door");

    let orders: Vec<u32> = project
        .materials
        .iter()
        .map(|material| material.display_order)
        .collect();
    assert_eq!(orders, vec![1, 2, 3]);
    assert_eq!(project.materials[0].quantity, Some(1));
    assert_eq!(project.materials[0].cost, Some(179.0));
    assert_eq!(project.materials[1].quantity, Some(20));
    assert_eq!(project.materials[1].cost, None);

    let step_orders: Vec<u32> = project.steps.iter().map(|step| step.step_order).collect();
    assert_eq!(step_orders, vec![1, 2, 3]);

    let category_names: Vec<&str> = project
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(category_names, vec!["Doors and Windows"]);
}

#[test]
fn child_ordering_breaks_ties_by_storage_order() {
    let mut conn = schema_only_db();

    let project_id = {
        let mut repo = SqliteProjectRepository::new(&mut conn);
        let project = Project::new(
            "Bookshelf",
            HoursMinutes::from_minutes(300),
            HoursMinutes::zero(),
            4,
            None,
        );
        repo.insert_project(&project).unwrap().id.unwrap()
    };

    for (order, name) in [(2, "varnish"), (1, "boards"), (1, "brackets")] {
        conn.execute(
            "INSERT INTO material (project_id, material_order, material_name)
             VALUES (?1, ?2, ?3);",
            rusqlite::params![project_id, order, name],
        )
        .unwrap();
    }
    for (order, text) in [(2, "assemble the frame"), (1, "cut boards to length")] {
        conn.execute(
            "INSERT INTO step (project_id, step_order, step_text) VALUES (?1, ?2, ?3);",
            rusqlite::params![project_id, order, text],
        )
        .unwrap();
    }
    for name in ["Woodwork", "Storage"] {
        conn.execute(
            "INSERT INTO category (category_name) VALUES (?1);",
            [name],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO project_category (project_id, category_id)
             SELECT ?1, category_id FROM category WHERE category_name = ?2;",
            rusqlite::params![project_id, name],
        )
        .unwrap();
    }

    let mut repo = SqliteProjectRepository::new(&mut conn);
    let project = repo.fetch_project_by_id(project_id).unwrap().unwrap();

    let material_names: Vec<&str> = project
        .materials
        .iter()
        .map(|material| material.name.as_str())
        .collect();
    assert_eq!(material_names, vec!["boards", "brackets", "varnish"]);

    let step_texts: Vec<&str> = project
        .steps
        .iter()
        .map(|step| step.instructions.as_str())
        .collect();
    assert_eq!(step_texts, vec!["cut boards to length", "assemble the frame"]);

    let category_names: Vec<&str> = project
        .categories
        .iter()
        .map(|category| category.name.as_str())
        .collect();
    assert_eq!(category_names, vec!["Storage", "Woodwork"]);
}

/// Tables only, no seed rows.
fn schema_only_db() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    let statements = split_statements(resource_text(SCHEMA_RESOURCE).unwrap());
    SqliteProjectRepository::new(&mut conn)
        .execute_batch(&statements)
        .unwrap();
    conn
}

/// Tables plus the shipped seed data.
fn seeded_db() -> Connection {
    let mut conn = open_db_in_memory().unwrap();
    let mut repo = SqliteProjectRepository::new(&mut conn);
    SchemaLoader::new(&mut repo).bootstrap().unwrap();
    drop(repo);
    conn
}
