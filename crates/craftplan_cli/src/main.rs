//! Interactive console menu for CraftPlan.
//!
//! # Responsibility
//! - Prompt for operations and user input on stdin.
//! - Validate raw input before the core is called.
//! - Keep the current project selection as explicit loop state.

use craftplan_core::{
    default_log_level, init_logging, open_db, HoursMinutes, Project, ProjectRepository,
    ProjectService, SqliteProjectRepository, DIFFICULTY_MAX, DIFFICULTY_MIN,
};
use log::error;
use std::io::{self, Write};

const DEFAULT_DB_FILE: &str = "craftplan.db";

const OPERATIONS: &[&str] = &[
    "1) Create and populate all tables",
    "2) Add a project",
    "3) List projects",
    "4) Select a project",
];

fn main() {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_FILE.to_string());

    if let Err(err) = init_cli_logging() {
        eprintln!("logging unavailable: {err}");
    }

    let mut conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("cannot open database `{db_path}`: {err}");
            std::process::exit(1);
        }
    };

    let repo = SqliteProjectRepository::new(&mut conn);
    let mut service = ProjectService::new(repo);
    run_menu(&mut service);
}

fn init_cli_logging() -> Result<(), String> {
    let log_dir = std::env::current_dir()
        .map_err(|err| format!("cannot resolve working directory: {err}"))?
        .join("logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())
}

fn run_menu<R: ProjectRepository>(service: &mut ProjectService<R>) {
    let mut current_project: Option<Project> = None;

    loop {
        print_operations(current_project.as_ref());

        let selection = match prompt("Enter an operation number (press Enter to quit)") {
            Some(text) => text,
            None => {
                println!("\nExiting menu.");
                return;
            }
        };

        let outcome = match selection.parse::<u32>() {
            Ok(1) => create_tables(service),
            Ok(2) => add_project(service, &mut current_project),
            Ok(3) => list_projects(service).map(|_| ()),
            Ok(4) => select_project(service, &mut current_project),
            Ok(other) => {
                println!("\n{other} is not a valid operation, try again.");
                Ok(())
            }
            Err(_) => {
                println!("\n`{selection}` is not a number, try again.");
                Ok(())
            }
        };

        if let Err(message) = outcome {
            error!("event=menu_operation module=cli status=error error={message}");
            println!("\nError: {message}. Try again.");
        }
    }
}

fn print_operations(current_project: Option<&Project>) {
    println!();
    println!("Here's what you can do:");
    for operation in OPERATIONS {
        println!("   {operation}");
    }
    if let Some(project) = current_project {
        println!();
        println!("You are working with: {}", project_label(project));
    }
}

fn create_tables<R: ProjectRepository>(service: &mut ProjectService<R>) -> Result<(), String> {
    service
        .create_and_populate_tables()
        .map_err(|err| err.to_string())?;
    println!("\nTables created and populated.");
    Ok(())
}

fn add_project<R: ProjectRepository>(
    service: &mut ProjectService<R>,
    current_project: &mut Option<Project>,
) -> Result<(), String> {
    let name = prompt("Enter project name").ok_or("a project name is required")?;
    let estimated = prompt_minutes("Enter estimated minutes for completion")?;
    let actual = prompt_minutes("Enter actual minutes spent")?;
    let difficulty = prompt_difficulty()?;
    let notes = prompt("Enter project notes");

    let project = Project::new(name, estimated, actual, difficulty, notes);
    let saved = service
        .add_project(&project)
        .map_err(|err| err.to_string())?;

    println!("\nYou added this project: {}", project_label(&saved));

    if let Some(project_id) = saved.id {
        *current_project = service
            .fetch_project_by_id(project_id)
            .map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn list_projects<R: ProjectRepository>(
    service: &mut ProjectService<R>,
) -> Result<Vec<Project>, String> {
    let projects = service.fetch_projects().map_err(|err| err.to_string())?;

    println!("\nProjects:");
    for project in &projects {
        println!("   {}", project_label(project));
    }
    Ok(projects)
}

fn select_project<R: ProjectRepository>(
    service: &mut ProjectService<R>,
    current_project: &mut Option<Project>,
) -> Result<(), String> {
    let projects = list_projects(service)?;

    let input = prompt("Enter project ID").ok_or("a project ID is required")?;
    let project_id: i64 = input
        .parse()
        .map_err(|_| format!("`{input}` is not a valid project ID"))?;

    *current_project = None;
    if projects.iter().any(|project| project.id == Some(project_id)) {
        *current_project = service
            .fetch_project_by_id(project_id)
            .map_err(|err| err.to_string())?;
    }

    match current_project {
        Some(project) => print_project(project),
        None => println!("\nInvalid project selected."),
    }
    Ok(())
}

fn print_project(project: &Project) {
    println!("\nProject: {}", project_label(project));
    println!(
        "   Estimated: {}   Actual: {}   Difficulty: {}",
        project.estimated, project.actual, project.difficulty
    );
    if let Some(notes) = &project.notes {
        println!("   Notes: {notes}");
    }

    println!("   Materials:");
    for material in &project.materials {
        let quantity = material
            .quantity
            .map_or(String::new(), |value| format!(" x{value}"));
        let cost = material
            .cost
            .map_or(String::new(), |value| format!(" at {value:.2}"));
        println!(
            "      {}: {}{}{}",
            material.display_order, material.name, quantity, cost
        );
    }

    println!("   Steps:");
    for step in &project.steps {
        println!("      {}: {}", step.step_order, step.instructions);
    }

    println!("   Categories:");
    for category in &project.categories {
        println!("      {}", category.name);
    }
}

fn project_label(project: &Project) -> String {
    match project.id {
        Some(project_id) => format!("{project_id}: {}", project.name),
        None => project.name.clone(),
    }
}

fn prompt_minutes(label: &str) -> Result<HoursMinutes, String> {
    match prompt(label) {
        // Blank input means "not tracked yet".
        None => Ok(HoursMinutes::zero()),
        Some(input) => input
            .parse::<u32>()
            .map(HoursMinutes::from_minutes)
            .map_err(|_| format!("`{input}` is not a valid minute count")),
    }
}

fn prompt_difficulty() -> Result<u8, String> {
    let label = format!("Enter difficulty level ({DIFFICULTY_MIN}-{DIFFICULTY_MAX})");
    let input = prompt(&label).ok_or("a difficulty level is required")?;
    let difficulty: u8 = input
        .parse()
        .map_err(|_| format!("`{input}` is not a valid difficulty"))?;

    if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&difficulty) {
        return Err(format!(
            "difficulty {difficulty} is outside {DIFFICULTY_MIN}..={DIFFICULTY_MAX}"
        ));
    }
    Ok(difficulty)
}

/// Prompts on stdout and reads one trimmed line; blank input is `None`.
fn prompt(label: &str) -> Option<String> {
    print!("{label}: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return None;
    }

    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
