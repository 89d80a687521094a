use craftplan_core::{HoursMinutes, Project, ProjectValidationError};

#[test]
fn hours_minutes_from_minutes_normalizes() {
    let estimated = HoursMinutes::from_minutes(120);
    assert_eq!(estimated.hours, 2);
    assert_eq!(estimated.minutes, 0);

    let actual = HoursMinutes::from_minutes(90);
    assert_eq!(actual.hours, 1);
    assert_eq!(actual.minutes, 30);

    assert_eq!(HoursMinutes::zero().total_minutes(), 0);
    assert_eq!(actual.total_minutes(), 90);
}

#[test]
fn hours_minutes_display_pads_minutes() {
    assert_eq!(HoursMinutes::from_minutes(120).to_string(), "2h00m");
    assert_eq!(HoursMinutes::from_minutes(90).to_string(), "1h30m");
    assert_eq!(HoursMinutes::zero().to_string(), "0h00m");
}

#[test]
fn project_new_sets_defaults() {
    let project = Project::new(
        "Chair",
        HoursMinutes::from_minutes(120),
        HoursMinutes::from_minutes(90),
        5,
        Some("test".to_string()),
    );

    assert_eq!(project.id, None);
    assert_eq!(project.name, "Chair");
    assert!(project.materials.is_empty());
    assert!(project.steps.is_empty());
    assert!(project.categories.is_empty());
    assert!(project.validate().is_ok());
}

#[test]
fn validate_rejects_blank_name() {
    let project = Project::new("  ", HoursMinutes::zero(), HoursMinutes::zero(), 5, None);
    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::EmptyName
    );
}

#[test]
fn validate_rejects_out_of_range_difficulty() {
    for difficulty in [0, 11] {
        let project = Project::new(
            "Fence",
            HoursMinutes::zero(),
            HoursMinutes::zero(),
            difficulty,
            None,
        );
        assert_eq!(
            project.validate().unwrap_err(),
            ProjectValidationError::DifficultyOutOfRange(difficulty)
        );
    }
}

#[test]
fn validate_rejects_denormalized_duration() {
    let mut project = Project::new("Fence", HoursMinutes::zero(), HoursMinutes::zero(), 5, None);
    project.actual = HoursMinutes {
        hours: 1,
        minutes: 75,
    };

    assert_eq!(
        project.validate().unwrap_err(),
        ProjectValidationError::MinutesOverflow {
            field: "actual",
            minutes: 75,
        }
    );
}

#[test]
fn project_serialization_uses_expected_wire_fields() {
    let mut project = Project::new(
        "Chair",
        HoursMinutes::from_minutes(120),
        HoursMinutes::from_minutes(90),
        5,
        Some("test".to_string()),
    );
    project.id = Some(7);

    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["name"], "Chair");
    assert_eq!(json["estimated"]["hours"], 2);
    assert_eq!(json["estimated"]["minutes"], 0);
    assert_eq!(json["actual"]["hours"], 1);
    assert_eq!(json["actual"]["minutes"], 30);
    assert_eq!(json["difficulty"], 5);
    assert_eq!(json["notes"], "test");
    assert!(json["materials"].as_array().unwrap().is_empty());

    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}
