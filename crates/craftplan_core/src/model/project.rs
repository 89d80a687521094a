//! Project aggregate model.
//!
//! # Responsibility
//! - Define the project aggregate and its child entities.
//! - Provide duration handling in hours+minutes form.
//! - Validate write-path invariants before persistence.
//!
//! # Invariants
//! - `id` is `None` until the store assigns one on insert.
//! - `name` is non-empty after trimming.
//! - `difficulty` stays in `1..=10`.
//! - `HoursMinutes::minutes` stays below 60.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identity for every persisted entity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ProjectId = i64;
pub type MaterialId = i64;
pub type StepId = i64;
pub type CategoryId = i64;

pub const DIFFICULTY_MIN: u8 = 1;
pub const DIFFICULTY_MAX: u8 = 10;

/// Non-negative duration kept as hours plus leftover minutes.
///
/// Persisted as one total-minutes integer; reconstructed through
/// [`HoursMinutes::from_minutes`] on the way back out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursMinutes {
    /// Whole hours.
    pub hours: u32,
    /// Leftover minutes, `0..60` when constructed through this module.
    pub minutes: u8,
}

impl HoursMinutes {
    /// Builds a normalized duration from a total-minutes count.
    pub fn from_minutes(total_minutes: u32) -> Self {
        Self {
            hours: total_minutes / 60,
            minutes: (total_minutes % 60) as u8,
        }
    }

    /// Zero-length duration.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Total minutes represented by this duration.
    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + u32::from(self.minutes)
    }
}

impl Display for HoursMinutes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}h{:02}m", self.hours, self.minutes)
    }
}

/// One material line owned by a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub project_id: ProjectId,
    /// Display position inside the project's material list.
    pub display_order: u32,
    pub name: String,
    /// How many units the project calls for, when known.
    pub quantity: Option<u32>,
    /// Unit cost, when known.
    pub cost: Option<f64>,
}

/// One instruction step owned by a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub project_id: ProjectId,
    /// Sequence position inside the project's step list.
    pub step_order: u32,
    pub instructions: String,
}

/// Shared category, related to projects through the join relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

/// Project aggregate root.
///
/// Child lists start empty and are only populated by the by-id fetch,
/// which assembles them inside one transaction snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// `None` before the first insert.
    pub id: Option<ProjectId>,
    pub name: String,
    pub estimated: HoursMinutes,
    pub actual: HoursMinutes,
    /// Subjective rating in `1..=10`.
    pub difficulty: u8,
    pub notes: Option<String>,
    pub materials: Vec<Material>,
    pub steps: Vec<Step>,
    pub categories: Vec<Category>,
}

/// Validation failure raised before any SQL mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    EmptyName,
    DifficultyOutOfRange(u8),
    MinutesOverflow {
        field: &'static str,
        minutes: u8,
    },
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "project name cannot be empty"),
            Self::DifficultyOutOfRange(value) => write!(
                f,
                "difficulty {value} is outside {DIFFICULTY_MIN}..={DIFFICULTY_MAX}"
            ),
            Self::MinutesOverflow { field, minutes } => {
                write!(f, "{field} holds {minutes} leftover minutes, expected < 60")
            }
        }
    }
}

impl Error for ProjectValidationError {}

impl Project {
    /// Creates an unsaved project with empty child collections.
    pub fn new(
        name: impl Into<String>,
        estimated: HoursMinutes,
        actual: HoursMinutes,
        difficulty: u8,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            estimated,
            actual,
            difficulty,
            notes,
            materials: Vec::new(),
            steps: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after trimming.
    /// - `DifficultyOutOfRange` when difficulty leaves `1..=10`.
    /// - `MinutesOverflow` when a duration was built outside
    ///   [`HoursMinutes::from_minutes`].
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.name.trim().is_empty() {
            return Err(ProjectValidationError::EmptyName);
        }
        if !(DIFFICULTY_MIN..=DIFFICULTY_MAX).contains(&self.difficulty) {
            return Err(ProjectValidationError::DifficultyOutOfRange(
                self.difficulty,
            ));
        }
        for (field, duration) in [("estimated", self.estimated), ("actual", self.actual)] {
            if duration.minutes >= 60 {
                return Err(ProjectValidationError::MinutesOverflow {
                    field,
                    minutes: duration.minutes,
                });
            }
        }
        Ok(())
    }
}
