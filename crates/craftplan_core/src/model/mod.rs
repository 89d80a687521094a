//! Domain model for tracked projects.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep one aggregate-centric shape shared by CLI and persistence.
//!
//! # Invariants
//! - Every persisted entity is identified by a store-assigned integer id.
//! - A `Project` owns its material/step lists; categories are shared
//!   references resolved through the join relation.

pub mod project;
