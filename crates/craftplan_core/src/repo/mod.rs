//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/CLI orchestration.
//!
//! # Invariants
//! - Every public repository operation is exactly one transaction.
//! - Repository writes must enforce `Project::validate()` before
//!   persistence.
//! - Any failure inside a transaction rolls the whole transaction back
//!   before the error surfaces.

pub mod assemble;
pub mod project_repo;
