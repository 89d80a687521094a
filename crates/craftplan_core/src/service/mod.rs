//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate script-loader and repository calls into use-case APIs.
//! - Keep the CLI layer decoupled from storage details.

pub mod project_service;
