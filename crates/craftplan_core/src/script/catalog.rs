//! Embedded script resource catalog.
//!
//! # Responsibility
//! - Register the schema and seed scripts shipped with the crate.
//! - Resolve a resource name to its raw text.
//!
//! # Invariants
//! - Resource text is embedded at compile time via `include_str!`.
//! - Lookup by an unregistered name fails with `ResourceNotFound`.

use super::{ScriptError, ScriptResult};

/// Name of the table-definition script.
pub const SCHEMA_RESOURCE: &str = "projects-schema.sql";
/// Name of the seed-data script.
pub const SEED_RESOURCE: &str = "projects-seed.sql";

struct ScriptResource {
    name: &'static str,
    text: &'static str,
}

const RESOURCES: &[ScriptResource] = &[
    ScriptResource {
        name: SCHEMA_RESOURCE,
        text: include_str!("../../scripts/projects-schema.sql"),
    },
    ScriptResource {
        name: SEED_RESOURCE,
        text: include_str!("../../scripts/projects-seed.sql"),
    },
];

/// Resolves a registered resource name to its raw script text.
pub fn resource_text(name: &str) -> ScriptResult<&'static str> {
    RESOURCES
        .iter()
        .find(|resource| resource.name == name)
        .map(|resource| resource.text)
        .ok_or_else(|| ScriptError::ResourceNotFound {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{resource_text, ScriptError, SCHEMA_RESOURCE, SEED_RESOURCE};

    #[test]
    fn registered_resources_resolve_to_nonempty_text() {
        assert!(!resource_text(SCHEMA_RESOURCE).unwrap().is_empty());
        assert!(!resource_text(SEED_RESOURCE).unwrap().is_empty());
    }

    #[test]
    fn unknown_resource_name_is_not_found() {
        let err = resource_text("no-such-script.sql").unwrap_err();
        assert!(matches!(
            err,
            ScriptError::ResourceNotFound { name } if name == "no-such-script.sql"
        ));
    }
}
