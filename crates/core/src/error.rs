use crate::columns::ColumnRole;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Missing required columns: {}", join_roles(.0))]
    MissingColumns(Vec<ColumnRole>),

    #[error("{entity} not found: {name}")]
    NotFound { entity: &'static str, name: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Comma-separated display labels, in the order given.
pub fn join_roles(roles: &[ColumnRole]) -> String {
    roles
        .iter()
        .map(|r| r.label())
        .collect::<Vec<_>>()
        .join(", ")
}
