use std::fmt;

use crate::types::DbId;

/// The entity families the catalog manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Toy,
    Tag,
    Category,
    Master,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Toy => "Toy",
            Self::Tag => "Tag",
            Self::Category => "Category",
            Self::Master => "Master",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which key a failed lookup used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Id(DbId),
    UserId(DbId),
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::UserId(id) => write!(f, "user_id {id}"),
        }
    }
}

/// Domain error taxonomy. Every variant maps to exactly one transport status.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} with {lookup} not found")]
    NotFound { entity: Entity, lookup: Lookup },

    #[error("{entity} already exists: {detail}")]
    AlreadyExists { entity: Entity, detail: String },

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// `NotFound` keyed by primary id.
    pub fn not_found(entity: Entity, id: DbId) -> Self {
        Self::NotFound {
            entity,
            lookup: Lookup::Id(id),
        }
    }

    /// `NotFound` for a master looked up by its owning user.
    pub fn master_not_found_for_user(user_id: DbId) -> Self {
        Self::NotFound {
            entity: Entity::Master,
            lookup: Lookup::UserId(user_id),
        }
    }

    pub fn already_exists(entity: Entity, detail: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity,
            detail: detail.into(),
        }
    }
}
