//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts, partial updates and list filters

pub mod attachment;
pub mod category;
pub mod master;
pub mod tag;
pub mod toy;
