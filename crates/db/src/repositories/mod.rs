//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod attachment_repo;
pub mod category_repo;
pub mod master_repo;
pub mod tag_repo;
pub mod toy_repo;

pub use attachment_repo::AttachmentRepo;
pub use category_repo::CategoryRepo;
pub use master_repo::MasterRepo;
pub use tag_repo::TagRepo;
pub use toy_repo::ToyRepo;
