//! Decorates toy rows with their tag sets and attachments.
//!
//! Each toy costs two extra reads. A failure on any of them fails the whole
//! read; partially decorated aggregates are never returned.

use toycraft_db::models::toy::{Toy, ToyWithRelations};

use crate::ports::{StoreError, ToyStore};

/// Decorate one toy row.
pub async fn assemble(store: &dyn ToyStore, toy: Toy) -> Result<ToyWithRelations, StoreError> {
    let tags = store.get_toy_tags(toy.id).await?;
    let attachments = store.get_toy_attachments(toy.id).await?;
    Ok(ToyWithRelations {
        toy,
        tags,
        attachments,
    })
}

/// Decorate a list of toy rows, preserving their order.
pub async fn assemble_all(
    store: &dyn ToyStore,
    toys: Vec<Toy>,
) -> Result<Vec<ToyWithRelations>, StoreError> {
    let mut assembled = Vec::with_capacity(toys.len());
    for toy in toys {
        assembled.push(assemble(store, toy).await?);
    }
    Ok(assembled)
}
