//! In-memory fixtures for the catalog ports.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use toycraft_catalog::ports::{
    CategoryStore, IdentityResolver, MasterStore, StoreError, Stores, TagStore, ToyStore,
};
use toycraft_catalog::CatalogUseCases;
use toycraft_core::error::CoreError;
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_core::validation::ContentFilter;
use toycraft_db::models::attachment::Attachment;
use toycraft_db::models::category::Category;
use toycraft_db::models::master::{CreateMaster, Master, MasterFilters, UpdateMaster};
use toycraft_db::models::tag::Tag;
use toycraft_db::models::toy::{CreateToy, Toy, ToyFilters, UpdateToy};

/// Token accepted by [`StaticIdentity`] for [`USER_ID`].
pub const TOKEN: &str = "token-user-1";
pub const USER_ID: DbId = 1;

#[derive(Default)]
pub struct State {
    next_id: DbId,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub masters: Vec<Master>,
    pub toys: Vec<Toy>,
    pub associations: Vec<(DbId, DbId)>,
    pub attachments: Vec<Attachment>,
    /// Names of the mutating port calls, in call order.
    pub writes: Vec<&'static str>,
    /// Make `get_toy_attachments` fail.
    pub fail_attachment_reads: bool,
}

impl State {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Every storage port over one shared in-memory state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn stores(&self) -> Stores {
        let store = Arc::new(self.clone());
        Stores {
            toys: store.clone(),
            tags: store.clone(),
            categories: store.clone(),
            masters: store,
        }
    }

    pub fn add_category(&self, name: &str) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.categories.push(Category {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_tag(&self, name: &str) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.tags.push(Tag {
            id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn add_master(&self, user_id: DbId) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.masters.push(Master {
            id,
            user_id,
            info: None,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Attach a link directly, bypassing the use cases.
    pub fn add_attachment(&self, toy_id: DbId, link: &str) -> DbId {
        let mut state = self.state();
        let id = state.next_id();
        let now = Utc::now();
        state.attachments.push(Attachment {
            id,
            toy_id,
            link: link.to_string(),
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn tag_ids_of(&self, toy_id: DbId) -> Vec<DbId> {
        let mut ids: Vec<DbId> = self
            .state()
            .associations
            .iter()
            .filter(|(toy, _)| *toy == toy_id)
            .map(|(_, tag)| *tag)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn writes(&self) -> Vec<&'static str> {
        self.state().writes.clone()
    }
}

fn matches_filters(toy: &Toy, filters: Option<&ToyFilters>) -> bool {
    let Some(filters) = filters else {
        return true;
    };
    filters.category_ids.is_empty() || filters.category_ids.contains(&toy.category_id)
}

fn page<T>(rows: Vec<T>, pagination: Option<&Pagination>) -> Vec<T> {
    match pagination {
        Some(p) => rows
            .into_iter()
            .skip(p.offset() as usize)
            .take(p.limit() as usize)
            .collect(),
        None => rows,
    }
}

#[async_trait]
impl ToyStore for MemoryStore {
    async fn get_toys(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError> {
        let rows = self
            .state()
            .toys
            .iter()
            .filter(|t| matches_filters(t, filters))
            .cloned()
            .collect();
        Ok(page(rows, pagination))
    }

    async fn get_master_toys(
        &self,
        master_id: DbId,
        pagination: Option<&Pagination>,
        filters: Option<&ToyFilters>,
    ) -> Result<Vec<Toy>, StoreError> {
        let rows = self
            .state()
            .toys
            .iter()
            .filter(|t| t.master_id == master_id && matches_filters(t, filters))
            .cloned()
            .collect();
        Ok(page(rows, pagination))
    }

    async fn count_toys(&self, filters: Option<&ToyFilters>) -> Result<u64, StoreError> {
        Ok(self.get_toys(None, filters).await?.len() as u64)
    }

    async fn count_master_toys(
        &self,
        master_id: DbId,
        filters: Option<&ToyFilters>,
    ) -> Result<u64, StoreError> {
        Ok(self.get_master_toys(master_id, None, filters).await?.len() as u64)
    }

    async fn get_toy_by_id(&self, id: DbId) -> Result<Toy, StoreError> {
        self.state()
            .toys
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_toy_tags(&self, toy_id: DbId) -> Result<Vec<Tag>, StoreError> {
        let state = self.state();
        Ok(state
            .tags
            .iter()
            .filter(|tag| state.associations.contains(&(toy_id, tag.id)))
            .cloned()
            .collect())
    }

    async fn get_toy_attachments(&self, toy_id: DbId) -> Result<Vec<Attachment>, StoreError> {
        let state = self.state();
        if state.fail_attachment_reads {
            return Err(StoreError::Database(sqlx::Error::Protocol(
                "attachments unavailable".into(),
            )));
        }
        Ok(state
            .attachments
            .iter()
            .filter(|a| a.toy_id == toy_id)
            .cloned()
            .collect())
    }

    async fn add_toy(&self, input: &CreateToy) -> Result<DbId, StoreError> {
        let mut state = self.state();
        state.writes.push("add_toy");
        let id = state.next_id();
        let now = Utc::now();
        state.toys.push(Toy {
            id,
            master_id: input.master_id,
            category_id: input.category_id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        });
        for &tag_id in &input.tag_ids {
            if !state.associations.contains(&(id, tag_id)) {
                state.associations.push((id, tag_id));
            }
        }
        for link in &input.attachments {
            let attachment_id = state.next_id();
            state.attachments.push(Attachment {
                id: attachment_id,
                toy_id: id,
                link: link.clone(),
                created_at: now,
                updated_at: now,
            });
        }
        Ok(id)
    }

    async fn update_toy(&self, diff: &UpdateToy) -> Result<(), StoreError> {
        let mut state = self.state();
        state.writes.push("update_toy");
        let now = Utc::now();
        let toy = state
            .toys
            .iter_mut()
            .find(|t| t.id == diff.id)
            .ok_or(StoreError::NotFound)?;
        if diff.has_scalar_changes() {
            if let Some(category_id) = diff.category_id {
                toy.category_id = category_id;
            }
            if let Some(name) = &diff.name {
                toy.name = name.clone();
            }
            if let Some(description) = &diff.description {
                toy.description = description.clone();
            }
            if let Some(price) = diff.price {
                toy.price = price;
            }
            if let Some(quantity) = diff.quantity {
                toy.quantity = quantity;
            }
            toy.updated_at = now;
        }

        state
            .associations
            .retain(|(toy, tag)| *toy != diff.id || !diff.tag_ids_to_delete.contains(tag));
        for &tag_id in &diff.tag_ids_to_add {
            if !state.associations.contains(&(diff.id, tag_id)) {
                state.associations.push((diff.id, tag_id));
            }
        }
        state
            .attachments
            .retain(|a| a.toy_id != diff.id || !diff.attachment_ids_to_delete.contains(&a.id));
        for link in &diff.attachments_to_add {
            let attachment_id = state.next_id();
            state.attachments.push(Attachment {
                id: attachment_id,
                toy_id: diff.id,
                link: link.clone(),
                created_at: now,
                updated_at: now,
            });
        }
        Ok(())
    }

    async fn delete_toy(&self, id: DbId) -> Result<(), StoreError> {
        let mut state = self.state();
        state.writes.push("delete_toy");
        let before = state.toys.len();
        state.toys.retain(|t| t.id != id);
        if state.toys.len() == before {
            return Err(StoreError::NotFound);
        }
        state.associations.retain(|(toy, _)| *toy != id);
        state.attachments.retain(|a| a.toy_id != id);
        Ok(())
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn get_all_tags(&self) -> Result<Vec<Tag>, StoreError> {
        Ok(self.state().tags.clone())
    }

    async fn get_tag_by_id(&self, id: DbId) -> Result<Tag, StoreError> {
        self.state()
            .tags
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create_tags(&self, names: &[String]) -> Result<Vec<DbId>, StoreError> {
        self.state().writes.push("create_tags");
        Ok(names.iter().map(|name| self.add_tag(name)).collect())
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn get_all_categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.state().categories.clone())
    }

    async fn get_category_by_id(&self, id: DbId) -> Result<Category, StoreError> {
        self.state()
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }
}

#[async_trait]
impl MasterStore for MemoryStore {
    async fn get_masters(
        &self,
        pagination: Option<&Pagination>,
        _filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, StoreError> {
        Ok(page(self.state().masters.clone(), pagination))
    }

    async fn get_master_by_id(&self, id: DbId) -> Result<Master, StoreError> {
        self.state()
            .masters
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn get_master_by_user_id(&self, user_id: DbId) -> Result<Master, StoreError> {
        self.state()
            .masters
            .iter()
            .find(|m| m.user_id == user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn register_master(&self, input: &CreateMaster) -> Result<DbId, StoreError> {
        self.state().writes.push("register_master");
        let id = self.add_master(input.user_id);
        if let Some(master) = self.state().masters.iter_mut().find(|m| m.id == id) {
            master.info = input.info.clone();
        }
        Ok(id)
    }

    async fn update_master(&self, input: &UpdateMaster) -> Result<(), StoreError> {
        let mut state = self.state();
        state.writes.push("update_master");
        let master = state
            .masters
            .iter_mut()
            .find(|m| m.id == input.id)
            .ok_or(StoreError::NotFound)?;
        if let Some(info) = &input.info {
            master.info = info.clone();
        }
        Ok(())
    }
}

/// Resolves exactly one token, [`TOKEN`], to [`USER_ID`].
pub struct StaticIdentity {
    tokens: HashMap<String, DbId>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(TOKEN.to_string(), USER_ID);
        Self { tokens }
    }

    pub fn with(mut self, token: &str, user_id: DbId) -> Self {
        self.tokens.insert(token.to_string(), user_id);
        self
    }
}

#[async_trait]
impl IdentityResolver for StaticIdentity {
    async fn resolve(&self, access_token: &str) -> Result<DbId, CoreError> {
        self.tokens
            .get(access_token)
            .copied()
            .ok_or_else(|| CoreError::Unauthenticated("unknown access token".to_string()))
    }
}

/// Use cases over a fresh [`MemoryStore`] with the default identity.
pub fn catalog(store: &MemoryStore) -> CatalogUseCases {
    catalog_with(store, StaticIdentity::new(), ContentFilter::default())
}

pub fn catalog_with(
    store: &MemoryStore,
    identity: StaticIdentity,
    content: ContentFilter,
) -> CatalogUseCases {
    CatalogUseCases::new(store.stores(), Arc::new(identity), content)
}
