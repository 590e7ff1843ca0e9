use serde::Deserialize;
use toycraft_core::error::CoreError;
use toycraft_core::pagination::Pagination;
use toycraft_core::types::DbId;
use toycraft_core::validation::fields::{validate_length, MAX_MASTER_INFO_LEN};
use toycraft_core::validation::ContentFilter;
use toycraft_db::models::master::{
    CreateMaster, Master, MasterFilters, MasterWithToys, UpdateMaster,
};

use super::CatalogUseCases;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterMasterInput {
    pub info: Option<String>,
}

/// `info: None` leaves the field as is; a blank string clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMasterInput {
    pub info: Option<String>,
}

fn validate_info(content: &ContentFilter, info: Option<&str>) -> Result<(), CoreError> {
    let Some(info) = info else {
        return Ok(());
    };
    validate_length("info", info, 0, MAX_MASTER_INFO_LEN)?;
    content.check("info", info)
}

/// Trimmed text, with blank collapsing to `None`.
fn normalize_info(info: &str) -> Option<String> {
    let trimmed = info.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl CatalogUseCases {
    /// Register the caller as a master. A user owns at most one.
    pub async fn register_master(
        &self,
        access_token: &str,
        input: RegisterMasterInput,
    ) -> Result<DbId, CoreError> {
        let user_id = self.resolve_user(access_token).await?;
        validate_info(&self.content, input.info.as_deref())?;

        let create = CreateMaster {
            user_id,
            info: input.info.as_deref().and_then(normalize_info),
        };
        self.masters.register_master(&create).await
    }

    /// Update the caller's own master.
    pub async fn update_master(
        &self,
        access_token: &str,
        input: UpdateMasterInput,
    ) -> Result<(), CoreError> {
        let user_id = self.resolve_user(access_token).await?;
        let master = self.masters.get_master_by_user(user_id).await?;
        validate_info(&self.content, input.info.as_deref())?;

        let update = UpdateMaster {
            id: master.id,
            info: input.info.as_deref().map(normalize_info),
        };
        self.masters.update_master(&update).await?;
        tracing::info!(master_id = master.id, user_id, "Master updated");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub async fn get_masters(
        &self,
        pagination: Option<&Pagination>,
        filters: Option<&MasterFilters>,
    ) -> Result<Vec<Master>, CoreError> {
        self.masters.get_masters(pagination, filters).await
    }

    /// A master with every toy it owns.
    pub async fn get_master(&self, master_id: DbId) -> Result<MasterWithToys, CoreError> {
        let master = self.masters.get_master_by_id(master_id).await?;
        self.with_toys(master).await
    }

    /// The master owned by `user_id`, with every toy it owns.
    pub async fn get_master_by_user(&self, user_id: DbId) -> Result<MasterWithToys, CoreError> {
        let master = self.masters.get_master_by_user(user_id).await?;
        self.with_toys(master).await
    }

    async fn with_toys(&self, master: Master) -> Result<MasterWithToys, CoreError> {
        let toys = self.toys.get_master_toys(master.id, None, None).await?;
        Ok(MasterWithToys { master, toys })
    }
}
