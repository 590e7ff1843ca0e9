use toycraft_core::error::CoreError;
use toycraft_core::types::DbId;
use toycraft_db::models::category::Category;

use super::CatalogUseCases;

impl CatalogUseCases {
    pub async fn get_categories(&self) -> Result<Vec<Category>, CoreError> {
        self.categories.get_all_categories().await
    }

    pub async fn get_category(&self, id: DbId) -> Result<Category, CoreError> {
        self.categories.get_category_by_id(id).await
    }
}
