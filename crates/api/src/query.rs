//! Shared query parameter types for API handlers.

use serde::Deserialize;
use toycraft_core::pagination::{Pagination, SortOrder};
use toycraft_core::types::DbId;
use toycraft_db::models::master::MasterFilters;
use toycraft_db::models::toy::ToyFilters;

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped by [`Pagination`]; list endpoints always page, with
/// the default limit when none is given.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    pub fn to_pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Toy listing filters. Id lists are comma-separated (`?tag_ids=1,2`).
#[derive(Debug, Default, Deserialize)]
pub struct ToyQueryParams {
    pub search: Option<String>,
    pub price_floor: Option<f64>,
    pub price_ceil: Option<f64>,
    pub quantity_floor: Option<i32>,
    pub category_ids: Option<String>,
    pub tag_ids: Option<String>,
    pub created_at_order: Option<SortOrder>,
}

impl ToyQueryParams {
    pub fn to_filters(&self) -> Result<ToyFilters, AppError> {
        Ok(ToyFilters {
            search: self.search.clone(),
            price_floor: self.price_floor,
            price_ceil: self.price_ceil,
            quantity_floor: self.quantity_floor,
            category_ids: parse_id_list("category_ids", self.category_ids.as_deref())?,
            tag_ids: parse_id_list("tag_ids", self.tag_ids.as_deref())?,
            created_at_order: self.created_at_order,
        })
    }
}

/// Master listing filters.
#[derive(Debug, Default, Deserialize)]
pub struct MasterQueryParams {
    pub search: Option<String>,
    pub created_at_order: Option<SortOrder>,
}

impl MasterQueryParams {
    pub fn to_filters(&self) -> MasterFilters {
        MasterFilters {
            search: self.search.clone(),
            created_at_order: self.created_at_order,
        }
    }
}

/// Parse `"1, 2,3"` into ids. Empty segments are skipped.
fn parse_id_list(field: &str, raw: Option<&str>) -> Result<Vec<DbId>, AppError> {
    let Some(raw) = raw else {
        return Ok(vec![]);
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<DbId>()
                .map_err(|_| AppError::BadRequest(format!("{field} contains an invalid id: {s}")))
        })
        .collect()
}
