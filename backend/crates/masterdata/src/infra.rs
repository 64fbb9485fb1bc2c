use std::collections::BTreeMap;

use sqlx::PgPool;

use crate::domain::{CATEGORIES, Category, MasterItem, find_category};
use crate::error::{MasterDataError, MasterDataResult};

#[derive(Clone)]
pub struct PgMasterDataStore {
    pool: PgPool,
}

impl PgMasterDataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, category: &Category) -> MasterDataResult<Vec<MasterItem>> {
        // Identifiers come from the static registry, not the request.
        let sql = format!(
            "SELECT id, {} AS label FROM {} ORDER BY id",
            category.label_column, category.table
        );
        Ok(sqlx::query_as::<_, MasterItem>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn list_by_category(&self, name: &str) -> MasterDataResult<Vec<MasterItem>> {
        let category =
            find_category(name).ok_or_else(|| MasterDataError::UnknownCategory(name.to_string()))?;
        self.fetch(category).await
    }

    pub async fn list_all(&self) -> MasterDataResult<BTreeMap<&'static str, Vec<MasterItem>>> {
        let mut all = BTreeMap::new();
        for category in CATEGORIES {
            all.insert(category.name, self.fetch(category).await?);
        }
        Ok(all)
    }
}
