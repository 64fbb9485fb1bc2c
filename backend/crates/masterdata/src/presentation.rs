use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use sqlx::PgPool;

use crate::domain::MasterItem;
use crate::error::MasterDataResult;
use crate::infra::PgMasterDataStore;

async fn list_all(
    State(store): State<Arc<PgMasterDataStore>>,
) -> MasterDataResult<Json<BTreeMap<&'static str, Vec<MasterItem>>>> {
    Ok(Json(store.list_all().await?))
}

async fn list_by_category(
    State(store): State<Arc<PgMasterDataStore>>,
    Path(category): Path<String>,
) -> MasterDataResult<Json<Vec<MasterItem>>> {
    Ok(Json(store.list_by_category(&category).await?))
}

pub fn master_data_router(pool: PgPool) -> Router {
    let store = Arc::new(PgMasterDataStore::new(pool));
    Router::new()
        .route("/", get(list_all))
        .route("/{category}", get(list_by_category))
        .with_state(store)
}
