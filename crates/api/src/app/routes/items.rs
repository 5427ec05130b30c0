use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Extension, Path, Query,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use catalog_items::{Item, ItemStore};

use crate::app::dto::{self, DeleteResponse, HealthResponse, ItemRequest, ListItemsQuery, StatsResponse};
use crate::app::errors::ApiError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/stats", get(stats))
        .route("/health", get(health))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
}

pub async fn create_item(
    Extension(store): Extension<Arc<ItemStore>>,
    body: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let draft = dto::parse_item_body(body)?;
    let item = store.create(draft)?;
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn get_item(
    Extension(store): Extension<Arc<ItemStore>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Item>, ApiError> {
    let id = dto::parse_item_id(id)?;
    Ok(Json(store.get_or_not_found(id)?))
}

/// All items, or only those in `?category=` when it is non-blank.
pub async fn list_items(
    Extension(store): Extension<Arc<ItemStore>>,
    query: Result<Query<ListItemsQuery>, QueryRejection>,
) -> Result<Json<Vec<Item>>, ApiError> {
    let query = dto::parse_list_query(query)?;
    let items = match query.category.as_deref() {
        Some(category) if !category.trim().is_empty() => store.list_by_category(category),
        _ => store.list(),
    };
    Ok(Json(items))
}

pub async fn update_item(
    Extension(store): Extension<Arc<ItemStore>>,
    id: Result<Path<String>, PathRejection>,
    body: Result<Json<ItemRequest>, JsonRejection>,
) -> Result<Json<Item>, ApiError> {
    let draft = dto::parse_item_body(body)?;
    let id = dto::parse_item_id(id)?;
    Ok(Json(store.update(id, draft)?))
}

pub async fn delete_item(
    Extension(store): Extension<Arc<ItemStore>>,
    id: Result<Path<String>, PathRejection>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let id = dto::parse_item_id(id)?;

    let response = if store.delete(id) {
        (
            StatusCode::OK,
            Json(DeleteResponse {
                message: format!("Item with ID {id} deleted successfully"),
                deleted: true,
            }),
        )
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(DeleteResponse {
                message: format!("Item with ID {id} not found"),
                deleted: false,
            }),
        )
    };
    Ok(response)
}

pub async fn stats(Extension(store): Extension<Arc<ItemStore>>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_items: store.count(),
        message: "Catalog statistics retrieved successfully",
    })
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        message: "Item Catalog API is running",
        timestamp: Utc::now(),
    })
}
