use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::error::ApiError;
use super::AppState;
use crate::domain::{
    Branch, BranchCreate, Category, CategoryCreate, OrderFilter, OrderPayload, PlacedOrder, Product,
    ProductCreate, ResponseUpdate,
};

type Created<T> = (StatusCode, Json<T>);

pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.list_products().await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(params): Json<ProductCreate>,
) -> Result<Created<Product>, ApiError> {
    let product = state.products.create_product(params).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>, ApiError> {
    Ok(Json(state.categories.list_categories().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(params): Json<CategoryCreate>,
) -> Result<Created<Category>, ApiError> {
    let category = state.categories.create_category(params).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list_branches(State(state): State<AppState>) -> Result<Json<Vec<Branch>>, ApiError> {
    Ok(Json(state.branches.list_branches().await?))
}

pub async fn create_branch(
    State(state): State<AppState>,
    Json(params): Json<BranchCreate>,
) -> Result<Created<Branch>, ApiError> {
    let branch = state.branches.create_branch(params).await?;
    Ok((StatusCode::CREATED, Json(branch)))
}

/// `201` with the stored order. Blank branch or no products gives `400`, an
/// unknown branch `422`.
pub async fn place_order(
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<Created<PlacedOrder>, ApiError> {
    debug!(branch = %payload.branch, "Processing place order request");
    let order = state.orders.place_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> Result<Json<Vec<PlacedOrder>>, ApiError> {
    Ok(Json(state.orders.list_orders(filter).await?))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlacedOrder>, ApiError> {
    state
        .orders
        .get_order(id.clone())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Order not found: {}", id)))
}

pub async fn set_order_response(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<ResponseUpdate>,
) -> Result<Json<PlacedOrder>, ApiError> {
    Ok(Json(state.orders.set_response(id, update.response).await?))
}
