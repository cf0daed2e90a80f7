use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use tasyir_core::{
    stock_category::{NewStockCategory, StockCategoryUpdate},
    stock_item::{NewStockItem, StockItemUpdate},
    supplier::{NewSupplier, SupplierUpdate},
    Tasyir,
};
use tasyir_types::{
    primitives::{StockCategoryId, StockItemId, SupplierId},
    stock::{StockCategoryValues, StockItemValues, SupplierValues},
};

use super::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockCategoryRequest {
    pub name: String,
}

pub async fn list_categories(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<StockCategoryValues>>, ApiError> {
    let categories = app.stock_categories().list().await?;
    Ok(Json(
        categories.into_iter().map(|c| c.into_values()).collect(),
    ))
}

pub async fn create_category(
    State(app): State<Tasyir>,
    Json(req): Json<StockCategoryRequest>,
) -> Result<Json<StockCategoryValues>, ApiError> {
    let new_category = NewStockCategory::builder()
        .id(StockCategoryId::new())
        .name(req.name)
        .build()
        .expect("all mandatory fields set");
    let category = app.stock_categories().create(new_category).await?;
    Ok(Json(category.into_values()))
}

pub async fn find_category(
    State(app): State<Tasyir>,
    Path(id): Path<StockCategoryId>,
) -> Result<Json<StockCategoryValues>, ApiError> {
    let category = app.stock_categories().find_by_id(id).await?;
    Ok(Json(category.into_values()))
}

pub async fn update_category(
    State(app): State<Tasyir>,
    Path(id): Path<StockCategoryId>,
    Json(req): Json<StockCategoryRequest>,
) -> Result<Json<StockCategoryValues>, ApiError> {
    let mut update = StockCategoryUpdate::default();
    update.name(req.name);
    let category = app.stock_categories().update(id, update).await?;
    Ok(Json(category.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierRequest {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

pub async fn list_suppliers(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<SupplierValues>>, ApiError> {
    let suppliers = app.suppliers().list().await?;
    Ok(Json(suppliers.into_iter().map(|s| s.into_values()).collect()))
}

pub async fn create_supplier(
    State(app): State<Tasyir>,
    Json(req): Json<SupplierRequest>,
) -> Result<Json<SupplierValues>, ApiError> {
    let mut builder = NewSupplier::builder();
    builder.id(SupplierId::new()).name(req.name);
    if let Some(email) = req.email {
        builder.email(email);
    }
    if let Some(phone) = req.phone {
        builder.phone(phone);
    }
    let new_supplier = builder.build().expect("all mandatory fields set");
    let supplier = app.suppliers().create(new_supplier).await?;
    Ok(Json(supplier.into_values()))
}

pub async fn find_supplier(
    State(app): State<Tasyir>,
    Path(id): Path<SupplierId>,
) -> Result<Json<SupplierValues>, ApiError> {
    let supplier = app.suppliers().find_by_id(id).await?;
    Ok(Json(supplier.into_values()))
}

pub async fn update_supplier(
    State(app): State<Tasyir>,
    Path(id): Path<SupplierId>,
    Json(req): Json<SupplierRequest>,
) -> Result<Json<SupplierValues>, ApiError> {
    let mut update = SupplierUpdate::default();
    update.name(req.name);
    if let Some(email) = req.email {
        update.email(email);
    }
    if let Some(phone) = req.phone {
        update.phone(phone);
    }
    let supplier = app.suppliers().update(id, update).await?;
    Ok(Json(supplier.into_values()))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockItemRequest {
    pub name: String,
    pub sku: String,
    pub category_id: StockCategoryId,
    pub supplier_id: Option<SupplierId>,
    #[serde(default)]
    pub quantity: i64,
    pub unit_price: Decimal,
    #[serde(default)]
    pub alert_threshold: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStockItemRequest {
    pub name: Option<String>,
    pub category_id: Option<StockCategoryId>,
    pub supplier_id: Option<Option<SupplierId>>,
    pub unit_price: Option<Decimal>,
    pub alert_threshold: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustQuantityRequest {
    pub delta: i64,
}

pub async fn list_items(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<StockItemValues>>, ApiError> {
    let items = app.stock_items().list().await?;
    Ok(Json(items.into_iter().map(|i| i.into_values()).collect()))
}

pub async fn list_low_stock_items(
    State(app): State<Tasyir>,
) -> Result<Json<Vec<StockItemValues>>, ApiError> {
    let items = app.stock_items().list_low_stock().await?;
    Ok(Json(items.into_iter().map(|i| i.into_values()).collect()))
}

pub async fn create_item(
    State(app): State<Tasyir>,
    Json(req): Json<CreateStockItemRequest>,
) -> Result<Json<StockItemValues>, ApiError> {
    let mut builder = NewStockItem::builder();
    builder
        .id(StockItemId::new())
        .name(req.name)
        .sku(req.sku)
        .category_id(req.category_id)
        .quantity(req.quantity)
        .unit_price(req.unit_price)
        .alert_threshold(req.alert_threshold);
    if let Some(supplier_id) = req.supplier_id {
        builder.supplier_id(supplier_id);
    }
    let new_item = builder.build().expect("all mandatory fields set");
    let item = app.create_stock_item(new_item).await?;
    Ok(Json(item.into_values()))
}

pub async fn find_item(
    State(app): State<Tasyir>,
    Path(id): Path<StockItemId>,
) -> Result<Json<StockItemValues>, ApiError> {
    let item = app.stock_items().find_by_id(id).await?;
    Ok(Json(item.into_values()))
}

pub async fn update_item(
    State(app): State<Tasyir>,
    Path(id): Path<StockItemId>,
    Json(req): Json<UpdateStockItemRequest>,
) -> Result<Json<StockItemValues>, ApiError> {
    let mut update = StockItemUpdate::default();
    if let Some(name) = req.name {
        update.name(name);
    }
    if let Some(category_id) = req.category_id {
        update.category_id(category_id);
    }
    if let Some(supplier_id) = req.supplier_id {
        update.supplier_id(supplier_id);
    }
    if let Some(unit_price) = req.unit_price {
        update.unit_price(unit_price);
    }
    if let Some(alert_threshold) = req.alert_threshold {
        update.alert_threshold(alert_threshold);
    }
    let item = app.update_stock_item(id, update).await?;
    Ok(Json(item.into_values()))
}

pub async fn adjust_item_quantity(
    State(app): State<Tasyir>,
    Path(id): Path<StockItemId>,
    Json(req): Json<AdjustQuantityRequest>,
) -> Result<Json<StockItemValues>, ApiError> {
    let item = app.stock_items().adjust_quantity(id, req.delta).await?;
    Ok(Json(item.into_values()))
}
