use anyhow::Context;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{models::{InventoryItem, Product, Sale}, schema::{inventory, products, sales}, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Products, inventory and sales are read only through the api.
// Every listing takes an optional exact match filter on one column.

#[tracing::instrument(
    "Getting products from db",
    skip(conn)
)]
pub async fn get_products(
    mut conn: DbConnection,
    name: Option<String>
) -> Result<Vec<Product>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let mut query = products::table
            .select(Product::as_select())
            .order(products::id)
            .into_boxed();

        if let Some(name) = name {
            query = query.filter(products::name.eq(name));
        }

        query.load::<Product>(&mut conn)
            .context("Failed to get products")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting product by id from db",
    skip(conn)
)]
pub async fn get_product_by_id(
    mut conn: DbConnection,
    product_id: i32
) -> Result<Option<Product>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        products::table
            .find(product_id)
            .select(Product::as_select())
            .first::<Product>(&mut conn)
            .optional()
            .context("Failed to get product")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting inventory items from db",
    skip(conn)
)]
pub async fn get_inventory_items(
    mut conn: DbConnection,
    product_name: Option<String>
) -> Result<Vec<InventoryItem>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let mut query = inventory::table
            .select(InventoryItem::as_select())
            .order(inventory::id)
            .into_boxed();

        if let Some(product_name) = product_name {
            query = query.filter(inventory::product_name.eq(product_name));
        }

        query.load::<InventoryItem>(&mut conn)
            .context("Failed to get inventory items")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting inventory item by id from db",
    skip(conn)
)]
pub async fn get_inventory_item_by_id(
    mut conn: DbConnection,
    item_id: i32
) -> Result<Option<InventoryItem>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        inventory::table
            .find(item_id)
            .select(InventoryItem::as_select())
            .first::<InventoryItem>(&mut conn)
            .optional()
            .context("Failed to get inventory item")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting sales from db",
    skip(conn)
)]
pub async fn get_sales(
    mut conn: DbConnection,
    product: Option<String>
) -> Result<Vec<Sale>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        let mut query = sales::table
            .select(Sale::as_select())
            .order(sales::id)
            .into_boxed();

        if let Some(product) = product {
            query = query.filter(sales::product.eq(product));
        }

        query.load::<Sale>(&mut conn)
            .context("Failed to get sales")
    })
    .await
    .context("Failed due to threadpool error")?
}

#[tracing::instrument(
    "Getting sale by id from db",
    skip(conn)
)]
pub async fn get_sale_by_id(
    mut conn: DbConnection,
    sale_id: i32
) -> Result<Option<Sale>, anyhow::Error>{
    spawn_blocking_with_tracing(move || {
        sales::table
            .find(sale_id)
            .select(Sale::as_select())
            .first::<Sale>(&mut conn)
            .optional()
            .context("Failed to get sale")
    })
    .await
    .context("Failed due to threadpool error")?
}
