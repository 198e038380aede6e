use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::{get_product_by_id, get_products}, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidQuery};

#[derive(Deserialize, Validate, Debug)]
pub struct ProductQuery{
    pub name: Option<String>
}

#[tracing::instrument(
    "Listing products",
    skip(pool)
)]
pub async fn list_products(
    pool: web::Data<DbPool>,
    query: ValidQuery<ProductQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let products = get_products(conn, query.0.name).await?;

    Ok(HttpResponse::Ok().json(products))
}

#[tracing::instrument(
    "Getting product by id",
    skip(pool)
)]
pub async fn get_product(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let product = get_product_by_id(conn, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Product"))?;

    Ok(HttpResponse::Ok().json(product))
}
