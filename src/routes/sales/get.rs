use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::{get_sale_by_id, get_sales}, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidQuery};

// `product` is the denormalised product name stored on the sale
#[derive(Deserialize, Validate, Debug)]
pub struct SalesQuery{
    pub product: Option<String>
}

#[tracing::instrument(
    "Listing sales",
    skip(pool)
)]
pub async fn list_sales(
    pool: web::Data<DbPool>,
    query: ValidQuery<SalesQuery>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let sales = get_sales(conn, query.0.product).await?;

    Ok(HttpResponse::Ok().json(sales))
}

#[tracing::instrument(
    "Getting sale by id",
    skip(pool)
)]
pub async fn get_sale(
    pool: web::Data<DbPool>,
    path: web::Path<i32>
) -> Result<HttpResponse, ApiError>{
    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let sale = get_sale_by_id(conn, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound("Sale"))?;

    Ok(HttpResponse::Ok().json(sale))
}
