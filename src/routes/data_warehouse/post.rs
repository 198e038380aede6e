use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::insert_data_warehouse_record, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidJson};

// Any json document is accepted as `data`, except null
#[derive(Deserialize, Validate, Debug)]
pub struct DataWarehouseForm{
    #[validate(required(message = "Field required"))]
    pub data: Option<serde_json::Value>
}

#[tracing::instrument(
    "Storing data warehouse document",
    skip_all
)]
pub async fn post_data_warehouse(
    pool: web::Data<DbPool>,
    form: ValidJson<DataWarehouseForm>
) -> Result<HttpResponse, ApiError>{
    let Some(data) = form.0.data else {
        return Err(anyhow::anyhow!("Validated data warehouse form is missing data").into())
    };

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let record = insert_data_warehouse_record(conn, data).await?;

    Ok(HttpResponse::Ok().json(record))
}
