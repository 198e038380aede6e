use anyhow::Context;
use diesel::{OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};

use crate::{models::{DataWarehouseRecord, DataWarehouseRow, NewDataWarehouseRow}, schema::data_warehouse, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

#[tracing::instrument(
    "Inserting document into data warehouse",
    skip_all
)]
pub async fn insert_data_warehouse_record(
    mut conn: DbConnection,
    data: serde_json::Value
) -> Result<DataWarehouseRecord, anyhow::Error>{
    let row = NewDataWarehouseRow{
        data: serde_json::to_string(&data)
                .context("Failed to serialize document")?
    };

    let inserted = spawn_blocking_with_tracing(move || {
        diesel::insert_into(data_warehouse::table)
            .values(row)
            .returning(DataWarehouseRow::as_returning())
            .get_result::<DataWarehouseRow>(&mut conn)
            .context("Failed to insert into data_warehouse table")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(DataWarehouseRecord{
        id: inserted.id,
        data
    })
}

#[tracing::instrument(
    "Getting data warehouse document by id",
    skip(conn)
)]
pub async fn get_data_warehouse_record(
    mut conn: DbConnection,
    record_id: i32
) -> Result<Option<DataWarehouseRecord>, anyhow::Error>{
    let row = spawn_blocking_with_tracing(move || {
        data_warehouse::table
            .find(record_id)
            .select(DataWarehouseRow::as_select())
            .first::<DataWarehouseRow>(&mut conn)
            .optional()
            .context("Failed to get data warehouse row")
    })
    .await
    .context("Failed due to threadpool error")??;

    row.map(DataWarehouseRecord::try_from)
        .transpose()
        .context("Stored document is not valid json")
}
