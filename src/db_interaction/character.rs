use anyhow::Context;
use diesel::{RunQueryDsl, SelectableHelper};

use crate::{domain::{Character, CharacterFields}, models::CharacterRow, schema::characters, telemetry::spawn_blocking_with_tracing, utils::DbConnection};

// Stores the flattened row, the response keeps the list values
#[tracing::instrument(
    "Inserting character into the database",
    skip_all,
    fields(name = %fields.name)
)]
pub async fn insert_character(
    mut conn: DbConnection,
    fields: CharacterFields
) -> Result<Character, anyhow::Error>{
    let row = fields.flatten();

    let inserted = spawn_blocking_with_tracing(move || {
        diesel::insert_into(characters::table)
            .values(row)
            .returning(CharacterRow::as_returning())
            .get_result::<CharacterRow>(&mut conn)
            .context("Failed to insert into characters table")
    })
    .await
    .context("Failed due to threadpool error")??;

    Ok(fields.into_character(inserted.id))
}
