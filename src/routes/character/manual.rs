use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{db_interaction::insert_character, domain::CharacterFields, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::{ValidJson, ValidQuery}};

#[derive(Deserialize, Validate, Debug)]
pub struct CharacterQuery{
    #[validate(required(message = "Field required"))]
    pub name: Option<String>,
    #[validate(required(message = "Field required"))]
    pub description: Option<String>
}

// Every list may be left out, as may the whole body
#[derive(Deserialize, Validate, Debug)]
pub struct CharacterLists{
    #[serde(default)]
    pub appearances: Vec<String>,
    #[serde(default)]
    pub affiliations: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub dimensions: Vec<String>,
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>
}

impl CharacterFields {
    pub fn from_parts(query: CharacterQuery, lists: CharacterLists) -> Result<Self, anyhow::Error>{
        Ok(CharacterFields{
            name: query.name.context("Validated character query is missing name")?,
            description: query.description.context("Validated character query is missing description")?,
            appearances: lists.appearances,
            affiliations: lists.affiliations,
            locations: lists.locations,
            dimensions: lists.dimensions,
            weapons: lists.weapons,
            vehicles: lists.vehicles,
            tools: lists.tools
        })
    }
}

// Same flatten and store step as the scraper. Name and description come
// from the query string, the lists from the body
#[tracing::instrument(
    "Manually creating character",
    skip(pool)
)]
pub async fn create_character(
    pool: web::Data<DbPool>,
    query: ValidQuery<CharacterQuery>,
    lists: ValidJson<CharacterLists>
) -> Result<HttpResponse, ApiError>{
    let fields = CharacterFields::from_parts(query.0, lists.0)?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let character = insert_character(conn, fields).await?;

    Ok(HttpResponse::Ok().json(character))
}
