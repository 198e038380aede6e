use actix_web::{web, HttpResponse};
use anyhow::Context;
use serde::Deserialize;
use validator::Validate;

use crate::{character_scraper::CharacterScraper, db_interaction::insert_character, routes::ApiError, utils::{get_pooled_connection, DbPool}, validation::ValidQuery};

#[derive(Deserialize, Validate, Debug)]
pub struct ScrapeQuery{
    #[validate(required(message = "Field required"))]
    pub url: Option<String>
}

// Fetch and extraction failures all end up as an opaque 500
#[tracing::instrument(
    "Scraping character page",
    skip(pool, scraper)
)]
pub async fn scrape_character(
    pool: web::Data<DbPool>,
    scraper: web::Data<CharacterScraper>,
    query: ValidQuery<ScrapeQuery>
) -> Result<HttpResponse, ApiError>{
    let Some(url) = query.0.url else {
        return Err(anyhow::anyhow!("Validated scrape query is missing url").into())
    };

    let fields = scraper.scrape(&url)
        .await
        .context("Failed to scrape character")?;

    let conn = get_pooled_connection(&pool)
                .await
                .context("Failed to get connection from pool")?;

    let character = insert_character(conn, fields).await?;

    Ok(HttpResponse::Ok().json(character))
}
