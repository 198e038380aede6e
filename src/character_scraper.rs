use std::{error::Error, fmt::Debug};

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

use crate::{domain::CharacterFields, telemetry::spawn_blocking_with_tracing, utils::error_fmt_chain};

const TITLE_SELECTOR: &str = "span.long-title";
const DESCRIPTION_SELECTOR: &str = "p.desc";
const CATEGORY_SELECTOR: &str = ".category";
const HEADING_SELECTOR: &str = ".heading";

// (heading keyword, item selector) for each list valued field
const APPEARANCES: (&str, &str) = ("Appearances", "a");
const AFFILIATIONS: (&str, &str) = ("Affiliations", "a");
const LOCATIONS: (&str, &str) = ("Locations", "a");
const DIMENSIONS: (&str, &str) = ("Dimensions", ".property-name");
const WEAPONS: (&str, &str) = ("Weapons", "a");
const VEHICLES: (&str, &str) = ("Vehicles", "a");
const TOOLS: (&str, &str) = ("Tool", "a");

#[derive(Error)]
pub enum ExtractError{
    #[error("Page has no element matching `{0}`")]
    MissingElement(&'static str),
    #[error("Invalid selector `{0}`")]
    InvalidSelector(String)
}

impl Debug for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Error)]
pub enum ScrapeError{
    #[error("Failed to fetch character page")]
    FetchError(#[from] reqwest::Error),
    #[error("Failed to extract character from page")]
    ExtractError(#[from] ExtractError),
    #[error("Failed due to threadpool error")]
    ThreadpoolError(#[from] tokio::task::JoinError)
}

impl Debug for ScrapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

// Client used to download character pages
#[derive(Clone)]
pub struct CharacterScraper{
    http_client: Client
}

impl CharacterScraper {
    // No timeout or retry, a slow remote stalls only the calling request
    pub fn new() -> Result<CharacterScraper, reqwest::Error>{
        let http_client = Client::builder().build()?;

        Ok(Self{ http_client })
    }

    #[tracing::instrument(
        "Fetching character page",
        skip(self)
    )]
    pub async fn fetch_page(&self, url: &str) -> Result<String, reqwest::Error>{
        let response = self.http_client
            .get(url)
            .send()
            .await?;

        tracing::debug!(status = %response.status(), "Received character page");

        response.text().await
    }

    // Fetch then extract, parsing happens on the blocking pool
    #[tracing::instrument(
        "Scraping character",
        skip(self)
    )]
    pub async fn scrape(&self, url: &str) -> Result<CharacterFields, ScrapeError>{
        let html = self.fetch_page(url).await?;

        let fields = spawn_blocking_with_tracing(move || {
            extract_character(&html)
        })
        .await??;

        Ok(fields)
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractError>{
    Selector::parse(selector)
        .map_err(|e| ExtractError::InvalidSelector(format!("{}: {:?}", selector, e)))
}

fn element_text(element: ElementRef<'_>) -> String{
    element.text().collect::<String>().trim().to_string()
}

fn first_text(document: &Html, selector: &'static str) -> Result<String, ExtractError>{
    let parsed = parse_selector(selector)?;

    document.select(&parsed)
        .next()
        .map(element_text)
        .ok_or(ExtractError::MissingElement(selector))
}

// Text of every `item` inside `.category` blocks whose heading mentions
// `heading`, in document order
fn category_items(document: &Html, (heading, item): (&str, &str)) -> Result<Vec<String>, ExtractError>{
    let category = parse_selector(CATEGORY_SELECTOR)?;
    let heading_selector = parse_selector(HEADING_SELECTOR)?;
    let item_selector = parse_selector(item)?;

    Ok(document.select(&category)
        .filter(|block| {
            block.select(&heading_selector)
                .any(|h| h.text().collect::<String>().contains(heading))
        })
        .flat_map(|block| block.select(&item_selector))
        .map(element_text)
        .collect())
}

/// Pulls the character attributes out of a wiki page.
///
/// The title and description are required, a missing category just yields
/// an empty list.
pub fn extract_character(html: &str) -> Result<CharacterFields, ExtractError>{
    let document = Html::parse_document(html);

    Ok(CharacterFields{
        name: first_text(&document, TITLE_SELECTOR)?,
        description: first_text(&document, DESCRIPTION_SELECTOR)?,
        appearances: category_items(&document, APPEARANCES)?,
        affiliations: category_items(&document, AFFILIATIONS)?,
        locations: category_items(&document, LOCATIONS)?,
        dimensions: category_items(&document, DIMENSIONS)?,
        weapons: category_items(&document, WEAPONS)?,
        vehicles: category_items(&document, VEHICLES)?,
        tools: category_items(&document, TOOLS)?
    })
}
