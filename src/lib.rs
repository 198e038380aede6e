pub mod routes;
pub mod startup;
pub mod configuration;
pub mod telemetry;
pub mod utils;
pub mod database;
pub mod schema;
pub mod models;
pub mod password;
pub mod validation;
pub mod character_scraper;
pub mod domain;
pub mod db_interaction;
