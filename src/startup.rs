use std::net::TcpListener;

use actix_web::{dev::Server, http::StatusCode, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::{
    character_scraper::CharacterScraper,
    configuration::Settings,
    database::{get_connection_pool, run_migrations},
    routes::{
        create_character, create_user, delete_user, get_data_warehouse, get_inventory, get_inventory_item,
        get_product, get_sale, get_user, health_check, list_products, list_sales, list_users,
        post_data_warehouse, scrape_character, update_user,
    },
    utils::{detail_response, DbPool},
    validation::path_error_handler,
};

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    // Opens the database (creating file and tables if needed) and binds the listener
    pub async fn new(settings: Settings) -> Result<Self, anyhow::Error>{
        let pool = get_connection_pool(&settings.database)?;
        run_migrations(&pool)?;

        let scraper = CharacterScraper::new()
                        .context("Failed to build http client")?;

        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
                        .context("Failed to bind address")?;
        let port = listener.local_addr()?.port();

        tracing::info!(host = %settings.application.host, port, "Starting server");

        let server = run(listener, pool, scraper)?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

async fn not_found() -> HttpResponse{
    detail_response(StatusCode::NOT_FOUND, "Not Found")
}

pub fn run(
    listener: TcpListener,
    pool: DbPool,
    scraper: CharacterScraper
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let scraper = web::Data::new(scraper);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .app_data(pool.clone())
            .app_data(scraper.clone())
            .route("/health", web::get().to(health_check))
            .route("/users/", web::get().to(list_users))
            .route("/users/", web::post().to(create_user))
            .route("/users/{id}", web::get().to(get_user))
            .route("/users/{id}", web::put().to(update_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/products/", web::get().to(list_products))
            .route("/products/{id}", web::get().to(get_product))
            .route("/inventory/", web::get().to(get_inventory))
            .route("/inventory/{id}", web::get().to(get_inventory_item))
            .route("/sales/", web::get().to(list_sales))
            .route("/sales/{id}", web::get().to(get_sale))
            .route("/data_warehouse/", web::post().to(post_data_warehouse))
            .route("/data_warehouse/{id}", web::get().to(get_data_warehouse))
            .route("/scrape_character", web::post().to(scrape_character))
            .route("/manualy_create_character", web::post().to(create_character))
            .default_service(web::to(not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
