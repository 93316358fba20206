use std::path::PathBuf;
use actix_web::{App, HttpServer, middleware, web};
use exome::Store;

pub mod error;
pub mod pages;
pub mod site;
pub mod v1;

pub use error::ApiError;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";

pub struct Config {
    pub database_file: String,
    pub bind_address: String,
}

impl Config {
    pub fn from_env() -> Option<Config> {
        let database_file = std::env::var("DATABASE_FILE").ok()?;
        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
        Some(Config { database_file, bind_address })
    }
}

/// Shared by every worker. Holds no connection: each request opens its
/// own read-only store handle.
pub struct AppData {
    pub database: PathBuf,
}

impl AppData {
    pub fn new<P: Into<PathBuf>>(database: P) -> AppData {
        AppData { database: database.into() }
    }

    pub fn store(&self) -> exome::Result<Store> {
        Store::open(&self.database)
    }
}

/// Runs a store query on the blocking thread pool with a fresh handle.
pub async fn with_store<F, T>(data: web::Data<AppData>, query: F) -> Result<exome::Result<T>, ApiError>
    where
        F: FnOnce(&Store) -> exome::Result<T> + Send + 'static,
        T: Send + 'static,
{
    let result = web::block(move || {
        let store = data.store()?;
        query(&store)
    }).await?;
    Ok(result)
}

pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub async fn server(config: Config) -> std::io::Result<()> {
    let data = web::Data::new(AppData::new(config.database_file));
    HttpServer::new(move || App::new()
        .app_data(data.clone())
        .wrap(middleware::NormalizePath::trim())
        .wrap(middleware::Logger::default())
        .configure(routes))
        .bind(&config.bind_address)?
        .run()
        .await
}

pub fn routes(app: &mut web::ServiceConfig) {
    app.service(v1::routes(web::scope("/api/v1")))
        .service(web::resource("/")
            .route(web::get().to(site::index)))
        .service(web::resource("/search")
            .route(web::post().to(site::search)))
        .service(web::resource("/{symbol}")
            .route(web::get().to(site::gene)));
}
