use std::path::Path;
use tracing::info;

use exome_api::app::{init_logging, server, Config};

fn main() {
    match run() {
        Ok(()) => (),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), String> {
    // A missing .env is fine; the variables may come from the environment
    dotenv::dotenv().ok();
    init_logging();

    let config = Config::from_env()
        .ok_or("failed to read Config from environment: DATABASE_FILE is not set")?;
    if !Path::new(&config.database_file).is_file() {
        return Err(format!("database file {} does not exist", config.database_file));
    }

    info!(database = %config.database_file, bind = %config.bind_address, "starting server");
    actix_web::rt::System::new()
        .block_on(server(config))
        .map_err(|e| format!("server failed: {:?}", e))
}
