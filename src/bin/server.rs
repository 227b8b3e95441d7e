use std::net::TcpListener;
use std::sync::Arc;

use al_asas::config::Config;
use al_asas::http;
use al_asas::store::SqliteStore;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();
    let config = Config::from_env();

    let store = SqliteStore::open(&config.database_path)?;

    log::info!("Starting server at http://{}", config.bind_address);
    let listener = TcpListener::bind(&config.bind_address)?;
    http::run(listener, Arc::new(store))?.await?;
    Ok(())
}
