use std::{net::TcpListener, time::Duration};

use bookscape::{
    configuration::get_configuration, questions::ScriptCatalog, services::CatalogClient,
    startup::run,
};
use env_logger::Env;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    if configuration.catalog.api_key.is_empty() {
        panic!("Catalog API key is missing. Set BOOKSCAPE_CATALOG__API_KEY.");
    }

    let pool_options = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10));
    let connection_pool = pool_options.connect_lazy_with(configuration.database.with_db());

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let catalog_client = CatalogClient::new(configuration.catalog.api_key);
    let script_catalog = ScriptCatalog::new(configuration.application.sql_scripts_dir);

    run(listener, connection_pool, catalog_client, script_catalog)?.await
}
