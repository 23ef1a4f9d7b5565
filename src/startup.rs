use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use crate::{
    questions::ScriptCatalog,
    routes::{extraction_route, home_route, insights_route},
    services::CatalogClient,
};

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    catalog_client: CatalogClient,
    script_catalog: ScriptCatalog,
) -> Result<Server, std::io::Error> {
    let db_pool = web::Data::new(db_pool);
    let catalog_client = web::Data::new(catalog_client);
    let script_catalog = web::Data::new(script_catalog);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(home_route::home)
            .service(
                web::scope("/extraction")
                    .service(extraction_route::extraction)
                    .service(extraction_route::search)
                    .service(extraction_route::download),
            )
            .service(web::scope("/insights").service(insights_route::insights))
            .app_data(db_pool.clone())
            .app_data(catalog_client.clone())
            .app_data(script_catalog.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
