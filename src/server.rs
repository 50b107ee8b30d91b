use std::sync::Arc;

use actix_files as fs;
use actix_web::{get, middleware, web, App, HttpRequest, HttpResponse, HttpServer};

use crate::bookings;
use crate::config::Config;
use crate::db;
use crate::errors::ServiceError;
use crate::store::Store;
use crate::tables;

pub type Response = Result<HttpResponse, ServiceError>;

#[get("/health")]
async fn health(_: HttpRequest) -> &'static str {
    "ok"
}

/// Form bodies are small, anything that can't be decoded is a bad request
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(16_384)
        .error_handler(|error, _| {
            debug!("unable to decode form: {}", error);
            ServiceError::BadRequest("Unable to process the form".to_string()).into()
        })
}

/// Assets referenced by the pages, served from `dir`
pub fn static_files(dir: &str) -> fs::Files {
    fs::Files::new("/static", dir)
}

/// Every page of the application
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
    tables::routes::register(cfg);
    bookings::routes::register(cfg);
}

pub async fn launch(db_pool: db::Pool) -> std::io::Result<()> {
    let store: web::Data<dyn Store> = web::Data::from(Arc::new(db_pool) as Arc<dyn Store>);
    let address = format!("{}:{}", Config::api_host(), Config::api_port());

    info!("listening on http://{}", address);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(form_config())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Version", env!("CARGO_PKG_VERSION"))),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes)
            .service(static_files(Config::static_dir()))
    })
    .bind(address)?
    .run()
    .await
}
