use actix_web::get;
use actix_web::web;
use actix_web::web::{Data, Query};

use crate::bookings::submission::parse_positive;
use crate::errors::InvalidInput;
use crate::server::Response;
use crate::store::Store;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct BookQuery {
    #[serde(default)]
    table_id: String,
}

#[get("/")]
async fn find_all(store: Data<dyn Store>) -> Response {
    let tables = store.tables().await?;

    http_ok_html!(views::home(&tables)?);
}

#[get("/book")]
async fn book(query: Query<BookQuery>, store: Data<dyn Store>) -> Response {
    let table_id = parse_positive(&query.table_id).ok_or(InvalidInput::TableId)?;

    let table = store.table(table_id).await?;

    http_ok_html!(views::book_form(&table)?);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(find_all);
    cfg.service(book);
}
