use actix_web::get;
use actix_web::web;
use actix_web::web::{Data, Form, Query};
use chrono::Local;

use crate::bookings::submission::{self, BookingForm};
use crate::bookings::BookingView;
use crate::server::Response;
use crate::store::Store;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    success: Option<String>,
}

async fn submit(form: Form<BookingForm>, store: Data<dyn Store>) -> Response {
    let now = Local::now().naive_local();

    submission::submit(&form, store.get_ref(), now).await?;

    http_see_other!("/bookings?success=true");
}

#[get("/bookings")]
async fn find_all(query: Query<BookingsQuery>, store: Data<dyn Store>) -> Response {
    let success = query.success.as_deref() == Some("true");

    let bookings: Vec<BookingView> = store
        .bookings()
        .await?
        .into_iter()
        .map(BookingView::from)
        .collect();

    http_ok_html!(views::bookings(&bookings, success)?);
}

pub fn register(cfg: &mut web::ServiceConfig) {
    // other methods on this resource are answered with 405
    cfg.service(web::resource("/book/submit").route(web::post().to(submit)));
    cfg.service(find_all);
}
