/// Answer the request with HTTP 200 and the rendered page as response body
#[macro_export]
macro_rules! http_ok_html {
    ($page:expr) => {
        return Ok(actix_web::HttpResponse::Ok()
            .content_type(actix_web::http::header::ContentType::html())
            .body($page));
    };
}

/// Answer the request with HTTP 303, pointing the browser to another page
#[macro_export]
macro_rules! http_see_other {
    ($location:expr) => {
        return Ok(actix_web::HttpResponse::SeeOther()
            .insert_header((actix_web::http::header::LOCATION, $location))
            .finish());
    };
}
