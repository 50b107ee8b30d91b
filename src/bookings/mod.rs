pub mod models;
pub mod routes;
pub mod submission;

pub use models::BookingView;
