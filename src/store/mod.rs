use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::bookings::models::{Booking, BookingListing, NewBooking};
use crate::db;
use crate::errors::ServiceError;
use crate::tables::Table;

#[cfg(test)]
pub mod memory;

/// Everything the handlers need from the database
#[async_trait]
pub trait Store: Send + Sync {
    /// all tables ordered by id
    async fn tables(&self) -> Result<Vec<Table>, ServiceError>;

    /// a single table, `ServiceError::NotFound` if it doesn't exist
    async fn table(&self, id: i32) -> Result<Table, ServiceError>;

    /// amount of bookings for a table at an exact date
    async fn count_bookings(&self, table_id: i32, date: NaiveDateTime)
        -> Result<i64, ServiceError>;

    /// store a booking, returns `ServiceError::SlotAlreadyBooked` when
    /// the slot got taken in the meantime
    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, ServiceError>;

    /// all bookings with their table, latest date first
    async fn bookings(&self) -> Result<Vec<BookingListing>, ServiceError>;
}

#[async_trait]
impl Store for db::Pool {
    async fn tables(&self) -> Result<Vec<Table>, ServiceError> {
        Ok(Table::find_all(self).await?)
    }

    async fn table(&self, id: i32) -> Result<Table, ServiceError> {
        Table::find_by_id(id, self).await.map_err(|error| match error {
            sqlx::Error::RowNotFound => ServiceError::NotFound("Table not found".to_string()),
            _ => error.into(),
        })
    }

    async fn count_bookings(
        &self,
        table_id: i32,
        date: NaiveDateTime,
    ) -> Result<i64, ServiceError> {
        Ok(Booking::count_slot(table_id, date, self).await?)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, ServiceError> {
        Ok(booking.save(self).await?)
    }

    async fn bookings(&self) -> Result<Vec<BookingListing>, ServiceError> {
        Ok(Booking::find_all(self).await?)
    }
}
