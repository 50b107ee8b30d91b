use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use tokio::sync::Mutex;

use super::Store;
use crate::bookings::models::{Booking, BookingListing, NewBooking};
use crate::db::SEED_TABLES;
use crate::errors::ServiceError;
use crate::tables::Table;

/// In-memory store with the same constraints as the postgres schema,
/// it counts the statements it runs so tests can assert on writes
#[derive(Debug)]
pub struct MemoryStore {
    tables: Vec<Table>,
    bookings: Mutex<Vec<Booking>>,
    selects: AtomicUsize,
    inserts: AtomicUsize,
    fail: bool,
}

impl MemoryStore {
    /// A store holding the seeded tables
    pub fn new() -> Self {
        let tables = SEED_TABLES
            .iter()
            .zip(1..)
            .map(|(&(capacity, location), id)| Table {
                id,
                capacity,
                location: location.to_string(),
            })
            .collect();

        MemoryStore {
            tables,
            bookings: Mutex::new(Vec::new()),
            selects: AtomicUsize::new(0),
            inserts: AtomicUsize::new(0),
            fail: false,
        }
    }

    /// A store where every statement fails like an unreachable database
    pub fn broken() -> Self {
        MemoryStore {
            fail: true,
            ..MemoryStore::new()
        }
    }

    pub async fn rows(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }

    pub fn selects(&self) -> usize {
        self.selects.load(Ordering::SeqCst)
    }

    pub fn inserts(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut.into());
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn tables(&self) -> Result<Vec<Table>, ServiceError> {
        self.check()?;
        Ok(self.tables.clone())
    }

    async fn table(&self, id: i32) -> Result<Table, ServiceError> {
        self.check()?;
        self.tables
            .iter()
            .find(|table| table.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::NotFound("Table not found".to_string()))
    }

    async fn count_bookings(
        &self,
        table_id: i32,
        date: NaiveDateTime,
    ) -> Result<i64, ServiceError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let count = self
            .bookings
            .lock()
            .await
            .iter()
            .filter(|b| b.table_id == table_id && b.date == date)
            .count();

        // let concurrent submissions reach their own check before anyone inserts
        tokio::task::yield_now().await;

        Ok(count as i64)
    }

    async fn insert_booking(&self, booking: &NewBooking) -> Result<Booking, ServiceError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        if !self.tables.iter().any(|t| t.id == booking.table_id) {
            return Err(ServiceError::NotFound("Table not found".to_string()));
        }

        let mut bookings = self.bookings.lock().await;

        if bookings
            .iter()
            .any(|b| b.table_id == booking.table_id && b.date == booking.date)
        {
            return Err(ServiceError::SlotAlreadyBooked);
        }

        let stored = Booking {
            id: bookings.len() as i32 + 1,
            table_id: booking.table_id,
            name: booking.name.clone(),
            email: booking.email.clone(),
            phone: booking.phone.clone(),
            date: booking.date,
            guests: booking.guests,
            created_at: Local::now().naive_local(),
        };
        bookings.push(stored.clone());

        Ok(stored)
    }

    async fn bookings(&self) -> Result<Vec<BookingListing>, ServiceError> {
        self.selects.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let mut listings: Vec<BookingListing> = self
            .bookings
            .lock()
            .await
            .iter()
            .filter_map(|b| {
                let table = self.tables.iter().find(|t| t.id == b.table_id)?;
                Some(BookingListing {
                    id: b.id,
                    table_id: b.table_id,
                    name: b.name.clone(),
                    email: b.email.clone(),
                    phone: b.phone.clone(),
                    date: b.date,
                    guests: b.guests,
                    created_at: b.created_at,
                    capacity: table.capacity,
                    location: table.location.clone(),
                })
            })
            .collect();

        listings.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

        Ok(listings)
    }
}
