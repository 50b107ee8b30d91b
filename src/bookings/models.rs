use chrono::NaiveDateTime;

use crate::db;

/// The only date format accepted from the booking form, e.g. `2030-01-01T19:00`
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";
const DISPLAY_TIME_FORMAT: &str = "%H:%M";

/// A persisted booking for a single table at a single point in time
#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct Booking {
    pub id: i32,
    pub table_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDateTime,
    pub guests: i32,
    pub created_at: NaiveDateTime,
}

/// A validated booking that hasn't been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub table_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDateTime,
    pub guests: i32,
}

/// A booking joined with the table it's made for
#[derive(Debug, Clone, sqlx::FromRow, PartialEq)]
pub struct BookingListing {
    pub id: i32,
    pub table_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDateTime,
    pub guests: i32,
    pub created_at: NaiveDateTime,
    pub capacity: i32,
    pub location: String,
}

/// A listed booking with its date split up for display
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub booking: BookingListing,
    pub formatted_date: String,
    pub formatted_time: String,
}

impl Booking {
    /// The date as it was entered in the booking form
    pub fn date_input(&self) -> String {
        self.date.format(INPUT_DATE_FORMAT).to_string()
    }

    /// Count the bookings that occupy the given slot
    #[tracing::instrument(name = "Booking::count_slot", skip(db))]
    pub async fn count_slot(
        table_id: i32,
        date: NaiveDateTime,
        db: &db::Pool,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE table_id = $1 AND date = $2")
            .bind(table_id)
            .bind(date)
            .fetch_one(db)
            .await
    }

    /// Bookings with their table, newest slot first
    #[tracing::instrument(name = "Booking::find_all", skip(db))]
    pub async fn find_all(db: &db::Pool) -> Result<Vec<BookingListing>, sqlx::Error> {
        sqlx::query_as::<_, BookingListing>(
            "SELECT b.id, b.table_id, b.name, b.email, b.phone, b.date, b.guests, b.created_at,
                    t.capacity, t.location
             FROM bookings b JOIN tables t ON b.table_id = t.id
             ORDER BY b.date DESC, b.id DESC",
        )
        .fetch_all(db)
        .await
    }
}

impl NewBooking {
    /// Store the booking, a taken slot results in a unique violation
    /// and an unknown table in a foreign key violation
    #[tracing::instrument(name = "NewBooking::save", skip(self, db), fields(table_id = self.table_id))]
    pub async fn save(&self, db: &db::Pool) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (table_id, name, email, phone, date, guests)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, table_id, name, email, phone, date, guests, created_at",
        )
        .bind(self.table_id)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.phone)
        .bind(self.date)
        .bind(self.guests)
        .fetch_one(db)
        .await
    }
}

impl From<BookingListing> for BookingView {
    fn from(booking: BookingListing) -> Self {
        BookingView {
            formatted_date: booking.date.format(DISPLAY_DATE_FORMAT).to_string(),
            formatted_time: booking.date.format(DISPLAY_TIME_FORMAT).to_string(),
            booking,
        }
    }
}
