use chrono::NaiveDateTime;
use regex::Regex;

use crate::bookings::models::{Booking, NewBooking, INPUT_DATE_FORMAT};
use crate::errors::{InvalidInput, ServiceError};
use crate::store::Store;

lazy_static! {
    static ref DATE_PATTERN: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}$").unwrap();
}

/// The booking form exactly as it was submitted.
///
/// **POST /book/submit**
///
/// Missing fields are treated as empty, so they fail validation
/// instead of failing to deserialize.
///
/// ``` shell
/// curl --request POST 'http://localhost:8080/book/submit' \
///     --data 'table_id=1&guests=2&date=2030-01-01T19:00&name=Ann&email=a@x.com&phone=123'
/// ```
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookingForm {
    #[serde(default)]
    pub table_id: String,
    #[serde(default)]
    pub guests: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Parse a strictly positive integer, surrounding whitespace is not allowed
pub fn parse_positive(value: &str) -> Option<i32> {
    value.parse::<i32>().ok().filter(|n| *n > 0)
}

/// Parse a `YYYY-MM-DDTHH:MM` date, shorter fields, seconds or offsets are rejected
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    if !DATE_PATTERN.is_match(value) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, INPUT_DATE_FORMAT).ok()
}

impl BookingForm {
    /// Validate the form against the current time.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// table id, guests, date format, date in the future, contact details.
    pub fn validate(&self, now: NaiveDateTime) -> Result<NewBooking, ServiceError> {
        let table_id = parse_positive(&self.table_id).ok_or(InvalidInput::TableId)?;
        trace!("table_id: {}", table_id);

        let guests = parse_positive(&self.guests).ok_or(InvalidInput::GuestCount)?;
        trace!("guests: {}", guests);

        let date = parse_date(&self.date).ok_or(InvalidInput::DateFormat)?;
        trace!("raw date {:?} parsed as {}", self.date, date);

        if date <= now {
            return Err(ServiceError::DateInPast);
        }

        let name = required("name", &self.name)?;
        let email = required("email", &self.email)?;
        let phone = required("phone", &self.phone)?;

        Ok(NewBooking {
            table_id,
            name,
            email,
            phone,
            date,
            guests,
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, InvalidInput> {
    if value.trim().is_empty() {
        return Err(InvalidInput::MissingContact(field));
    }
    Ok(value.to_string())
}

/// Validate a submission and store it when its slot is still free.
///
/// Runs at most one count query and one insert, nothing is written when
/// validation fails. Two submissions racing for the same slot can both pass
/// the count, the unique constraint on the slot rejects the second insert.
#[tracing::instrument(name = "bookings::submit", skip(form, store))]
pub async fn submit(
    form: &BookingForm,
    store: &dyn Store,
    now: NaiveDateTime,
) -> Result<Booking, ServiceError> {
    trace!("received booking form: {:?}", form);

    let booking = form.validate(now).map_err(|e| {
        debug!("rejected booking form: {}", e);
        e
    })?;

    let existing = store.count_bookings(booking.table_id, booking.date).await?;
    if existing > 0 {
        debug!(
            "table {} is already booked at {}",
            booking.table_id, booking.date
        );
        return Err(ServiceError::SlotAlreadyBooked);
    }

    trace!("saving booking: {:?}", booking);
    let booking = store.insert_booking(&booking).await?;
    info!(
        "booked table {} at {} for {} guests",
        booking.table_id,
        booking.date_input(),
        booking.guests
    );

    Ok(booking)
}
