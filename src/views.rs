//! Server side rendered html pages

use std::fmt::{self, Write};

use crate::bookings::models::BookingView;
use crate::tables::Table;

pub type Page = Result<String, fmt::Error>;

/// Escapes text so it can be placed inside html elements and quoted attributes
#[derive(Debug)]
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

fn layout(title: &str, body: &str) -> Page {
    let mut html = String::with_capacity(body.len() + 512);

    write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<nav><a href="/">Tables</a><a href="/bookings">My bookings</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = Escaped(title),
        body = body,
    )?;

    Ok(html)
}

/// GET /
pub fn home(tables: &[Table]) -> Page {
    let mut body = String::new();

    if tables.is_empty() {
        body.push_str("<p>There are no tables yet.</p>\n");
        return layout("Table booking", &body);
    }

    body.push_str("<table>\n<tr><th>#</th><th>Seats</th><th>Location</th><th></th></tr>\n");
    for table in tables {
        writeln!(
            body,
            r#"<tr><td>{id}</td><td>{capacity}</td><td>{location}</td><td><a href="/book?table_id={id}">Book</a></td></tr>"#,
            id = table.id,
            capacity = table.capacity,
            location = Escaped(&table.location),
        )?;
    }
    body.push_str("</table>\n");

    layout("Table booking", &body)
}

/// GET /book?table_id=
pub fn book_form(table: &Table) -> Page {
    let mut body = String::new();

    write!(
        body,
        r#"<p>{location}, up to {capacity} guests</p>
<form method="post" action="/book/submit">
<input type="hidden" name="table_id" value="{id}">
<label>Guests <input type="number" name="guests" min="1" max="{capacity}" required></label>
<label>Date <input type="datetime-local" name="date" required></label>
<label>Name <input type="text" name="name" required></label>
<label>Email <input type="email" name="email" required></label>
<label>Phone <input type="tel" name="phone" required></label>
<button type="submit">Book</button>
</form>
"#,
        id = table.id,
        capacity = table.capacity,
        location = Escaped(&table.location),
    )?;

    layout(&format!("Book table #{}", table.id), &body)
}

/// GET /bookings
pub fn bookings(bookings: &[BookingView], success: bool) -> Page {
    let mut body = String::new();

    if success {
        body.push_str("<p class=\"success\">Your table has been booked!</p>\n");
    }

    if bookings.is_empty() {
        body.push_str("<p>No bookings yet.</p>\n");
        return layout("My bookings", &body);
    }

    body.push_str(
        "<table>\n<tr><th>Date</th><th>Time</th><th>Table</th><th>Guests</th><th>Name</th><th>Email</th><th>Phone</th></tr>\n",
    );
    for view in bookings {
        let booking = &view.booking;
        writeln!(
            body,
            "<tr><td>{}</td><td>{}</td><td>#{} {} ({} seats)</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            Escaped(&view.formatted_date),
            Escaped(&view.formatted_time),
            booking.table_id,
            Escaped(&booking.location),
            booking.capacity,
            booking.guests,
            Escaped(&booking.name),
            Escaped(&booking.email),
            Escaped(&booking.phone),
        )?;
    }
    body.push_str("</table>\n");

    layout("My bookings", &body)
}

pub fn error_page(message: &str) -> Page {
    let body = format!(
        "<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to the tables</a></p>\n",
        Escaped(message)
    );

    layout("Error", &body)
}
