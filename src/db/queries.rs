use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{Booking, BookingStatus, LocationType, SiteContent};

// ── Site content ──

pub fn get_content(conn: &Connection) -> anyhow::Result<Option<SiteContent>> {
    let result = conn.query_row(
        "SELECT document FROM site_content WHERE id = 1",
        [],
        |row| row.get::<_, String>(0),
    );

    match result {
        Ok(document) => Ok(Some(serde_json::from_str(&document)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn save_content(conn: &Connection, content: &SiteContent) -> anyhow::Result<()> {
    let document = serde_json::to_string(content)?;
    let now = Utc::now().to_rfc3339();

    conn.execute(
        "INSERT INTO site_content (id, document, updated_at) VALUES (1, ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET
           document = excluded.document,
           updated_at = excluded.updated_at",
        params![document, now],
    )?;
    Ok(())
}

// ── Bookings ──

const BOOKING_COLUMNS: &str =
    "id, service_id, date, customer_name, email, phone, status, location_type, address, time_slot, created_at";

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.map(|t| t.to_rfc3339());

    conn.execute(
        "INSERT INTO bookings (id, service_id, date, customer_name, email, phone, status, location_type, address, time_slot, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            booking.id,
            booking.service_id,
            booking.date,
            booking.customer_name,
            booking.email,
            booking.phone,
            booking.status.as_str(),
            booking.location_type.map(|l| l.as_str()),
            booking.address,
            booking.time_slot,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_bookings(
    conn: &Connection,
    status_filter: Option<BookingStatus>,
) -> anyhow::Result<Vec<Booking>> {
    let mut bookings = vec![];
    match status_filter {
        Some(status) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings WHERE status = ?1 ORDER BY seq ASC"
            ))?;
            let rows = stmt.query_map(params![status.as_str()], |row| Ok(parse_booking_row(row)))?;
            for row in rows {
                bookings.push(row??);
            }
        }
        None => {
            let mut stmt =
                conn.prepare(&format!("SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY seq ASC"))?;
            let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;
            for row in rows {
                bookings.push(row??);
            }
        }
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        &format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1"),
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let status_str: String = row.get(6)?;
    let location_str: Option<String> = row.get(7)?;
    let created_at_str: Option<String> = row.get(10)?;

    let created_at = created_at_str
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));

    Ok(Booking {
        id: row.get(0)?,
        service_id: row.get(1)?,
        date: row.get(2)?,
        customer_name: row.get(3)?,
        email: row.get(4)?,
        phone: row.get(5)?,
        status: BookingStatus::parse(&status_str),
        location_type: location_str.as_deref().and_then(LocationType::parse),
        address: row.get(8)?,
        time_slot: row.get(9)?,
        created_at,
    })
}
