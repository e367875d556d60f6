use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use super::{BookingStore, ContentStore};
use crate::db::queries;
use crate::models::{Booking, BookingStatus, SiteContent};

pub struct SqliteStore {
    db: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Connection>>) -> Self {
        Self { db }
    }

    fn conn(&self) -> anyhow::Result<MutexGuard<'_, Connection>> {
        self.db
            .lock()
            .map_err(|_| anyhow::anyhow!("database lock poisoned"))
    }
}

impl ContentStore for SqliteStore {
    fn load(&self) -> anyhow::Result<Option<SiteContent>> {
        let conn = self.conn()?;
        queries::get_content(&conn)
    }

    fn save(&self, content: &SiteContent) -> anyhow::Result<()> {
        let conn = self.conn()?;
        queries::save_content(&conn, content)
    }
}

impl BookingStore for SqliteStore {
    fn list(&self, status: Option<BookingStatus>) -> anyhow::Result<Vec<Booking>> {
        let conn = self.conn()?;
        queries::get_all_bookings(&conn, status)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        let conn = self.conn()?;
        queries::get_booking_by_id(&conn, id)
    }

    fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        let conn = self.conn()?;
        queries::create_booking(&conn, booking)
    }
}
