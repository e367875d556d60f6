pub mod json;
pub mod sqlite;

use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::config::{AppConfig, StorageBackend};
use crate::db;
use crate::models::{Booking, BookingStatus, SiteContent};

pub trait ContentStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<SiteContent>>;

    fn save(&self, content: &SiteContent) -> anyhow::Result<()>;
}

pub trait BookingStore: Send + Sync {
    fn list(&self, status: Option<BookingStatus>) -> anyhow::Result<Vec<Booking>>;

    fn get(&self, id: &str) -> anyhow::Result<Option<Booking>>;

    // Appends one booking. Implementations must not lose concurrent inserts
    // made through the same instance.
    fn insert(&self, booking: &Booking) -> anyhow::Result<()>;
}

pub struct Stores {
    pub content: Arc<dyn ContentStore>,
    pub bookings: Arc<dyn BookingStore>,
}

pub fn open(config: &AppConfig) -> anyhow::Result<Stores> {
    match config.storage {
        StorageBackend::Json => {
            tracing::info!(dir = %config.data_dir.display(), "using JSON file storage");
            Ok(Stores {
                content: Arc::new(json::JsonContentStore::new(
                    config.data_dir.join(json::CONTENT_FILE),
                )),
                bookings: Arc::new(json::JsonBookingStore::new(
                    config.data_dir.join(json::BOOKINGS_FILE),
                )),
            })
        }
        StorageBackend::Sqlite => {
            tracing::info!(path = %config.database_url, "using SQLite storage");
            let conn = db::init_db(&config.database_url)
                .with_context(|| format!("failed to open {}", config.database_url))?;
            let store = Arc::new(sqlite::SqliteStore::new(Arc::new(Mutex::new(conn))));
            Ok(Stores {
                content: store.clone(),
                bookings: store,
            })
        }
    }
}
