use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{BookingStore, ContentStore};
use crate::models::{Booking, BookingStatus, SiteContent};

pub const CONTENT_FILE: &str = "content.json";
pub const BOOKINGS_FILE: &str = "bookings.json";

fn read_document<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Option<T>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let value = serde_json::from_str(&raw)
        .with_context(|| format!("malformed JSON in {}", path.display()))?;
    Ok(Some(value))
}

fn write_document<T: Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let body = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, body).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("failed to replace {}", path.display()))?;
    Ok(())
}

pub struct JsonContentStore {
    path: PathBuf,
}

impl JsonContentStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContentStore for JsonContentStore {
    fn load(&self) -> anyhow::Result<Option<SiteContent>> {
        read_document(&self.path)
    }

    fn save(&self, content: &SiteContent) -> anyhow::Result<()> {
        write_document(&self.path, content)
    }
}

pub struct JsonBookingStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonBookingStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> anyhow::Result<Vec<Booking>> {
        Ok(read_document(&self.path)?.unwrap_or_default())
    }
}

impl BookingStore for JsonBookingStore {
    fn list(&self, status: Option<BookingStatus>) -> anyhow::Result<Vec<Booking>> {
        let mut bookings = self.read_all()?;
        if let Some(status) = status {
            bookings.retain(|b| b.status == status);
        }
        Ok(bookings)
    }

    fn get(&self, id: &str) -> anyhow::Result<Option<Booking>> {
        Ok(self.read_all()?.into_iter().find(|b| b.id == id))
    }

    fn insert(&self, booking: &Booking) -> anyhow::Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("booking store lock poisoned"))?;

        // A malformed file fails here instead of being overwritten.
        let mut bookings = self.read_all()?;
        bookings.push(booking.clone());
        write_document(&self.path, &bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LocationType;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("nailsure-json-{}", uuid::Uuid::new_v4()))
    }

    fn booking(id: &str) -> Booking {
        Booking {
            id: id.to_string(),
            service_id: "classic-manicure".to_string(),
            date: "2025-02-01".to_string(),
            customer_name: "Bea".to_string(),
            email: "bea@example.com".to_string(),
            phone: "5552223333".to_string(),
            status: BookingStatus::Pending,
            location_type: Some(LocationType::Studio),
            address: None,
            time_slot: Some("11:30 AM".to_string()),
            created_at: None,
        }
    }

    #[test]
    fn test_content_missing_file_is_none() {
        let store = JsonContentStore::new(temp_dir().join(CONTENT_FILE));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_content_save_creates_directory() {
        let dir = temp_dir();
        let store = JsonContentStore::new(dir.join("nested").join(CONTENT_FILE));
        store.save(&SiteContent::default()).unwrap();
        assert_eq!(store.load().unwrap(), Some(SiteContent::default()));
        assert!(!dir.join("nested").join("content.json.tmp").exists());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_content_malformed_is_error() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(CONTENT_FILE), "{ not json").unwrap();
        let store = JsonContentStore::new(dir.join(CONTENT_FILE));
        assert!(store.load().is_err());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bookings_missing_file_is_empty() {
        let store = JsonBookingStore::new(temp_dir().join(BOOKINGS_FILE));
        assert!(store.list(None).unwrap().is_empty());
        assert!(store.get("nope").unwrap().is_none());
    }

    #[test]
    fn test_bookings_insert_appends_in_order() {
        let dir = temp_dir();
        let store = JsonBookingStore::new(dir.join(BOOKINGS_FILE));
        store.insert(&booking("a")).unwrap();
        store.insert(&booking("b")).unwrap();

        let ids: Vec<String> = store.list(None).unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(store.get("b").unwrap().unwrap().time_slot.as_deref(), Some("11:30 AM"));

        // Stored as a plain JSON array.
        let raw = fs::read_to_string(dir.join(BOOKINGS_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bookings_status_filter() {
        let dir = temp_dir();
        let store = JsonBookingStore::new(dir.join(BOOKINGS_FILE));
        let mut cancelled = booking("c");
        cancelled.status = BookingStatus::Cancelled;
        store.insert(&booking("p")).unwrap();
        store.insert(&cancelled).unwrap();

        let pending = store.list(Some(BookingStatus::Pending)).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "p");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_insert_refuses_to_overwrite_malformed_file() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BOOKINGS_FILE), "garbage").unwrap();
        let store = JsonBookingStore::new(dir.join(BOOKINGS_FILE));

        assert!(store.insert(&booking("x")).is_err());
        assert_eq!(fs::read_to_string(dir.join(BOOKINGS_FILE)).unwrap(), "garbage");
        let _ = fs::remove_dir_all(dir);
    }
}
