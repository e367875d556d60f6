use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Booking, BookingInput, BookingRequest, BookingStatus};
use crate::state::AppState;
use crate::store::BookingStore;

pub const STUDIO_SLOTS: [&str; 7] = [
    "09:00", "10:00", "11:00", "13:00", "14:00", "15:00", "16:00",
];

pub struct BookingRepository {
    store: Arc<dyn BookingStore>,
}

impl BookingRepository {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub fn list_all(&self) -> Vec<Booking> {
        self.list_by_status(None)
    }

    pub fn list_by_status(&self, status: Option<BookingStatus>) -> Vec<Booking> {
        self.store.list(status).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "failed to load bookings, treating as empty");
            Vec::new()
        })
    }

    pub fn get(&self, id: &str) -> Result<Option<Booking>, AppError> {
        Ok(self.store.get(id)?)
    }

    pub fn append(&self, input: BookingInput) -> Result<Booking, AppError> {
        let booking = input.into_booking(Uuid::new_v4().to_string(), Utc::now());
        self.store.insert(&booking)?;
        Ok(booking)
    }

    pub fn available_slots(&self, _date: &str) -> Vec<String> {
        STUDIO_SLOTS.iter().map(|s| s.to_string()).collect()
    }
}

pub async fn submit_booking(state: &AppState, request: BookingRequest) -> Result<Booking, AppError> {
    let input = request.into_input();
    input.validate()?;

    let booking = state.bookings.append(input)?;
    tracing::info!(
        booking_id = %booking.id,
        service_id = %booking.service_id,
        date = %booking.date,
        time_slot = booking.time_slot.as_deref().unwrap_or("-"),
        "booking received"
    );

    notify_booking(state, &booking).await;
    Ok(booking)
}

async fn notify_booking(state: &AppState, booking: &Booking) {
    let service_name = state
        .content
        .read()
        .service(&booking.service_id)
        .map(|s| s.name.clone())
        .unwrap_or_else(|| booking.service_id.clone());
    let when = match booking.time_slot.as_deref() {
        Some(slot) => format!("{} at {slot}", booking.date),
        None => booking.date.clone(),
    };

    let customer_body = format!(
        "Hi {},\n\nWe received your request for {service_name} on {when}. \
         We'll confirm your appointment shortly.\n\nReference: {}",
        booking.customer_name, booking.id
    );
    if let Err(e) = state
        .mailer
        .send_mail(&booking.email, "Booking request received", &customer_body)
        .await
    {
        tracing::warn!(error = %e, booking_id = %booking.id, "failed to mail customer");
    }

    let location = booking
        .location_type
        .map(|l| l.as_str())
        .unwrap_or("unspecified");
    let owner_body = format!(
        "New booking {}\n{service_name} on {when} ({location})\n{} <{}> {}{}",
        booking.id,
        booking.customer_name,
        booking.email,
        booking.phone,
        booking
            .address
            .as_deref()
            .map(|a| format!("\nAddress: {a}"))
            .unwrap_or_default(),
    );
    if let Err(e) = state
        .mailer
        .send_mail(&state.config.owner_email, "New booking request", &owner_body)
        .await
    {
        tracing::warn!(error = %e, booking_id = %booking.id, "failed to mail owner");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::Mutex;

    use super::*;
    use crate::db;
    use crate::models::LocationType;
    use crate::store::json::{JsonBookingStore, BOOKINGS_FILE};
    use crate::store::sqlite::SqliteStore;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("nailsure-bookings-{}", Uuid::new_v4()))
    }

    fn json_repo(dir: &std::path::Path) -> BookingRepository {
        BookingRepository::new(Arc::new(JsonBookingStore::new(dir.join(BOOKINGS_FILE))))
    }

    fn input(name: &str) -> BookingInput {
        BookingInput {
            service_id: "gel-extension".to_string(),
            date: "2025-01-15".to_string(),
            customer_name: name.to_string(),
            email: "jane@x.com".to_string(),
            phone: "5551234567".to_string(),
            location_type: Some(LocationType::Studio),
            address: None,
            time_slot: Some("2:00 PM".to_string()),
        }
    }

    #[test]
    fn test_list_all_missing_storage_is_empty() {
        let dir = temp_dir();
        assert!(json_repo(&dir).list_all().is_empty());
    }

    #[test]
    fn test_list_all_malformed_storage_is_empty() {
        let dir = temp_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BOOKINGS_FILE), "{").unwrap();
        assert!(json_repo(&dir).list_all().is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_append_assigns_id_and_pending_status() {
        let dir = temp_dir();
        let repo = json_repo(&dir);

        let booking = repo.append(input("Jane Doe")).unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(Uuid::parse_str(&booking.id).is_ok());
        assert_eq!(booking.service_id, "gel-extension");
        assert_eq!(booking.date, "2025-01-15");
        assert_eq!(booking.customer_name, "Jane Doe");
        assert_eq!(booking.email, "jane@x.com");
        assert_eq!(booking.phone, "5551234567");
        assert_eq!(booking.time_slot.as_deref(), Some("2:00 PM"));
        assert!(booking.created_at.is_some());

        assert_eq!(repo.list_all(), vec![booking.clone()]);
        assert_eq!(repo.get(&booking.id).unwrap(), Some(booking));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_append_generates_unique_ids() {
        let dir = temp_dir();
        let repo = json_repo(&dir);
        let ids: HashSet<String> = (0..20)
            .map(|i| repo.append(input(&format!("Guest {i}"))).unwrap().id)
            .collect();
        assert_eq!(ids.len(), 20);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_concurrent_appends_are_all_persisted() {
        let dir = temp_dir();
        let repo = Arc::new(json_repo(&dir));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || repo.append(input(&format!("Guest {i}"))).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.list_all().len(), 8);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_append_with_sqlite_store() {
        let conn = db::init_db(":memory:").unwrap();
        let repo = BookingRepository::new(Arc::new(SqliteStore::new(Arc::new(Mutex::new(conn)))));

        let first = repo.append(input("Jane Doe")).unwrap();
        let second = repo.append(input("John Roe")).unwrap();
        let all = repo.list_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].id, second.id);
        assert_eq!(repo.list_by_status(Some(BookingStatus::Confirmed)).len(), 0);
    }

    #[test]
    fn test_available_slots_are_static() {
        let dir = temp_dir();
        let repo = json_repo(&dir);
        let monday = repo.available_slots("2025-06-16");
        repo.append(input("Jane Doe")).unwrap();
        let later = repo.available_slots("2031-12-24");

        assert_eq!(monday, later);
        assert_eq!(monday.len(), 7);
        assert_eq!(monday.first().map(String::as_str), Some("09:00"));
        let _ = fs::remove_dir_all(dir);
    }
}
