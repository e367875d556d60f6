use crate::config::AppConfig;
use crate::services::booking::BookingRepository;
use crate::services::content::ContentRepository;
use crate::services::mail::Mailer;
use crate::store::Stores;

pub struct AppState {
    pub config: AppConfig,
    pub content: ContentRepository,
    pub bookings: BookingRepository,
    pub mailer: Box<dyn Mailer>,
}

impl AppState {
    pub fn new(config: AppConfig, stores: Stores, mailer: Box<dyn Mailer>) -> Self {
        Self {
            config,
            content: ContentRepository::new(stores.content),
            bookings: BookingRepository::new(stores.bookings),
            mailer,
        }
    }
}
