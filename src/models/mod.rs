pub mod booking;
pub mod content;
pub mod validation;
pub mod wizard;

pub use booking::{
    Booking, BookingInput, BookingRequest, BookingStatus, BookingSubmission, LocationType,
    ServiceSelection, UserInfo,
};
pub use content::{ContentPatch, GeneralContent, HomeContent, Service, SiteContent};
pub use validation::{FieldError, FieldErrors};
pub use wizard::{BookingData, Notice, NoticeLevel, Step};
