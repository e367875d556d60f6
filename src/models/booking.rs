use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{is_blank, is_valid_email, FieldErrors};

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub service_id: String,
    pub date: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    Studio,
    Mobile,
}

impl LocationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationType::Studio => "studio",
            LocationType::Mobile => "mobile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "studio" => Some(LocationType::Studio),
            "mobile" => Some(LocationType::Mobile),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub service_id: String,
    pub date: String,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, alias = "slot", skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSelection {
    pub service_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub user_info: UserInfo,
    pub service: ServiceSelection,
    #[serde(default)]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub date: String,
    #[serde(default)]
    pub time_slot: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BookingRequest {
    Wizard(BookingSubmission),
    Flat(BookingInput),
}

impl BookingRequest {
    pub fn into_input(self) -> BookingInput {
        match self {
            BookingRequest::Wizard(submission) => submission.into(),
            BookingRequest::Flat(input) => input,
        }
    }
}

impl From<BookingSubmission> for BookingInput {
    fn from(s: BookingSubmission) -> Self {
        let location_type = s.location_type.unwrap_or_default();
        BookingInput {
            service_id: s.service.service_id,
            date: s.date,
            customer_name: s.user_info.name,
            email: s.user_info.email,
            phone: s.user_info.phone,
            location_type: Some(location_type),
            address: match location_type {
                LocationType::Mobile => s.address,
                LocationType::Studio => None,
            },
            time_slot: Some(s.time_slot),
        }
    }
}

impl BookingInput {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_contact(
            &mut errors,
            "customerName",
            &self.customer_name,
            &self.email,
            &self.phone,
        );
        if is_blank(&self.service_id) {
            errors.push("serviceId", "Please select a service");
        }
        if !is_valid_booking_date(&self.date) {
            errors.push("date", "Date must be YYYY-MM-DD or an ISO-8601 timestamp");
        }
        if matches!(self.time_slot.as_deref(), Some(slot) if is_blank(slot)) {
            errors.push("timeSlot", "Please select a time slot");
        }
        if self.location_type == Some(LocationType::Mobile)
            && self.address.as_deref().map(is_blank).unwrap_or(true)
        {
            errors.push("address", "Address is required for mobile service");
        }
        errors.into_result()
    }

    pub fn into_booking(self, id: String, created_at: DateTime<Utc>) -> Booking {
        Booking {
            id,
            service_id: self.service_id,
            date: self.date,
            customer_name: self.customer_name,
            email: self.email,
            phone: self.phone,
            status: BookingStatus::Pending,
            location_type: self.location_type,
            // Only a mobile visit has a customer address.
            address: match self.location_type {
                Some(LocationType::Mobile) => self.address,
                _ => None,
            },
            time_slot: self.time_slot,
            created_at: Some(created_at),
        }
    }
}

impl UserInfo {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        check_contact(&mut errors, "name", &self.name, &self.email, &self.phone);
        errors.into_result()
    }
}

fn check_contact(errors: &mut FieldErrors, name_field: &str, name: &str, email: &str, phone: &str) {
    if name.trim().chars().count() < MIN_NAME_LEN {
        errors.push(name_field, "Name is required");
    }
    if !is_valid_email(email) {
        errors.push("email", "Invalid email");
    }
    if phone.trim().chars().count() < MIN_PHONE_LEN {
        errors.push("phone", "Valid phone number is required");
    }
}

pub fn is_valid_booking_date(s: &str) -> bool {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
