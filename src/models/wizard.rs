use serde::{Deserialize, Serialize};

use super::booking::{BookingSubmission, LocationType, ServiceSelection, UserInfo};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    UserInfo,
    ServiceSelection,
    Location,
    Schedule,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::UserInfo,
        Step::ServiceSelection,
        Step::Location,
        Step::Schedule,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Step::UserInfo => 1,
            Step::ServiceSelection => 2,
            Step::Location => 3,
            Step::Schedule => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Step::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn next(&self) -> Option<Self> {
        Step::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Step::from_number)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::UserInfo => "Your Information",
            Step::ServiceSelection => "Select Service",
            Step::Location => "Choose Location",
            Step::Schedule => "Select a Time",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub user_info: Option<UserInfo>,
    pub service: Option<ServiceSelection>,
    pub location_type: Option<LocationType>,
    pub address: Option<String>,
    pub date: Option<String>,
    pub time_slot: Option<String>,
}

impl BookingData {
    pub fn is_schedule_complete(&self) -> bool {
        let set = |v: &Option<String>| v.as_deref().map(|s| !s.trim().is_empty()).unwrap_or(false);
        set(&self.date) && set(&self.time_slot)
    }

    pub fn to_submission(&self) -> Option<BookingSubmission> {
        if !self.is_schedule_complete() {
            return None;
        }
        Some(BookingSubmission {
            user_info: self.user_info.clone()?,
            service: self.service.clone()?,
            location_type: Some(self.location_type.unwrap_or_default()),
            address: self.address.clone(),
            date: self.date.clone()?,
            time_slot: self.time_slot.clone()?,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbering() {
        assert_eq!(Step::UserInfo.number(), 1);
        assert_eq!(Step::Schedule.number(), 4);
        assert_eq!(Step::from_number(3), Some(Step::Location));
        assert_eq!(Step::from_number(0), None);
        assert_eq!(Step::from_number(5), None);
    }

    #[test]
    fn test_step_neighbours() {
        assert_eq!(Step::UserInfo.previous(), None);
        assert_eq!(Step::UserInfo.next(), Some(Step::ServiceSelection));
        assert_eq!(Step::Schedule.next(), None);
        assert_eq!(Step::Schedule.previous(), Some(Step::Location));
        assert!(Step::UserInfo < Step::Schedule);
    }

    #[test]
    fn test_schedule_completeness() {
        let mut data = BookingData::default();
        assert!(!data.is_schedule_complete());
        data.date = Some("2025-01-15".to_string());
        assert!(!data.is_schedule_complete());
        data.time_slot = Some("   ".to_string());
        assert!(!data.is_schedule_complete());
        data.time_slot = Some("2:00 PM".to_string());
        assert!(data.is_schedule_complete());
    }

    #[test]
    fn test_submission_requires_all_parts() {
        let mut data = BookingData {
            date: Some("2025-01-15".to_string()),
            time_slot: Some("2:00 PM".to_string()),
            ..Default::default()
        };
        assert!(data.to_submission().is_none());

        data.user_info = Some(UserInfo {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "5551234567".to_string(),
        });
        data.service = Some(ServiceSelection {
            service_id: "gel-extension".to_string(),
        });
        let submission = data.to_submission().unwrap();
        assert_eq!(submission.location_type, Some(LocationType::Studio));
        assert_eq!(submission.time_slot, "2:00 PM");
    }
}
