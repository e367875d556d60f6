use crate::models::booking::is_valid_booking_date;
use crate::models::{
    BookingData, FieldErrors, LocationType, Notice, Service, ServiceSelection, Step, UserInfo,
};
use crate::services::gateway::BookingGateway;

pub const OFFERED_SLOTS: [&str; 4] = ["10:00 AM", "11:30 AM", "2:00 PM", "3:30 PM"];

#[derive(Debug, Clone, PartialEq)]
pub enum StepInput {
    UserInfo(UserInfo),
    Service(ServiceSelection),
    Location {
        location_type: Option<LocationType>,
        address: Option<String>,
    },
}

impl StepInput {
    pub fn step(&self) -> Step {
        match self {
            StepInput::UserInfo(_) => Step::UserInfo,
            StepInput::Service(_) => Step::ServiceSelection,
            StepInput::Location { .. } => Step::Location,
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("{0}")]
    Invalid(FieldErrors),

    #[error("input for step {given} does not apply to step {current}")]
    WrongStep { current: u8, given: u8 },

    #[error("cannot skip ahead from step {current} to step {target}")]
    ForwardSkip { current: u8, target: u8 },

    #[error("booking needs a date and a time slot before it can be confirmed")]
    NotReady,
}

impl From<FieldErrors> for WizardError {
    fn from(errors: FieldErrors) -> Self {
        WizardError::Invalid(errors)
    }
}

pub fn validate_user_info(info: &UserInfo) -> Result<(), FieldErrors> {
    info.validate()
}

pub fn validate_service(selection: &ServiceSelection, services: &[Service]) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let id = selection.service_id.trim();
    if id.is_empty() {
        errors.push("serviceId", "Please select a service");
    } else if !services.iter().any(|s| s.id == id) {
        errors.push("serviceId", "Please select one of the listed services");
    }
    errors.into_result()
}

pub fn validate_location(
    location_type: Option<LocationType>,
    address: Option<&str>,
) -> Result<LocationType, FieldErrors> {
    let mut errors = FieldErrors::new();
    let Some(location_type) = location_type else {
        errors.push("locationType", "Please choose studio or mobile service");
        return Err(errors);
    };
    if location_type == LocationType::Mobile && address.map(|a| a.trim().is_empty()).unwrap_or(true) {
        errors.push("address", "Address is required for mobile service");
        return Err(errors);
    }
    Ok(location_type)
}

pub struct BookingWizard {
    services: Vec<Service>,
    slots: Vec<String>,
    step: Step,
    data: BookingData,
}

impl BookingWizard {
    pub fn new(services: Vec<Service>) -> Self {
        Self::with_slots(services, OFFERED_SLOTS.iter().map(|s| s.to_string()).collect())
    }

    pub fn with_slots(services: Vec<Service>, slots: Vec<String>) -> Self {
        Self {
            services,
            slots,
            step: Step::UserInfo,
            data: BookingData::default(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn data(&self) -> &BookingData {
        &self.data
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn advance(&mut self, input: StepInput) -> Result<Step, WizardError> {
        if input.step() != self.step {
            return Err(WizardError::WrongStep {
                current: self.step.number(),
                given: input.step().number(),
            });
        }

        match input {
            StepInput::UserInfo(info) => {
                validate_user_info(&info)?;
                self.data.user_info = Some(UserInfo {
                    name: info.name.trim().to_string(),
                    email: info.email.trim().to_string(),
                    phone: info.phone.trim().to_string(),
                });
            }
            StepInput::Service(selection) => {
                validate_service(&selection, &self.services)?;
                self.data.service = Some(ServiceSelection {
                    service_id: selection.service_id.trim().to_string(),
                });
            }
            StepInput::Location {
                location_type,
                address,
            } => {
                let location_type = validate_location(location_type, address.as_deref())?;
                self.data.location_type = Some(location_type);
                self.data.address = address
                    .map(|a| a.trim().to_string())
                    .filter(|a| !a.is_empty());
            }
        }

        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn set_date(&mut self, date: &str) -> Result<(), WizardError> {
        self.require_schedule_step()?;
        if !is_valid_booking_date(date) {
            let mut errors = FieldErrors::new();
            errors.push("date", "Please pick a valid date");
            return Err(errors.into());
        }
        self.data.date = Some(date.trim().to_string());
        Ok(())
    }

    pub fn select_time_slot(&mut self, slot: &str) -> Result<Notice, WizardError> {
        self.require_schedule_step()?;
        let Some(slot) = self.slots.iter().find(|s| s.as_str() == slot.trim()).cloned() else {
            let mut errors = FieldErrors::new();
            errors.push("timeSlot", "Please pick one of the available slots");
            return Err(errors.into());
        };
        let notice = Notice::success(format!("Selected {slot}"));
        self.data.time_slot = Some(slot);
        Ok(notice)
    }

    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    pub fn go_to(&mut self, target: Step) -> Result<Step, WizardError> {
        if target > self.step {
            return Err(WizardError::ForwardSkip {
                current: self.step.number(),
                target: target.number(),
            });
        }
        self.step = target;
        Ok(self.step)
    }

    pub fn can_submit(&self) -> bool {
        self.step == Step::Schedule && self.data.is_schedule_complete()
    }

    // Sends the collected booking once. On failure the wizard stays on the
    // schedule step with everything intact; on success it starts over.
    pub async fn submit(&mut self, gateway: &dyn BookingGateway) -> Result<Notice, WizardError> {
        if !self.can_submit() {
            return Err(WizardError::NotReady);
        }
        let submission = self.data.to_submission().ok_or(WizardError::NotReady)?;

        match gateway.submit(&submission).await {
            Ok(()) => {
                tracing::info!(service_id = %submission.service.service_id, "booking submitted");
                self.reset();
                Ok(Notice::success("Booking Confirmed! Check your email."))
            }
            Err(e) => {
                tracing::warn!(error = %e, "booking submission failed");
                Ok(Notice::error("Failed to confirm booking. Please try again."))
            }
        }
    }

    fn reset(&mut self) {
        self.step = Step::UserInfo;
        self.data = BookingData::default();
    }

    fn require_schedule_step(&self) -> Result<(), WizardError> {
        if self.step != Step::Schedule {
            return Err(WizardError::WrongStep {
                current: self.step.number(),
                given: Step::Schedule.number(),
            });
        }
        Ok(())
    }
}
