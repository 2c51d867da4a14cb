//! Booking wizard state machine.
//!
//! A four-step linear flow (service, date/time, contact, confirmation)
//! that accumulates a single `BookingDraft` and enforces step-gating
//! rules. The wizard is UI-agnostic: whatever layer drives it calls the
//! transition methods and reads the current step and draft back out.
//! Submission crosses an async collaborator boundary (`AppointmentSink`);
//! the wizard itself has no retry policy and simply stays in the contact
//! step when the collaborator reports failure.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use log::{info, warn};
use thiserror::Error;

use shared::{
    is_valid_time_slot, parse_time_slot, AppointmentRequest, AppointmentResponse, BookingDraft,
    ContactInfo, Service,
};

/// The four wizard steps, in order. There is no backward transition out
/// of `Confirmed` other than `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChooseService,
    ChooseDateTime,
    EnterContact,
    Confirmed,
}

/// Errors surfaced by wizard transitions. None of these are fatal; the
/// wizard state is unchanged whenever a transition returns an error.
#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("This action is not available in the current step")]
    WrongStep,
    #[error("Pick a date before choosing a time")]
    DateRequired,
    #[error("Pick a date and time before continuing")]
    DateTimeRequired,
    #[error("'{0}' is not an offered time slot")]
    InvalidTimeSlot(String),
    #[error("Name, email, and phone are required")]
    IncompleteContact,
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("Booking could not be completed: {0}")]
    SubmissionFailed(String),
}

/// Collaborator that accepts the finished booking payload.
///
/// Implemented by the appointment service in production and by recording
/// mocks in tests, so the wizard never depends on real credentials.
#[async_trait]
pub trait AppointmentSink: Send + Sync {
    async fn submit_appointment(&self, request: AppointmentRequest)
        -> Result<AppointmentResponse>;
}

/// The booking wizard: one instance per client session, single-threaded,
/// driven by discrete user events.
pub struct BookingWizard {
    step: WizardStep,
    draft: BookingDraft,
    today: NaiveDate,
    submission_in_flight: bool,
    last_error: Option<String>,
}

impl BookingWizard {
    /// Create a wizard with an empty draft. `today` is injected so the
    /// past-date guard is testable; the caller supplies the real clock.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            step: WizardStep::ChooseService,
            draft: BookingDraft::default(),
            today,
            submission_in_flight: false,
            last_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// The message from the most recent failed submission, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Choose a service and advance to the date/time step
    pub fn select_service(&mut self, service: Service) -> Result<(), WizardError> {
        if self.step != WizardStep::ChooseService {
            return Err(WizardError::WrongStep);
        }

        info!("Wizard: selected service '{}'", service.name);
        self.draft.service = Some(service);
        self.step = WizardStep::ChooseDateTime;
        Ok(())
    }

    /// Choose an appointment date. Dates strictly before today are never
    /// selectable; the attempt is silently ignored and `false` is
    /// returned, leaving both state and draft untouched. Picking a
    /// different date clears any previously chosen time so a stale slot
    /// from another day cannot be submitted.
    pub fn select_date(&mut self, date: NaiveDate) -> Result<bool, WizardError> {
        if self.step != WizardStep::ChooseDateTime {
            return Err(WizardError::WrongStep);
        }

        if date < self.today {
            warn!("Wizard: ignoring past date selection {}", date);
            return Ok(false);
        }

        if self.draft.date != Some(date) {
            self.draft.time = None;
        }
        self.draft.date = Some(date);
        info!("Wizard: selected date {}", date);
        Ok(true)
    }

    /// Choose one of the fixed time slots; requires a date first
    pub fn select_time(&mut self, slot: &str) -> Result<(), WizardError> {
        if self.step != WizardStep::ChooseDateTime {
            return Err(WizardError::WrongStep);
        }
        if self.draft.date.is_none() {
            return Err(WizardError::DateRequired);
        }
        if !is_valid_time_slot(slot) {
            return Err(WizardError::InvalidTimeSlot(slot.to_string()));
        }

        info!("Wizard: selected time slot {}", slot);
        self.draft.time = Some(slot.to_string());
        Ok(())
    }

    /// Advance to the contact step; requires both a date and a time
    pub fn continue_to_contact(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::ChooseDateTime {
            return Err(WizardError::WrongStep);
        }
        if self.draft.date.is_none() || self.draft.time.is_none() {
            return Err(WizardError::DateTimeRequired);
        }

        self.step = WizardStep::EnterContact;
        Ok(())
    }

    /// Step back to the immediately preceding step. All previously
    /// entered draft fields are preserved.
    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::ChooseDateTime => {
                self.step = WizardStep::ChooseService;
                Ok(())
            }
            WizardStep::EnterContact => {
                self.step = WizardStep::ChooseDateTime;
                Ok(())
            }
            _ => Err(WizardError::WrongStep),
        }
    }

    /// Record the contact fields entered in the final form step
    pub fn set_contact(&mut self, contact: ContactInfo) -> Result<(), WizardError> {
        if self.step != WizardStep::EnterContact {
            return Err(WizardError::WrongStep);
        }
        self.draft.contact = contact;
        Ok(())
    }

    /// Build the collaborator payload from the draft, deriving
    /// `start_time` from the date and slot and `end_time` from the
    /// selected service's duration. Returns None until the draft holds a
    /// service, a date, and a time.
    pub fn build_request(&self) -> Option<AppointmentRequest> {
        let service = self.draft.service.as_ref()?;
        let date = self.draft.date?;
        let slot = self.draft.time.as_deref()?;
        let start = date.and_time(parse_time_slot(slot)?);
        let end = start + Duration::minutes(service.duration_minutes as i64);

        Some(AppointmentRequest {
            client_name: self.draft.contact.name.trim().to_string(),
            client_email: self.draft.contact.email.trim().to_string(),
            client_phone: self.draft.contact.phone.trim().to_string(),
            service: service.name.clone(),
            start_time: start.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            end_time: end.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            notes: self.draft.contact.notes.trim().to_string(),
            consent_accepted: true,
        })
    }

    /// Hand the draft to the booking collaborator. On success the wizard
    /// advances to `Confirmed`; on failure it stays in `EnterContact`
    /// with the error message exposed via `last_error`, and the user may
    /// simply submit again. An in-flight flag rejects duplicate
    /// submissions while the collaborator call is outstanding.
    pub async fn submit(
        &mut self,
        sink: &dyn AppointmentSink,
    ) -> Result<AppointmentResponse, WizardError> {
        if self.step != WizardStep::EnterContact {
            return Err(WizardError::WrongStep);
        }
        if self.submission_in_flight {
            return Err(WizardError::SubmissionInFlight);
        }

        let contact = &self.draft.contact;
        if contact.name.trim().is_empty()
            || contact.email.trim().is_empty()
            || contact.phone.trim().is_empty()
        {
            return Err(WizardError::IncompleteContact);
        }

        let request = self.build_request().ok_or(WizardError::DateTimeRequired)?;

        self.submission_in_flight = true;
        let result = sink.submit_appointment(request).await;
        self.submission_in_flight = false;

        match result {
            Ok(response) => {
                info!(
                    "Wizard: booking confirmed, appointment {}",
                    response.appointment.id
                );
                self.last_error = None;
                self.step = WizardStep::Confirmed;
                Ok(response)
            }
            Err(e) => {
                warn!("Wizard: submission failed: {}", e);
                let message = e.to_string();
                self.last_error = Some(message.clone());
                Err(WizardError::SubmissionFailed(message))
            }
        }
    }

    /// "Book another": discard the confirmed draft and start over
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Confirmed {
            return Err(WizardError::WrongStep);
        }
        self.draft = BookingDraft::default();
        self.last_error = None;
        self.step = WizardStep::ChooseService;
        Ok(())
    }
}
