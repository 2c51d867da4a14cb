//! Appointment creation and admin operations.
//!
//! This service is the collaborator behind the wizard's submit boundary:
//! it validates the payload, persists the appointment, and hands the
//! confirmation to the notification collaborators. Notification failures
//! never fail a booking; the response just reports the channel as not
//! dispatched.

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::catalog;
use crate::domain::notifications::{EmailMessage, EmailNotifier, SmsNotifier};
use crate::domain::wizard::AppointmentSink;
use crate::storage::{AppointmentStorage, DbConnection};
use shared::{
    parse_time_slot, Appointment, AppointmentListResponse, AppointmentRequest,
    AppointmentResponse, ReminderResponse, TIME_SLOTS,
};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Service for creating and managing appointments
#[derive(Clone)]
pub struct AppointmentService {
    db: Arc<DbConnection>,
    email: Arc<dyn EmailNotifier>,
    sms: Arc<dyn SmsNotifier>,
}

impl AppointmentService {
    /// Create a new AppointmentService
    pub fn new(
        db: Arc<DbConnection>,
        email: Arc<dyn EmailNotifier>,
        sms: Arc<dyn SmsNotifier>,
    ) -> Self {
        Self { db, email, sms }
    }

    /// Create a new appointment from a booking payload
    pub async fn create_appointment(
        &self,
        request: AppointmentRequest,
    ) -> Result<AppointmentResponse> {
        info!(
            "Creating appointment: service={}, start={}",
            request.service, request.start_time
        );

        let (start, _end) = self.validate_request(&request)?;

        let now = Utc::now();
        let appointment = Appointment {
            id: Appointment::generate_id(now.timestamp_millis() as u64),
            client_name: request.client_name.trim().to_string(),
            client_email: request.client_email.trim().to_string(),
            client_phone: request.client_phone.trim().to_string(),
            service: request.service.clone(),
            start_time: request.start_time.clone(),
            end_time: request.end_time.clone(),
            notes: request.notes.trim().to_string(),
            consent_accepted: request.consent_accepted,
            created_at: now.to_rfc3339(),
        };

        self.db.store_appointment(&appointment).await?;
        info!("Stored appointment {}", appointment.id);

        let when = start.format("%B %-d, %Y at %-I:%M %p").to_string();
        let email_dispatched = self.send_confirmation_email(&appointment, &when).await;
        let sms_dispatched = self.send_confirmation_sms(&appointment, &when).await;

        Ok(AppointmentResponse {
            appointment,
            email_dispatched,
            sms_dispatched,
            success_message: format!("Your {} is booked for {}", request.service, when),
        })
    }

    /// List all appointments for the admin dashboard, newest first
    pub async fn list_appointments(&self) -> Result<AppointmentListResponse> {
        let appointments = self.db.list_appointments().await?;
        info!("Listed {} appointments", appointments.len());
        Ok(AppointmentListResponse { appointments })
    }

    /// Send an SMS reminder for an existing appointment (admin action)
    pub async fn send_reminder(&self, appointment_id: &str) -> Result<ReminderResponse> {
        let appointment = self
            .db
            .get_appointment(appointment_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Appointment not found: {}", appointment_id))?;

        let when = NaiveDateTime::parse_from_str(&appointment.start_time, TIMESTAMP_FORMAT)
            .map(|t| t.format("%B %-d at %-I:%M %p").to_string())
            .unwrap_or_else(|_| appointment.start_time.clone());
        let body = format!(
            "Reminder from Lotus Nail Studio: your {} is on {}.",
            appointment.service, when
        );

        let mode = self.sms.send(&appointment.client_phone, &body).await?;
        info!(
            "Reminder for {} delivered in {:?} mode",
            appointment_id, mode
        );

        Ok(ReminderResponse {
            appointment_id: appointment_id.to_string(),
            sms_dispatched: mode.was_dispatched(),
            success_message: "Reminder sent".to_string(),
        })
    }

    /// Validate a booking payload, returning the parsed start/end times
    fn validate_request(
        &self,
        request: &AppointmentRequest,
    ) -> Result<(NaiveDateTime, NaiveDateTime)> {
        if !request.consent_accepted {
            bail!("Consent is required to book an appointment");
        }
        if request.client_name.trim().is_empty() {
            bail!("Client name cannot be empty");
        }
        if request.client_email.trim().is_empty() || !request.client_email.contains('@') {
            bail!("A valid client email is required");
        }
        if request.client_phone.trim().is_empty() {
            bail!("Client phone cannot be empty");
        }
        if catalog::find_service(&request.service).is_none() {
            bail!("Unknown service: {}", request.service);
        }

        let start = NaiveDateTime::parse_from_str(&request.start_time, TIMESTAMP_FORMAT)
            .map_err(|_| anyhow::anyhow!("Invalid start time: {}", request.start_time))?;
        let end = NaiveDateTime::parse_from_str(&request.end_time, TIMESTAMP_FORMAT)
            .map_err(|_| anyhow::anyhow!("Invalid end time: {}", request.end_time))?;
        if end <= start {
            bail!("Appointment end time must be after its start time");
        }

        // The wizard enforces these client-side, but the REST API reaches
        // this service directly, so they are re-checked here.
        if start.date() < Utc::now().date_naive() {
            bail!("Appointment date cannot be in the past");
        }
        let on_slot = TIME_SLOTS
            .iter()
            .any(|slot| parse_time_slot(slot) == Some(start.time()));
        if !on_slot {
            bail!(
                "'{}' is not an offered time slot",
                start.format("%-I:%M %p")
            );
        }

        Ok((start, end))
    }

    async fn send_confirmation_email(&self, appointment: &Appointment, when: &str) -> bool {
        let message = EmailMessage {
            to: appointment.client_email.clone(),
            subject: format!("Your {} is booked", appointment.service),
            body: format!(
                "Hi {},\n\nYour {} at Lotus Nail Studio is confirmed for {}.\n\nSee you soon!\nLotus Nail Studio",
                appointment.client_name, appointment.service, when
            ),
        };

        match self.email.send(&message).await {
            Ok(mode) => mode.was_dispatched(),
            Err(e) => {
                // The booking stands even when the notification fails
                warn!("Confirmation email failed for {}: {}", appointment.id, e);
                false
            }
        }
    }

    async fn send_confirmation_sms(&self, appointment: &Appointment, when: &str) -> bool {
        let body = format!(
            "Lotus Nail Studio: your {} is confirmed for {}.",
            appointment.service, when
        );

        match self.sms.send(&appointment.client_phone, &body).await {
            Ok(mode) => mode.was_dispatched(),
            Err(e) => {
                warn!("Confirmation SMS failed for {}: {}", appointment.id, e);
                false
            }
        }
    }
}

#[async_trait]
impl AppointmentSink for AppointmentService {
    async fn submit_appointment(
        &self,
        request: AppointmentRequest,
    ) -> Result<AppointmentResponse> {
        self.create_appointment(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notifications::{DryRunEmailNotifier, DryRunSmsNotifier};

    async fn test_service() -> AppointmentService {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        AppointmentService::new(db, Arc::new(DryRunEmailNotifier), Arc::new(DryRunSmsNotifier))
    }

    fn valid_request() -> AppointmentRequest {
        AppointmentRequest {
            client_name: "Dana Reyes".to_string(),
            client_email: "dana@example.com".to_string(),
            client_phone: "555-123-4567".to_string(),
            service: "Gel Manicure".to_string(),
            start_time: "2030-04-20T10:00:00Z".to_string(),
            end_time: "2030-04-20T11:00:00Z".to_string(),
            notes: String::new(),
            consent_accepted: true,
        }
    }

    #[tokio::test]
    async fn test_create_appointment() {
        let service = test_service().await;

        let response = service.create_appointment(valid_request()).await.unwrap();

        assert!(Appointment::parse_id(&response.appointment.id).is_ok());
        // Dry-run notifiers never count as dispatched
        assert!(!response.email_dispatched);
        assert!(!response.sms_dispatched);
        assert!(response.success_message.contains("Gel Manicure"));

        // The appointment was persisted
        let listed = service.list_appointments().await.unwrap();
        assert_eq!(listed.appointments.len(), 1);
        assert_eq!(listed.appointments[0].client_name, "Dana Reyes");
    }

    #[tokio::test]
    async fn test_consent_is_required() {
        let service = test_service().await;

        let mut request = valid_request();
        request.consent_accepted = false;

        let err = service.create_appointment(request).await.unwrap_err();
        assert!(err.to_string().contains("Consent"));

        // Nothing was stored
        let listed = service.list_appointments().await.unwrap();
        assert!(listed.appointments.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_service_rejected() {
        let service = test_service().await;

        let mut request = valid_request();
        request.service = "Haircut".to_string();

        let err = service.create_appointment(request).await.unwrap_err();
        assert!(err.to_string().contains("Unknown service"));
    }

    #[tokio::test]
    async fn test_invalid_contact_rejected() {
        let service = test_service().await;

        let mut request = valid_request();
        request.client_email = "not-an-email".to_string();
        assert!(service.create_appointment(request).await.is_err());

        let mut request = valid_request();
        request.client_name = "   ".to_string();
        assert!(service.create_appointment(request).await.is_err());
    }

    #[tokio::test]
    async fn test_past_date_rejected() {
        let service = test_service().await;

        let mut request = valid_request();
        request.start_time = "2001-01-01T10:00:00Z".to_string();
        request.end_time = "2001-01-01T11:00:00Z".to_string();

        let err = service.create_appointment(request).await.unwrap_err();
        assert!(err.to_string().contains("past"));

        // Nothing was stored
        let listed = service.list_appointments().await.unwrap();
        assert!(listed.appointments.is_empty());
    }

    #[tokio::test]
    async fn test_off_slot_start_time_rejected() {
        let service = test_service().await;

        let mut request = valid_request();
        request.start_time = "2030-04-20T10:37:00Z".to_string();
        request.end_time = "2030-04-20T11:37:00Z".to_string();

        let err = service.create_appointment(request).await.unwrap_err();
        assert!(err.to_string().contains("time slot"));

        let listed = service.list_appointments().await.unwrap();
        assert!(listed.appointments.is_empty());
    }

    #[tokio::test]
    async fn test_end_must_follow_start() {
        let service = test_service().await;

        let mut request = valid_request();
        request.end_time = request.start_time.clone();

        let err = service.create_appointment(request).await.unwrap_err();
        assert!(err.to_string().contains("end time"));
    }

    #[tokio::test]
    async fn test_send_reminder() {
        let service = test_service().await;

        let response = service.create_appointment(valid_request()).await.unwrap();
        let reminder = service
            .send_reminder(&response.appointment.id)
            .await
            .unwrap();

        assert_eq!(reminder.appointment_id, response.appointment.id);
        assert!(!reminder.sms_dispatched); // dry-run

        assert!(service.send_reminder("appointment::404").await.is_err());
    }
}
