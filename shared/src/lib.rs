use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A bookable salon service from the static catalog.
///
/// The catalog is fixed at compile time and never persisted; prices are
/// whole currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Price in whole currency units (e.g. 45 = $45)
    pub price: u32,
    /// Free-text duration range shown to clients (e.g. "45-60 min")
    pub duration_label: String,
    /// Nominal duration used to derive an appointment's end time
    pub duration_minutes: u32,
    pub description: String,
    pub features: Vec<String>,
}

/// Response containing the full service catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceListResponse {
    pub services: Vec<Service>,
}

/// The fixed hourly booking slots offered every day, 9:00 AM through 6:00 PM.
pub const TIME_SLOTS: [&str; 10] = [
    "9:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "1:00 PM", "2:00 PM", "3:00 PM", "4:00 PM",
    "5:00 PM", "6:00 PM",
];

/// Check whether a slot label is one of the fixed bookable slots
pub fn is_valid_time_slot(slot: &str) -> bool {
    TIME_SLOTS.contains(&slot)
}

/// Parse a 12-hour slot label (e.g. "9:00 AM", "6:00 PM") into a `NaiveTime`
pub fn parse_time_slot(slot: &str) -> Option<NaiveTime> {
    let (time_part, meridiem) = slot.split_once(' ')?;
    let (hour_str, minute_str) = time_part.split_once(':')?;
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let hour24 = match meridiem {
        "AM" => {
            if hour == 12 {
                0
            } else {
                hour
            }
        }
        "PM" => {
            if hour == 12 {
                12
            } else {
                hour + 12
            }
        }
        _ => return None,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0)
}

/// A single cell in the 42-cell (6 weeks x 7 days) booking calendar grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// False for leading/trailing filler days from adjacent months
    pub in_current_month: bool,
    pub is_today: bool,
    pub is_past: bool,
    pub is_selected: bool,
}

/// A calendar month view for the booking flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub month: u32,
    pub year: i32,
    /// Always exactly 42 cells
    pub cells: Vec<CalendarCell>,
    /// Weekday of the 1st of the month (0 = Sunday, 1 = Monday, etc.)
    pub first_day_of_week: u32,
}

/// Current date information from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDateResponse {
    pub month: u32,
    pub year: i32,
    pub day: u32,
    /// e.g. "June 19, 2025"
    pub formatted_date: String,
    /// e.g. "2025-06-19"
    pub iso_date: String,
}

/// Contact details collected in the final wizard step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// In-progress booking data accumulated across wizard steps.
///
/// Owned exclusively by the active wizard session and discarded on
/// completion or abandonment; never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub service: Option<Service>,
    pub date: Option<chrono::NaiveDate>,
    /// One of the fixed `TIME_SLOTS` labels
    pub time: Option<String>,
    pub contact: ContactInfo,
}

/// Payload handed to the appointment creation collaborator on submit.
///
/// `start_time`/`end_time` are derived from the chosen date, slot, and
/// service duration before the payload crosses this boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service: String,
    /// ISO 8601 timestamp, e.g. "2025-06-13T09:00:00Z"
    pub start_time: String,
    pub end_time: String,
    pub notes: String,
    pub consent_accepted: bool,
}

/// Appointment ID in format: "appointment::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service: String,
    pub start_time: String,
    pub end_time: String,
    pub notes: String,
    pub consent_accepted: bool,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Response after creating an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentResponse {
    pub appointment: Appointment,
    /// True when the confirmation email was actually sent (not dry-run logged)
    pub email_dispatched: bool,
    /// True when the confirmation SMS was actually sent (not dry-run logged)
    pub sms_dispatched: bool,
    pub success_message: String,
}

/// Response containing all appointments (admin dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

/// Contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact message ID in format: "message::epoch_millis"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub message: String,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// Response after submitting the contact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message_id: String,
    /// True when the notification email was actually sent (not dry-run logged)
    pub email_dispatched: bool,
    pub success_message: String,
}

/// Response containing stored contact messages (admin dashboard)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessageListResponse {
    pub messages: Vec<ContactMessage>,
}

/// Admin login request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub passcode: String,
}

/// Admin login response; `token` is present only on success
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: Option<String>,
    pub message: String,
}

/// Response after triggering an SMS reminder for an appointment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderResponse {
    pub appointment_id: String,
    /// True when the reminder was actually sent (not dry-run logged)
    pub sms_dispatched: bool,
    pub success_message: String,
}

impl Appointment {
    /// Generate an appointment ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("appointment::{}", epoch_millis)
    }

    /// Parse an appointment ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, AppointmentIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "appointment" {
            return Err(AppointmentIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| AppointmentIdError::InvalidTimestamp)
    }

    /// Extract the creation timestamp from the appointment ID for sorting
    pub fn extract_timestamp(&self) -> Result<u64, AppointmentIdError> {
        Self::parse_id(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppointmentIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for AppointmentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentIdError::InvalidFormat => write!(f, "Invalid appointment ID format"),
            AppointmentIdError::InvalidTimestamp => {
                write!(f, "Invalid timestamp in appointment ID")
            }
        }
    }
}

impl std::error::Error for AppointmentIdError {}

impl ContactMessage {
    /// Generate a contact message ID from a timestamp
    pub fn generate_id(epoch_millis: u64) -> String {
        format!("message::{}", epoch_millis)
    }

    /// Parse a contact message ID to extract the timestamp
    pub fn parse_id(id: &str) -> Result<u64, MessageIdError> {
        let parts: Vec<&str> = id.split("::").collect();
        if parts.len() != 2 || parts[0] != "message" {
            return Err(MessageIdError::InvalidFormat);
        }

        parts[1]
            .parse::<u64>()
            .map_err(|_| MessageIdError::InvalidTimestamp)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageIdError {
    InvalidFormat,
    InvalidTimestamp,
}

impl fmt::Display for MessageIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageIdError::InvalidFormat => write!(f, "Invalid contact message ID format"),
            MessageIdError::InvalidTimestamp => {
                write!(f, "Invalid timestamp in contact message ID")
            }
        }
    }
}

impl std::error::Error for MessageIdError {}
