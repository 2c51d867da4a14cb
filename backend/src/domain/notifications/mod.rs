//! Notification collaborators (email, SMS).
//!
//! Each channel is a narrow trait with two implementations: a live
//! adapter talking to the real provider, and a dry-run adapter that only
//! logs the rendered message. Which one is built depends solely on
//! configuration, so the domain layer and its tests never touch real
//! credentials.

pub mod email;
pub mod sms;

pub use email::{email_notifier_from_config, DryRunEmailNotifier, EmailMessage, EmailNotifier};
pub use sms::{sms_notifier_from_config, DryRunSmsNotifier, SmsNotifier};

/// Whether a notification actually went out or was only logged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    Live,
    DryRun,
}

impl DeliveryMode {
    /// True when the provider call was actually performed
    pub fn was_dispatched(self) -> bool {
        self == DeliveryMode::Live
    }
}
