//! Contact form handling: validate, store, forward to the salon inbox.

use anyhow::{bail, Result};
use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::notifications::{EmailMessage, EmailNotifier};
use crate::storage::{DbConnection, MessageStorage};
use shared::{ContactMessage, ContactMessageListResponse, ContactRequest, ContactResponse};

const MAX_MESSAGE_LENGTH: usize = 2000;

/// Service for the public contact form
#[derive(Clone)]
pub struct ContactService {
    db: Arc<DbConnection>,
    email: Arc<dyn EmailNotifier>,
    /// Salon inbox that receives a copy of every message
    notify_email: String,
}

impl ContactService {
    /// Create a new ContactService
    pub fn new(db: Arc<DbConnection>, email: Arc<dyn EmailNotifier>, notify_email: String) -> Self {
        Self {
            db,
            email,
            notify_email,
        }
    }

    /// Store a contact message and forward it to the salon inbox
    pub async fn submit_message(&self, request: ContactRequest) -> Result<ContactResponse> {
        info!("Contact form submission from {}", request.email);

        self.validate_request(&request)?;

        let now = Utc::now();
        let message = ContactMessage {
            id: ContactMessage::generate_id(now.timestamp_millis() as u64),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            message: request.message.trim().to_string(),
            created_at: now.to_rfc3339(),
        };

        self.db.store_message(&message).await?;
        info!("Stored contact message {}", message.id);

        let email_dispatched = if self.notify_email.is_empty() {
            false
        } else {
            let notification = EmailMessage {
                to: self.notify_email.clone(),
                subject: format!("New contact message from {}", message.name),
                body: format!(
                    "From: {} <{}>\n\n{}",
                    message.name, message.email, message.message
                ),
            };
            match self.email.send(&notification).await {
                Ok(mode) => mode.was_dispatched(),
                Err(e) => {
                    // The message is stored either way
                    warn!("Contact notification email failed: {}", e);
                    false
                }
            }
        };

        Ok(ContactResponse {
            message_id: message.id,
            email_dispatched,
            success_message: "Thanks for reaching out! We'll get back to you soon.".to_string(),
        })
    }

    /// List stored contact messages for the admin dashboard
    pub async fn list_messages(&self, limit: Option<u32>) -> Result<ContactMessageListResponse> {
        let messages = self.db.list_messages(limit).await?;
        info!("Listed {} contact messages", messages.len());
        Ok(ContactMessageListResponse { messages })
    }

    fn validate_request(&self, request: &ContactRequest) -> Result<()> {
        if request.name.trim().is_empty() {
            bail!("Name cannot be empty");
        }
        if request.email.trim().is_empty() || !request.email.contains('@') {
            bail!("A valid email is required");
        }
        if request.message.trim().is_empty() {
            bail!("Message cannot be empty");
        }
        if request.message.len() > MAX_MESSAGE_LENGTH {
            bail!("Message cannot exceed {} characters", MAX_MESSAGE_LENGTH);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notifications::DryRunEmailNotifier;

    async fn test_service() -> ContactService {
        let db = Arc::new(DbConnection::init_test().await.unwrap());
        ContactService::new(
            db,
            Arc::new(DryRunEmailNotifier),
            "studio@example.com".to_string(),
        )
    }

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "Sam Lee".to_string(),
            email: "sam@example.com".to_string(),
            message: "Do you take walk-ins on Saturdays?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_message() {
        let service = test_service().await;

        let response = service.submit_message(valid_request()).await.unwrap();
        assert!(ContactMessage::parse_id(&response.message_id).is_ok());
        // Dry-run notifier: stored but not dispatched
        assert!(!response.email_dispatched);

        let listed = service.list_messages(None).await.unwrap();
        assert_eq!(listed.messages.len(), 1);
        assert_eq!(listed.messages[0].name, "Sam Lee");
    }

    #[tokio::test]
    async fn test_validation() {
        let service = test_service().await;

        let mut request = valid_request();
        request.name = String::new();
        assert!(service.submit_message(request).await.is_err());

        let mut request = valid_request();
        request.email = "no-at-sign".to_string();
        assert!(service.submit_message(request).await.is_err());

        let mut request = valid_request();
        request.message = " ".to_string();
        assert!(service.submit_message(request).await.is_err());

        let mut request = valid_request();
        request.message = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert!(service.submit_message(request).await.is_err());
    }
}
