//! Email notifier: SMTP adapter plus a dry-run fallback.

use anyhow::{Context, Result};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Message, SmtpTransport, Transport};
use log::info;
use std::sync::Arc;

use super::DeliveryMode;
use crate::config::EmailConfig;

/// A rendered email ready for a notifier
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Boundary contract for sending email
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryMode>;
}

/// Build the notifier the configuration calls for: SMTP when the feature
/// flag and full credentials are present, the logging adapter otherwise.
pub fn email_notifier_from_config(config: &EmailConfig) -> Result<Arc<dyn EmailNotifier>> {
    if config.is_live() {
        info!(
            "📧 Email notifications live via {}:{}",
            config.smtp_server, config.smtp_port
        );
        Ok(Arc::new(SmtpEmailNotifier::new(config.clone())?))
    } else {
        info!("📧 Email notifications in dry-run mode (disabled or missing credentials)");
        Ok(Arc::new(DryRunEmailNotifier))
    }
}

/// Live adapter sending through an authenticated SMTP relay
pub struct SmtpEmailNotifier {
    config: EmailConfig,
    transport: SmtpTransport,
}

impl SmtpEmailNotifier {
    pub fn new(config: EmailConfig) -> Result<Self> {
        let tls_params = TlsParameters::new(config.smtp_server.clone())
            .context("Failed to create TLS parameters")?;

        let transport = SmtpTransport::relay(&config.smtp_server)
            .context("Failed to create SMTP relay")?
            .port(config.smtp_port)
            .tls(Tls::Required(tls_params))
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { config, transport })
    }
}

#[async_trait]
impl EmailNotifier for SmtpEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryMode> {
        let email = Message::builder()
            .from(
                self.config
                    .from_email
                    .parse::<Mailbox>()
                    .context("Failed to parse from email")?,
            )
            .to(message
                .to
                .parse::<Mailbox>()
                .context("Failed to parse recipient email")?)
            .subject(message.subject.clone())
            .body(message.body.clone())
            .context("Failed to build email")?;

        self.transport
            .send(&email)
            .context("Failed to send email")?;
        info!("📧 Email sent to {}: {}", message.to, message.subject);
        Ok(DeliveryMode::Live)
    }
}

/// Dry-run adapter: logs the rendered message instead of sending it
pub struct DryRunEmailNotifier;

#[async_trait]
impl EmailNotifier for DryRunEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<DeliveryMode> {
        info!(
            "📧 [dry-run] Email to {} | {} | {}",
            message.to, message.subject, message.body
        );
        Ok(DeliveryMode::DryRun)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_reports_not_dispatched() {
        let notifier = DryRunEmailNotifier;
        let mode = notifier
            .send(&EmailMessage {
                to: "client@example.com".to_string(),
                subject: "Your appointment".to_string(),
                body: "See you soon".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(mode, DeliveryMode::DryRun);
        assert!(!mode.was_dispatched());
    }

    #[test]
    fn test_from_config_selects_dry_run_without_credentials() {
        let notifier = email_notifier_from_config(&EmailConfig::default()).unwrap();
        // Can't inspect the trait object's type directly; a default config
        // must never produce a live sender, which new() would reject later
        // anyway with empty credentials. Sending through it must report
        // dry-run.
        let message = EmailMessage {
            to: "a@example.com".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        };
        let mode = tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(notifier.send(&message))
            .unwrap();
        assert_eq!(mode, DeliveryMode::DryRun);
    }
}
