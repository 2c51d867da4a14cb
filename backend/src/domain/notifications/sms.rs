//! SMS notifier: Twilio adapter plus a dry-run fallback.
//!
//! Both adapters normalize recipients to E.164 and append the opt-out
//! footer before anything leaves the process.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use super::DeliveryMode;
use crate::config::SmsConfig;

/// Compliance footer appended to every outbound SMS
pub const OPT_OUT_FOOTER: &str = "Reply STOP to opt out.";

/// Boundary contract for sending SMS
#[async_trait]
pub trait SmsNotifier: Send + Sync {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryMode>;
}

/// Build the notifier the configuration calls for: Twilio when the
/// feature flag and full credentials are present, the logging adapter
/// otherwise.
pub fn sms_notifier_from_config(config: &SmsConfig) -> Arc<dyn SmsNotifier> {
    if config.is_live() {
        info!("📱 SMS notifications live from {}", config.from_number);
        Arc::new(TwilioSmsNotifier::new(config.clone()))
    } else {
        info!("📱 SMS notifications in dry-run mode (disabled or missing credentials)");
        Arc::new(DryRunSmsNotifier)
    }
}

/// Normalize a phone number to E.164-ish form.
///
/// Punctuation and spacing are stripped; bare 10-digit numbers are
/// assumed NANP and prefixed with +1; 11-digit numbers starting with 1
/// get a plus sign; anything else must already carry a country code and
/// land between 10 and 15 digits.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let has_plus = raw.trim_start().starts_with('+');
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if has_plus {
        if (10..=15).contains(&digits.len()) {
            return Ok(format!("+{}", digits));
        }
        bail!("'{}' is not a valid international phone number", raw);
    }

    match digits.len() {
        10 => Ok(format!("+1{}", digits)),
        11 if digits.starts_with('1') => Ok(format!("+{}", digits)),
        _ => bail!("'{}' does not look like a valid phone number", raw),
    }
}

/// Append the opt-out footer unless the body already carries it
pub fn with_opt_out_footer(body: &str) -> String {
    if body.contains(OPT_OUT_FOOTER) {
        body.to_string()
    } else {
        format!("{}\n\n{}", body.trim_end(), OPT_OUT_FOOTER)
    }
}

/// Live adapter sending through the Twilio Messages API
pub struct TwilioSmsNotifier {
    config: SmsConfig,
    client: reqwest::Client,
}

impl TwilioSmsNotifier {
    pub fn new(config: SmsConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl SmsNotifier for TwilioSmsNotifier {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryMode> {
        let to = normalize_phone(to)?;
        let body = with_opt_out_footer(body);

        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        );
        let params = [
            ("To", to.as_str()),
            ("From", self.config.from_number.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await
            .context("Failed to reach SMS provider")?;

        if !response.status().is_success() {
            bail!("SMS provider returned {}", response.status());
        }

        info!("📱 SMS sent to {}", to);
        Ok(DeliveryMode::Live)
    }
}

/// Dry-run adapter: validates and logs the message instead of sending it
pub struct DryRunSmsNotifier;

#[async_trait]
impl SmsNotifier for DryRunSmsNotifier {
    async fn send(&self, to: &str, body: &str) -> Result<DeliveryMode> {
        // Validate exactly as the live path would, so dry-run catches the
        // same bad inputs
        let to = normalize_phone(to)?;
        let body = with_opt_out_footer(body);

        info!("📱 [dry-run] SMS to {}: {}", to, body);
        Ok(DeliveryMode::DryRun)
    }
}
