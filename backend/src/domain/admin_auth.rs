//! Admin session gate for dashboard-only actions.
//!
//! The booking flow itself needs no authentication; only the admin
//! dashboard (appointment list, reminders, contact messages) sits behind
//! this passcode check. Tokens live in memory and die with the process.

use log::{info, warn};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use shared::{AdminLoginRequest, AdminLoginResponse};

/// Service for validating admin access
#[derive(Clone)]
pub struct AdminAuthService {
    passcode: String,
    sessions: Arc<Mutex<HashSet<String>>>,
}

impl AdminAuthService {
    /// Create a new AdminAuthService. An empty passcode disables admin
    /// login entirely rather than allowing blank submissions through.
    pub fn new(passcode: String) -> Self {
        Self {
            passcode: passcode.trim().to_lowercase(),
            sessions: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Validate a passcode attempt; a correct one mints a session token
    pub fn login(&self, request: AdminLoginRequest) -> AdminLoginResponse {
        if self.passcode.is_empty() {
            warn!("Admin login attempted but no passcode is configured");
            return AdminLoginResponse {
                success: false,
                token: None,
                message: "Admin access is not configured".to_string(),
            };
        }

        let attempt = request.passcode.trim();
        info!("Validating admin passcode (length: {})", attempt.len());

        // Case-insensitive comparison
        if attempt.to_lowercase() == self.passcode {
            let token = Uuid::new_v4().to_string();
            self.sessions.lock().unwrap().insert(token.clone());
            info!("Admin login successful");
            AdminLoginResponse {
                success: true,
                token: Some(token),
                message: "Access granted".to_string(),
            }
        } else {
            warn!("Admin login failed");
            AdminLoginResponse {
                success: false,
                token: None,
                message: "Incorrect passcode. Access denied.".to_string(),
            }
        }
    }

    /// Check whether a session token came from a successful login
    pub fn verify_token(&self, token: &str) -> bool {
        self.sessions.lock().unwrap().contains(token)
    }
}
