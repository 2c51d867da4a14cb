//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work against
//! different backends without modification.

use anyhow::Result;
use async_trait::async_trait;
use shared::{Appointment, ContactMessage};

/// Trait defining the interface for appointment storage operations
#[async_trait]
pub trait AppointmentStorage: Send + Sync {
    /// Store a new appointment
    async fn store_appointment(&self, appointment: &Appointment) -> Result<()>;

    /// Retrieve a specific appointment by ID
    async fn get_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>>;

    /// List all appointments, most recently created first
    async fn list_appointments(&self) -> Result<Vec<Appointment>>;
}

/// Trait defining the interface for contact message storage operations
#[async_trait]
pub trait MessageStorage: Send + Sync {
    /// Store a new contact message
    async fn store_message(&self, message: &ContactMessage) -> Result<()>;

    /// List contact messages, most recent first, with an optional limit
    async fn list_messages(&self, limit: Option<u32>) -> Result<Vec<ContactMessage>>;
}
