//! # Domain Module
//!
//! Business logic for the salon booking backend, independent of any UI
//! framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **calendar**: booking grid generation and date rules
//! - **wizard**: the four-step booking state machine
//! - **catalog**: the static service table and time slots
//! - **appointment_service**: appointment creation, listing, reminders
//! - **contact_service**: contact form handling
//! - **admin_auth**: passcode gate for the admin dashboard
//! - **notifications**: email/SMS collaborators with dry-run adapters
//!
//! ## Key Rules
//!
//! - The calendar grid is pure: "today" and the selection are inputs
//! - The wizard owns the only mutable booking draft and gates each step
//! - Bookings require explicit consent and a known catalog service
//! - Notification failures never fail a booking

pub mod admin_auth;
pub mod appointment_service;
pub mod calendar;
pub mod catalog;
pub mod contact_service;
pub mod notifications;
pub mod wizard;

pub use admin_auth::*;
pub use appointment_service::*;
pub use calendar::*;
pub use contact_service::*;
pub use wizard::*;
