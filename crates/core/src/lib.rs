//! Brightdesk Core - Shared types library.
//!
//! This crate provides common types used across all Brightdesk components:
//! - `server` - The CRM backend (API surface, mutation services, jobs)
//! - `cli` - Command-line tools for migrations, seeding, and reminders
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and phone numbers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
