//! rosterd-core: domain types for the employee records service
//!
//! Holds everything the HTTP layer persists and serves:
//! - Validated employee construction ([`EmployeeDraft`] -> [`Employee`])
//! - The change-listener registry notified after every mutation
//! - Configuration loading for the `rosterd` binary

pub mod config;
pub mod employee;
pub mod error;
pub mod notify;

pub use employee::{Employee, EmployeeDraft};
pub use error::{Result, RosterError};
