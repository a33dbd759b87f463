//! Route handlers for rosterd-server
//!
//! Organized by resource type:
//! - auth: signup, login, logout
//! - employees: record CRUD and listing
//! - dashboard: index, statistics, chart, JSON dashboard data
//! - inventory: items and employee assignments
//! - documents: upload storage and sharing stubs
//! - health: health check endpoint

pub mod auth;
pub mod dashboard;
pub mod documents;
pub mod employees;
pub mod health;
pub mod inventory;

pub use auth::*;
pub use dashboard::*;
pub use documents::*;
pub use employees::*;
pub use health::*;
pub use inventory::*;
