//! Request and response models for rosterd-server
//!
//! The original UI was server-rendered; here every page answers with the
//! JSON payload the page would have been rendered from, and forms arrive
//! as `application/x-www-form-urlencoded` bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use rosterd_core::EmployeeDraft;

// ============================================================================
// Auth
// ============================================================================

/// A registered user (auth only; never updated or deleted)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2 PHC-string hash
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// ============================================================================
// Employees
// ============================================================================

/// Employee form fields as submitted; all strings, validated by the draft
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub year_of_birth: String,
    #[serde(default)]
    pub qualification: String,
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub date_of_joining: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub status: String,
}

impl EmployeeForm {
    /// Turn the form into a draft. For update routes the id comes from the
    /// path, not the form body.
    pub fn into_draft(self, id_override: Option<i64>) -> EmployeeDraft {
        EmployeeDraft {
            id: id_override.map_or(self.id, |id| id.to_string()),
            name: self.name,
            email: self.email,
            year_of_birth: self.year_of_birth,
            qualification: self.qualification,
            salary: self.salary,
            job_title: self.job_title,
            date_of_joining: self.date_of_joining,
            department: self.department,
            status: self.status,
        }
    }
}

/// Listing row for /list_employees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub department: String,
    pub status: String,
}

// ============================================================================
// Dashboard / statistics
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub employee_count: i64,
    pub recent_hires: Vec<RecentHire>,
    pub upcoming_anniversaries: Vec<Anniversary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentHire {
    pub name: String,
    pub date_of_joining: NaiveDate,
}

/// An employee whose work anniversary falls inside the next month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anniversary {
    pub name: String,
    pub date_of_joining: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: i64,
}

// ============================================================================
// Inventory
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub name: String,
    pub quantity: i64,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InventoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignInventoryForm {
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub inventory_id: String,
    #[serde(default)]
    pub assigned_date: String,
}

/// Employee and item pickers for the assignment form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignInventoryOptions {
    pub employees: Vec<IdName>,
    pub inventory_items: Vec<IdName>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdName {
    pub id: i64,
    pub name: String,
}

/// Joined row for /employee_inventory_list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRow {
    pub employee_name: String,
    pub inventory_name: String,
    pub assigned_date: NaiveDate,
}

// ============================================================================
// Documents (storage is real, sharing is a stub)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub name: String,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentStoragePage {
    pub employees: Vec<IdName>,
    pub documents: Vec<DocumentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSharingPage {
    pub documents: Vec<DocumentRecord>,
    pub recipients: Vec<IdName>,
}

// ============================================================================
// Misc pages
// ============================================================================

/// Scaffold for a form the client renders itself
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormScaffold {
    pub form: String,
    pub fields: Vec<String>,
}

impl FormScaffold {
    pub fn new(form: &str, fields: &[&str]) -> Self {
        Self {
            form: form.to_string(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

// ============================================================================
// Health check
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub database: DatabaseHealth,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseHealth {
    pub connected: bool,
    pub path: String,
    pub size_bytes: Option<u64>,
}
