//! Employee records and validated construction
//!
//! All field constraints are enforced in one place: [`EmployeeDraft::validate`].
//! The route layer hands raw form values to the draft and never duplicates
//! the checks, so an `Employee` value is valid by construction and nothing
//! invalid ever reaches the database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// Accepted range for year of birth
pub const YEAR_OF_BIRTH_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;

/// A validated employee record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub year_of_birth: i32,
    pub qualification: String,
    pub salary: f64,
    pub job_title: String,
    pub date_of_joining: NaiveDate,
    pub department: String,
    pub status: String,
}

/// Raw employee input as it arrives from a form, before any checks run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub id: String,
    pub name: String,
    pub email: String,
    pub year_of_birth: String,
    pub qualification: String,
    pub salary: String,
    pub job_title: String,
    pub date_of_joining: String,
    pub department: String,
    pub status: String,
}

impl EmployeeDraft {
    /// Validate the draft and produce an [`Employee`], or fail with the
    /// first violated constraint.
    ///
    /// Checks, in order: id coercible to a positive integer, name free of
    /// digits, email contains `@`, year of birth in range, salary a
    /// non-negative number (zero permitted), joining date in `YYYY-MM-DD`.
    pub fn validate(self) -> Result<Employee> {
        let id: i64 = self
            .id
            .trim()
            .parse()
            .map_err(|_| RosterError::validation("ID must be an integer."))?;
        if id <= 0 {
            return Err(RosterError::validation(
                "Invalid ID. ID must be a positive integer.",
            ));
        }

        if self.name.chars().any(|c| c.is_numeric()) {
            return Err(RosterError::validation("Name cannot contain numbers."));
        }

        if self.email.is_empty() || !self.email.contains('@') {
            return Err(RosterError::validation("Invalid email address."));
        }

        let year_of_birth: i32 = self
            .year_of_birth
            .trim()
            .parse()
            .map_err(|_| RosterError::validation("Invalid year of birth."))?;
        if !YEAR_OF_BIRTH_RANGE.contains(&year_of_birth) {
            return Err(RosterError::validation("Invalid year of birth."));
        }

        let salary: f64 = self
            .salary
            .trim()
            .parse()
            .map_err(|_| RosterError::validation("Salary must be a number."))?;
        if salary < 0.0 {
            return Err(RosterError::validation("Salary cannot be negative."));
        }

        let date_of_joining = NaiveDate::parse_from_str(self.date_of_joining.trim(), "%Y-%m-%d")
            .map_err(|_| RosterError::validation("Joining date must be in YYYY-MM-DD format."))?;

        Ok(Employee {
            id,
            name: self.name,
            email: self.email,
            year_of_birth,
            qualification: self.qualification,
            salary,
            job_title: self.job_title,
            date_of_joining,
            department: self.department,
            status: self.status,
        })
    }
}
