//! SQLite persistence layer for rosterd
//!
//! A single connection behind a mutex; every statement takes the lock, so
//! mutations are observed as fully serialized. Schema migrations run at
//! open. After each committed mutation the employee change registry is
//! notified, outside the lock.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::{Datelike, Months, NaiveDate};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use rosterd_core::notify::{ChangeListener, EmployeeEvent, ListenerRegistry};
use rosterd_core::Employee;

use crate::error::{ServerError, ServerResult};
use crate::models::*;

/// Thread-safe database wrapper
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
    path: PathBuf,
    listeners: ListenerRegistry,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open(path: impl Into<PathBuf>) -> ServerResult<Self> {
        let path = path.into();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path,
            listeners: ListenerRegistry::new(),
        };

        db.run_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> ServerResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
            path: PathBuf::from(":memory:"),
            listeners: ListenerRegistry::new(),
        };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get the database file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Get database file size in bytes
    pub fn size_bytes(&self) -> Option<u64> {
        std::fs::metadata(&self.path).ok().map(|m| m.len())
    }

    /// Register a listener for employee mutations
    pub fn register_listener(&self, listener: Arc<dyn ChangeListener>) {
        self.listeners.register(listener);
    }

    /// Run schema migrations
    fn run_migrations(&self) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();

        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(INDEXES)?;

        Ok(())
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Insert a new employee. Fails with a conflict when the id is taken.
    pub fn add_employee(&self, employee: &Employee) -> ServerResult<()> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                r#"
                INSERT INTO employees (id, name, email, year_of_birth, qualification, salary, job_title, date_of_joining, department, status)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    employee.id,
                    employee.name,
                    employee.email,
                    employee.year_of_birth,
                    employee.qualification,
                    employee.salary,
                    employee.job_title,
                    employee.date_of_joining.to_string(),
                    employee.department,
                    employee.status
                ],
            )
            .map_err(|e| match &e {
                rusqlite::Error::SqliteFailure(f, _)
                    if f.code == ErrorCode::ConstraintViolation =>
                {
                    ServerError::Conflict(format!(
                        "Employee with ID {} already exists",
                        employee.id
                    ))
                }
                _ => ServerError::Database(e),
            })?;
        }

        self.listeners.publish(&EmployeeEvent::Added {
            id: employee.id,
            name: employee.name.clone(),
        });
        Ok(())
    }

    /// Overwrite all mutable fields for the given id. Silently succeeds
    /// when the id does not exist.
    pub fn update_employee(&self, id: i64, employee: &Employee) -> ServerResult<()> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute(
                r#"
                UPDATE employees
                SET name = ?, email = ?, year_of_birth = ?, qualification = ?, salary = ?, job_title = ?, date_of_joining = ?, department = ?, status = ?
                WHERE id = ?
                "#,
                params![
                    employee.name,
                    employee.email,
                    employee.year_of_birth,
                    employee.qualification,
                    employee.salary,
                    employee.job_title,
                    employee.date_of_joining.to_string(),
                    employee.department,
                    employee.status,
                    id
                ],
            )?;
        }

        self.listeners.publish(&EmployeeEvent::Updated { id });
        Ok(())
    }

    /// Remove the row. Silently succeeds when absent.
    pub fn delete_employee(&self, id: i64) -> ServerResult<()> {
        {
            let conn = self.conn.lock().unwrap();
            conn.execute("DELETE FROM employees WHERE id = ?", params![id])?;
        }

        self.listeners.publish(&EmployeeEvent::Deleted { id });
        Ok(())
    }

    pub fn get_employee(&self, id: i64) -> ServerResult<Option<Employee>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, email, year_of_birth, qualification, salary, job_title, date_of_joining, department, status
            FROM employees
            WHERE id = ?
            "#,
        )?;

        let employee = stmt.query_row(params![id], row_to_employee).optional()?;
        Ok(employee)
    }

    pub fn list_employees(&self) -> ServerResult<Vec<Employee>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, email, year_of_birth, qualification, salary, job_title, date_of_joining, department, status
            FROM employees
            "#,
        )?;

        let employees = stmt
            .query_map([], row_to_employee)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(employees)
    }

    /// Listing rows for the employee table view
    pub fn employee_summaries(&self) -> ServerResult<Vec<EmployeeSummary>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT id, name, email, job_title, department, status FROM employees",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(EmployeeSummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    job_title: row.get(3)?,
                    department: row.get(4)?,
                    status: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn employee_count(&self) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        let count = conn.query_row("SELECT COUNT(*) FROM employees", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Top-n hires by join date descending
    pub fn recent_hires(&self, limit: i64) -> ServerResult<Vec<RecentHire>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT name, date_of_joining
            FROM employees
            ORDER BY date_of_joining DESC
            LIMIT ?
            "#,
        )?;

        let hires = stmt
            .query_map(params![limit], |row| {
                Ok(RecentHire {
                    name: row.get(0)?,
                    date_of_joining: parse_date(row.get::<_, String>(1)?)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(hires)
    }

    /// Employees whose join-date anniversary falls within
    /// `[today, today + 1 month]`.
    ///
    /// The join date is shifted to today's year before comparing, so an
    /// anniversary that already passed this year is not reported even when
    /// the window crosses into January. A Feb 29 join date has no shifted
    /// representation in a non-leap year and is skipped.
    pub fn upcoming_anniversaries(&self, today: NaiveDate) -> ServerResult<Vec<Anniversary>> {
        let window_end = today
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        let rows = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn.prepare("SELECT name, date_of_joining FROM employees")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;
            rows
        };

        let mut anniversaries = Vec::new();
        for (name, joined) in rows {
            let date_of_joining = parse_date(joined)?;
            let Some(shifted) = date_of_joining.with_year(today.year()) else {
                continue;
            };
            if shifted >= today && shifted <= window_end {
                anniversaries.push(Anniversary {
                    name,
                    date_of_joining,
                });
            }
        }

        Ok(anniversaries)
    }

    /// Employee headcount per department, for the chart
    pub fn department_counts(&self) -> ServerResult<Vec<DepartmentCount>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT department, COUNT(*) as count
            FROM employees
            GROUP BY department
            ORDER BY department
            "#,
        )?;

        let counts = stmt
            .query_map([], |row| {
                Ok(DepartmentCount {
                    department: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Create a user. Fails with a conflict when the email is registered.
    pub fn create_user(&self, name: &str, email: &str, password_hash: &str) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();

        conn.execute(
            "INSERT INTO users (name, email, password) VALUES (?, ?, ?)",
            params![name, email, password_hash],
        )
        .map_err(|e| match &e {
            rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation => {
                ServerError::Conflict("User already exists. Please log in.".to_string())
            }
            _ => ServerError::Database(e),
        })?;

        Ok(conn.last_insert_rowid())
    }

    pub fn find_user_by_email(&self, email: &str) -> ServerResult<Option<User>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT id, name, email, password FROM users WHERE email = ?")?;

        let user = stmt
            .query_row(params![email], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    password: row.get(3)?,
                })
            })
            .optional()?;
        Ok(user)
    }

    // ========================================================================
    // Inventory
    // ========================================================================

    pub fn add_inventory_item(
        &self,
        name: &str,
        quantity: i64,
        description: &str,
    ) -> ServerResult<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO inventory (name, quantity, description) VALUES (?, ?, ?)",
            params![name, quantity, description],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn list_inventory(&self) -> ServerResult<Vec<InventoryItem>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, name, quantity, description FROM inventory")?;

        let items = stmt
            .query_map([], |row| {
                Ok(InventoryItem {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    quantity: row.get(2)?,
                    description: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Record an assignment. Referenced ids are not checked against the
    /// employees/inventory tables, matching the original schema.
    pub fn assign_inventory(
        &self,
        employee_id: i64,
        inventory_id: i64,
        assigned_date: NaiveDate,
    ) -> ServerResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO employee_inventory (employee_id, inventory_id, assigned_date) VALUES (?, ?, ?)",
            params![employee_id, inventory_id, assigned_date.to_string()],
        )?;
        Ok(())
    }

    pub fn list_assignments(&self) -> ServerResult<Vec<AssignmentRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT e.name AS employee_name, i.name AS inventory_name, ei.assigned_date
            FROM employee_inventory ei
            JOIN employees e ON ei.employee_id = e.id
            JOIN inventory i ON ei.inventory_id = i.id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AssignmentRow {
                    employee_name: row.get(0)?,
                    inventory_name: row.get(1)?,
                    assigned_date: parse_date(row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// id/name pairs for the assignment form pickers
    pub fn employee_options(&self) -> ServerResult<Vec<IdName>> {
        self.id_name_pairs("SELECT id, name FROM employees")
    }

    pub fn inventory_options(&self) -> ServerResult<Vec<IdName>> {
        self.id_name_pairs("SELECT id, name FROM inventory")
    }

    fn id_name_pairs(&self, sql: &str) -> ServerResult<Vec<IdName>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(sql)?;
        let pairs = stmt
            .query_map([], |row| {
                Ok(IdName {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pairs)
    }
}

fn row_to_employee(row: &rusqlite::Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        year_of_birth: row.get(3)?,
        qualification: row.get(4)?,
        salary: row.get(5)?,
        job_title: row.get(6)?,
        date_of_joining: parse_date(row.get::<_, String>(7)?)?,
        department: row.get(8)?,
        status: row.get(9)?,
    })
}

// ============================================================================
// Schema
// ============================================================================

const SCHEMA: &str = r#"
-- Employee records
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    year_of_birth INTEGER NOT NULL,
    qualification TEXT NOT NULL,
    salary REAL NOT NULL,
    job_title TEXT NOT NULL,
    date_of_joining TEXT NOT NULL,
    department TEXT NOT NULL,
    status TEXT NOT NULL
);

-- Auth users
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);

-- Inventory items
CREATE TABLE IF NOT EXISTS inventory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);

-- Employee/inventory assignments (ids intentionally unconstrained)
CREATE TABLE IF NOT EXISTS employee_inventory (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id INTEGER NOT NULL,
    inventory_id INTEGER NOT NULL,
    assigned_date TEXT NOT NULL
);
"#;

const INDEXES: &str = r#"
CREATE INDEX IF NOT EXISTS idx_employees_joined ON employees(date_of_joining DESC);
CREATE INDEX IF NOT EXISTS idx_employees_department ON employees(department);
CREATE INDEX IF NOT EXISTS idx_assignments_employee ON employee_inventory(employee_id);
"#;

// ============================================================================
// Helpers
// ============================================================================

fn parse_date(s: String) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
