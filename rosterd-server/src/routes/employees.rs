//! Employee record routes
//!
//! All form input goes through `EmployeeDraft::validate`; handlers never
//! duplicate field checks. Successful mutations redirect to the dashboard
//! the way the original form flow did.

use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    Json,
};

use rosterd_core::Employee;

use crate::auth::SessionUser;
use crate::error::{ServerError, ServerResult};
use crate::models::{EmployeeForm, EmployeeSummary, FormScaffold};
use crate::AppState;

const EMPLOYEE_FIELDS: &[&str] = &[
    "id",
    "name",
    "email",
    "year_of_birth",
    "qualification",
    "salary",
    "job_title",
    "date_of_joining",
    "department",
    "status",
];

/// GET /add_employee - form scaffold
pub async fn add_employee_page(_user: SessionUser) -> Json<FormScaffold> {
    Json(FormScaffold::new("add_employee", EMPLOYEE_FIELDS))
}

/// POST /add_employee - validate and insert a new record
pub async fn add_employee(
    State(state): State<AppState>,
    _user: SessionUser,
    Form(form): Form<EmployeeForm>,
) -> ServerResult<Redirect> {
    let employee = form.into_draft(None).validate()?;
    state.db.add_employee(&employee)?;
    Ok(Redirect::to("/"))
}

/// GET /employee/{id} - full record
pub async fn get_employee(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(id): Path<i64>,
) -> ServerResult<Json<Employee>> {
    let employee = state
        .db
        .get_employee(id)?
        .ok_or_else(|| ServerError::NotFound("Employee not found.".to_string()))?;
    Ok(Json(employee))
}

/// POST /employee/{id} and /employee/edit/{id} - overwrite all mutable fields
pub async fn update_employee(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(id): Path<i64>,
    Form(form): Form<EmployeeForm>,
) -> ServerResult<Redirect> {
    let employee = form.into_draft(Some(id)).validate()?;
    state.db.update_employee(id, &employee)?;
    Ok(Redirect::to("/"))
}

/// GET /employee/edit/{id} - record for the edit form
pub async fn edit_employee_page(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(id): Path<i64>,
) -> ServerResult<Json<Employee>> {
    let employee = state
        .db
        .get_employee(id)?
        .ok_or_else(|| ServerError::NotFound("Employee not found.".to_string()))?;
    Ok(Json(employee))
}

/// POST /delete_employee/{id} - remove the record
pub async fn delete_employee(
    State(state): State<AppState>,
    _user: SessionUser,
    Path(id): Path<i64>,
) -> ServerResult<Redirect> {
    state.db.delete_employee(id)?;
    Ok(Redirect::to("/"))
}

/// GET /list_employees - summary rows for the table view
pub async fn list_employees(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<Vec<EmployeeSummary>>> {
    let employees = state.db.employee_summaries()?;
    Ok(Json(employees))
}
