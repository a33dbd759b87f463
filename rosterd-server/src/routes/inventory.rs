//! Inventory routes: items and employee assignments

use axum::{
    extract::{Form, State},
    response::Redirect,
    Json,
};
use chrono::NaiveDate;

use crate::auth::SessionUser;
use crate::error::{ServerError, ServerResult};
use crate::models::{
    AssignInventoryForm, AssignInventoryOptions, AssignmentRow, FormScaffold, InventoryForm,
    InventoryItem,
};
use crate::AppState;

/// GET /add_inventory - form scaffold
pub async fn add_inventory_page(_user: SessionUser) -> Json<FormScaffold> {
    Json(FormScaffold::new(
        "add_inventory",
        &["name", "quantity", "description"],
    ))
}

/// POST /add_inventory - create an item
pub async fn add_inventory(
    State(state): State<AppState>,
    _user: SessionUser,
    Form(form): Form<InventoryForm>,
) -> ServerResult<Redirect> {
    if form.name.is_empty() {
        return Err(ServerError::BadRequest("Item name is required.".to_string()));
    }
    let quantity: i64 = form
        .quantity
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest("Quantity must be an integer.".to_string()))?;

    state
        .db
        .add_inventory_item(&form.name, quantity, &form.description)?;
    Ok(Redirect::to("/inventory_list"))
}

/// GET /inventory_list - all items
pub async fn inventory_list(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<Vec<InventoryItem>>> {
    Ok(Json(state.db.list_inventory()?))
}

/// GET /assign_inventory - employee and item pickers
pub async fn assign_inventory_page(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<AssignInventoryOptions>> {
    Ok(Json(AssignInventoryOptions {
        employees: state.db.employee_options()?,
        inventory_items: state.db.inventory_options()?,
    }))
}

/// POST /assign_inventory - record an assignment
pub async fn assign_inventory(
    State(state): State<AppState>,
    _user: SessionUser,
    Form(form): Form<AssignInventoryForm>,
) -> ServerResult<Redirect> {
    let employee_id: i64 = form
        .employee_id
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest("Employee id must be an integer.".to_string()))?;
    let inventory_id: i64 = form
        .inventory_id
        .trim()
        .parse()
        .map_err(|_| ServerError::BadRequest("Inventory id must be an integer.".to_string()))?;
    let assigned_date = NaiveDate::parse_from_str(form.assigned_date.trim(), "%Y-%m-%d")
        .map_err(|_| {
            ServerError::BadRequest("Assigned date must be in YYYY-MM-DD format.".to_string())
        })?;

    state
        .db
        .assign_inventory(employee_id, inventory_id, assigned_date)?;
    Ok(Redirect::to("/employee_inventory_list"))
}

/// GET /employee_inventory_list - joined assignment rows
pub async fn employee_inventory_list(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<Vec<AssignmentRow>>> {
    Ok(Json(state.db.list_assignments()?))
}

/// GET /inventory - landing page payload
pub async fn inventory_page(_user: SessionUser) -> Json<FormScaffold> {
    Json(FormScaffold::new(
        "inventory",
        &["add_inventory", "inventory_list", "assign_inventory"],
    ))
}
