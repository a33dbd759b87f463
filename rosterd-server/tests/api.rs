//! End-to-end API tests against the full router

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use rosterd_server::{build_router, AppState, Database};

fn app() -> Router {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let db = Database::open_in_memory().expect("in-memory db");
    let uploads = tempfile::tempdir().expect("tempdir").keep();
    build_router(AppState::new(db, uploads), 30)
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request_with_cookie(uri: &str, cookie: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user, log in, and return the session cookie.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/signup",
            "name=Alice&email=alice@example.com&password=hunter2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "email=alice@example.com&password=hunter2",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

const VALID_EMPLOYEE: &str = "id=1&name=Bob&email=bob@example.com&year_of_birth=1990\
    &qualification=BSc&salary=5000&job_title=Engineer&date_of_joining=2024-01-15\
    &department=IT&status=active";

#[tokio::test]
async fn health_reports_ok_without_auth() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"]["connected"], true);
}

#[tokio::test]
async fn pages_redirect_to_login_when_logged_out() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/list_employees")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}

#[tokio::test]
async fn dashboard_data_is_401_json_when_logged_out() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/dashboard_data")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User not logged in");
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let app = app();
    let _cookie = login(&app).await;

    let response = app
        .oneshot(form_request(
            "/signup",
            "name=Alice2&email=alice@example.com&password=other",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = body_json(response).await;
    assert_eq!(body["error"], "User already exists. Please log in.");
}

#[tokio::test]
async fn signup_requires_all_fields() {
    let response = app()
        .oneshot(form_request("/signup", "name=Alice&email=&password=pw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Please fill all fields.");
}

#[tokio::test]
async fn bad_credentials_are_rejected() {
    let app = app();
    let _cookie = login(&app).await;

    let response = app
        .oneshot(form_request(
            "/login",
            "email=alice@example.com&password=wrong",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials. Please try again.");
}

#[tokio::test]
async fn employee_crud_flow() {
    let app = app();
    let cookie = login(&app).await;

    // Create
    let response = app
        .clone()
        .oneshot(form_request_with_cookie("/add_employee", &cookie, VALID_EMPLOYEE))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    // Read back
    let response = app
        .clone()
        .oneshot(get_with_cookie("/employee/1", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Bob");
    assert_eq!(body["salary"], 5000.0);

    // Update the salary
    let updated = VALID_EMPLOYEE.replace("salary=5000", "salary=6000");
    let response = app
        .clone()
        .oneshot(form_request_with_cookie("/employee/1", &cookie, &updated))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/employee/1", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["salary"], 6000.0);

    // List shows one row
    let response = app
        .clone()
        .oneshot(get_with_cookie("/list_employees", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Delete, then 404
    let response = app
        .clone()
        .oneshot(form_request_with_cookie("/delete_employee/1", &cookie, ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get_with_cookie("/employee/1", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_employee_id_conflicts() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request_with_cookie("/add_employee", &cookie, VALID_EMPLOYEE))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(form_request_with_cookie("/add_employee", &cookie, VALID_EMPLOYEE))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_employee_form_is_rejected() {
    let app = app();
    let cookie = login(&app).await;

    let bad = VALID_EMPLOYEE.replace("name=Bob", "name=Bob99");
    let response = app
        .oneshot(form_request_with_cookie("/add_employee", &cookie, &bad))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Name cannot contain numbers.");
}

#[tokio::test]
async fn dashboard_counts_employees() {
    let app = app();
    let cookie = login(&app).await;

    app.clone()
        .oneshot(form_request_with_cookie("/add_employee", &cookie, VALID_EMPLOYEE))
        .await
        .unwrap();

    let response = app
        .oneshot(get_with_cookie("/dashboard_data", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["employee_count"], 1);
    assert_eq!(body["recent_hires"][0]["name"], "Bob");
}

#[tokio::test]
async fn inventory_assignment_flow() {
    let app = app();
    let cookie = login(&app).await;

    app.clone()
        .oneshot(form_request_with_cookie("/add_employee", &cookie, VALID_EMPLOYEE))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_request_with_cookie(
            "/add_inventory",
            &cookie,
            "name=Laptop&quantity=3&description=Dev+machine",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(get_with_cookie("/assign_inventory", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["employees"][0]["name"], "Bob");
    assert_eq!(body["inventory_items"][0]["name"], "Laptop");

    let response = app
        .clone()
        .oneshot(form_request_with_cookie(
            "/assign_inventory",
            &cookie,
            "employee_id=1&inventory_id=1&assigned_date=2024-02-01",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get_with_cookie("/employee_inventory_list", &cookie))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body[0]["employee_name"], "Bob");
    assert_eq!(body[0]["inventory_name"], "Laptop");
    assert_eq!(body[0]["assigned_date"], "2024-02-01");
}

#[tokio::test]
async fn chart_answers_with_svg() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .oneshot(get_with_cookie("/chart", &cookie))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = app();
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_with_cookie("/logout", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(get_with_cookie("/list_employees", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");
}
