//! Dashboard, statistics and chart routes

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::auth::{ApiUser, SessionUser};
use crate::error::ServerResult;
use crate::models::{DashboardData, DepartmentCount};
use crate::AppState;

/// How many recent hires the dashboard shows
const RECENT_HIRES_LIMIT: i64 = 5;

fn dashboard_payload(state: &AppState) -> ServerResult<DashboardData> {
    Ok(DashboardData {
        employee_count: state.db.employee_count()?,
        recent_hires: state.db.recent_hires(RECENT_HIRES_LIMIT)?,
        upcoming_anniversaries: state
            .db
            .upcoming_anniversaries(Utc::now().date_naive())?,
    })
}

/// GET / - dashboard page payload
pub async fn index(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<DashboardData>> {
    Ok(Json(dashboard_payload(&state)?))
}

/// GET /dashboard_data - same payload for API consumers; 401 when not
/// logged in instead of a redirect
pub async fn dashboard_data(
    State(state): State<AppState>,
    _user: ApiUser,
) -> ServerResult<Json<DashboardData>> {
    Ok(Json(dashboard_payload(&state)?))
}

/// GET /statistics - statistics page payload
pub async fn statistics(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<DashboardData>> {
    Ok(Json(dashboard_payload(&state)?))
}

/// GET /chart - employee count by department as an inline SVG bar chart
pub async fn chart(State(state): State<AppState>, _user: SessionUser) -> ServerResult<Response> {
    let counts = state.db.department_counts()?;
    let svg = render_bar_chart(&counts);
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

/// Minimal SVG bar chart. A charting engine is deliberately out of scope;
/// this emits just enough markup for the dashboard's embedded image.
fn render_bar_chart(counts: &[DepartmentCount]) -> String {
    const BAR_WIDTH: i64 = 60;
    const BAR_GAP: i64 = 20;
    const CHART_HEIGHT: i64 = 240;
    const LABEL_AREA: i64 = 30;

    let max = counts.iter().map(|c| c.count).max().unwrap_or(0).max(1);
    let width = (counts.len() as i64) * (BAR_WIDTH + BAR_GAP) + BAR_GAP;
    let height = CHART_HEIGHT + LABEL_AREA;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        width.max(BAR_GAP), height
    );
    svg.push_str(r#"<text x="4" y="14" font-size="12">Employee Count by Department</text>"#);

    for (i, entry) in counts.iter().enumerate() {
        let bar_height = entry.count * (CHART_HEIGHT - 30) / max;
        let x = BAR_GAP + (i as i64) * (BAR_WIDTH + BAR_GAP);
        let y = CHART_HEIGHT - bar_height;
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="steelblue"/>"#,
            x, y, BAR_WIDTH, bar_height
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11" text-anchor="middle">{}</text>"#,
            x + BAR_WIDTH / 2,
            CHART_HEIGHT + 16,
            escape_text(&entry.department)
        ));
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="11" text-anchor="middle">{}</text>"#,
            x + BAR_WIDTH / 2,
            y - 4,
            entry.count
        ));
    }

    svg.push_str("</svg>");
    svg
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_contains_one_bar_per_department() {
        let counts = vec![
            DepartmentCount {
                department: "HR".to_string(),
                count: 2,
            },
            DepartmentCount {
                department: "IT".to_string(),
                count: 5,
            },
        ];

        let svg = render_bar_chart(&counts);
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains(">HR<"));
        assert!(svg.contains(">IT<"));
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn chart_with_no_departments_is_still_valid() {
        let svg = render_bar_chart(&[]);
        assert!(svg.contains("Employee Count by Department"));
        assert_eq!(svg.matches("<rect").count(), 0);
    }

    #[test]
    fn department_labels_are_escaped() {
        let counts = vec![DepartmentCount {
            department: "R&D".to_string(),
            count: 1,
        }];
        let svg = render_bar_chart(&counts);
        assert!(svg.contains("R&amp;D"));
    }
}
