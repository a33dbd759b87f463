//! Document storage and sharing routes
//!
//! Storage writes uploads to the configured uploads directory; the
//! document metadata tables never existed in the original system, so the
//! listings stay empty stubs. Sharing is a stub with no persistence.

use std::path::Path;

use axum::{
    extract::{Multipart, State},
    response::Redirect,
    Json,
};

use crate::auth::SessionUser;
use crate::error::{ServerError, ServerResult};
use crate::models::{DocumentSharingPage, DocumentStoragePage, FormScaffold};
use crate::AppState;

const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "png"];

fn allowed_file(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Strip any path components the client sent along with the filename.
fn sanitize_filename(filename: &str) -> Option<String> {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_string())
}

/// GET /document_storage - employees and stored document listing (stub)
pub async fn document_storage_page(
    State(state): State<AppState>,
    _user: SessionUser,
) -> ServerResult<Json<DocumentStoragePage>> {
    Ok(Json(DocumentStoragePage {
        employees: state.db.employee_options()?,
        documents: Vec::new(),
    }))
}

/// POST /document_storage - save an uploaded file under the uploads dir
pub async fn store_document(
    State(state): State<AppState>,
    _user: SessionUser,
    mut multipart: Multipart,
) -> ServerResult<Redirect> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let Some(filename) = field.file_name().map(|name| name.to_string()) else {
            continue;
        };
        if !allowed_file(&filename) {
            return Err(ServerError::BadRequest("File type not allowed.".to_string()));
        }
        let filename = sanitize_filename(&filename)
            .ok_or_else(|| ServerError::BadRequest("Invalid file name.".to_string()))?;

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Malformed upload: {}", e)))?;

        tokio::fs::create_dir_all(&state.uploads_dir).await?;
        let target = state.uploads_dir.join(&filename);
        tokio::fs::write(&target, &bytes).await?;

        tracing::info!(file = %target.display(), size = bytes.len(), "Stored document");
    }

    Ok(Redirect::to("/document_storage"))
}

/// GET /document_sharing - documents and recipients (stub)
pub async fn document_sharing_page(_user: SessionUser) -> Json<DocumentSharingPage> {
    Json(DocumentSharingPage {
        documents: Vec::new(),
        recipients: Vec::new(),
    })
}

/// POST /document_sharing - stub; accepts and redirects
pub async fn share_document(_user: SessionUser) -> Redirect {
    Redirect::to("/document_sharing")
}

/// GET /document_management - landing page payload
pub async fn document_management(_user: SessionUser) -> Json<FormScaffold> {
    Json(FormScaffold::new(
        "document_management",
        &["document_storage", "document_sharing", "compliance"],
    ))
}

/// GET /compliance - stub payload
pub async fn compliance(_user: SessionUser) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "compliance_data": [],
        "audit_logs": []
    }))
}
