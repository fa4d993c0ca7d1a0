use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Feature, FeatureFailure, Toggles};
use crate::screening::runner::run_screening;
use crate::screening::view::{build_view, ResultsView};
use crate::sessions::{ScreeningPhase, UploadedDocument};
use crate::state::AppState;

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.sessions.create().await;
    info!("Created session {session_id}");
    Json(CreateSessionResponse { session_id })
}

#[derive(Serialize)]
pub struct UploadResponse {
    pub session_id: Uuid,
    pub filename: String,
    pub size_bytes: usize,
}

/// POST /api/v1/sessions/:id/resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut document: Option<UploadedDocument> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("resume.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?;
        document = Some(UploadedDocument {
            filename,
            bytes,
            uploaded_at: Utc::now(),
        });
        break;
    }

    let document =
        document.ok_or_else(|| AppError::Validation("multipart field 'file' is required".into()))?;
    if document.bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".into()));
    }

    let filename = document.filename.clone();
    let size_bytes = document.bytes.len();
    state.sessions.attach_document(id, document).await?;
    info!("Session {id}: stored '{filename}' ({size_bytes} bytes)");
    Ok(Json(UploadResponse {
        session_id: id,
        filename,
        size_bytes,
    }))
}

#[derive(Serialize)]
pub struct DocumentInfo {
    pub filename: String,
    pub size_bytes: usize,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentInfo>,
    pub phase: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_run_toggles: Option<Toggles>,
}

/// GET /api/v1/sessions/:id
pub async fn handle_session_info(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionInfo>, AppError> {
    let session = state.sessions.snapshot(id).await?;
    let (phase, last_run_at, last_run_toggles) = match &session.phase {
        ScreeningPhase::Idle => ("idle", None, None),
        ScreeningPhase::Populated {
            toggles,
            completed_at,
            ..
        } => ("populated", Some(*completed_at), Some(*toggles)),
    };
    Ok(Json(SessionInfo {
        session_id: session.id,
        created_at: session.created_at,
        document: session.document.as_ref().map(|d| DocumentInfo {
            filename: d.filename.clone(),
            size_bytes: d.bytes.len(),
            uploaded_at: d.uploaded_at,
        }),
        phase,
        last_run_at,
        last_run_toggles,
    }))
}

#[derive(Debug, Serialize)]
pub struct ScreenResponse {
    pub session_id: Uuid,
    pub computed: Vec<Feature>,
    pub failures: Vec<FeatureFailure>,
    pub completed_at: DateTime<Utc>,
}

/// POST /api/v1/sessions/:id/screen
///
/// Runs the pipeline for the toggled features. With no resume uploaded this
/// returns the `NO_DOCUMENT` warning and the session is left untouched.
pub async fn handle_screen(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(toggles): Json<Toggles>,
) -> Result<Json<ScreenResponse>, AppError> {
    let bytes = state.sessions.document_bytes(id).await?;
    info!("Session {id}: screening {} bytes", bytes.len());

    let results = run_screening(toggles, &bytes, &state.summarizer, &state.visualizer).await?;
    let computed = results.computed();
    let failures = results.failures.clone();
    let completed_at = state.sessions.set_results(id, toggles, results).await?;

    Ok(Json(ScreenResponse {
        session_id: id,
        computed,
        failures,
        completed_at,
    }))
}

/// GET /api/v1/sessions/:id/results
///
/// The display view: only fields both requested via query toggles and
/// computed in the last run are present.
pub async fn handle_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(toggles): Query<Toggles>,
) -> Result<Json<ResultsView>, AppError> {
    let phase = state.sessions.phase(id).await?;
    Ok(Json(build_view(&phase, &toggles)))
}

/// GET /api/v1/sessions/:id/wordcloud.png
pub async fn handle_wordcloud_png(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let phase = state.sessions.phase(id).await?;
    let ScreeningPhase::Populated { results, .. } = phase else {
        return Err(AppError::NotFound("No word cloud computed yet".into()));
    };
    let png = results
        .wordcloud_png
        .ok_or_else(|| AppError::NotFound("No word cloud computed yet".into()))?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}
