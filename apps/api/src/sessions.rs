//! In-memory session store.
//!
//! One interactive session = one record behind the lock, keyed by a v4 id.
//! Nothing persists across a restart, and sessions never see each other's
//! state. A session is `Idle` until its first successful screening run;
//! every run replaces the previous results wholesale.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{FeatureResults, Toggles};

#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub bytes: Bytes,
    pub uploaded_at: DateTime<Utc>,
}

/// The session controller's state machine. `Populated` remembers which
/// toggles the run was made with: display filters against the toggles of
/// the LAST RUN, not whatever is currently checked.
#[derive(Debug, Clone)]
pub enum ScreeningPhase {
    Idle,
    Populated {
        toggles: Toggles,
        results: FeatureResults,
        completed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub document: Option<UploadedDocument>,
    pub phase: ScreeningPhase,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            id,
            created_at: Utc::now(),
            document: None,
            phase: ScreeningPhase::Idle,
        };
        self.inner.write().await.insert(id, session);
        id
    }

    /// Attaches (or replaces) the session's uploaded resume. Does not touch
    /// results; only a run action changes them.
    pub async fn attach_document(
        &self,
        id: Uuid,
        document: UploadedDocument,
    ) -> Result<(), AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.document = Some(document);
        Ok(())
    }

    /// Bytes of the uploaded resume. `MissingDocument` when the session has
    /// none, surfaced to the user as the "please upload" warning, with the
    /// session left exactly as it was.
    pub async fn document_bytes(&self, id: Uuid) -> Result<Bytes, AppError> {
        let sessions = self.inner.read().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        session
            .document
            .as_ref()
            .map(|d| d.bytes.clone())
            .ok_or(AppError::MissingDocument)
    }

    /// Replaces the session's results wholesale and moves it to `Populated`.
    pub async fn set_results(
        &self,
        id: Uuid,
        toggles: Toggles,
        results: FeatureResults,
    ) -> Result<DateTime<Utc>, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        let completed_at = Utc::now();
        session.phase = ScreeningPhase::Populated {
            toggles,
            results,
            completed_at,
        };
        Ok(completed_at)
    }

    pub async fn phase(&self, id: Uuid) -> Result<ScreeningPhase, AppError> {
        let sessions = self.inner.read().await;
        let session = sessions.get(&id).ok_or_else(|| not_found(id))?;
        Ok(session.phase.clone())
    }

    /// A point-in-time copy of the whole session, for the status view.
    pub async fn snapshot(&self, id: Uuid) -> Result<Session, AppError> {
        let sessions = self.inner.read().await;
        sessions.get(&id).cloned().ok_or_else(|| not_found(id))
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
