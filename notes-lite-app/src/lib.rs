//! Platform-agnostic application bootstrap for notes-lite.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and, with the `sqlite-store` feature, `bootstrap` which turns
//! a configuration file into a ready session.

pub mod adapters;
pub mod backend;
pub mod config;

use std::path::PathBuf;
use std::sync::Arc;

use notes_lite_core::error::{CoreError, CoreResult};
use notes_lite_core::services::{
    FolderService, NoteService, NotebookService, SearchService, SessionContext,
};
use notes_lite_core::traits::{FolderRepository, NoteRepository, NoteStore};
use notes_lite_core::types::{BackendKind, Notebook, DEFAULT_USER_ID};

use adapters::{FallbackEvent, FallbackStore};
use backend::LocalReason;

/// Platform-agnostic application state.
///
/// Holds all services and the `SessionContext`. Every frontend constructs
/// this once at startup via `AppStateBuilder` or `bootstrap`.
pub struct AppState {
    /// Session context (user, backend and repositories)
    pub ctx: Arc<SessionContext>,
    pub notebook_service: NotebookService,
    pub note_service: NoteService,
    pub folder_service: FolderService,
    pub search_service: SearchService,
    /// Set when the session runs on the local backend
    pub local_reason: Option<LocalReason>,
    fallback: Option<Arc<FallbackStore>>,
}

impl AppState {
    #[must_use]
    pub fn backend(&self) -> BackendKind {
        self.ctx.backend()
    }

    /// Loads the notebook for this session.
    pub async fn load_notebook(&self) -> CoreResult<Notebook> {
        self.notebook_service.load().await
    }

    /// Remote failures served locally so far. Empty on the local backend.
    pub async fn fallback_events(&self) -> Vec<FallbackEvent> {
        match &self.fallback {
            Some(store) => store.events().await,
            None => Vec::new(),
        }
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `note_repository` and `folder_repository` (or `store` for both)
///
/// # Optional
/// - `user_id`: defaults to `public-user`
/// - `backend`: defaults to `BackendKind::Local`
pub struct AppStateBuilder {
    user_id: Option<String>,
    backend: Option<BackendKind>,
    note_repository: Option<Arc<dyn NoteRepository>>,
    folder_repository: Option<Arc<dyn FolderRepository>>,
    local_reason: Option<LocalReason>,
    fallback: Option<Arc<FallbackStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            user_id: None,
            backend: None,
            note_repository: None,
            folder_repository: None,
            local_reason: None,
            fallback: None,
        }
    }

    #[must_use]
    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn backend(mut self, backend: BackendKind) -> Self {
        self.backend = Some(backend);
        self
    }

    #[must_use]
    pub fn note_repository(mut self, repo: Arc<dyn NoteRepository>) -> Self {
        self.note_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn folder_repository(mut self, repo: Arc<dyn FolderRepository>) -> Self {
        self.folder_repository = Some(repo);
        self
    }

    /// Uses one store for notes and folders.
    #[must_use]
    pub fn store<S: NoteStore + 'static>(mut self, store: Arc<S>) -> Self {
        self.note_repository = Some(store.clone());
        self.folder_repository = Some(store);
        self
    }

    /// Serves the session from a remote-first store.
    #[must_use]
    pub fn fallback_store(mut self, store: Arc<FallbackStore>) -> Self {
        self.backend = Some(BackendKind::Remote);
        self.fallback = Some(store.clone());
        self.store(store)
    }

    #[must_use]
    pub fn local_reason(mut self, reason: LocalReason) -> Self {
        self.local_reason = Some(reason);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let note_repository = self.note_repository.ok_or_else(|| {
            CoreError::ValidationError("note_repository is required".to_string())
        })?;
        let folder_repository = self.folder_repository.ok_or_else(|| {
            CoreError::ValidationError("folder_repository is required".to_string())
        })?;
        let backend = self.backend.unwrap_or(BackendKind::Local);
        let user_id = self.user_id.unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let ctx = Arc::new(SessionContext::new(
            user_id,
            backend,
            note_repository,
            folder_repository,
        ));

        Ok(AppState {
            notebook_service: NotebookService::new(Arc::clone(&ctx)),
            note_service: NoteService::new(Arc::clone(&ctx)),
            folder_service: FolderService::new(Arc::clone(&ctx)),
            search_service: SearchService::new(),
            local_reason: match backend {
                BackendKind::Local => self.local_reason,
                BackendKind::Remote => None,
            },
            fallback: self.fallback,
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Where `bootstrap` looks for its inputs
#[derive(Debug, Clone)]
pub struct StartupOptions {
    /// Configuration file, may be absent
    pub config_path: PathBuf,
    /// Explicit database file; wins over the configured one
    pub database_path: Option<PathBuf>,
    /// Used when neither the options nor the configuration name a database
    pub default_database_path: PathBuf,
}

/// Selects the backend and wires the stores for one session.
///
/// The local database is always opened: it serves the local backend and is
/// the fallback target of the remote one.
///
/// # Errors
/// Returns `CoreError::StorageError` if the local database cannot be opened.
#[cfg(feature = "sqlite-store")]
pub async fn bootstrap(options: &StartupOptions) -> CoreResult<AppState> {
    use adapters::{RemoteStore, SqliteStore};
    use backend::BackendSelection;

    let (config, selection) = backend::resolve(&options.config_path);
    let db_path = options
        .database_path
        .clone()
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(|| options.default_database_path.clone());
    let local = Arc::new(SqliteStore::new(&db_path).await?);

    let builder = AppStateBuilder::new().user_id(config.user_id());
    let state = match selection {
        BackendSelection::Remote { client } => {
            let remote = Arc::new(RemoteStore::new(client));
            let store = FallbackStore::new(remote, local, config.fallback_policy);
            builder.fallback_store(Arc::new(store)).build()?
        }
        BackendSelection::Local { reason } => builder
            .backend(BackendKind::Local)
            .store(local)
            .local_reason(reason)
            .build()?,
    };

    log::info!(
        "Session ready: user {}, {} backend",
        state.ctx.user_id(),
        state.backend()
    );
    Ok(state)
}
