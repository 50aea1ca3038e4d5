//! Application state wiring the answer service to its backends.
//!
//! `AnswerService` is generic over table and cursor-store ports; AppState
//! pins it to type-erased boxes so the hosted base and the `--demo`
//! in-memory tables share one concrete type.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;

use answerdesk_core::repository::cursor::BoxCursorStore;
use answerdesk_core::repository::table::{BoxRecordTable, Tables};
use answerdesk_core::service::answer::AnswerService;
use answerdesk_infra::airtable::AirtableClient;
use answerdesk_infra::config::{load_global_config, resolve_data_dir};
use answerdesk_infra::credentials::resolve_credentials;
use answerdesk_infra::memory::{InMemoryCursorStore, demo_tables};
use answerdesk_infra::sqlite::pool::database_url;
use answerdesk_infra::sqlite::{DatabasePool, SqliteCursorStore};
use answerdesk_types::config::GlobalConfig;

pub type ConcreteAnswerService = AnswerService<BoxRecordTable, BoxCursorStore>;

/// Where records are read from and written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Airtable { base_id: String },
    Demo,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Airtable { base_id } => write!(f, "Airtable base {base_id}"),
            Backend::Demo => write!(f, "in-memory demo tables"),
        }
    }
}

/// Shared application state, used by both CLI commands and REST handlers.
#[derive(Clone)]
pub struct AppState {
    pub answer_service: Arc<ConcreteAnswerService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    pub backend: Backend,
}

impl AppState {
    /// Load config and connect the backend selected by `demo`.
    pub async fn init(demo: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data dir {}", data_dir.display()))?;

        let config = load_global_config(&data_dir).await;

        if demo {
            return Ok(Self::demo(config, data_dir).await);
        }

        let credentials = resolve_credentials(&config.airtable)
            .context("Airtable credentials missing (or run with --demo)")?;
        let backend = Backend::Airtable {
            base_id: credentials.base_id.clone(),
        };
        let client = AirtableClient::new(&config.airtable, credentials)?;
        let tables = client.tables(&config.tables).boxed();

        let db_pool = DatabasePool::new(&database_url(&data_dir))
            .await
            .context("failed to open cursor database")?;
        let cursors = BoxCursorStore::new(SqliteCursorStore::new(db_pool));

        tracing::info!(backend = %backend, data_dir = %data_dir.display(), "app state ready");
        Ok(Self::from_parts(config, data_dir, backend, tables, cursors))
    }

    /// Seeded in-memory tables with in-memory cursors; nothing touches disk.
    pub async fn demo(config: GlobalConfig, data_dir: PathBuf) -> Self {
        let tables = demo_tables(&config.fields).await.boxed();
        let cursors = BoxCursorStore::new(InMemoryCursorStore::new());
        Self::from_parts(config, data_dir, Backend::Demo, tables, cursors)
    }

    pub fn from_parts(
        config: GlobalConfig,
        data_dir: PathBuf,
        backend: Backend,
        tables: Tables<BoxRecordTable>,
        cursors: BoxCursorStore,
    ) -> Self {
        let answer_service = AnswerService::new(
            tables,
            cursors,
            config.fields.clone(),
            config.robotic_systems.clone(),
        );
        Self {
            answer_service: Arc::new(answer_service),
            config: Arc::new(config),
            data_dir,
            backend,
        }
    }
}
