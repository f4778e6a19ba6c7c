//! Wiring from global CLI flags and configuration to the services commands use.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::adapters::{GeminiClient, InMemoryRecordStore, PostgrestRecordStore, StaticCatalog};
use crate::domain::errors::StoreError;
use crate::domain::models::{Config, SessionContext};
use crate::domain::ports::RecordStore;
use crate::infrastructure::config::ConfigLoader;
use crate::services::{CatalogService, DraftGenerator, DraftGeneratorConfig};

/// Global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    pub json: bool,
    pub demo: bool,
    pub config: Option<PathBuf>,
    pub user: Option<String>,
}

impl GlobalOptions {
    /// Load configuration from `--config` or the project directory.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(),
        }
    }
}

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub config: Config,
    pub session: SessionContext,
    pub catalog: CatalogService,
    /// False when no hosted store is configured and the process runs on an empty local store.
    pub remote_configured: bool,
}

impl AppContext {
    pub fn build(options: &GlobalOptions, config: Config) -> Result<Self> {
        let session = session_for(options, &config);
        let static_records = StaticCatalog::load(config.catalog.path.as_deref())
            .context("Failed to load the static catalog")?
            .into_records();

        let (store, remote_configured): (Arc<dyn RecordStore>, bool) = if session.demo {
            info!("Demo mode: using an in-memory record store");
            (Arc::new(InMemoryRecordStore::new()), true)
        } else {
            match PostgrestRecordStore::new(&config.store) {
                Ok(store) => (Arc::new(store), true),
                Err(StoreError::NotConfigured(reason)) => {
                    debug!(%reason, "Record store not configured, showing the static catalog only");
                    (Arc::new(InMemoryRecordStore::new()), false)
                }
                Err(e) => return Err(e).context("Failed to create the record store client"),
            }
        };

        let catalog = CatalogService::new(
            static_records,
            store,
            session.clone(),
            Duration::from_secs(config.store.timeout_secs),
        );

        Ok(Self {
            config,
            session,
            catalog,
            remote_configured,
        })
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        self.catalog.store()
    }

    /// Fail unless writes can reach a store.
    pub fn require_writable_store(&self) -> Result<()> {
        if !self.remote_configured {
            anyhow::bail!(
                "No record store configured. Set store.url and store.anon_key (or SUPABASE_URL / SUPABASE_ANON_KEY), or use --demo"
            );
        }
        if !self.session.is_signed_in() {
            return Err(StoreError::NotSignedIn.into());
        }
        Ok(())
    }

    pub fn draft_generator(&self) -> Result<DraftGenerator> {
        let client = GeminiClient::new(&self.config.generation)
            .context("Failed to create the generative API client")?;
        Ok(DraftGenerator::new(
            Arc::new(client),
            DraftGeneratorConfig::from(&self.config.generation),
        ))
    }
}

/// `--demo` wins; otherwise `--user` overrides the configured session user.
fn session_for(options: &GlobalOptions, config: &Config) -> SessionContext {
    if options.demo {
        return SessionContext::demo();
    }
    let user_id = options
        .user
        .clone()
        .or_else(|| config.session.user_id.clone());
    let mut session = match user_id {
        Some(user_id) => SessionContext::signed_in(user_id),
        None => SessionContext::anonymous(),
    };
    if let Some(token) = &config.session.access_token {
        session = session.with_access_token(token.clone());
    }
    session
}
