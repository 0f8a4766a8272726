//! Application state and shared resources.

use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;

use crate::auth::AdminGate;
use crate::config::AppConfig;
use crate::export::QrStore;
use crate::hunt::{Registry, UnlockEvaluator};

/// Shared application state. Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,

    /// Location catalog
    pub registry: Arc<Registry>,

    /// Unlock gate
    pub evaluator: Arc<UnlockEvaluator>,

    /// Pre-rendered QR codes
    pub qr_store: Arc<QrStore>,

    /// Admin password check
    pub admin: Arc<AdminGate>,

    /// Process start time
    pub started_at: Instant,
}

impl AppState {
    /// Build the registry and render every QR code
    pub fn new(config: AppConfig) -> Result<Self> {
        let registry = Registry::new(config.hunt.entry.as_deref(), config.hunt.locations.clone())
            .context("Invalid hunt catalog")?;

        let evaluator = UnlockEvaluator::new(
            config.hunt.credential_rule,
            config.hunt.final_answer.clone(),
        );

        let qr_store = QrStore::render_all(&registry, &config.public_base_url(), &config.qr)
            .context("Failed to render QR codes")?;

        let admin = AdminGate::new(&config.admin_password);

        Ok(Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            evaluator: Arc::new(evaluator),
            qr_store: Arc::new(qr_store),
            admin: Arc::new(admin),
            started_at: Instant::now(),
        })
    }

    /// Write rendered codes to the configured output directory, if enabled
    pub async fn ensure_rendered(&self) -> Result<()> {
        if !self.config.qr.persist {
            return Ok(());
        }

        let dir = &self.config.qr.output_dir;
        let written = self
            .qr_store
            .persist(dir)
            .await
            .with_context(|| format!("Failed to write QR codes to {}", dir.display()))?;

        tracing::info!(written = written, dir = %dir.display(), "QR codes up to date on disk");

        Ok(())
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
