//! Configuration management for Waymark.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::hunt::catalog;
use waymark_common::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_QR_MODULE_SIZE, DEFAULT_QR_OUTPUT_DIR,
};
use waymark_common::{CredentialRule, LocationRecord, QrEcLevel};

/// Largest accepted QR module size in pixels
const MAX_QR_MODULE_SIZE: u32 = 64;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Externally visible base URL encoded into QR codes
    #[serde(default)]
    pub base_url: Option<String>,

    /// Shared admin password for the QR export
    #[serde(default)]
    pub admin_password: String,

    /// Hunt catalog and gating rules
    #[serde(default)]
    pub hunt: HuntConfig,

    /// QR rendering configuration
    #[serde(default)]
    pub qr: QrConfig,
}

/// Hunt catalog and gating configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HuntConfig {
    /// Entry point id (defaults to the first location)
    #[serde(default)]
    pub entry: Option<String>,

    /// Password normalization rule
    #[serde(default)]
    pub credential_rule: CredentialRule,

    /// Optional case-sensitive token that marks the hunt complete
    #[serde(default)]
    pub final_answer: Option<String>,

    /// Locations in authoring order
    #[serde(default = "catalog::default_locations")]
    pub locations: Vec<LocationRecord>,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            entry: None,
            credential_rule: CredentialRule::default(),
            final_answer: None,
            locations: catalog::default_locations(),
        }
    }
}

/// QR-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QrConfig {
    /// Pixel size of one QR module
    #[serde(default = "default_module_size")]
    pub module_size: u32,

    /// Error correction level
    #[serde(default)]
    pub error_correction: QrEcLevel,

    /// Write rendered images to `output_dir` at startup
    #[serde(default = "default_persist")]
    pub persist: bool,

    /// Directory for rendered images
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            module_size: default_module_size(),
            error_correction: QrEcLevel::default(),
            persist: default_persist(),
            output_dir: default_output_dir(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_module_size() -> u32 { DEFAULT_QR_MODULE_SIZE }
fn default_persist() -> bool { true }
fn default_output_dir() -> PathBuf { PathBuf::from(DEFAULT_QR_OUTPUT_DIR) }

impl AppConfig {
    /// Load configuration from file, with CLI/env overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::from(Path::new(config_path)))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        } else if let Some(port) = args.port {
            config.listen_addr = with_port(&config.listen_addr, port);
        }
        if let Some(ref base_url) = args.base_url {
            config.base_url = Some(base_url.clone());
        }
        if let Some(ref password) = args.admin_password {
            config.admin_password = password.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.admin_password.trim().is_empty() {
            bail!("Admin password is required (set ADMIN_PASSWORD or admin_password)");
        }
        if self.qr.module_size == 0 || self.qr.module_size > MAX_QR_MODULE_SIZE {
            bail!(
                "qr.module_size must be between 1 and {}, got {}",
                MAX_QR_MODULE_SIZE,
                self.qr.module_size
            );
        }
        let base_url = self.public_base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            bail!("Base URL must start with http:// or https://, got {}", base_url);
        }
        Ok(())
    }

    /// Base URL for QR codes, falling back to localhost on the listen port
    pub fn public_base_url(&self) -> String {
        match self.base_url {
            Some(ref url) => url.trim_end_matches('/').to_string(),
            None => {
                let port = self
                    .listen_addr
                    .rsplit_once(':')
                    .map(|(_, port)| port)
                    .unwrap_or("80");
                format!("http://localhost:{}", port)
            }
        }
    }
}

/// Replace the port of a `host:port` address, keeping the host
fn with_port(addr: &str, port: u16) -> String {
    let host = addr.rsplit_once(':').map(|(host, _)| host).unwrap_or(addr);
    format!("{}:{}", host, port)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            base_url: None,
            admin_password: String::new(),
            hunt: HuntConfig::default(),
            qr: QrConfig::default(),
        }
    }
}
