//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use turbo_auth::{AuthSession, SessionContext};
use turbo_observability::init_logging;
use turbo_storefront::{HttpStoreApi, StoreApi, StorefrontConfig};

use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["turbo.toml", ".turbo.toml", "turbo.json"];

/// Execution context for CLI commands.
pub struct Context {
    pub config: StorefrontConfig,
    pub output: Output,
    pub session: SessionContext,
    pub api: Arc<dyn StoreApi>,
    /// A token was given at startup.
    pub had_token: bool,
}

impl Context {
    /// Load config, set up logging, and connect to the store API.
    pub async fn load(config_path: Option<&str>, token: Option<&str>, output: Output) -> Result<Self> {
        let config = match config_path {
            Some(path) => StorefrontConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                match find_config(&cwd) {
                    Some(path) => StorefrontConfig::load(&path)
                        .with_context(|| format!("Failed to load config from {}", path.display()))?,
                    None => StorefrontConfig::default(),
                }
            }
        }
        .with_env_overrides();

        let mut log_config = config.logging.clone();
        if output.is_verbose() {
            log_config = log_config.verbose();
        }
        init_logging(&log_config).context("Failed to initialise logging")?;

        let session = SessionContext::new();
        let had_token = token.is_some_and(|t| !t.trim().is_empty());
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            session.sign_in(AuthSession::new(token)?).await;
            tracing::debug!("signed in with bearer token");
        }

        let api = HttpStoreApi::from_config(&config, session.clone())
            .context("Failed to create store API client")?;
        output.debug(&format!("Using store API at {}", config.api.base_url));

        Ok(Self {
            config,
            output,
            session,
            api: Arc::new(api),
            had_token,
        })
    }
}

/// Find a config file in `start` or any of its parents.
fn find_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .flat_map(|dir| CONFIG_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}
