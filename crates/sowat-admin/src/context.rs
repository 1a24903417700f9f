//! Per-invocation client setup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::Serialize;
use tracing::debug;

use sowat_core::ApiUrl;
use sowat_file::FileStore;
use sowat_http::{ApiClient, AuthService, ClientConfig};

use crate::cli::Cli;
use crate::output;
use crate::terminal::{TerminalNavigator, TerminalNotifier};

/// Everything a command needs: the client and how to print.
pub struct Context {
    pub client: ApiClient,
    pub pretty: bool,
}

impl Context {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
        if let Some(url) = &cli.api_url {
            config.base_url = ApiUrl::new(url).context("Invalid API URL")?;
        }

        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir()?,
        };
        let store = FileStore::in_dir(&data_dir);
        debug!(api = %config.base_url, session = %store.path().display(), "client configured");

        let client = ApiClient::builder(config)
            .store(Arc::new(store))
            .notifier(Arc::new(TerminalNotifier))
            .navigator(Arc::new(TerminalNavigator))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            pretty: cli.pretty,
        })
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.client.clone())
    }

    /// Print a command's result.
    pub fn print<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        if self.pretty {
            output::json_pretty(value)
        } else {
            output::json(value)
        }
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io", "sowat", "sowat-admin")
        .context("Could not determine data directory")?;
    Ok(dirs.data_dir().to_path_buf())
}
