//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Commands run against
//! either the local JSON store or the remote income/expense service, picked by
//! [`Backend::open`].

pub mod check;
pub mod expense;
pub mod income;

pub use check::{handle_show_command, handle_watch_command};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::api::ApiClient;
use crate::config::{NextCheckPaths, Settings};
use crate::error::{NextCheckError, NextCheckResult};
use crate::storage::{ExpenseStore, IncomeStore, Storage};

/// Where income and expenses are read from
pub enum Backend {
    Local(Arc<Storage>),
    Remote(Arc<ApiClient>),
}

impl Backend {
    /// Open the remote API when `settings.api_url` is set, the local store
    /// otherwise
    pub fn open(paths: &NextCheckPaths, settings: &Settings) -> NextCheckResult<Self> {
        match &settings.api_url {
            Some(url) => {
                let income_id = settings.income_id.ok_or_else(|| {
                    NextCheckError::Config(
                        "an income ID is required when using the remote API".into(),
                    )
                })?;
                debug!(api_url = %url, income_id = %income_id, "backend_remote");
                let client = ApiClient::new(
                    url.clone(),
                    income_id,
                    Duration::from_millis(settings.request_timeout_ms),
                )?;
                Ok(Self::Remote(Arc::new(client)))
            }
            None => {
                debug!(data_dir = %paths.data_dir().display(), "backend_local");
                let mut storage = Storage::new(paths.clone())?;
                storage.load_all()?;
                Ok(Self::Local(Arc::new(storage)))
            }
        }
    }

    pub fn income_store(&self) -> Arc<dyn IncomeStore> {
        match self {
            Self::Local(storage) => storage.clone(),
            Self::Remote(client) => client.clone(),
        }
    }

    pub fn expense_store(&self) -> Arc<dyn ExpenseStore> {
        match self {
            Self::Local(storage) => storage.clone(),
            Self::Remote(client) => client.clone(),
        }
    }

    /// The local store, for commands that edit data
    pub fn local(&self) -> NextCheckResult<&Storage> {
        match self {
            Self::Local(storage) => Ok(storage.as_ref()),
            Self::Remote(_) => Err(NextCheckError::Config(
                "this command edits the local store; manage remote data through the service"
                    .into(),
            )),
        }
    }
}
