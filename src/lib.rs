pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::{HttpProvider, ProviderSpec};
pub use config::{AppConfig, LookupConfig};
pub use core::coordinator::LookupCoordinator;
pub use domain::model::{Address, PostalCode, ProviderFailure, ProviderOutcome};
pub use utils::error::{CepError, LookupError, Result};
