#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::provider_table::{default_providers, ProviderSpec};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CepError, Result};
use crate::utils::validation::{validate_timeout, validate_unique_names, Validate};
use std::time::Duration;

pub const DEFAULT_PER_CALL_TIMEOUT_MS: u64 = 1_000;
pub const DEFAULT_OVERALL_TIMEOUT_MS: u64 = 2_000;

/// 競速查詢的兩個時限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupConfig {
    pub per_call_timeout: Duration,
    pub overall_timeout: Duration,
}

impl LookupConfig {
    pub fn new(per_call_timeout: Duration, overall_timeout: Duration) -> Self {
        Self {
            per_call_timeout,
            overall_timeout,
        }
    }

    pub fn from_millis(per_call_timeout_ms: u64, overall_timeout_ms: u64) -> Self {
        Self::new(
            Duration::from_millis(per_call_timeout_ms),
            Duration::from_millis(overall_timeout_ms),
        )
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_PER_CALL_TIMEOUT_MS, DEFAULT_OVERALL_TIMEOUT_MS)
    }
}

impl Validate for LookupConfig {
    fn validate(&self) -> Result<()> {
        validate_timeout("per_call_timeout", self.per_call_timeout)?;
        validate_timeout("overall_timeout", self.overall_timeout)?;

        if self.per_call_timeout > self.overall_timeout {
            tracing::warn!(
                "Per-call timeout ({}ms) exceeds overall timeout ({}ms); slow providers will be cut by the overall deadline",
                self.per_call_timeout.as_millis(),
                self.overall_timeout.as_millis()
            );
        }
        Ok(())
    }
}

impl ConfigProvider for LookupConfig {
    fn per_call_timeout(&self) -> Duration {
        self.per_call_timeout
    }

    fn overall_timeout(&self) -> Duration {
        self.overall_timeout
    }

    fn providers(&self) -> Vec<ProviderSpec> {
        default_providers()
    }
}

/// 合併 TOML 檔與命令列之後的完整設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub lookup: LookupConfig,
    pub providers: Vec<ProviderSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lookup: LookupConfig::default(),
            providers: default_providers(),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.lookup.validate()?;

        if self.providers.is_empty() {
            return Err(CepError::ConfigError {
                message: "at least one provider must be configured".to_string(),
            });
        }

        for spec in &self.providers {
            spec.validate()?;
        }
        validate_unique_names("providers", self.providers.iter().map(|p| p.name.as_str()))
    }
}

impl ConfigProvider for AppConfig {
    fn per_call_timeout(&self) -> Duration {
        self.lookup.per_call_timeout
    }

    fn overall_timeout(&self) -> Duration {
        self.lookup.overall_timeout
    }

    fn providers(&self) -> Vec<ProviderSpec> {
        self.providers.clone()
    }
}
