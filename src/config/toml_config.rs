use crate::adapters::provider_table::ProviderSpec;
use crate::config::{AppConfig, LookupConfig, DEFAULT_OVERALL_TIMEOUT_MS, DEFAULT_PER_CALL_TIMEOUT_MS};
use crate::utils::error::{CepError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub lookup: LookupSection,
    #[serde(default = "crate::adapters::provider_table::default_providers")]
    pub providers: Vec<ProviderSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupSection {
    pub per_call_timeout_ms: Option<u64>,
    pub overall_timeout_ms: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CepError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CepError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${VIACEP_HOST})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CepError::ConfigError {
            message: format!("invalid env placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn lookup_config(&self) -> LookupConfig {
        LookupConfig::from_millis(
            self.lookup
                .per_call_timeout_ms
                .unwrap_or(DEFAULT_PER_CALL_TIMEOUT_MS),
            self.lookup
                .overall_timeout_ms
                .unwrap_or(DEFAULT_OVERALL_TIMEOUT_MS),
        )
    }

    pub fn into_app_config(self) -> AppConfig {
        AppConfig {
            lookup: self.lookup_config(),
            providers: self.providers,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.clone().into_app_config().validate()
    }
}
