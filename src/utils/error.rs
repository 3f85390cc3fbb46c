use crate::domain::model::ProviderFailure;
use std::time::Duration;
use thiserror::Error;

/// 競速查詢的最終失敗結果，只有這兩種會呈現給使用者
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("all providers failed: {}", join_failures(.failures))]
    AllProvidersFailed { failures: Vec<ProviderFailure> },

    #[error("lookup timed out after {}ms", .after.as_millis())]
    Timeout { after: Duration },
}

fn join_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum CepError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

impl CepError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            CepError::IoError(e) => format!("無法讀取檔案或輸入: {}", e),
            CepError::ConfigError { message } => format!("設定錯誤: {}", message),
            CepError::InvalidConfigValueError { field, reason, .. } => {
                format!("設定欄位 '{}' 無效: {}", field, reason)
            }
            CepError::Lookup(LookupError::Timeout { .. }) => "Tempo limite esgotado!".to_string(),
            CepError::Lookup(LookupError::AllProvidersFailed { .. }) => {
                "Nenhum provedor respondeu com sucesso".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CepError::IoError(_) => "Check that the file exists and is readable",
            CepError::ConfigError { .. } => "Review the configuration file or CLI flags",
            CepError::InvalidConfigValueError { .. } => {
                "Fix the highlighted field; provider templates must contain {cep}"
            }
            CepError::Lookup(LookupError::Timeout { .. }) => {
                "Retry later or raise --overall-timeout-ms"
            }
            CepError::Lookup(LookupError::AllProvidersFailed { .. }) => {
                "Check the postal code and your network connection"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CepError>;
