use serde::{Deserialize, Serialize};
use std::fmt;

/// 使用者輸入的 CEP，核心不做格式驗證，原樣帶入請求
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 正規化後的地址，`source` 標記是哪個 provider 產生的
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
    pub complement: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    InvalidRequest,
    Connect,
    Timeout,
    Status,
    Body,
    Malformed,
    NotFound,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidRequest => "invalid_request",
            FailureKind::Connect => "connect",
            FailureKind::Timeout => "timeout",
            FailureKind::Status => "status",
            FailureKind::Body => "body",
            FailureKind::Malformed => "malformed",
            FailureKind::NotFound => "not_found",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderFailure {
    pub provider: String,
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(provider: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.provider, self.kind, self.message)
    }
}

/// 每次 provider 呼叫恰好產生一個結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome {
    Success(Address),
    Failure(ProviderFailure),
}

impl ProviderOutcome {
    pub fn into_result(self) -> Result<Address, ProviderFailure> {
        match self {
            ProviderOutcome::Success(address) => Ok(address),
            ProviderOutcome::Failure(failure) => Err(failure),
        }
    }
}

impl From<Result<Address, ProviderFailure>> for ProviderOutcome {
    fn from(result: Result<Address, ProviderFailure>) -> Self {
        match result {
            Ok(address) => ProviderOutcome::Success(address),
            Err(failure) => ProviderOutcome::Failure(failure),
        }
    }
}
