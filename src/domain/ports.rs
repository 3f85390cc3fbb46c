use crate::adapters::provider_table::ProviderSpec;
use crate::domain::model::{PostalCode, ProviderOutcome};
use async_trait::async_trait;
use std::time::Duration;

/// 單一外部地址服務。失敗只會以 `ProviderOutcome::Failure` 回傳，不會往外拋
#[async_trait]
pub trait AddressProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn fetch(&self, postal_code: &PostalCode, per_call_timeout: Duration) -> ProviderOutcome;
}

pub trait ConfigProvider: Send + Sync {
    fn per_call_timeout(&self) -> Duration;
    fn overall_timeout(&self) -> Duration;
    fn providers(&self) -> Vec<ProviderSpec>;
}
