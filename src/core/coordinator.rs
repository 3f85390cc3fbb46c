use crate::adapters::http::HttpProvider;
use crate::config::LookupConfig;
use crate::core::race::{race_first_ok, RaceError};
use crate::domain::model::{Address, FailureKind, PostalCode, ProviderOutcome};
use crate::domain::ports::{AddressProvider, ConfigProvider};
use crate::utils::error::LookupError;
use reqwest::Client;
use std::sync::Arc;

/// 同時向所有 provider 查詢同一個 CEP，採用第一個成功的回應
pub struct LookupCoordinator {
    providers: Vec<Arc<dyn AddressProvider>>,
    config: LookupConfig,
}

impl LookupCoordinator {
    pub fn new(providers: Vec<Arc<dyn AddressProvider>>, config: LookupConfig) -> Self {
        Self { providers, config }
    }

    /// 依設定建立 HTTP provider，共用同一個連線池
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let client = Client::new();
        let providers = config
            .providers()
            .into_iter()
            .map(|spec| {
                Arc::new(HttpProvider::with_client(spec, client.clone())) as Arc<dyn AddressProvider>
            })
            .collect();

        Self::new(
            providers,
            LookupConfig::new(config.per_call_timeout(), config.overall_timeout()),
        )
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    pub async fn race(&self, postal_code: &PostalCode) -> Result<Address, LookupError> {
        let per_call_timeout = self.config.per_call_timeout;
        let overall_timeout = self.config.overall_timeout;

        tracing::info!(
            "🏁 Racing {} providers for CEP {} (per call {}ms, overall {}ms)",
            self.providers.len(),
            postal_code,
            per_call_timeout.as_millis(),
            overall_timeout.as_millis()
        );

        let ops = self
            .providers
            .iter()
            .map(|provider| {
                let provider = Arc::clone(provider);
                let postal_code = postal_code.clone();
                async move {
                    // 逾時只代表沒有回應，不會被當成失敗回報
                    match tokio::time::timeout(
                        per_call_timeout,
                        provider.fetch(&postal_code, per_call_timeout),
                    )
                    .await
                    {
                        Ok(ProviderOutcome::Failure(failure))
                            if failure.kind == FailureKind::Timeout =>
                        {
                            tracing::debug!("No answer in time: {}", failure);
                            None
                        }
                        Ok(outcome) => Some(outcome.into_result()),
                        Err(_) => {
                            tracing::debug!(
                                "{} gave no answer within {}ms",
                                provider.name(),
                                per_call_timeout.as_millis()
                            );
                            None
                        }
                    }
                }
            })
            .collect::<Vec<_>>();

        match race_first_ok(ops, overall_timeout).await {
            Ok(winner) => {
                tracing::info!(
                    "✅ {} answered first in {}ms",
                    winner.value.source,
                    winner.elapsed.as_millis()
                );
                Ok(winner.value)
            }
            Err(RaceError::Exhausted(failures)) => {
                tracing::warn!("❌ All {} providers failed for CEP {}", failures.len(), postal_code);
                Err(LookupError::AllProvidersFailed { failures })
            }
            Err(RaceError::DeadlineElapsed { failures }) => {
                for failure in &failures {
                    tracing::debug!("Discarded before timeout: {}", failure);
                }
                tracing::warn!(
                    "⏰ No provider succeeded within {}ms for CEP {}",
                    overall_timeout.as_millis(),
                    postal_code
                );
                Err(LookupError::Timeout {
                    after: overall_timeout,
                })
            }
        }
    }
}
