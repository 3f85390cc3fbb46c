use crate::adapters::provider_table::ProviderSpec;
use crate::domain::model::{Address, FailureKind, PostalCode, ProviderFailure, ProviderOutcome};
use crate::domain::ports::AddressProvider;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 以 `ProviderSpec` 參數化的 HTTP provider，兩個外部服務共用同一份邏輯
pub struct HttpProvider {
    spec: ProviderSpec,
    client: Client,
}

impl HttpProvider {
    pub fn new(spec: ProviderSpec) -> Self {
        Self::with_client(spec, Client::new())
    }

    pub fn with_client(spec: ProviderSpec, client: Client) -> Self {
        Self { spec, client }
    }

    fn failure(&self, kind: FailureKind, message: impl Into<String>) -> ProviderFailure {
        ProviderFailure::new(self.spec.name.clone(), kind, message)
    }

    async fn request(
        &self,
        postal_code: &PostalCode,
        per_call_timeout: Duration,
    ) -> Result<Address, ProviderFailure> {
        let url = self.spec.endpoint_for(postal_code).map_err(|e| {
            self.failure(
                FailureKind::InvalidRequest,
                format!("cannot build URL for CEP '{}': {}", postal_code, e),
            )
        })?;

        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(per_call_timeout)
            .send()
            .await
            .map_err(|e| self.failure(classify_send_error(&e), e.to_string()))?;

        let status = response.status();
        tracing::debug!("{} response status: {}", self.spec.name, status);

        if !status.is_success() {
            return Err(self.failure(FailureKind::Status, format!("HTTP {}", status)));
        }

        let body = response.bytes().await.map_err(|e| {
            let kind = if e.is_timeout() {
                FailureKind::Timeout
            } else {
                FailureKind::Body
            };
            self.failure(kind, format!("cannot read body: {}", e))
        })?;

        let value: Value = serde_json::from_slice(&body)
            .map_err(|e| self.failure(FailureKind::Malformed, format!("invalid JSON: {}", e)))?;

        if self.spec.reports_not_found(&value) {
            return Err(self.failure(
                FailureKind::NotFound,
                format!("CEP '{}' not found", postal_code),
            ));
        }

        self.spec
            .fields
            .normalize(&self.spec.name, &value)
            .map_err(|message| self.failure(FailureKind::Malformed, message))
    }
}

fn classify_send_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_builder() {
        FailureKind::InvalidRequest
    } else {
        FailureKind::Connect
    }
}

#[async_trait]
impl AddressProvider for HttpProvider {
    fn name(&self) -> &str {
        &self.spec.name
    }

    async fn fetch(&self, postal_code: &PostalCode, per_call_timeout: Duration) -> ProviderOutcome {
        let result = self.request(postal_code, per_call_timeout).await;

        if let Err(failure) = &result {
            tracing::warn!(
                provider = %failure.provider,
                cep = %postal_code,
                kind = %failure.kind,
                "⚠️ Provider call failed: {}",
                failure.message
            );
        }

        result.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::provider_table::{BRASIL_API, VIA_CEP};
    use httpmock::prelude::*;

    const TIMEOUT: Duration = Duration::from_secs(1);

    fn via_cep_at(server: &MockServer) -> HttpProvider {
        let mut spec = ProviderSpec::via_cep();
        spec.url_template = server.url("/ws/{cep}/json/");
        HttpProvider::new(spec)
    }

    fn failure_of(outcome: ProviderOutcome) -> ProviderFailure {
        match outcome {
            ProviderOutcome::Failure(failure) => failure,
            ProviderOutcome::Success(address) => panic!("expected failure, got {:?}", address),
        }
    }

    #[tokio::test]
    async fn test_fetch_success_normalizes_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/ws/01310100/json/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "cep": "01310-100",
                    "logradouro": "Avenida Paulista",
                    "complemento": "de 612 a 1510 - lado par",
                    "bairro": "Bela Vista",
                    "localidade": "São Paulo",
                    "uf": "SP"
                }));
        });

        let provider = via_cep_at(&server);
        let outcome = provider.fetch(&PostalCode::new("01310100"), TIMEOUT).await;

        api_mock.assert();
        match outcome {
            ProviderOutcome::Success(address) => {
                assert_eq!(address.street, "Avenida Paulista");
                assert_eq!(address.source, VIA_CEP);
            }
            ProviderOutcome::Failure(failure) => panic!("unexpected failure: {}", failure),
        }
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_failure() {
        let server = MockServer::start();
        let mut spec = ProviderSpec::brasil_api();
        spec.url_template = server.url("/api/cep/v1/{cep}");
        let provider = HttpProvider::new(spec);

        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/cep/v1/00000000");
            then.status(404)
                .json_body(serde_json::json!({"message": "CEP não encontrado"}));
        });

        let failure = failure_of(provider.fetch(&PostalCode::new("00000000"), TIMEOUT).await);

        api_mock.assert();
        assert_eq!(failure.provider, BRASIL_API);
        assert_eq!(failure.kind, FailureKind::Status);
        assert!(failure.message.contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_malformed_body_is_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/01310100/json/");
            then.status(200).body("<html>not json</html>");
        });

        let failure = failure_of(
            via_cep_at(&server)
                .fetch(&PostalCode::new("01310100"), TIMEOUT)
                .await,
        );
        assert_eq!(failure.kind, FailureKind::Malformed);
    }

    #[tokio::test]
    async fn test_fetch_missing_fields_become_empty() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/69900000/json/");
            then.status(200).json_body(serde_json::json!({
                "cep": "69900-000",
                "localidade": "Rio Branco",
                "uf": "AC"
            }));
        });

        let outcome = via_cep_at(&server)
            .fetch(&PostalCode::new("69900000"), TIMEOUT)
            .await;

        match outcome {
            ProviderOutcome::Success(address) => {
                assert_eq!(address.city, "Rio Branco");
                assert_eq!(address.street, "");
                assert_eq!(address.neighborhood, "");
                assert_eq!(address.complement, "");
            }
            ProviderOutcome::Failure(failure) => panic!("unexpected failure: {}", failure),
        }
    }

    #[tokio::test]
    async fn test_fetch_wrong_field_type_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/01310100/json/");
            then.status(200)
                .json_body(serde_json::json!({"cep": "01310-100", "logradouro": ["Avenida"]}));
        });

        let failure = failure_of(
            via_cep_at(&server)
                .fetch(&PostalCode::new("01310100"), TIMEOUT)
                .await,
        );
        assert_eq!(failure.kind, FailureKind::Malformed);
        assert!(failure.message.contains("logradouro"));
    }

    #[tokio::test]
    async fn test_fetch_via_cep_error_flag_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/99999999/json/");
            then.status(200).json_body(serde_json::json!({"erro": true}));
        });

        let failure = failure_of(
            via_cep_at(&server)
                .fetch(&PostalCode::new("99999999"), TIMEOUT)
                .await,
        );
        assert_eq!(failure.kind, FailureKind::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_slow_response_times_out() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/ws/01310100/json/");
            then.status(200)
                .delay(Duration::from_millis(800))
                .json_body(serde_json::json!({}));
        });

        let failure = failure_of(
            via_cep_at(&server)
                .fetch(&PostalCode::new("01310100"), Duration::from_millis(100))
                .await,
        );
        assert_eq!(failure.kind, FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_connect_failure() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let mut spec = ProviderSpec::via_cep();
        spec.url_template = format!("http://127.0.0.1:{}/ws/{{cep}}/json/", port);

        let failure = failure_of(
            HttpProvider::new(spec)
                .fetch(&PostalCode::new("01310100"), TIMEOUT)
                .await,
        );
        assert_eq!(failure.kind, FailureKind::Connect);
    }

    #[tokio::test]
    async fn test_fetch_unbuildable_url_is_invalid_request() {
        let mut spec = ProviderSpec::via_cep();
        spec.url_template = "http://{cep}.invalid/".to_string();

        let failure = failure_of(
            HttpProvider::new(spec)
                .fetch(&PostalCode::new("not a host"), TIMEOUT)
                .await,
        );
        assert_eq!(failure.kind, FailureKind::InvalidRequest);
    }

    #[tokio::test]
    async fn test_fetch_dot_segment_postal_code_is_invalid_request() {
        let server = MockServer::start();
        let catch_all = server.mock(|when, then| {
            when.method(GET);
            then.status(200).json_body(serde_json::json!({}));
        });

        let failure = failure_of(
            via_cep_at(&server)
                .fetch(&PostalCode::new(".."), TIMEOUT)
                .await,
        );

        assert_eq!(failure.kind, FailureKind::InvalidRequest);
        catch_all.assert_hits(0);
    }
}
