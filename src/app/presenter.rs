use crate::domain::model::{Address, ProviderFailure};
use crate::utils::error::LookupError;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub const TIMEOUT_MESSAGE: &str = "Tempo limite esgotado!";
pub const ALL_FAILED_HEADER: &str = "Nenhum provedor respondeu com sucesso:";

pub fn render(result: &Result<Address, LookupError>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(result),
        OutputFormat::Json => render_json(result),
    }
}

pub fn render_text(result: &Result<Address, LookupError>) -> String {
    match result {
        Ok(address) => [
            format!("Resultado da {}:", address.source),
            format!("CEP: {}", address.postal_code),
            format!("Logradouro: {}", address.street),
            format!("Bairro: {}", address.neighborhood),
            format!("Localidade: {}", address.city),
            format!("UF: {}", address.region),
            format!("Complemento: {}", address.complement),
            format!("Fonte: {}", address.source),
        ]
        .join("\n"),
        Err(LookupError::Timeout { .. }) => TIMEOUT_MESSAGE.to_string(),
        Err(LookupError::AllProvidersFailed { failures }) => {
            let mut lines = vec![ALL_FAILED_HEADER.to_string()];
            lines.extend(failures.iter().map(|failure| format!("- {}", failure)));
            lines.join("\n")
        }
    }
}

pub fn render_json(result: &Result<Address, LookupError>) -> String {
    let value = match result {
        Ok(address) => json!({ "status": "ok", "address": address }),
        Err(LookupError::Timeout { after }) => json!({
            "status": "timeout",
            "timeout_ms": after.as_millis() as u64,
        }),
        Err(LookupError::AllProvidersFailed { failures }) => json!({
            "status": "all_failed",
            "failures": failures.iter().map(failure_json).collect::<Vec<_>>(),
        }),
    };

    value.to_string()
}

fn failure_json(failure: &ProviderFailure) -> serde_json::Value {
    json!({
        "provider": failure.provider,
        "kind": failure.kind.as_str(),
        "message": failure.message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::FailureKind;
    use std::time::Duration;

    fn paulista() -> Address {
        Address {
            postal_code: "01310-100".to_string(),
            street: "Avenida Paulista".to_string(),
            neighborhood: "Bela Vista".to_string(),
            city: "São Paulo".to_string(),
            region: "SP".to_string(),
            complement: String::new(),
            source: "BrasilAPI".to_string(),
        }
    }

    #[test]
    fn test_render_text_address() {
        let text = render_text(&Ok(paulista()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Resultado da BrasilAPI:");
        assert_eq!(lines[1], "CEP: 01310-100");
        assert_eq!(lines[2], "Logradouro: Avenida Paulista");
        assert_eq!(lines[5], "UF: SP");
        assert_eq!(lines[6], "Complemento: ");
        assert_eq!(lines[7], "Fonte: BrasilAPI");
    }

    #[test]
    fn test_render_text_failures() {
        let timeout = Err(LookupError::Timeout {
            after: Duration::from_secs(2),
        });
        assert_eq!(render_text(&timeout), TIMEOUT_MESSAGE);

        let all_failed = Err(LookupError::AllProvidersFailed {
            failures: vec![
                ProviderFailure::new("BrasilAPI", FailureKind::Status, "HTTP 404 Not Found"),
                ProviderFailure::new("ViaCEP", FailureKind::NotFound, "CEP '00000000' not found"),
            ],
        });
        let text = render_text(&all_failed);
        assert!(text.starts_with(ALL_FAILED_HEADER));
        assert!(text.contains("- BrasilAPI: status: HTTP 404 Not Found"));
        assert!(text.contains("- ViaCEP: not_found:"));
    }

    #[test]
    fn test_render_json() {
        let ok: serde_json::Value = serde_json::from_str(&render_json(&Ok(paulista()))).unwrap();
        assert_eq!(ok["status"], "ok");
        assert_eq!(ok["address"]["street"], "Avenida Paulista");
        assert_eq!(ok["address"]["source"], "BrasilAPI");

        let timeout: serde_json::Value = serde_json::from_str(&render(
            &Err(LookupError::Timeout {
                after: Duration::from_millis(2000),
            }),
            OutputFormat::Json,
        ))
        .unwrap();
        assert_eq!(timeout["status"], "timeout");
        assert_eq!(timeout["timeout_ms"], 2000);

        let failed: serde_json::Value = serde_json::from_str(&render_json(&Err(
            LookupError::AllProvidersFailed {
                failures: vec![ProviderFailure::new("ViaCEP", FailureKind::Connect, "refused")],
            },
        )))
        .unwrap();
        assert_eq!(failed["status"], "all_failed");
        assert_eq!(failed["failures"][0]["kind"], "connect");
    }
}
