use crate::utils::error::{CepError, Result};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub const CEP_PLACEHOLDER: &str = "{cep}";

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid_value(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(invalid_value(
                field_name,
                url_str,
                &format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(invalid_value(
            field_name,
            url_str,
            &format!("Invalid URL format: {}", e),
        )),
    }
}

/// 端點模板必須含有 `{cep}`，代入範例 CEP 後也必須是合法的 http(s) URL
pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains(CEP_PLACEHOLDER) {
        return Err(invalid_value(
            field_name,
            template,
            &format!("Template must contain the {} placeholder", CEP_PLACEHOLDER),
        ));
    }

    validate_url(field_name, &template.replace(CEP_PLACEHOLDER, "01001000"))
}

pub fn validate_timeout(field_name: &str, value: Duration) -> Result<()> {
    if value.is_zero() {
        return Err(invalid_value(
            field_name,
            &format!("{}ms", value.as_millis()),
            "Timeout must be greater than zero",
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid_value(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_unique_names<'a, I>(field_name: &str, names: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(invalid_value(field_name, name, "Duplicate provider name"));
        }
    }
    Ok(())
}

fn invalid_value(field: &str, value: &str, reason: &str) -> CepError {
    CepError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
