use crate::domain::model::{Address, PostalCode};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_url_template, Validate, CEP_PLACEHOLDER,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

pub const BRASIL_API: &str = "BrasilAPI";
pub const VIA_CEP: &str = "ViaCEP";

/// provider 回應中各欄位對應的 JSON key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub postal_code: String,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub region: String,
    #[serde(default)]
    pub complement: Option<String>,
}

impl FieldMapping {
    /// 將 provider 回應轉成 `Address`。純函式，同樣輸入永遠得到同樣結果
    pub fn normalize(&self, source: &str, body: &Value) -> std::result::Result<Address, String> {
        let object = body
            .as_object()
            .ok_or_else(|| "response body is not a JSON object".to_string())?;

        // 缺少的欄位與 null 一樣視為空字串
        let field = |key: &str| match object.get(key) {
            Some(value) => text_of(key, value),
            None => Ok(String::new()),
        };

        let complement = match &self.complement {
            Some(key) => field(key)?,
            None => String::new(),
        };

        Ok(Address {
            postal_code: field(&self.postal_code)?,
            street: field(&self.street)?,
            neighborhood: field(&self.neighborhood)?,
            city: field(&self.city)?,
            region: field(&self.region)?,
            complement,
            source: source.to_string(),
        })
    }
}

fn text_of(key: &str, value: &Value) -> std::result::Result<String, String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Null => Ok(String::new()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(format!("field '{}' has unexpected type: {}", key, other)),
    }
}

fn encode_path_segment(raw: &str) -> Option<String> {
    // `.` 與 `..` 會被當成相對路徑
    if raw == "." || raw == ".." {
        return None;
    }

    let mut scratch = Url::parse("http://localhost/").ok()?;
    scratch.path_segments_mut().ok()?.clear().push(raw);
    Some(scratch.path().trim_start_matches('/').to_string())
}

/// 一個 provider 的完整描述：名稱、端點模板與欄位對應
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    pub name: String,
    pub url_template: String,
    pub fields: FieldMapping,
    #[serde(default)]
    pub not_found_flag: Option<String>,
}

impl ProviderSpec {
    pub fn brasil_api() -> Self {
        Self {
            name: BRASIL_API.to_string(),
            url_template: "https://brasilapi.com.br/api/cep/v1/{cep}".to_string(),
            fields: FieldMapping {
                postal_code: "cep".to_string(),
                street: "street".to_string(),
                neighborhood: "neighborhood".to_string(),
                city: "city".to_string(),
                region: "state".to_string(),
                complement: None,
            },
            not_found_flag: None,
        }
    }

    pub fn via_cep() -> Self {
        Self {
            name: VIA_CEP.to_string(),
            url_template: "http://viacep.com.br/ws/{cep}/json/".to_string(),
            fields: FieldMapping {
                postal_code: "cep".to_string(),
                street: "logradouro".to_string(),
                neighborhood: "bairro".to_string(),
                city: "localidade".to_string(),
                region: "uf".to_string(),
                complement: Some("complemento".to_string()),
            },
            not_found_flag: Some("erro".to_string()),
        }
    }

    /// CEP 以單一路徑片段代入模板，`/`、`?`、`%` 等字元一律編碼
    pub fn endpoint_for(&self, postal_code: &PostalCode) -> std::result::Result<Url, String> {
        let segment = encode_path_segment(postal_code.as_str())
            .ok_or_else(|| "postal code cannot be used as a path segment".to_string())?;

        Url::parse(&self.url_template.replace(CEP_PLACEHOLDER, &segment)).map_err(|e| e.to_string())
    }

    /// ViaCEP 對不存在的 CEP 仍回 200，只在 body 帶 `"erro": true`
    pub fn reports_not_found(&self, body: &Value) -> bool {
        let Some(flag) = &self.not_found_flag else {
            return false;
        };

        match body.get(flag) {
            Some(Value::Bool(flagged)) => *flagged,
            Some(Value::String(text)) => text.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }
}

impl Validate for ProviderSpec {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("providers.name", &self.name)?;
        validate_url_template(&format!("providers.{}.url_template", self.name), &self.url_template)?;

        let field = format!("providers.{}.fields", self.name);
        for key in [
            &self.fields.postal_code,
            &self.fields.street,
            &self.fields.neighborhood,
            &self.fields.city,
            &self.fields.region,
        ] {
            validate_non_empty_string(&field, key)?;
        }
        Ok(())
    }
}

pub fn default_providers() -> Vec<ProviderSpec> {
    vec![ProviderSpec::brasil_api(), ProviderSpec::via_cep()]
}
