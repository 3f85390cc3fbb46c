use crate::app::presenter::OutputFormat;
use crate::config::toml_config::TomlConfig;
use crate::config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "cep-race")]
#[command(about = "Look up a Brazilian CEP on BrasilAPI and ViaCEP at once and keep the fastest answer")]
pub struct CliConfig {
    /// CEP to look up (prompted on stdin when omitted)
    pub cep: Option<String>,

    /// Per-provider deadline in milliseconds [default: 1000]
    #[arg(long)]
    pub per_call_timeout_ms: Option<u64>,

    /// Overall lookup deadline in milliseconds [default: 2000]
    #[arg(long)]
    pub overall_timeout_ms: Option<u64>,

    /// TOML file with timeouts and the provider table
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON on stderr")]
    pub json_logs: bool,
}

impl CliConfig {
    /// 載入設定檔 (若有)，再以命令列明確指定的時限覆蓋
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut app = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                TomlConfig::from_file(path)?.into_app_config()
            }
            None => AppConfig::default(),
        };

        if let Some(ms) = self.per_call_timeout_ms {
            app.lookup.per_call_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.overall_timeout_ms {
            app.lookup.overall_timeout = Duration::from_millis(ms);
        }

        Ok(app)
    }
}
