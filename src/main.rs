use anyhow::Context;
use cep_race::app::presenter;
use cep_race::utils::{logger, validation::Validate};
use cep_race::{CepError, CliConfig, LookupCoordinator, PostalCode};
use clap::Parser;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting cep-race");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let postal_code = match &cli.cep {
        Some(cep) => cep.clone(),
        None => prompt_postal_code().context("failed to read CEP from stdin")?,
    };
    let postal_code = PostalCode::new(postal_code);

    let coordinator = LookupCoordinator::from_config(&config);
    let result = coordinator.race(&postal_code).await;

    if let Err(e) = &result {
        let error = CepError::from(e.clone());
        tracing::warn!("❌ {}", error);
        tracing::info!("💡 Suggestion: {}", error.recovery_suggestion());
    }

    println!("{}", presenter::render(&result, cli.format));

    // 查詢失敗或逾時都只是回報結果，exit code 維持 0
    Ok(())
}

fn prompt_postal_code() -> io::Result<String> {
    print!("Digite o CEP: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
