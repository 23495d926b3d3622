use anyhow::Context;
use clap::Parser;
use geodns_atlas::config::toml_config::LogFormat;
use geodns_atlas::domain::ports::ConfigProvider;
use geodns_atlas::utils::error::ErrorSeverity;
use geodns_atlas::utils::{logger, validation::Validate};
use geodns_atlas::{AtlasEngine, CliConfig, LocalDataSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置 (設定檔 + 命令列覆蓋)
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(2);
        }
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting geodns-atlas");
    tracing::debug!("Resolved config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(2);
    }

    // 資料必須完整載入後才回應查詢
    let source = LocalDataSource::new(config.data_root());
    let engine = match AtlasEngine::load(&source, &config.dataset_files()).await {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(
                "❌ Dataset load failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low | ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    let query = cli.command.to_query();
    let result = engine
        .execute(&query)
        .with_context(|| format!("Failed to render result of {:?}", query))?;

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", output);

    Ok(())
}
