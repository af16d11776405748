use clap::Parser;
use std::io;
use trojan_forward::app::{run_session, Prompter, SavePolicy};
use trojan_forward::core::ConfigProvider;
use trojan_forward::utils::error::ConvertError;
use trojan_forward::utils::{logger, validation::Validate};
use trojan_forward::{CliConfig, ConvertEngine, LocalStorage, SubscriptionPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting trojan-forward");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    // 未指定來源時互動詢問
    if config.url.is_none() && config.input.is_none() {
        match prompter.ask_url() {
            Ok(url) => config.url = Some(url),
            Err(e) => fail(&e),
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let policy = if config.no_save {
        SavePolicy::Skip
    } else if let Some(name) = config.save.clone() {
        SavePolicy::To(name)
    } else {
        SavePolicy::Ask
    };

    let storage = LocalStorage::new(config.output_dir().to_string());
    let pipeline = match SubscriptionPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(&e),
    };
    let engine = ConvertEngine::new(pipeline);

    match run_session(&engine, &mut prompter, policy).await {
        Ok(report) => {
            tracing::info!(
                "✅ Done: {} forwarded, {} malformed",
                report.outcome.forwarded(),
                report.outcome.malformed()
            );
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &ConvertError) -> ! {
    tracing::error!(
        "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    if e.is_fetch_failure() {
        // 取得或解碼失敗時原樣輸出訊息
        println!("{}", e.user_friendly_message());
    } else {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
    }

    std::process::exit(e.exit_code())
}
