use clap::Parser;
use std::io;
use trojan_forward::app::{run_session, Prompter, SavePolicy};
use trojan_forward::core::ConfigProvider;
use trojan_forward::utils::{logger, validation::Validate};
use trojan_forward::{ConvertEngine, LocalStorage, SubscriptionPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-forward")]
#[command(about = "Convert a trojan subscription using a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "forward-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Show the resolved configuration without fetching anything
    #[arg(long)]
    dry_run: bool,

    /// Print the result only, never ask to save
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be fetched or written");
        return Ok(());
    }

    let policy = match (args.no_save, config.output_filename()) {
        (true, _) => SavePolicy::Skip,
        (false, Some(name)) => SavePolicy::To(name.to_string()),
        (false, None) => SavePolicy::Ask,
    };

    let storage = LocalStorage::new(config.output_dir().to_string());
    let pipeline = SubscriptionPipeline::new(storage, config)?;
    let engine = ConvertEngine::new(pipeline);
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    match run_session(&engine, &mut prompter, policy).await {
        Ok(report) => {
            if let Some(path) = report.saved_to {
                println!("📁 Output saved to: {}", path);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            if e.is_fetch_failure() {
                println!("{}", e.user_friendly_message());
            } else {
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 建議: {}", e.recovery_suggestion());
            }

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    match (config.source_url(), config.input_path()) {
        (Some(url), _) => tracing::info!("  🌐 Source URL: {}", url),
        (None, Some(path)) => tracing::info!("  📄 Source file: {}", path),
        (None, None) => {}
    }
    tracing::info!("  ⏱️  Timeout: {}s", config.timeout_seconds());
    if let Some(agent) = config.user_agent() {
        tracing::info!("  🏷️  User-Agent: {}", agent);
    }
    let headers = config.headers();
    if !headers.is_empty() {
        tracing::info!("  📨 Extra headers: {}", headers.len());
    }
    tracing::info!("  📁 Output directory: {}", config.output_dir());
    match config.output_filename() {
        Some(name) => tracing::info!("  💾 Save as: {}", name),
        None => tracing::info!("  💾 Save: ask interactively"),
    }
}
