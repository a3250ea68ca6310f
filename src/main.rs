use clap::Parser;
use deck_resolver::core::content::load_contents;
use deck_resolver::utils::{logger, validation::Validate};
use deck_resolver::{build_store, CliConfig, DeckSetup, PresentationResolver, ResolveError};

const EXIT_UNAVAILABLE: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_RESOLVE: i32 = 3;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolver_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(EXIT_CONFIG);
        }
    };

    // 初始化日誌
    if cli.log_json || config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::info!("🚀 Starting deck-resolver");
    tracing::debug!("Source kind: {:?}", config.source.kind);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    let store = match build_store(&config.source) {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };
    let resolver = PresentationResolver::new(store);

    let resolution = match resolver.refresh().await {
        Ok(resolution) => resolution,
        Err(e) => {
            tracing::error!(
                "❌ Resolution failed: {} (Severity: {:?})",
                e,
                e.severity()
            );
            exit_with(&e);
        }
    };

    let Some(resolved) = resolution.resolved() else {
        let status = resolution.status();
        eprintln!("❌ {}", status.display_message());
        println!("{}", serde_json::to_string_pretty(&resolution)?);
        std::process::exit(EXIT_UNAVAILABLE);
    };

    let deck = DeckSetup::from_resolved(resolved);

    let contents = match (&resolved.config, cli.with_contents) {
        (Some(presentation), true) => match load_contents(resolver.store(), presentation).await {
            Ok(bodies) => Some(bodies),
            Err(e) => exit_with(&e),
        },
        (None, true) => {
            tracing::warn!("🔶 No presentation config available, skipping contents");
            None
        }
        (_, false) => None,
    };

    let output = serde_json::json!({
        "resolution": resolution,
        "deck": deck,
        "contents": contents,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    tracing::info!("✅ Presentation resolved");
    Ok(())
}

fn exit_with(e: &ResolveError) -> ! {
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let code = if e.is_config_error() {
        EXIT_CONFIG
    } else {
        EXIT_RESOLVE
    };
    std::process::exit(code)
}
