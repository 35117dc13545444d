mod gateway;

use clap::{Parser, Subcommand};
use std::sync::Arc;
use tolyan_channels::telegram::TelegramChannel;
use tolyan_core::{
    config::{self, Config},
    mood::Mood,
    persona::{self, PersonaCache},
    traits::Provider,
};
use tolyan_providers::openai::OpenAiProvider;

#[derive(Parser)]
#[command(
    name = "tolyan",
    version,
    about = "Толян Бесович — персонажный бот для групповых чатов"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Check provider availability and channel configuration.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let mut cfg = config::load(&cli.config)?;
            apply_env_overrides(&mut cfg);

            let provider = build_provider(&cfg)?;
            if !provider.is_available().await {
                anyhow::bail!(
                    "provider '{}' is not available. Is the API key set?",
                    provider.name()
                );
            }

            let Some(tg) = cfg.channel.telegram.clone() else {
                anyhow::bail!("No channel configured. Add [channel.telegram] to config.toml.");
            };
            if !tg.enabled {
                anyhow::bail!("Telegram channel is disabled. Set enabled = true in config.toml.");
            }
            if tg.bot_token.is_empty() {
                anyhow::bail!(
                    "Telegram is enabled but bot_token is empty. \
                     Set it in config.toml or TELEGRAM_BOT_TOKEN env var."
                );
            }
            let channel = Arc::new(TelegramChannel::new(tg));

            let persona_path = config::shellexpand(&cfg.persona.path);
            persona::install_bundled_persona(&persona_path);
            let persona = PersonaCache::new(persona_path);

            let mood = Mood::pick(&mut rand::thread_rng());

            println!("Толян поднимается...");
            let gw = Arc::new(gateway::Gateway::new(provider, channel, persona, mood, &cfg));
            gw.run().await?;
        }
        Commands::Status => {
            let mut cfg = config::load(&cli.config)?;
            apply_env_overrides(&mut cfg);

            println!("Толян — Status Check\n");
            println!("Config: {}", cli.config);
            println!("Content mode: {}", cfg.bot.content_mode.display_name());
            println!("Default provider: {}", cfg.provider.default);
            println!();

            let provider = build_provider(&cfg)?;
            println!(
                "  {}: {}",
                provider.name(),
                if provider.is_available().await {
                    "available"
                } else {
                    "not available"
                }
            );
            println!();

            match cfg.channel.telegram {
                Some(ref tg) => println!(
                    "  telegram: {}",
                    if tg.enabled && !tg.bot_token.is_empty() {
                        "configured"
                    } else if tg.enabled {
                        "enabled but missing bot_token"
                    } else {
                        "disabled"
                    }
                ),
                None => println!("  telegram: not configured"),
            }
        }
    }

    Ok(())
}

/// Fill empty secret fields from the environment.
fn apply_env_overrides(cfg: &mut Config) {
    if let Some(tg) = cfg.channel.telegram.as_mut() {
        if tg.bot_token.is_empty() {
            if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
                tg.bot_token = token;
            }
        }
        if let Ok(secret) = std::env::var("WEBHOOK_SECRET_TOKEN") {
            tg.webhook_secret = secret;
        }
    }
    let openai = cfg
        .provider
        .openai
        .get_or_insert_with(Default::default);
    if openai.api_key.is_empty() {
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            openai.api_key = key;
        }
    }
}

/// Build the configured provider.
fn build_provider(cfg: &Config) -> anyhow::Result<Arc<dyn Provider>> {
    match cfg.provider.default.as_str() {
        "openai" => {
            let oa = cfg.provider.openai.clone().unwrap_or_default();
            Ok(Arc::new(OpenAiProvider::from_config(
                oa.base_url,
                oa.api_key,
                oa.model,
            )))
        }
        other => anyhow::bail!("unsupported provider: {other}"),
    }
}
