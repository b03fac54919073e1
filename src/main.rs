use clap::{Parser, Subcommand};
use std::sync::Arc;
use yurei::{conversation::Conversation, gateway::Gateway};
use yurei_channels::line::LineChannel;
use yurei_core::{config, traits::Provider};
use yurei_providers::azure_openai::AzureOpenAiProvider;

#[derive(Parser)]
#[command(
    name = "yurei",
    version,
    about = "幽霊 Yurei: LINE ghost-story chat bot"
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
    /// Start the webhook server and broadcast loop.
    Start,
    /// Show which settings are configured.
    Status,
    /// Send a one-shot message through the dispatcher.
    Ask {
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.bot.log_level)),
        )
        .init();

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let provider: Arc<dyn Provider> =
                Arc::new(AzureOpenAiProvider::from_config(&cfg.azure_openai)?);
            let channel = Arc::new(LineChannel::new(&cfg.line));
            let conversation = Arc::new(Conversation::new(provider));

            println!("幽霊 Yurei: Starting bot...");
            let gw = Gateway::new(
                conversation,
                channel,
                cfg.line.channel_secret.clone(),
                cfg.server.clone(),
                cfg.broadcast.clone(),
            );
            gw.run().await?;
        }
        Commands::Status => {
            let missing = cfg.missing();
            println!("幽霊 Yurei: Status Check\n");
            println!("Config: {}", cli.config);
            println!("Server: {}:{}", cfg.server.host, cfg.server.port);
            println!(
                "Broadcast: {}",
                if cfg.broadcast.enabled {
                    format!("every {}h", cfg.broadcast.interval_hours)
                } else {
                    "disabled".to_string()
                }
            );
            println!();

            for name in [
                config::ENV_LINE_CHANNEL_SECRET,
                config::ENV_LINE_CHANNEL_ACCESS_TOKEN,
                config::ENV_AZURE_OPENAI_ENDPOINT,
                config::ENV_AZURE_OPENAI_API_KEY,
                config::ENV_AZURE_OPENAI_API_VERSION,
                config::ENV_AZURE_OPENAI_MODEL,
            ] {
                println!(
                    "  {name}: {}",
                    if missing.contains(&name) {
                        "missing"
                    } else {
                        "configured"
                    }
                );
            }
        }
        Commands::Ask { message } => {
            if message.is_empty() {
                anyhow::bail!("no message provided. Usage: yurei ask <message>");
            }

            let missing: Vec<_> = cfg
                .missing()
                .into_iter()
                .filter(|name| name.starts_with("AZURE_"))
                .collect();
            if !missing.is_empty() {
                anyhow::bail!("missing configuration: {}", missing.join(", "));
            }

            let prompt = message.join(" ");
            let provider: Arc<dyn Provider> =
                Arc::new(AzureOpenAiProvider::from_config(&cfg.azure_openai)?);
            let conversation = Conversation::new(provider);
            let reply = conversation.dispatch("cli", &prompt).await?;
            println!("{reply}");
        }
    }

    Ok(())
}
