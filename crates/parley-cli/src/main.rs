use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use parley_core::{
    AuthProvider, AuthResponse, ConfigLoader, Conversation, HttpChatTransport, ParleyConfig,
    SendOutcome, SimulatedAuthProvider,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod chat_loop;

#[derive(Parser, Debug)]
#[clap(name = "Parley", author, version = "0.1.0", about = "Chat with a webhook-backed assistant")]
struct Cli {
    #[clap(
        long,
        short,
        help = "Configuration file (defaults to <config dir>/parley/parley.yaml)"
    )]
    config: Option<PathBuf>,

    #[clap(long, help = "Webhook URL, overrides the configuration file")]
    webhook_url: Option<String>,

    #[clap(long, help = "Webhook timeout in seconds, overrides the configuration file")]
    timeout_secs: Option<u64>,

    #[clap(long, short, help = "Log level: off, error, warn, info, debug, trace")]
    log_level: Option<String>,

    #[clap(long, help = "Create an account instead of signing in")]
    register: bool,

    #[clap(long, help = "Display name (required with --register)")]
    name: Option<String>,

    #[clap(long, default_value = "")]
    email: String,

    #[clap(long, default_value = "")]
    password: String,

    #[clap(long, short, help = "Send a single message, print the reply and exit")]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load(cli.config.as_deref()).await?;
    apply_overrides(&mut config, &cli)?;

    // Logs go to stderr so stdout only carries the conversation.
    let log_level_filter = config.logging.level.parse().unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    log::debug!("Effective configuration: {:?}", config);

    let auth = match authenticate(&cli, &config).await {
        Ok(auth) => auth,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Signed in as {} <{}>", auth.user.name, auth.user.email);

    let transport = Arc::new(HttpChatTransport::from_config(&config.webhook));
    let conversation = Conversation::new(transport, auth, config.chat.clone());

    match cli.message {
        Some(message) => run_single_message(conversation, &message).await,
        None => chat_loop::run(conversation).await,
    }
}

fn apply_overrides(config: &mut ParleyConfig, cli: &Cli) -> Result<()> {
    if let Some(url) = &cli.webhook_url {
        config.webhook.url = url.clone();
    }
    if let Some(timeout) = cli.timeout_secs {
        config.webhook.timeout_secs = timeout;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    config.validate()?;
    Ok(())
}

async fn authenticate(cli: &Cli, config: &ParleyConfig) -> Result<AuthResponse> {
    let provider =
        SimulatedAuthProvider::new(Duration::from_millis(config.auth.simulated_delay_ms));

    let auth = if cli.register {
        let name = cli.name.as_deref().unwrap_or_default();
        provider.register(name, &cli.email, &cli.password).await?
    } else {
        provider.login(&cli.email, &cli.password).await?
    };
    Ok(auth)
}

async fn run_single_message(mut conversation: Conversation, message: &str) -> Result<()> {
    log::info!("Sending single message for session {}", conversation.session_id());

    match conversation.send_user_text(message).await {
        SendOutcome::Replied(reply) => {
            println!("{}", reply.text);
            Ok(())
        }
        SendOutcome::Failed(banner) => anyhow::bail!(banner),
        SendOutcome::Ignored => anyhow::bail!("Nothing to send: the message is empty"),
        SendOutcome::Stale => anyhow::bail!("The session changed before the reply arrived"),
    }
}
