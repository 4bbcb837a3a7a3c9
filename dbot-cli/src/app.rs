//! Wires config, transport, persistence and the built-in commands, then starts polling.

use std::sync::Arc;

use anyhow::{Context, Result};
use dbot_command::{
    BotContext, CommandRegistry, GenericCommand, GenericMessageCommand, HelpCommand, StartCommand,
    StatsCommand, WhoamiCommand,
};
use dbot_core::init_tracing;
use dbot_telegram::{run_polling, HttpTransport, TelegramConfig};
use storage::UpdateRepository;
use teloxide::Bot;
use tracing::{error, info, instrument};

/// Registry with the commands every deployment has: generic, genericmessage, start, help, whoami.
pub fn base_registry() -> CommandRegistry {
    CommandRegistry::new()
        .add_command(Arc::new(GenericCommand::new()))
        .add_command(Arc::new(GenericMessageCommand::new()))
        .add_command(Arc::new(StartCommand::new()))
        .add_command(Arc::new(HelpCommand::new()))
        .add_command(Arc::new(WhoamiCommand::new()))
}

/// Context for `config`: HTTP transport, admins, bot username and per-command settings.
pub fn build_context(config: &TelegramConfig) -> Result<BotContext> {
    let transport = HttpTransport::new(config.bot_token.clone(), Some(config.api_url()));
    let mut context = BotContext::new(Arc::new(transport));
    context.enable_admins(config.admin_user_ids.iter().copied());
    if let Some(ref username) = config.bot_username {
        context.set_bot_username(username.clone());
    }
    for (command, settings) in config.load_command_config()? {
        context.set_command_config(command, settings);
    }
    Ok(context)
}

fn build_bot(config: &TelegramConfig) -> Bot {
    let bot = Bot::new(config.bot_token.clone());
    if let Some(ref url_str) = config.telegram_api_url {
        match reqwest::Url::parse(url_str) {
            Ok(url) => bot.set_api_url(url),
            Err(e) => {
                error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                bot
            }
        }
    } else {
        bot
    }
}

/// Runs the bot until Ctrl-C.
#[instrument(skip(config))]
pub async fn run(config: TelegramConfig) -> Result<()> {
    if let Some(dir) = std::path::Path::new(&config.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).context("Failed to create log directory")?;
        }
    }
    init_tracing(&config.log_file)?;

    let mut context = build_context(&config)?;
    let mut registry = base_registry();

    let repo = match config.database_url {
        Some(ref url) => {
            let repo = UpdateRepository::new(url)
                .await
                .with_context(|| format!("Failed to open database {}", url))?;
            context.enable_persistence(Arc::new(repo.clone()));
            registry = registry.add_command(Arc::new(StatsCommand::new(repo.clone())));
            Some(repo)
        }
        None => None,
    };

    info!(
        api_url = %config.api_url(),
        database_enabled = repo.is_some(),
        admins = config.admin_user_ids.len(),
        "step: starting bot"
    );

    run_polling(
        build_bot(&config),
        registry,
        context,
        repo,
        config.poll_timeout_secs,
    )
    .await
}
