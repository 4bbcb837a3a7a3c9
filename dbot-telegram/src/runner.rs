//! Long-polling runner: fetches updates and hands each to the command registry.

use std::time::Duration;

use anyhow::Result;
use dbot_command::{BotContext, CommandRegistry};
use dbot_core::{DbotError, Fields, Transport, Update};
use serde_json::Value;
use storage::{UpdateRecord, UpdateRepository};
use teloxide::requests::{Request, Requester};
use teloxide::Bot;
use tracing::{error, info, instrument, warn};

use crate::adapters::{TelegramUpdateWrapper, TelegramUserWrapper};

const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Polls `getUpdates` until Ctrl-C. Updates are processed one at a time, each to completion.
///
/// The bot username is learned via `getMe` unless the context already has one.
pub async fn run_polling(
    bot: Bot,
    registry: CommandRegistry,
    mut context: BotContext,
    repo: Option<UpdateRepository>,
    poll_timeout_secs: u32,
) -> Result<()> {
    if context.bot_username().is_none() {
        info!("step: fetching bot identity via getMe");
        let me = bot.get_me().send().await?;
        if let Some(username) = TelegramUserWrapper(&me.user).to_core().username {
            context.set_bot_username(username);
        }
    }
    info!(
        bot_username = ?context.bot_username(),
        commands = registry.descriptors().len(),
        "Bot started, polling for updates"
    );

    let mut offset: i64 = 0;
    loop {
        let fetched = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, stopping polling");
                return Ok(());
            }
            result = fetch_updates(context.transport(), offset, poll_timeout_secs) => result,
        };

        match fetched {
            Ok(updates) => {
                offset = process_updates(&registry, &context, repo.as_ref(), offset, updates).await;
            }
            Err(e) => {
                error!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
            }
        }
    }
}

/// One round: fetch pending updates from `offset`, handle them, return the next offset.
pub async fn poll_once(
    registry: &CommandRegistry,
    context: &BotContext,
    repo: Option<&UpdateRepository>,
    offset: i64,
    poll_timeout_secs: u32,
) -> dbot_core::Result<i64> {
    let updates = fetch_updates(context.transport(), offset, poll_timeout_secs).await?;
    Ok(process_updates(registry, context, repo, offset, updates).await)
}

/// Calls `getUpdates` and returns the raw updates. A refused call is a transport error.
pub async fn fetch_updates(
    transport: &dyn Transport,
    offset: i64,
    timeout_secs: u32,
) -> dbot_core::Result<Vec<Value>> {
    let mut fields = Fields::new();
    fields.insert("offset".to_string(), Value::from(offset));
    fields.insert("timeout".to_string(), Value::from(timeout_secs));

    let response = transport.call("getUpdates", fields).await?;
    if !response.ok {
        return Err(DbotError::Transport(format!(
            "getUpdates refused: {}",
            response.description.unwrap_or_default()
        )));
    }
    let result = response.result.unwrap_or_else(|| Value::Array(Vec::new()));
    Ok(serde_json::from_value(result)?)
}

/// Handles each raw update in order. Unsupported kinds are skipped but still acknowledged
/// through the returned offset.
async fn process_updates(
    registry: &CommandRegistry,
    context: &BotContext,
    repo: Option<&UpdateRepository>,
    offset: i64,
    updates: Vec<Value>,
) -> i64 {
    let mut next = offset;
    for raw in &updates {
        let wrapper = TelegramUpdateWrapper(raw);
        let Some(update_id) = wrapper.update_id() else {
            warn!("Update without update_id, skipping");
            continue;
        };
        next = next_offset(next, update_id);
        if let Some(update) = wrapper.to_core() {
            handle_update(registry, context, repo, update).await;
        }
    }
    next
}

fn next_offset(current: i64, update_id: i64) -> i64 {
    current.max(update_id.saturating_add(1))
}

/// Logs the update (when a repository is given) and routes it through the registry.
/// Failures are logged; they never stop the polling loop.
#[instrument(skip_all, fields(update_id = update.update_id, update_type = %update.update_type()))]
pub async fn handle_update(
    registry: &CommandRegistry,
    context: &BotContext,
    repo: Option<&UpdateRepository>,
    update: Update,
) {
    if let Some(repo) = repo {
        if let Err(e) = repo.save(&UpdateRecord::from_update(&update)).await {
            warn!(error = %e, "Failed to save update");
        }
    }

    match registry.process_update(context, update).await {
        Ok(response) if !response.ok => {
            warn!(description = ?response.description, "step: update handled with refused response");
        }
        Ok(_) => info!("step: update handled"),
        Err(e) => error!(error = %e, "Failed to handle update"),
    }
}
