//! Integration tests for the built-in commands (help, start, whoami, generic, stats), driven
//! through [`dbot_command::CommandRegistry`].

mod common;

use std::sync::Arc;

use common::*;
use dbot_command::{
    CommandDescriptor, CommandRegistry, CommandRole, GenericCommand, GenericMessageCommand,
    HelpCommand, StartCommand, StatsCommand, WhoamiCommand,
};
use serde_json::json;
use storage::{UpdateRecord, UpdateRepository};

fn registry() -> CommandRegistry {
    CommandRegistry::new()
        .add_command(Arc::new(HelpCommand::new()))
        .add_command(Arc::new(StartCommand::new()))
        .add_command(Arc::new(WhoamiCommand::new()))
        .add_command(Arc::new(GenericCommand::new()))
        .add_command(Arc::new(GenericMessageCommand::new()))
        .add_command(Arc::new(TestCommand::new(
            CommandDescriptor::new("ban", CommandRole::Admin).with_description("Ban a user"),
        )))
}

fn sent_text(transport: &MockTransport) -> String {
    let sends = transport.calls_to("sendMessage");
    sends
        .last()
        .and_then(|f| f["text"].as_str())
        .unwrap_or_default()
        .to_string()
}

/// **Test: /help lists visible user commands; hidden, system and admin commands are left out.**
#[tokio::test]
async fn test_help_lists_commands() {
    let transport = MockTransport::new();
    let context = context(&transport);

    registry()
        .process_update(&context, private_message(7, "/help"))
        .await
        .unwrap();

    let sends = transport.calls_to("sendMessage");
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0]["parse_mode"], "Markdown");
    assert_eq!(
        sent_text(&transport),
        "*Commands List*:\n/help - Show bot commands help\n/whoami - Show your id, name and username\n\nSend /help <command> to see more details."
    );
}

/// **Test: admins also see admin commands in /help.**
#[tokio::test]
async fn test_help_shows_admin_commands_to_admins() {
    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.enable_admin(7);

    registry()
        .process_update(&context, private_message(7, "/help"))
        .await
        .unwrap();

    assert!(sent_text(&transport).contains("/ban - Ban a user\n"));
}

/// **Test: /help <command> shows details; unknown names get a not-found note.**
#[tokio::test]
async fn test_help_command_details() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = registry();

    registry
        .process_update(&context, private_message(7, "/help /whoami"))
        .await
        .unwrap();
    assert_eq!(
        sent_text(&transport),
        "Command: whoami (v1.0.0)\nDescription: Show your id, name and username\nUsage: /whoami"
    );

    registry
        .process_update(&context, private_message(7, "/help nope"))
        .await
        .unwrap();
    assert_eq!(
        sent_text(&transport),
        "No help available: Command /nope not found"
    );
}

/// **Test: a help argument with Markdown markers is escaped, so the Markdown reply stays valid.**
///
/// Setup: registry with the built-ins.
/// Action: `/help foo_bar`.
/// Expected: one Markdown send whose text carries `foo\_bar`.
#[tokio::test]
async fn test_help_unknown_name_is_markdown_escaped() {
    let transport = MockTransport::new();
    let context = context(&transport);

    registry()
        .process_update(&context, private_message(7, "/help foo_bar"))
        .await
        .unwrap();

    let sends = transport.calls_to("sendMessage");
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0]["parse_mode"], "Markdown");
    assert_eq!(
        sends[0]["text"],
        "No help available: Command /foo\\_bar not found"
    );
}

/// **Test: /start replies with the configured greeting, or the default one.**
#[tokio::test]
async fn test_start_greeting_from_config() {
    let transport = MockTransport::new();
    let mut context = context(&transport);

    registry()
        .process_update(&context, private_message(7, "/start"))
        .await
        .unwrap();
    assert_eq!(
        sent_text(&transport),
        "Hi there!\nType /help to see all commands!"
    );

    context.set_command_config("start", fields(json!({ "greeting": "Welcome!" })));
    registry()
        .process_update(&context, private_message(7, "/start"))
        .await
        .unwrap();
    assert_eq!(sent_text(&transport), "Welcome!");
}

/// **Test: /whoami answers in private chats and is removed from groups.**
#[tokio::test]
async fn test_whoami_private_only() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = registry();

    registry
        .process_update(&context, private_message(7, "/whoami"))
        .await
        .unwrap();
    assert_eq!(
        sent_text(&transport),
        "Your id: 7\nName: Test\nUsername: user7"
    );

    registry
        .process_update(&context, group_message(7, "/whoami"))
        .await
        .unwrap();
    assert_eq!(transport.calls_to("deleteMessage").len(), 1);
    assert_eq!(
        sent_text(&transport),
        "/whoami command is only available in a private chat.\n(`/whoami`)"
    );
}

/// **Test: /stats reports logged updates when the database is live.**
#[tokio::test]
async fn test_stats_with_database() {
    let repo = UpdateRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");
    repo.save(&UpdateRecord::from_update(&private_message(1, "hello")))
        .await
        .unwrap();

    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.enable_admin(1);
    context.enable_persistence(Arc::new(repo.clone()));
    let registry = registry().add_command(Arc::new(StatsCommand::new(repo)));

    registry
        .process_update(&context, private_message(1, "/stats"))
        .await
        .unwrap();

    let text = sent_text(&transport);
    assert!(text.starts_with("*Statistics*\nUpdates: 1\nUsers: 1\nChats: 1\n"), "{}", text);
}

/// **Test: /stats without persistence falls back to the no-database apology.**
#[tokio::test]
async fn test_stats_without_database() {
    let repo = UpdateRepository::new("sqlite::memory:")
        .await
        .expect("Failed to create repository");
    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.enable_admin(1);
    let registry = registry().add_command(Arc::new(StatsCommand::new(repo)));

    registry
        .process_update(&context, private_message(1, "/stats"))
        .await
        .unwrap();

    assert_eq!(
        sent_text(&transport),
        "Sorry no database connection, unable to execute \"stats\" command."
    );
}
