//! Integration tests for [`dbot_command::CommandRegistry`] routing.
//!
//! Covers: command routing (case, bot addressing), generic fallback for unknown, disabled and
//! forbidden commands, genericmessage for plain text, system commands per update variant,
//! and the missing-generic error.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::*;
use dbot_command::{
    CommandDescriptor, CommandRegistry, CommandRole, GenericCommand, GenericMessageCommand,
};
use dbot_core::{CommandError, DbotError, Response};
use serde_json::json;

fn registry_with(commands: Vec<TestCommand>) -> CommandRegistry {
    commands
        .into_iter()
        .fold(CommandRegistry::new(), |registry, command| {
            registry.add_command(Arc::new(command))
        })
}

/// **Test: `/MyCmd@bot args` routes to `mycmd` when addressed to this bot.**
#[tokio::test]
async fn test_routes_command_by_name() {
    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.set_bot_username("test_bot");
    let command = TestCommand::new(mycmd());
    let executed = command.counter();
    let registry = registry_with(vec![command]);

    let response = registry
        .process_update(&context, private_message(7, "/MyCmd@test_bot args"))
        .await
        .unwrap();

    assert_eq!(response, executed_response());
    assert_eq!(executed.load(Ordering::SeqCst), 1);
}

/// **Test: commands addressed to another bot are treated as plain messages.**
#[tokio::test]
async fn test_command_for_other_bot_goes_to_genericmessage() {
    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.set_bot_username("test_bot");
    let command = TestCommand::new(mycmd());
    let executed = command.counter();
    let generic_message = TestCommand::new(CommandDescriptor::new(
        "genericmessage",
        CommandRole::System,
    ));
    let generic_executed = generic_message.counter();
    let registry = registry_with(vec![command, generic_message]);

    registry
        .process_update(&context, private_message(7, "/mycmd@other_bot"))
        .await
        .unwrap();

    assert_eq!(executed.load(Ordering::SeqCst), 0);
    assert_eq!(generic_executed.load(Ordering::SeqCst), 1);
}

/// **Test: routing runs the gate: a private-only command in a group is deleted and notified.**
#[tokio::test]
async fn test_routing_applies_gate() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let command = TestCommand::new(mycmd().with_private_only(true));
    let executed = command.counter();
    let registry = registry_with(vec![command]);

    registry
        .process_update(&context, group_message(7, "/mycmd args"))
        .await
        .unwrap();

    assert_eq!(executed.load(Ordering::SeqCst), 0);
    assert_eq!(transport.calls_to("deleteMessage").len(), 1);
    assert_eq!(transport.calls_to("sendMessage")[0]["chat_id"], 7);
}

/// **Test: unknown command falls back to the generic command.**
#[tokio::test]
async fn test_unknown_command_uses_generic() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = CommandRegistry::new().add_command(Arc::new(GenericCommand::new()));

    registry
        .process_update(&context, private_message(7, "/nope"))
        .await
        .unwrap();

    assert_eq!(
        transport.calls_to("sendMessage"),
        vec![fields(json!({ "chat_id": 7, "text": "Command /nope not found.. :(" }))]
    );
}

/// **Test: disabled commands (by descriptor or by context) fall back to generic.**
#[tokio::test]
async fn test_disabled_command_uses_generic() {
    let transport = MockTransport::new();
    let mut context = context(&transport);
    let off = TestCommand::new(CommandDescriptor::new("off", CommandRole::User).with_enabled(false));
    let toggled = TestCommand::new(mycmd());
    let off_executed = off.counter();
    let toggled_executed = toggled.counter();
    let registry = registry_with(vec![off, toggled]).add_command(Arc::new(GenericCommand::new()));
    context.disable_command("mycmd");

    registry
        .process_update(&context, private_message(7, "/off"))
        .await
        .unwrap();
    registry
        .process_update(&context, private_message(7, "/mycmd"))
        .await
        .unwrap();

    assert_eq!(off_executed.load(Ordering::SeqCst), 0);
    assert_eq!(toggled_executed.load(Ordering::SeqCst), 0);
    assert_eq!(transport.calls_to("sendMessage").len(), 2);
}

/// **Test: admin commands run only for admins; others get generic.**
#[tokio::test]
async fn test_admin_command_requires_admin() {
    let transport = MockTransport::new();
    let mut context = context(&transport);
    context.enable_admin(1);
    let admin = TestCommand::new(CommandDescriptor::new("ban", CommandRole::Admin));
    let executed = admin.counter();
    let registry = registry_with(vec![admin]).add_command(Arc::new(GenericCommand::new()));

    registry
        .process_update(&context, private_message(2, "/ban"))
        .await
        .unwrap();
    assert_eq!(executed.load(Ordering::SeqCst), 0);
    assert_eq!(transport.calls_to("sendMessage").len(), 1);

    let response = registry
        .process_update(&context, private_message(1, "/ban"))
        .await
        .unwrap();
    assert_eq!(response, executed_response());
    assert_eq!(executed.load(Ordering::SeqCst), 1);
}

/// **Test: users cannot invoke system commands by name.**
#[tokio::test]
async fn test_system_command_not_user_invocable() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let system = TestCommand::new(CommandDescriptor::new("callbackquery", CommandRole::System));
    let executed = system.counter();
    let registry = registry_with(vec![system]).add_command(Arc::new(GenericCommand::new()));

    registry
        .process_update(&context, private_message(7, "/callbackquery"))
        .await
        .unwrap();

    assert_eq!(executed.load(Ordering::SeqCst), 0);
}

/// **Test: plain text goes to genericmessage.**
#[tokio::test]
async fn test_plain_text_goes_to_genericmessage() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = CommandRegistry::new()
        .add_command(Arc::new(GenericMessageCommand::new()))
        .add_command(Arc::new(GenericCommand::new()));

    let response = registry
        .process_update(&context, private_message(7, "hello there"))
        .await
        .unwrap();

    assert_eq!(response, Response::empty());
    assert!(transport.calls().is_empty());
}

/// **Test: non-message variants go to the system command named after the variant.**
#[tokio::test]
async fn test_callback_query_goes_to_system_command() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let system = TestCommand::new(CommandDescriptor::new("callbackquery", CommandRole::System));
    let executed = system.counter();
    let registry = registry_with(vec![system]);

    let response = registry
        .process_update(&context, callback_query_update(7, "x"))
        .await
        .unwrap();

    assert_eq!(response, executed_response());
    assert_eq!(executed.load(Ordering::SeqCst), 1);
}

/// **Test: edited messages go to `editedmessage`; unregistered system routes are acknowledged empty.**
#[tokio::test]
async fn test_unregistered_system_route_is_empty() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = CommandRegistry::new().add_command(Arc::new(GenericCommand::new()));
    let update = message_update_of("edited_message", 7, "private", 1, Some(7), "/mycmd");

    let response = registry.process_update(&context, update).await.unwrap();

    assert_eq!(response, Response::empty());
    assert!(transport.calls().is_empty());
}

/// **Test: unknown command without a generic command is an error.**
#[tokio::test]
async fn test_missing_generic_is_error() {
    let transport = MockTransport::new();
    let context = context(&transport);
    let registry = CommandRegistry::new();

    let result = registry
        .process_update(&context, private_message(7, "/nope"))
        .await;

    assert!(matches!(
        result,
        Err(DbotError::Command(CommandError::GenericMissing))
    ));
}

/// **Test: descriptors are listed sorted by name.**
#[test]
fn test_descriptors_sorted() {
    let registry = registry_with(vec![
        TestCommand::new(CommandDescriptor::new("zeta", CommandRole::User)),
        TestCommand::new(CommandDescriptor::new("alpha", CommandRole::User)),
    ]);

    let names: Vec<&str> = registry.descriptors().iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
}
