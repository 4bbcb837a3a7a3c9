//! Shared test support: a recording transport, a switchable persistence probe, a configurable
//! test command, and update builders.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dbot_command::{BotContext, Command, CommandDescriptor, CommandRole, Invocation};
use dbot_core::{CommandError, DbotError, Fields, Persistence, Response, Result, Transport, Update};
use serde_json::{json, Value};

/// Records every call; answers `{"ok": true, "result": {"message_id": 1}}` unless told to fail.
#[derive(Default, Clone)]
pub struct MockTransport {
    calls: Arc<Mutex<Vec<(String, Fields)>>>,
    failing_method: Arc<Mutex<Option<String>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every call to `method` fail with a transport error.
    pub fn fail_on(&self, method: &str) {
        *self.failing_method.lock().unwrap() = Some(method.to_string());
    }

    pub fn calls(&self) -> Vec<(String, Fields)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Fields> {
        self.calls()
            .into_iter()
            .filter(|(m, _)| m == method)
            .map(|(_, f)| f)
            .collect()
    }
}

pub fn sent_response() -> Response {
    Response::ok(json!({ "message_id": 1 }))
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, method: &str, fields: Fields) -> Result<Response> {
        self.calls
            .lock()
            .unwrap()
            .push((method.to_string(), fields));
        if self.failing_method.lock().unwrap().as_deref() == Some(method) {
            return Err(DbotError::Transport(format!("{} failed", method)));
        }
        Ok(sent_response())
    }
}

/// Database liveness that tests can flip.
pub struct SwitchPersistence(AtomicBool);

impl SwitchPersistence {
    pub fn new(connected: bool) -> Arc<Self> {
        Arc::new(Self(AtomicBool::new(connected)))
    }

    pub fn set(&self, connected: bool) {
        self.0.store(connected, Ordering::SeqCst);
    }
}

impl Persistence for SwitchPersistence {
    fn is_connected(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Command whose execute counts calls and returns `{"ok": true, "result": "executed"}`.
pub struct TestCommand {
    descriptor: CommandDescriptor,
    executed: Arc<AtomicUsize>,
    fail: bool,
}

impl TestCommand {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        Self {
            descriptor,
            executed: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    pub fn failing(descriptor: CommandDescriptor) -> Self {
        Self {
            fail: true,
            ..Self::new(descriptor)
        }
    }

    pub fn executed(&self) -> usize {
        self.executed.load(Ordering::SeqCst)
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.executed.clone()
    }
}

pub fn executed_response() -> Response {
    Response::ok(json!("executed"))
}

#[async_trait]
impl Command for TestCommand {
    fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    async fn execute(&self, _invocation: &Invocation<'_>) -> Result<Response> {
        self.executed.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CommandError::Failed("boom".to_string()).into());
        }
        Ok(executed_response())
    }
}

pub fn mycmd() -> CommandDescriptor {
    CommandDescriptor::new("mycmd", CommandRole::User).with_description("My command")
}

pub fn context(transport: &MockTransport) -> BotContext {
    BotContext::new(Arc::new(transport.clone()))
}

pub fn fields(value: Value) -> Fields {
    value.as_object().cloned().expect("object")
}

fn user(id: i64) -> Value {
    json!({ "id": id, "is_bot": false, "first_name": "Test", "username": format!("user{}", id) })
}

fn message_json(chat_id: i64, chat_type: &str, message_id: i64, from: Option<i64>, text: &str) -> Value {
    let mut message = json!({
        "message_id": message_id,
        "date": 1706529600,
        "chat": { "id": chat_id, "type": chat_type },
        "text": text
    });
    if let Some(from) = from {
        message["from"] = user(from);
    }
    message
}

/// Update of variant `kind` (`message`, `edited_message`, `channel_post`, ...) carrying a message.
pub fn message_update_of(
    kind: &str,
    chat_id: i64,
    chat_type: &str,
    message_id: i64,
    from: Option<i64>,
    text: &str,
) -> Update {
    let mut update = json!({ "update_id": 1 });
    update[kind] = message_json(chat_id, chat_type, message_id, from, text);
    serde_json::from_value(update).expect("valid update")
}

pub fn message_update(chat_id: i64, chat_type: &str, message_id: i64, from: Option<i64>, text: &str) -> Update {
    message_update_of("message", chat_id, chat_type, message_id, from, text)
}

pub fn private_message(user_id: i64, text: &str) -> Update {
    message_update(user_id, "private", 10, Some(user_id), text)
}

pub fn group_message(user_id: i64, text: &str) -> Update {
    message_update(-100, "supergroup", 42, Some(user_id), text)
}

pub fn callback_query_update(user_id: i64, data: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": 2,
        "callback_query": {
            "id": "cb1",
            "from": user(user_id),
            "chat_instance": "ci",
            "data": data
        }
    }))
    .expect("valid update")
}
