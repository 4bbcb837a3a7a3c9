//! The command capability: descriptor plus execute logic.

use async_trait::async_trait;
use dbot_core::{Fields, Response, Result};

use crate::descriptor::CommandDescriptor;
use crate::invocation::Invocation;

/// A command: a [`CommandDescriptor`] and its execution logic.
///
/// Callers go through [`Invocation::pre_execute`], which runs the gates before [`Command::execute`].
#[async_trait]
pub trait Command: Send + Sync {
    fn descriptor(&self) -> &CommandDescriptor;

    /// Main logic. Errors propagate to the caller of the gate unchanged.
    async fn execute(&self, invocation: &Invocation<'_>) -> Result<Response>;

    /// Runs instead of [`Command::execute`] when the command needs a database and none is live.
    /// Default: apologize in the originating chat.
    async fn execute_no_db(&self, invocation: &Invocation<'_>) -> Result<Response> {
        let text = format!(
            "Sorry no database connection, unable to execute \"{}\" command.",
            invocation.name()
        );
        invocation.reply_to_chat(&text, Fields::new()).await
    }
}
