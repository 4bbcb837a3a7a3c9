//! Built-in commands.

mod generic;
mod generic_message;
mod help;
mod start;
mod stats;
mod whoami;

pub use generic::GenericCommand;
pub use generic_message::GenericMessageCommand;
pub use help::HelpCommand;
pub use start::StartCommand;
pub use stats::StatsCommand;
pub use whoami::WhoamiCommand;

use dbot_core::Fields;
use serde_json::Value;

/// Extra send fields selecting Markdown formatting.
pub(crate) fn markdown() -> Fields {
    let mut fields = Fields::new();
    fields.insert("parse_mode".to_string(), Value::from("Markdown"));
    fields
}

/// Escapes the characters legacy Markdown treats as entity markers (`_`, `*`, `` ` ``, `[`).
pub(crate) fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("foo_bar"), "foo\\_bar");
        assert_eq!(escape_markdown("*[x]`"), "\\*\\[x]\\`");
        assert_eq!(escape_markdown("plain text"), "plain text");
    }
}
