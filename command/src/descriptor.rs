//! Static identity and flags of a command.

/// Declared role of a command; decides who may invoke it and whether it is user-visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandRole {
    /// Invoked by the framework for non-command updates (`genericmessage`, `callbackquery`, ...).
    System,
    /// Only executed for admin users.
    Admin,
    User,
}

/// Command identity: name (routing and config key), help texts, version and gating flags.
///
/// Built once by each command and not changed afterwards; enabling/disabling at runtime goes
/// through [`crate::BotContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct CommandDescriptor {
    name: String,
    description: String,
    usage: String,
    version: String,
    show_in_help: bool,
    enabled: bool,
    need_mysql: bool,
    private_only: bool,
    role: CommandRole,
}

impl CommandDescriptor {
    /// Creates a descriptor with defaults: usage `/<name>`, version `1.0.0`, shown in help,
    /// enabled, no persistence needed, usable in any chat.
    pub fn new(name: impl Into<String>, role: CommandRole) -> Self {
        let name = name.into();
        Self {
            usage: format!("/{}", name),
            name,
            description: String::new(),
            version: "1.0.0".to_string(),
            show_in_help: true,
            enabled: true,
            need_mysql: false,
            private_only: false,
            role,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_show_in_help(mut self, show_in_help: bool) -> Self {
        self.show_in_help = show_in_help;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks the command as requiring a live database connection.
    pub fn with_need_mysql(mut self, need_mysql: bool) -> Self {
        self.need_mysql = need_mysql;
        self
    }

    pub fn with_private_only(mut self, private_only: bool) -> Self {
        self.private_only = private_only;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn show_in_help(&self) -> bool {
        self.show_in_help
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn need_mysql(&self) -> bool {
        self.need_mysql
    }

    pub fn is_private_only(&self) -> bool {
        self.private_only
    }

    pub fn role(&self) -> CommandRole {
        self.role
    }

    pub fn is_system_command(&self) -> bool {
        self.role == CommandRole::System
    }

    pub fn is_admin_command(&self) -> bool {
        self.role == CommandRole::Admin
    }

    pub fn is_user_command(&self) -> bool {
        self.role == CommandRole::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let descriptor = CommandDescriptor::new("mycmd", CommandRole::User);

        assert_eq!(descriptor.name(), "mycmd");
        assert_eq!(descriptor.usage(), "/mycmd");
        assert_eq!(descriptor.version(), "1.0.0");
        assert!(descriptor.show_in_help());
        assert!(descriptor.is_enabled());
        assert!(!descriptor.need_mysql());
        assert!(!descriptor.is_private_only());
        assert!(descriptor.is_user_command());
        assert!(!descriptor.is_admin_command());
        assert!(!descriptor.is_system_command());
    }

    #[test]
    fn test_descriptor_builder() {
        let descriptor = CommandDescriptor::new("stats", CommandRole::Admin)
            .with_description("Show statistics")
            .with_usage("/stats")
            .with_version("1.2.0")
            .with_show_in_help(false)
            .with_need_mysql(true)
            .with_private_only(true);

        assert_eq!(descriptor.description(), "Show statistics");
        assert_eq!(descriptor.version(), "1.2.0");
        assert!(!descriptor.show_in_help());
        assert!(descriptor.need_mysql());
        assert!(descriptor.is_private_only());
        assert!(descriptor.is_admin_command());
    }
}
