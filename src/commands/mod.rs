//! Command registry for REPL commands
//!
//! Lines matching a registered prefix run a command; anything else is
//! evaluated as an expression.

pub mod general;

use diffcalc_core::parser::{get_registry, FunctionRegistry};

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, evaluate as an expression
    NotACommand,
    /// Error occurred
    Error(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub functions: &'static FunctionRegistry,
    /// Variables bound with `-D`, listed by `vars`
    pub defines: Vec<(String, f64)>,
}

impl CommandContext {
    pub fn new(defines: Vec<(String, f64)>) -> Self {
        Self {
            functions: get_registry(),
            defines,
        }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

struct Command {
    prefix: String,
    handler: CommandHandler,
    /// Bare commands only match the exact line, so `vars + 1` stays an expression
    takes_args: bool,
}

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command that receives the rest of the line as arguments
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.insert(prefix, handler, true);
    }

    /// Register a command that only runs when typed on its own
    pub fn register_bare(&mut self, prefix: &str, handler: CommandHandler) {
        self.insert(prefix, handler, false);
    }

    fn insert(&mut self, prefix: &str, handler: CommandHandler, takes_args: bool) {
        self.commands.push(Command {
            prefix: prefix.to_string(),
            handler,
            takes_args,
        });
        self.commands.sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for command in &self.commands {
            let prefix = command.prefix.as_str();
            let with_args = command.takes_args && input.starts_with(&format!("{} ", prefix));
            if input == prefix || with_args {
                let args = input[prefix.len()..].trim();
                return (command.handler)(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.prefix.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with every built-in command
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("functions", general::cmd_functions);
    registry.register_bare("help", general::cmd_help);
    registry.register_bare("constants", general::cmd_constants);
    registry.register_bare("vars", general::cmd_vars);
    registry.register_bare("quit", general::cmd_quit);
    registry.register_bare("exit", general::cmd_quit);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> CommandContext {
        CommandContext::new(Vec::new())
    }

    #[test]
    fn test_prefix_matching() {
        let registry = create_registry();
        let mut ctx = ctx();

        assert_eq!(registry.execute("quit", &mut ctx), CommandResult::Exit);
        assert_eq!(registry.execute("exit", &mut ctx), CommandResult::Exit);
        // A variable that merely starts with a command name is an expression
        assert_eq!(registry.execute("quitter + 1", &mut ctx), CommandResult::NotACommand);
        assert_eq!(registry.execute("2 + 2", &mut ctx), CommandResult::NotACommand);
    }

    #[test]
    fn test_command_names_usable_as_variables() {
        let registry = create_registry();
        let mut ctx = ctx();

        let lines = [
            "vars + 1",
            "help * 2",
            "constants / 4",
            "quit - 1",
            "exit^2",
            "functions * 3",
        ];
        for line in lines {
            assert_eq!(
                registry.execute(line, &mut ctx),
                CommandResult::NotACommand,
                "{} should be evaluated",
                line
            );
        }
        assert!(matches!(registry.execute("vars", &mut ctx), CommandResult::Message(_)));
        assert!(matches!(
            registry.execute("functions diff", &mut ctx),
            CommandResult::Message(_)
        ));
    }

    #[test]
    fn test_bare_command_ignores_trailing_text() {
        fn bare(_: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Exit
        }

        let mut registry = CommandRegistry::new();
        registry.register_bare("stop", bare);
        assert_eq!(registry.execute("stop", &mut ctx()), CommandResult::Exit);
        assert_eq!(registry.execute("stop now", &mut ctx()), CommandResult::NotACommand);
    }

    #[test]
    fn test_arguments_are_trimmed() {
        fn echo(args: &str, _ctx: &mut CommandContext) -> CommandResult {
            CommandResult::Message(args.to_string())
        }

        let mut registry = CommandRegistry::new();
        registry.register("echo", echo);
        assert_eq!(
            registry.execute("echo   hi  ", &mut ctx()),
            CommandResult::Message("hi".to_string())
        );
        assert_eq!(
            registry.execute("echo", &mut ctx()),
            CommandResult::Message(String::new())
        );
    }

    #[test]
    fn test_longest_prefix_wins() {
        fn short(_: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message("short".to_string())
        }
        fn long(_: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message("long".to_string())
        }

        let mut registry = CommandRegistry::new();
        registry.register("show", short);
        registry.register("show all", long);
        assert_eq!(registry.list_commands(), vec!["show all", "show"]);
        assert_eq!(
            registry.execute("show all", &mut ctx()),
            CommandResult::Message("long".to_string())
        );
        assert_eq!(
            registry.execute("show x", &mut ctx()),
            CommandResult::Message("short".to_string())
        );
    }
}
