//! General REPL commands (help, functions, constants, vars, quit)

use crate::commands::{CommandContext, CommandResult};
use crate::render::format_value;
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(help_text())
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `functions [name]` command. Anything other than a single name after
/// `functions` is left to the expression parser, e.g. `functions * 2`.
pub fn cmd_functions(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        if !args.chars().all(|ch| ch.is_alphanumeric() || ch == '_' || ch == '$') {
            return CommandResult::NotACommand;
        }
        let canonical = args.to_lowercase();
        return match ctx.functions.get(&canonical) {
            Some(function) => CommandResult::Message(format!(
                "{}  {}\n  {}",
                function.signature.cyan(),
                format!("[{}]", function.category).dimmed(),
                function.description
            )),
            None => CommandResult::Error(format!("Unknown function '{}'", args)),
        };
    }

    let mut lines = Vec::new();
    let mut category = "";
    for function in ctx.functions.functions() {
        if function.category != category {
            category = function.category;
            lines.push(format!("{}", format!("{}:", category).green()));
        }
        lines.push(format!(
            "  {:<24} {}",
            function.signature.cyan(),
            function.description
        ));
    }
    CommandResult::Message(lines.join("\n"))
}

/// Handle `constants` command
pub fn cmd_constants(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    let lines: Vec<String> = ctx
        .functions
        .constants()
        .into_iter()
        .map(|constant| {
            format!(
                "  {:<4} = {:<20} {}",
                constant.name.cyan(),
                format_value(constant.value),
                constant.description
            )
        })
        .collect();
    CommandResult::Message(lines.join("\n"))
}

/// Handle `vars` command
pub fn cmd_vars(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.defines.is_empty() {
        return CommandResult::Message("No variables defined with -D".to_string());
    }
    let mut defines = ctx.defines.clone();
    defines.sort_by(|a, b| a.0.cmp(&b.0));
    let lines: Vec<String> = defines
        .iter()
        .map(|(name, value)| format!("  {} = {}", name.cyan(), format_value(*value)))
        .collect();
    CommandResult::Message(lines.join("\n"))
}

fn help_text() -> String {
    let lines = [
        format!("{}", "diffcalc Help".bold()),
        format!("{}", "=============".bold()),
        String::new(),
        format!("{}", "Expressions:".green()),
        format!("  {}        - Arithmetic with + - * / ^ and parentheses", "2 + 3 * 4".cyan()),
        format!("  {}          - Right-associative power (512)", "2^3^2".cyan()),
        format!("  {}   - Function calls; names are case-insensitive", "sin(pi / 2)".cyan()),
        format!("  {}        - Variables are prompted for, in name order", "a * x + b".cyan()),
        String::new(),
        format!("{}", "Differentiation:".green()),
        format!("  {}     - d/dx of x^2 at x = 3", "diff(x^2, x, 3)".cyan()),
        format!("  {} - Same, with an explicit step", "diff(x^2, x, 3, 0.01)".cyan()),
        String::new(),
        format!("{}", "Commands:".green()),
        format!("  {}   - List functions, or describe one", "functions [name]".cyan()),
        format!("  {}          - List constants", "constants".cyan()),
        format!("  {}               - Show variables bound with -D", "vars".cyan()),
        format!("  {}          - Leave the REPL", "quit, exit".cyan()),
        String::new(),
        "A line that is exactly a command name runs the command; otherwise it is".to_string(),
        "evaluated, so `vars + 1` uses a variable named vars.".to_string(),
    ];
    lines.join("\n")
}
