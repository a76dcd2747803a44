//! REPL (Read-Eval-Print Loop) for diffcalc

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::config::Config;
use crate::input::{EditorSource, LineSource};
use crate::render;
use crate::session::Session;
use anyhow::Result;
use colored::*;
use std::io::{self, Stdout, Write};

/// Interactive REPL. Each expression gets a fresh environment.
pub struct Repl<S: LineSource, W: Write> {
    session: Session<S, W>,
    commands: CommandRegistry,
    ctx: CommandContext,
}

impl Repl<EditorSource, Stdout> {
    /// REPL on the terminal, configured from the command line
    pub fn new(config: &Config) -> Result<Self> {
        let source = EditorSource::new()
            .map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
        let session = Session::new(source, io::stdout())
            .with_defines(config.defines.clone())
            .verbose(config.verbose);
        Ok(Repl::with_session(session, config.defines.clone()))
    }
}

impl<S: LineSource, W: Write> Repl<S, W> {
    pub fn with_session(session: Session<S, W>, defines: Vec<(String, f64)>) -> Self {
        Repl {
            session,
            commands: create_registry(),
            ctx: CommandContext::new(defines),
        }
    }

    pub fn into_session(self) -> Session<S, W> {
        self.session
    }

    /// Start the REPL loop
    pub fn run(&mut self) -> Result<()> {
        self.banner()?;

        let prompt = format!("{} ", "diffcalc>".bright_magenta().bold());
        loop {
            let Some(line) = self.session.source_mut().read_line(&prompt)? else {
                writeln!(self.session.out_mut(), "{}", "Goodbye!".bright_cyan())?;
                break;
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.session.source_mut().add_history(line);

            match self.commands.execute(line, &mut self.ctx) {
                CommandResult::Message(message) => {
                    writeln!(self.session.out_mut(), "{}", message)?;
                }
                CommandResult::Exit => {
                    writeln!(self.session.out_mut(), "{}", "Goodbye!".bright_cyan())?;
                    break;
                }
                CommandResult::Error(message) => {
                    writeln!(self.session.out_mut(), "{}", render::error_line(&message))?;
                }
                CommandResult::NotACommand => {
                    self.session.run_expression(line)?;
                }
            }
        }

        Ok(())
    }

    fn banner(&mut self) -> Result<()> {
        let out = self.session.out_mut();
        writeln!(out, "{}", "diffcalc".bright_cyan().bold())?;
        writeln!(
            out,
            "Type expressions like: {}, {}, {}",
            "2 + 3 * 4".cyan(),
            "sin(x) / x".cyan(),
            "diff(x^2, x, 3)".cyan()
        )?;
        writeln!(
            out,
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+D".bright_red()
        )?;
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(config: &Config) -> Result<()> {
    let mut repl = Repl::new(config)?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedSource;

    fn run(lines: &[&str], defines: Vec<(String, f64)>) -> (ScriptedSource, String) {
        colored::control::set_override(false);
        let source = ScriptedSource::new(lines.iter().copied());
        let session = Session::new(source, Vec::new()).with_defines(defines.clone());
        let mut repl = Repl::with_session(session, defines);
        repl.run().unwrap();
        let (source, out) = repl.into_session().into_parts();
        (source, String::from_utf8(out).unwrap())
    }

    fn body(out: &str) -> Vec<&str> {
        // Skip the three banner lines and the blank line after them
        out.lines().skip(4).collect()
    }

    #[test]
    fn test_evaluates_until_quit() {
        let (source, out) = run(&["1 + 1", "", "2^10", "quit", "3"], Vec::new());
        assert_eq!(body(&out), vec!["Result: 2.0", "Result: 1024.0", "Goodbye!"]);
        assert_eq!(source.remaining(), 1);
    }

    #[test]
    fn test_end_of_input_exits() {
        let (_, out) = run(&["5 * 5"], Vec::new());
        assert_eq!(body(&out), vec!["Result: 25.0", "Goodbye!"]);
    }

    #[test]
    fn test_fresh_environment_per_expression() {
        let (source, out) = run(&["x + 1", "2", "x * 10", "3", "exit"], Vec::new());
        assert_eq!(
            body(&out),
            vec!["Result: 3.0", "Result: 30.0", "Goodbye!"]
        );
        let value_prompts = source
            .prompts()
            .iter()
            .filter(|p| p.as_str() == "Enter a value for x: ")
            .count();
        assert_eq!(value_prompts, 2);
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (_, out) = run(&["1/0", "foo(2)", "7"], Vec::new());
        assert_eq!(
            body(&out),
            vec![
                "Error: Division by zero",
                "Error: Unknown function 'foo'",
                "  foo(2)",
                "  ^",
                "Result: 7.0",
                "Goodbye!",
            ]
        );
    }

    #[test]
    fn test_commands_and_defines() {
        let defines = vec![("k".to_string(), 4.0)];
        let (_, out) = run(&["vars", "functions nope", "k / 2"], defines);
        assert_eq!(
            body(&out),
            vec![
                "  k = 4.0",
                "Error: Unknown function 'nope'",
                "Result: 2.0",
                "Goodbye!",
            ]
        );
    }

    #[test]
    fn test_command_names_as_variables() {
        let (source, out) = run(&["vars + 1", "2", "vars"], Vec::new());
        assert_eq!(
            body(&out),
            vec!["Result: 3.0", "No variables defined with -D", "Goodbye!"]
        );
        assert!(source.prompts().iter().any(|p| p == "Enter a value for vars: "));
    }
}
