//! One evaluation round: read an expression, ask for its variables, print the result

use crate::config::parse_number_input;
use crate::input::LineSource;
use crate::render;
use anyhow::{bail, Context, Result};
use colored::*;
use diffcalc_core::parser::Evaluator;
use diffcalc_core::{collect_free_variables, parse, Environment};
use std::io::Write;

pub const EXPRESSION_PROMPT: &str = "Enter an expression: ";
pub const RETRY_MESSAGE: &str = "Expected a number. Try again.";

/// Drives the prompt/evaluate/report cycle over a line source and an output
pub struct Session<S: LineSource, W: Write> {
    source: S,
    out: W,
    defines: Vec<(String, f64)>,
    verbose: bool,
    evaluator: Evaluator,
}

impl<S: LineSource, W: Write> Session<S, W> {
    pub fn new(source: S, out: W) -> Self {
        Session {
            source,
            out,
            defines: Vec::new(),
            verbose: false,
            evaluator: Evaluator::new(),
        }
    }

    /// Variables bound up front; these are never prompted for
    pub fn with_defines(mut self, defines: Vec<(String, f64)>) -> Self {
        self.defines = defines;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.source, self.out)
    }

    /// Single-shot mode. Returns whether a result was printed.
    pub fn run_once(&mut self, expression: Option<&str>) -> Result<bool> {
        let expression = match expression {
            Some(text) => text.trim().to_string(),
            None => {
                let prompt = EXPRESSION_PROMPT.cyan().to_string();
                match self.source.read_line(&prompt)? {
                    Some(line) => line.trim().to_string(),
                    None => String::new(),
                }
            }
        };

        if expression.is_empty() {
            writeln!(self.out, "{}", render::error_line("empty input."))?;
            return Ok(false);
        }

        self.run_expression(&expression)
    }

    /// Evaluate `expression` and print either its result or the error.
    /// Returns whether a result was printed.
    pub fn run_expression(&mut self, expression: &str) -> Result<bool> {
        match self.evaluate(expression) {
            Ok(value) => {
                writeln!(self.out, "{}", render::result_line(value))?;
                Ok(true)
            }
            Err(err) => {
                writeln!(self.out, "{}", render::report_error(&err, Some(expression)))?;
                Ok(false)
            }
        }
    }

    /// Parse, bind every free variable, then evaluate.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64> {
        let tree = parse(expression)?;
        let free = collect_free_variables(&tree);

        if self.verbose {
            eprintln!("{}", render::tree_diagnostics(&tree, &free));
        }

        // Fresh per expression; earlier rounds never leak in
        let mut env: Environment = self.defines.iter().cloned().collect();
        for name in &free {
            if env.is_defined(name) {
                continue;
            }
            let value = self.prompt_number(name)?;
            env.define(name.clone(), value);
        }

        Ok(self.evaluator.evaluate(&tree, &mut env)?)
    }

    /// Ask for `name` until a number is entered. Blank lines re-prompt silently.
    fn prompt_number(&mut self, name: &str) -> Result<f64> {
        let prompt = format!("Enter a value for {}: ", name).cyan().to_string();
        loop {
            let line = self
                .source
                .read_line(&prompt)
                .with_context(|| format!("failed to read a value for '{}'", name))?;

            let Some(line) = line else {
                bail!("input ended before a value for '{}' was entered", name);
            };

            match parse_number_input(&line) {
                None => continue,
                Some(Ok(value)) => return Ok(value),
                Some(Err(_)) => {
                    writeln!(self.out, "{}", RETRY_MESSAGE.yellow())?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedSource;
    use diffcalc_core::{EvalError, ParseError};

    fn session(lines: &[&str]) -> Session<ScriptedSource, Vec<u8>> {
        colored::control::set_override(false);
        Session::new(ScriptedSource::new(lines.iter().copied()), Vec::new())
    }

    fn output(session: Session<ScriptedSource, Vec<u8>>) -> (ScriptedSource, String) {
        let (source, out) = session.into_parts();
        (source, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_expression_without_variables() {
        let mut s = session(&["2+3*4"]);
        assert!(s.run_once(None).unwrap());
        let (source, out) = output(s);
        assert_eq!(out, "Result: 14.0\n");
        assert_eq!(source.prompts(), &[EXPRESSION_PROMPT]);
    }

    #[test]
    fn test_variables_prompted_in_order() {
        let mut s = session(&["y * x + b", "2", "3", "4"]);
        assert!(s.run_once(None).unwrap());
        let (source, out) = output(s);
        // b=2, x=3, y=4
        assert_eq!(out, "Result: 14.0\n");
        assert_eq!(
            source.prompts(),
            &[
                EXPRESSION_PROMPT,
                "Enter a value for b: ",
                "Enter a value for x: ",
                "Enter a value for y: ",
            ]
        );
    }

    #[test]
    fn test_invalid_value_retries() {
        let mut s = session(&["x / 2", "", "abc", " 2,5 "]);
        assert!(s.run_once(None).unwrap());
        let (source, out) = output(s);
        assert_eq!(out, format!("{}\nResult: 1.25\n", RETRY_MESSAGE));
        assert_eq!(source.prompts().len(), 4);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_empty_expression() {
        let mut s = session(&["   "]);
        assert!(!s.run_once(None).unwrap());
        let (_, out) = output(s);
        assert_eq!(out, "Error: empty input.\n");
    }

    #[test]
    fn test_end_of_input_on_expression() {
        let mut s = session(&[]);
        assert!(!s.run_once(None).unwrap());
        let (_, out) = output(s);
        assert_eq!(out, "Error: empty input.\n");
    }

    #[test]
    fn test_end_of_input_while_prompting() {
        let mut s = session(&["x + 1"]);
        assert!(!s.run_once(None).unwrap());
        let (_, out) = output(s);
        assert!(out.starts_with("Error: input ended before a value for 'x'"));
    }

    #[test]
    fn test_expression_argument_skips_prompt() {
        let mut s = session(&[]);
        assert!(s.run_once(Some(" diff(x^3, x, 1, 0.001) ")).unwrap());
        let (source, out) = output(s);
        assert!(source.prompts().is_empty());
        assert!(out.starts_with("Result: 3.00000"));
    }

    #[test]
    fn test_defines_are_not_prompted() {
        let mut s = session(&["5"]).with_defines(vec![("x".to_string(), 2.0)]);
        assert!(s.run_once(Some("x * y")).unwrap());
        let (source, out) = output(s);
        assert_eq!(out, "Result: 10.0\n");
        assert_eq!(source.prompts(), &["Enter a value for y: "]);
    }

    #[test]
    fn test_diff_variable_not_prompted() {
        let mut s = session(&["3"]);
        let value = s.evaluate("diff(a*x^2, x, 1)").unwrap();
        assert!((value - 6.0).abs() < 1e-3);
        let (source, _) = output(s);
        assert_eq!(source.prompts(), &["Enter a value for a: "]);
    }

    #[test]
    fn test_parse_error_reported_with_caret() {
        let mut s = session(&[]);
        assert!(!s.run_once(Some("2 + * 3")).unwrap());
        let (_, out) = output(s);
        assert_eq!(
            out,
            "Error: Unexpected token '*' at position 4\n  2 + * 3\n      ^\n"
        );
    }

    #[test]
    fn test_error_kinds_survive_anyhow() {
        let mut s = session(&[]);
        let err = s.evaluate("foo(1)").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ParseError>(),
            Some(ParseError::UnknownFunction { .. })
        ));

        let err = s.evaluate("1/0").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EvalError>(),
            Some(EvalError::DivisionByZero)
        ));
    }

    #[test]
    fn test_eval_error_reported() {
        let mut s = session(&[]);
        assert!(!s.run_once(Some("sqrt(-4)")).unwrap());
        let (_, out) = output(s);
        assert_eq!(out, "Error: sqrt: negative argument\n");
    }
}
