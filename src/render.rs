//! Console rendering of results, errors and diagnostics

use colored::*;
use diffcalc_core::parser::{CalcError, ParseError};
use diffcalc_core::Node;
use std::collections::BTreeSet;

/// Format a value the way results are shown: always with a fractional part
/// or an exponent, so `14` prints as `14.0`.
pub fn format_value(value: f64) -> String {
    format!("{:?}", value)
}

pub fn result_line(value: f64) -> String {
    format!("Result: {}", format_value(value))
        .bright_green()
        .to_string()
}

pub fn error_line(message: &str) -> String {
    format!("{} {}", "Error:".bright_red().bold(), message.red())
}

/// Error line for `err`, followed by the expression with a caret under the
/// offending character when the error came from the lexer or parser.
pub fn report_error(err: &anyhow::Error, expression: Option<&str>) -> String {
    let mut out = error_line(&err.to_string());

    let position = parse_error(err).map(ParseError::position);
    if let (Some(position), Some(expression)) = (position, expression) {
        out.push('\n');
        out.push_str(&caret_lines(expression, position));
    }
    out
}

fn parse_error(err: &anyhow::Error) -> Option<&ParseError> {
    if let Some(parse) = err.downcast_ref::<ParseError>() {
        return Some(parse);
    }
    match err.downcast_ref::<CalcError>() {
        Some(CalcError::Parse(parse)) => Some(parse),
        _ => None,
    }
}

/// Two indented lines: the expression and a caret at char offset `position`.
/// A position past the end points just after the last character.
pub fn caret_lines(expression: &str, position: usize) -> String {
    let column = position.min(expression.chars().count());
    format!(
        "  {}\n  {}{}",
        expression,
        " ".repeat(column),
        "^".bright_red().bold()
    )
}

/// `--verbose` output: the parsed tree and its free variables
pub fn tree_diagnostics(tree: &Node, free: &BTreeSet<String>) -> String {
    let names: Vec<&str> = free.iter().map(String::as_str).collect();
    let free = if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    };
    format!("tree: {}\nfree variables: {}", tree, free)
        .dimmed()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcalc_core::{collect_free_variables, parse, EvalError};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(14.0), "14.0");
        assert_eq!(format_value(0.5), "0.5");
        assert_eq!(format_value(-3.25), "-3.25");
        assert_eq!(format_value(f64::NAN), "NaN");
    }

    #[test]
    fn test_result_and_error_lines() {
        plain();
        assert_eq!(result_line(512.0), "Result: 512.0");
        assert_eq!(error_line("empty input."), "Error: empty input.");
    }

    #[test]
    fn test_report_parse_error_with_caret() {
        plain();
        let err = anyhow::Error::from(parse("3 $ 4").unwrap_err());
        let report = report_error(&err, Some("3 $ 4"));
        assert_eq!(
            report,
            "Error: Unexpected character '$' at position 2\n  3 $ 4\n    ^"
        );
    }

    #[test]
    fn test_report_wrapped_parse_error() {
        plain();
        let err = anyhow::Error::from(CalcError::from(parse("(1 + 2").unwrap_err()));
        let report = report_error(&err, Some("(1 + 2"));
        assert!(report.ends_with("  (1 + 2\n        ^"));
    }

    #[test]
    fn test_report_eval_error_has_no_caret() {
        plain();
        let err = anyhow::Error::from(EvalError::DivisionByZero);
        assert_eq!(report_error(&err, Some("1/0")), "Error: Division by zero");
    }

    #[test]
    fn test_caret_clamps_to_end() {
        plain();
        assert_eq!(caret_lines("ab", 10), "  ab\n    ^");
    }

    #[test]
    fn test_tree_diagnostics() {
        plain();
        let tree = parse("x + y").unwrap();
        let free = collect_free_variables(&tree);
        assert_eq!(
            tree_diagnostics(&tree, &free),
            "tree: (x + y)\nfree variables: x, y"
        );

        let constant = parse("2").unwrap();
        let none = collect_free_variables(&constant);
        assert!(tree_diagnostics(&constant, &none).ends_with("(none)"));
    }
}
