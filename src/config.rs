//! Command-line configuration

use clap::Parser;

/// diffcalc evaluates an arithmetic expression, asking for the value of every
/// free variable it contains. `diff(expr, var, point[, step])` computes a
/// numerical derivative.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "diffcalc", version, about, long_about = None)]
pub struct Config {
    /// Expression to evaluate. Prompted for when omitted.
    pub expression: Option<String>,

    /// Bind a variable up front instead of being prompted, e.g. `-D x=2,5`.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_definition)]
    pub defines: Vec<(String, f64)>,

    /// Keep reading expressions until `quit`. Cannot be combined with EXPRESSION.
    #[arg(short, long, conflicts_with = "expression")]
    pub repl: bool,

    /// Print the parsed tree and its free variables to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

/// Parse a user-typed number; `,` is accepted as the decimal separator.
/// Returns `None` for blank input.
pub fn parse_number_input(text: &str) -> Option<Result<f64, std::num::ParseFloatError>> {
    let normalized = text.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Some(normalized.parse::<f64>())
}

/// clap value parser for `NAME=VALUE`
pub fn parse_definition(text: &str) -> Result<(String, f64), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{}'", text));
    }

    match parse_number_input(value) {
        Some(Ok(number)) => Ok((name.to_string(), number)),
        Some(Err(_)) => Err(format!("'{}' is not a number", value.trim())),
        None => Err(format!("missing value for '{}'", name)),
    }
}
