//! # diffcalc core
//!
//! Expression engine for the diffcalc calculator: a lexer, a recursive
//! descent parser, the expression tree, and an evaluator with a
//! central-difference `diff` operator. No terminal or I/O dependencies.
//!
//! ## Features
//!
//! - **serde**: derive `Serialize`/`Deserialize` for tokens, trees and errors
//!
//! ## Example
//!
//! ```
//! use diffcalc_core::parser::{collect_free_variables, evaluate, parse, Environment};
//!
//! let tree = parse("diff(x^2, x, 3) + y").unwrap();
//! let free: Vec<String> = collect_free_variables(&tree).into_iter().collect();
//! assert_eq!(free, vec!["y"]);
//!
//! let mut env = Environment::new();
//! env.define("y", 1.0);
//! let value = evaluate(&tree, &mut env).unwrap();
//! assert!((value - 7.0).abs() < 1e-3);
//! ```

pub mod parser;

// Re-export the entry points callers use most
pub use parser::{
    collect_free_variables, evaluate, evaluate_str, parse, CalcError, Environment, EvalError,
    Node, ParseError,
};
