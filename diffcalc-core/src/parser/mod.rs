// diffcalc-core/src/parser/mod.rs

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod variables;


pub use ast::{BinaryOp, Node};
pub use builtins::{get_registry, Arity, BuiltinFunction, FunctionRegistry};
pub use environment::{Environment, ScopedBinding};
pub use error::{CalcError, EvalError, ParseError};
pub use evaluator::{evaluate, evaluate_str, EvalConfig, Evaluator};
pub use lexer::{tokenize, Lexer, Span, Token, TokenKind};
pub use parser::{parse, parse_tokens, Parser, MAX_DEPTH};
pub use variables::collect_free_variables;
