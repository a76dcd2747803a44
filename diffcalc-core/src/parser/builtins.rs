//! Builtin constants and functions
//!
//! Process-wide lookup tables, built once on first use and never mutated.
//! Keys are canonical (lower-case) names.

use crate::parser::error::EvalError;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Name of the numerical differentiation operator
pub const DIFF: &str = "diff";

/// Handler for functions that only need their evaluated arguments.
/// Arity is checked before the handler runs.
pub type BuiltinHandler = fn(&[f64]) -> Result<f64, EvalError>;

static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

pub fn get_registry() -> &'static FunctionRegistry {
    REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Allowed argument counts for a builtin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    OneOf(&'static [usize]),
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Arity::Exact(m) => n == *m,
            Arity::OneOf(counts) => counts.contains(&n),
        }
    }

    /// Human readable form: "1", "3 or 4"
    pub fn describe(&self) -> String {
        match self {
            Arity::Exact(m) => m.to_string(),
            Arity::OneOf(counts) => counts
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

/// How the evaluator runs a builtin
#[derive(Clone, Copy)]
pub enum FunctionKind {
    /// Arguments are evaluated first, then passed to the handler
    Numeric(BuiltinHandler),
    /// Central-difference derivative; needs the unevaluated argument nodes
    Derivative,
}

pub struct BuiltinFunction {
    pub name: &'static str,
    pub category: &'static str,
    pub signature: &'static str,
    pub description: &'static str,
    pub arity: Arity,
    pub kind: FunctionKind,
}

impl BuiltinFunction {
    pub fn check_arity(&self, display_name: &str, found: usize) -> Result<(), EvalError> {
        if self.arity.accepts(found) {
            Ok(())
        } else {
            Err(EvalError::ArgumentCount {
                function: display_name.to_string(),
                expected: self.arity.describe(),
                found,
            })
        }
    }
}

pub struct Constant {
    pub name: &'static str,
    pub value: f64,
    pub description: &'static str,
}

pub struct FunctionRegistry {
    functions: HashMap<&'static str, BuiltinFunction>,
    constants: HashMap<&'static str, Constant>,
}

impl FunctionRegistry {
    fn new() -> Self {
        let mut registry = FunctionRegistry {
            functions: HashMap::new(),
            constants: HashMap::new(),
        };
        registry.register_constants();
        registry.register_all();
        registry
    }

    fn constant(&mut self, name: &'static str, value: f64, description: &'static str) {
        self.constants.insert(
            name,
            Constant {
                name,
                value,
                description,
            },
        );
    }

    fn register(
        &mut self,
        name: &'static str,
        category: &'static str,
        signature: &'static str,
        description: &'static str,
        arity: Arity,
        kind: FunctionKind,
    ) {
        self.functions.insert(
            name,
            BuiltinFunction {
                name,
                category,
                signature,
                description,
                arity,
                kind,
            },
        );
    }

    fn register_constants(&mut self) {
        self.constant(
            "pi",
            std::f64::consts::PI,
            "Ratio of a circle's circumference to its diameter",
        );
        self.constant("e", std::f64::consts::E, "Base of the natural logarithm");
    }

    fn register_all(&mut self) {
        use FunctionKind::{Derivative, Numeric};

        self.register(
            "sin",
            "Trigonometry",
            "sin(x)",
            "Sine of x (radians)",
            Arity::Exact(1),
            Numeric(sin),
        );
        self.register(
            "cos",
            "Trigonometry",
            "cos(x)",
            "Cosine of x (radians)",
            Arity::Exact(1),
            Numeric(cos),
        );
        self.register(
            "tan",
            "Trigonometry",
            "tan(x)",
            "Tangent of x (radians)",
            Arity::Exact(1),
            Numeric(tan),
        );

        self.register(
            "ln",
            "Exponential",
            "ln(x)",
            "Natural logarithm",
            Arity::Exact(1),
            Numeric(ln),
        );
        self.register(
            "log10",
            "Exponential",
            "log10(x)",
            "Base-10 logarithm",
            Arity::Exact(1),
            Numeric(log10),
        );
        self.register(
            "exp",
            "Exponential",
            "exp(x)",
            "e raised to x",
            Arity::Exact(1),
            Numeric(exp),
        );
        self.register(
            "pow",
            "Exponential",
            "pow(base, exponent)",
            "base raised to exponent",
            Arity::Exact(2),
            Numeric(pow),
        );

        self.register(
            "sqrt",
            "Arithmetic",
            "sqrt(x)",
            "Square root; x must not be negative",
            Arity::Exact(1),
            Numeric(sqrt),
        );
        self.register(
            "abs",
            "Arithmetic",
            "abs(x)",
            "Absolute value",
            Arity::Exact(1),
            Numeric(abs),
        );

        self.register(
            DIFF,
            "Calculus",
            "diff(expr, var, point[, step])",
            "Central-difference derivative of expr with respect to var at point",
            Arity::OneOf(&[3, 4]),
            Derivative,
        );
    }

    pub fn get(&self, canonical: &str) -> Option<&BuiltinFunction> {
        self.functions.get(canonical)
    }

    pub fn is_function(&self, canonical: &str) -> bool {
        self.functions.contains_key(canonical)
    }

    pub fn constant_value(&self, canonical: &str) -> Option<f64> {
        self.constants.get(canonical).map(|c| c.value)
    }

    /// All functions, sorted by category then name
    pub fn functions(&self) -> Vec<&BuiltinFunction> {
        let mut functions: Vec<_> = self.functions.values().collect();
        functions.sort_by(|a, b| a.category.cmp(b.category).then(a.name.cmp(b.name)));
        functions
    }

    /// All constants, sorted by name
    pub fn constants(&self) -> Vec<&Constant> {
        let mut constants: Vec<_> = self.constants.values().collect();
        constants.sort_by(|a, b| a.name.cmp(b.name));
        constants
    }
}

fn sin(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].sin())
}

fn cos(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].cos())
}

fn tan(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].tan())
}

fn ln(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].ln())
}

fn log10(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].log10())
}

fn exp(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].exp())
}

fn pow(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].powf(args[1]))
}

fn sqrt(args: &[f64]) -> Result<f64, EvalError> {
    if args[0] < 0.0 {
        return Err(EvalError::Domain {
            function: "sqrt".to_string(),
            details: "negative argument".to_string(),
        });
    }
    Ok(args[0].sqrt())
}

fn abs(args: &[f64]) -> Result<f64, EvalError> {
    Ok(args[0].abs())
}
