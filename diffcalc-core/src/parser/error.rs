use std::fmt;

/// Errors raised while lexing or parsing an expression
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseError {
    /// A character that cannot start any token
    UnexpectedCharacter { ch: char, position: usize },
    /// Numeric text that does not convert to a float
    InvalidNumber { text: String, position: usize },
    /// Call syntax used with a name outside the function table
    UnknownFunction { name: String, position: usize },
    /// A specific token was required (`)` or end of input)
    Expected {
        expected: String,
        found: String,
        position: usize,
    },
    /// A token that cannot start an operand
    UnexpectedToken { token: String, position: usize },
    /// Nesting or operator chaining deeper than the parser accepts
    TooDeep { limit: usize, position: usize },
}

impl ParseError {
    /// Zero-based character offset the error points at
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::InvalidNumber { position, .. }
            | ParseError::UnknownFunction { position, .. }
            | ParseError::Expected { position, .. }
            | ParseError::UnexpectedToken { position, .. }
            | ParseError::TooDeep { position, .. } => *position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedCharacter { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            ParseError::InvalidNumber { text, position } => {
                write!(f, "Invalid number '{}' at position {}", text, position)
            }
            ParseError::UnknownFunction { name, .. } => write!(f, "Unknown function '{}'", name),
            ParseError::Expected {
                expected,
                found,
                position,
            } => write!(
                f,
                "Expected {}, found '{}' (position {})",
                expected, found, position
            ),
            ParseError::UnexpectedToken { token, position } => {
                write!(f, "Unexpected token '{}' at position {}", token, position)
            }
            ParseError::TooDeep { limit, position } => write!(
                f,
                "Expression nested deeper than {} levels at position {}",
                limit, position
            ),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while evaluating a parsed expression
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalError {
    /// Variable has no binding in the environment
    UndefinedVariable { name: String },
    /// Divisor magnitude fell below the division epsilon
    DivisionByZero,
    /// Argument outside the function's real domain
    Domain { function: String, details: String },
    /// Wrong number of arguments for a builtin
    ArgumentCount {
        function: String,
        expected: String,
        found: usize,
    },
    /// Second argument of `diff` is not a bare variable
    DerivativeVariable,
    /// Function name the evaluator cannot dispatch
    UnknownFunction { name: String },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UndefinedVariable { name } => {
                write!(f, "Variable '{}' is not defined", name)
            }
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::Domain { function, details } => write!(f, "{}: {}", function, details),
            EvalError::ArgumentCount {
                function,
                expected,
                found,
            } => write!(
                f,
                "Function '{}' expects {} argument(s), got {}",
                function, expected, found
            ),
            EvalError::DerivativeVariable => {
                write!(f, "The second argument of diff must be a variable name")
            }
            EvalError::UnknownFunction { name } => {
                write!(f, "Function '{}' is not implemented", name)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Either failure kind, for callers that parse and evaluate in one step
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Parse(e) => write!(f, "{}", e),
            CalcError::Eval(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcError::Parse(e) => Some(e),
            CalcError::Eval(e) => Some(e),
        }
    }
}

impl From<ParseError> for CalcError {
    fn from(e: ParseError) -> Self {
        CalcError::Parse(e)
    }
}

impl From<EvalError> for CalcError {
    fn from(e: EvalError) -> Self {
        CalcError::Eval(e)
    }
}
