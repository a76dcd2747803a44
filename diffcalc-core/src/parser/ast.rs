use std::fmt;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Expression tree produced by the parser.
///
/// Every subtree is owned by its parent; nodes are never shared.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Numeric literal or folded constant: 2.5, pi
    Number(f64),

    /// Free variable, original casing kept: x, Rate
    Variable(String),

    /// Negation: -x
    UnaryMinus(Box<Node>),

    /// Arithmetic: a + b, a ^ b
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Function call: SIN(x), diff(x^2, x, 3)
    Call {
        /// Name as typed
        name: String,
        /// Lower-cased name used for dispatch
        canonical: String,
        args: Vec<Node>,
    },
}

impl Node {
    /// Helper constructor for variable nodes
    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    /// Helper constructor for negation
    pub fn negate(operand: Node) -> Self {
        Node::UnaryMinus(Box::new(operand))
    }

    /// Helper constructor for binary operations
    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Helper constructor for calls; the canonical name is derived from `name`
    pub fn call(name: impl Into<String>, args: Vec<Node>) -> Self {
        let name = name.into();
        let canonical = name.to_lowercase();
        Node::Call {
            name,
            canonical,
            args,
        }
    }

    pub fn as_variable(&self) -> Option<&str> {
        match self {
            Node::Variable(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Variable(name) => write!(f, "{}", name),
            Node::UnaryMinus(operand) => write!(f, "(-{})", operand),
            Node::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
            Node::Call { name, args, .. } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
