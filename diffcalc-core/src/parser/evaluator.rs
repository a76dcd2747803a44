use crate::parser::{
    ast::{BinaryOp, Node},
    builtins::{get_registry, FunctionKind},
    environment::Environment,
    error::{CalcError, EvalError},
    parser::parse,
};

/// Smallest divisor magnitude accepted by `/`
pub const DIVISION_EPSILON: f64 = 1e-12;
/// Base step for central differences
pub const DEFAULT_STEP: f64 = 1e-5;

/// Numeric thresholds used during evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalConfig {
    pub division_epsilon: f64,
    pub default_step: f64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            division_epsilon: DIVISION_EPSILON,
            default_step: DEFAULT_STEP,
        }
    }
}

/// Evaluates expression trees against an environment
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
}

impl Evaluator {
    /// Create a new evaluator with the default thresholds
    pub fn new() -> Self {
        Evaluator {
            config: EvalConfig::default(),
        }
    }

    pub fn with_config(config: EvalConfig) -> Self {
        Evaluator { config }
    }

    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluate `node`.
    ///
    /// The environment is only written by `diff`, and every such write is
    /// undone before this returns.
    pub fn evaluate(&self, node: &Node, env: &mut Environment) -> Result<f64, EvalError> {
        match node {
            Node::Number(value) => Ok(*value),
            Node::Variable(name) => env.get(name),
            Node::UnaryMinus(operand) => Ok(-self.evaluate(operand, env)?),
            Node::Binary { op, left, right } => {
                // Both sides always run, left first
                let lhs = self.evaluate(left, env)?;
                let rhs = self.evaluate(right, env)?;
                self.apply_binary(*op, lhs, rhs)
            }
            Node::Call {
                name,
                canonical,
                args,
            } => self.eval_call(name, canonical, args, env),
        }
    }

    fn apply_binary(&self, op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64, EvalError> {
        match op {
            BinaryOp::Add => Ok(lhs + rhs),
            BinaryOp::Sub => Ok(lhs - rhs),
            BinaryOp::Mul => Ok(lhs * rhs),
            BinaryOp::Div => {
                if rhs.abs() < self.config.division_epsilon {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
            // NaN for a negative base with a fractional exponent is passed through
            BinaryOp::Pow => Ok(lhs.powf(rhs)),
        }
    }

    fn eval_call(
        &self,
        name: &str,
        canonical: &str,
        args: &[Node],
        env: &mut Environment,
    ) -> Result<f64, EvalError> {
        let function = get_registry()
            .get(canonical)
            .ok_or_else(|| EvalError::UnknownFunction {
                name: name.to_string(),
            })?;

        match function.kind {
            FunctionKind::Derivative => {
                function.check_arity(name, args.len())?;
                self.eval_derivative(args, env)
            }
            FunctionKind::Numeric(handler) => {
                let values = args
                    .iter()
                    .map(|arg| self.evaluate(arg, env))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                function.check_arity(name, values.len())?;
                handler(&values)
            }
        }
    }

    /// `diff(expr, var, point[, step])` by central difference:
    /// `(f(point + h) - f(point - h)) / 2h`
    fn eval_derivative(&self, args: &[Node], env: &mut Environment) -> Result<f64, EvalError> {
        let variable = args[1]
            .as_variable()
            .ok_or(EvalError::DerivativeVariable)?;

        let point = self.evaluate(&args[2], env)?;
        let step = match args.get(3) {
            Some(step) => {
                let h = self.evaluate(step, env)?.abs();
                if h == 0.0 {
                    self.config.default_step
                } else {
                    h
                }
            }
            None => self.config.default_step * point.abs().max(1.0),
        };

        let expr = &args[0];
        let mut scope = env.rebind(variable);

        scope.set(point + step);
        let f_plus = self.evaluate(expr, &mut scope)?;

        scope.set(point - step);
        let f_minus = self.evaluate(expr, &mut scope)?;

        drop(scope);
        Ok((f_plus - f_minus) / (2.0 * step))
    }
}

/// Evaluate a tree with the default evaluator
pub fn evaluate(node: &Node, env: &mut Environment) -> Result<f64, EvalError> {
    Evaluator::new().evaluate(node, env)
}

/// Parse and evaluate in one step
pub fn evaluate_str(input: &str, env: &mut Environment) -> Result<f64, CalcError> {
    let node = parse(input)?;
    Ok(evaluate(&node, env)?)
}
