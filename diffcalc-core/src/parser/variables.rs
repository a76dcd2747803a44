//! Free-variable collection
//!
//! Finds the names a caller must bind before evaluating a tree. Constants
//! are already folded into numbers by the parser, so they never show up.

use crate::parser::ast::Node;
use crate::parser::builtins::DIFF;
use std::collections::BTreeSet;

/// Collect the distinct free variables of `node`, sorted by name.
///
/// For `diff(expr, var, point[, step])` the bound `var` is dropped from the
/// variables of `expr` only; `point` and `step` are evaluated in the outer
/// environment and keep all of theirs.
pub fn collect_free_variables(node: &Node) -> BTreeSet<String> {
    let mut target = BTreeSet::new();
    collect_into(node, &mut target);
    target
}

fn collect_into(node: &Node, target: &mut BTreeSet<String>) {
    match node {
        Node::Number(_) => {}
        Node::Variable(name) => {
            target.insert(name.clone());
        }
        Node::UnaryMinus(operand) => collect_into(operand, target),
        Node::Binary { left, right, .. } => {
            collect_into(left, target);
            collect_into(right, target);
        }
        Node::Call {
            canonical, args, ..
        } if canonical == DIFF => collect_derivative(args, target),
        Node::Call { args, .. } => {
            for arg in args {
                collect_into(arg, target);
            }
        }
    }
}

fn collect_derivative(args: &[Node], target: &mut BTreeSet<String>) {
    if let Some(expr) = args.first() {
        let mut inner = collect_free_variables(expr);
        if let Some(bound) = args.get(1).and_then(Node::as_variable) {
            inner.remove(bound);
        }
        target.extend(inner);
    }

    // args[1] names the bound variable and is never evaluated
    for arg in args.iter().skip(2) {
        collect_into(arg, target);
    }
}
