//! Post-order evaluation of parse trees over wrapping signed 64-bit
//! integers.
//!
//! Each operator chain is folded left to right over its children's values,
//! so the result depends on the shape the matchers gave the tree: flat
//! chains evaluate left associatively, right-nested chains fold their
//! nested sub-chain first and associate `-` and `/` to the right.

use crate::ast::{NodeKind, ParseTree};

/// Faults the evaluator can signal. These mark either an arithmetic fault
/// or use of a tree that violates the evaluation contract (free
/// identifiers, unrecognized operator text, a node kind with no value).
#[derive(Debug, PartialEq, Eq)]
pub enum EvalError {
    /// The node has no value of its own.
    NotEvaluable { node_kind: NodeKind },

    /// An operator leaf held text outside `+ - * /`.
    UnknownOperator { operator_text: String },

    /// A leaf's resolved text did not parse as a signed 64-bit integer.
    MalformedLiteral { literal_text: String },

    DivisionByZero,
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvalError::NotEvaluable { node_kind } => {
                return write!(f, "Cannot evaluate a node of type {}.", node_kind);
            }
            EvalError::UnknownOperator { operator_text } => {
                return write!(f, "Unknown operator: {:?}.", operator_text);
            }
            EvalError::MalformedLiteral { literal_text } => {
                return write!(f, "Unable to parse literal {:?} as an integer.", literal_text);
            }
            EvalError::DivisionByZero => {
                return write!(f, "Division by zero.");
            }
        };
    }
}

// Applies one operator to two already-evaluated operands. Arithmetic wraps
// two's-complement on overflow, so `i64::MIN / -1` yields `i64::MIN`;
// division truncates toward zero and must be guarded against a zero divisor.
fn apply_operator(
    operator_text: &str,
    left_value: i64,
    right_value: i64,
) -> Result<i64, EvalError> {
    match operator_text {
        "+" => {
            return Ok(left_value.wrapping_add(right_value));
        }
        "-" => {
            return Ok(left_value.wrapping_sub(right_value));
        }
        "*" => {
            return Ok(left_value.wrapping_mul(right_value));
        }
        "/" => {
            if right_value == 0 {
                return Err(EvalError::DivisionByZero);
            }
            return Ok(left_value.wrapping_div(right_value));
        }
        _ => {
            return Err(EvalError::UnknownOperator {
                operator_text: String::from(operator_text),
            });
        }
    };
}

fn parse_leaf_value(literal_text: &str) -> Result<i64, EvalError> {
    match literal_text.parse::<i64>() {
        Ok(value) => {
            return Ok(value);
        }
        Err(_) => {
            return Err(EvalError::MalformedLiteral {
                literal_text: String::from(literal_text),
            });
        }
    };
}

// Evaluates one node. Expr and term nodes fold their first child's value
// through the `(operator, operand)` pairs that follow it; a parenthesized
// factor takes the value of its middle child; a childless factor parses its
// own resolved text.
fn eval_node(tree: &ParseTree, node_idx: usize, verbose: bool) -> Result<i64, EvalError> {
    let node = tree.nodes.node(node_idx);

    let value = match node.kind {
        NodeKind::Num => parse_leaf_value(tree.resolved_text(node_idx))?,
        NodeKind::Op | NodeKind::Id => {
            return Err(EvalError::NotEvaluable {
                node_kind: node.kind,
            });
        }
        NodeKind::Factor => {
            if node.child_idxs.len() == 3 {
                // [Op("("), Expr, Op(")")], only the middle child carries a
                // value.
                eval_node(tree, node.child_idxs[1], verbose)?
            } else if node.child_idxs.is_empty() {
                parse_leaf_value(tree.resolved_text(node_idx))?
            } else {
                return Err(EvalError::NotEvaluable {
                    node_kind: node.kind,
                });
            }
        }
        NodeKind::Expr | NodeKind::Term => {
            if node.child_idxs.is_empty() {
                return Err(EvalError::NotEvaluable {
                    node_kind: node.kind,
                });
            }

            let mut folded_value = eval_node(tree, node.child_idxs[0], verbose)?;

            // Children alternate operand, op, operand, ... so operators sit
            // at odd offsets.
            let mut pair_idx = 1;
            while pair_idx + 1 < node.child_idxs.len() {
                let operator_text = tree.resolved_text(node.child_idxs[pair_idx]);
                let operand_value = eval_node(tree, node.child_idxs[pair_idx + 1], verbose)?;

                folded_value = apply_operator(operator_text, folded_value, operand_value)?;
                pair_idx += 2;
            }

            folded_value
        }
    };

    if verbose {
        println!(
            "Resolved {} of {:?} to {}.",
            node.kind,
            tree.resolved_text(node_idx),
            value
        );
    }

    return Ok(value);
}

/// Evaluates a parse tree to a signed integer. With `verbose` set, prints
/// one resolution line per evaluated node, innermost first.
pub fn eval_parse_tree(tree: &ParseTree, verbose: bool) -> Result<i64, EvalError> {
    return eval_node(tree, tree.root_idx, verbose);
}
