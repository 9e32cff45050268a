//! Recursive descent matchers that resolve an arithmetic expression into a
//! parse tree whose operator chains are right-nested binary nodes.
//!
//! Each matcher takes the full source text plus the position its scope
//! begins at, and returns the arena index of the node it built together
//! with the position just past the consumed span. A tier that consumes a
//! continuation operator commits to it: if the rest of the chain fails to
//! match, the whole tier fails rather than settling for the shorter match.

use crate::ast::{Node, NodeArena, NodeKind, ParseTree};
use crate::lexical_matching::{
    no_rule_match_error, try_identifier_rule, try_number_rule, ParseError,
};

/// Tries to match a factor at source[pos]: a parenthesized sub-expression,
/// a number, or an identifier.
fn try_factor_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    if pos >= source.len() {
        return Err(ParseError::UnexpectedEndOfInput {
            expected_rule: "factor",
        });
    }

    if source.as_bytes()[pos] == b'(' {
        let (expr_idx, after_expr) = try_expr_rule(arena, source, pos + 1)?;

        if after_expr >= source.len() || source.as_bytes()[after_expr] != b')' {
            return Err(no_rule_match_error(source, after_expr, "')'"));
        }

        let open_idx = arena.alloc(Node::new_op(pos));
        let close_idx = arena.alloc(Node::new_op(after_expr));
        let factor_idx = arena.alloc(Node {
            kind: NodeKind::Factor,
            scope_start: pos,
            matched_len: after_expr + 1 - pos,
            child_idxs: vec![open_idx, expr_idx, close_idx],
        });

        return Ok((factor_idx, after_expr + 1));
    }

    let (leaf_idx, after_leaf) =
        try_number_rule(arena, source, pos).or_else(|_| try_identifier_rule(arena, source, pos))?;

    let factor_idx = arena.alloc(Node {
        kind: NodeKind::Factor,
        scope_start: pos,
        matched_len: after_leaf - pos,
        child_idxs: Vec::new(),
    });

    return Ok((factor_idx, after_leaf));
}

/// Tries to match a term at source[pos]: one factor, optionally followed by
/// `*` or `/` and the rest of the chain matched as one nested term. A
/// continuation produces the three children `[Factor, Op, Term]`; without
/// one the factor is wrapped alone.
fn try_term_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    let (factor_idx, after_factor) = try_factor_rule(arena, source, pos)?;

    if after_factor < source.len() {
        let op_byte = source.as_bytes()[after_factor];
        if op_byte == b'*' || op_byte == b'/' {
            // The rest of the chain becomes a single nested term, so the
            // chain groups to the right.
            let (nested_term_idx, after_nested) = try_term_rule(arena, source, after_factor + 1)?;

            let op_idx = arena.alloc(Node::new_op(after_factor));
            let term_idx = arena.alloc(Node {
                kind: NodeKind::Term,
                scope_start: pos,
                matched_len: after_nested - pos,
                child_idxs: vec![factor_idx, op_idx, nested_term_idx],
            });

            return Ok((term_idx, after_nested));
        }
    }

    let term_idx = arena.alloc(Node {
        kind: NodeKind::Term,
        scope_start: pos,
        matched_len: after_factor - pos,
        child_idxs: vec![factor_idx],
    });

    return Ok((term_idx, after_factor));
}

/// Tries to match an expression at source[pos]: one term, optionally
/// followed by `+` or `-` and the rest of the chain matched as one nested
/// expression.
fn try_expr_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    let (term_idx, after_term) = try_term_rule(arena, source, pos)?;

    if after_term < source.len() {
        let op_byte = source.as_bytes()[after_term];
        if op_byte == b'+' || op_byte == b'-' {
            let (nested_expr_idx, after_nested) = try_expr_rule(arena, source, after_term + 1)?;

            let op_idx = arena.alloc(Node::new_op(after_term));
            let expr_idx = arena.alloc(Node {
                kind: NodeKind::Expr,
                scope_start: pos,
                matched_len: after_nested - pos,
                child_idxs: vec![term_idx, op_idx, nested_expr_idx],
            });

            return Ok((expr_idx, after_nested));
        }
    }

    let expr_idx = arena.alloc(Node {
        kind: NodeKind::Expr,
        scope_start: pos,
        matched_len: after_term - pos,
        child_idxs: vec![term_idx],
    });

    return Ok((expr_idx, after_term));
}

/// Uses recursive descent to resolve one input line into a `ParseTree` with
/// right-nested operator chains.
///
/// The entire input must be consumed, and only this entry point checks for
/// exhaustion. The matchers themselves resolve prefixes so a parenthesized
/// sub-expression can stop at its `)`.
pub fn parse_recursive_descent(input: &str) -> Result<ParseTree, ParseError> {
    let mut arena = NodeArena::new();

    let (root_idx, resolved_len) = try_expr_rule(&mut arena, input, 0)?;

    if resolved_len != input.len() {
        return Err(ParseError::TrailingInput {
            resolved_len: resolved_len,
        });
    }

    return Ok(ParseTree {
        source: String::from(input),
        nodes: arena,
        root_idx: root_idx,
    });
}
