//! Recursive descent matchers that resolve an arithmetic expression into a
//! parse tree whose operator chains are flat sibling lists.
//!
//! Each matcher takes the full source text plus the position its scope
//! begins at, and returns the arena index of the node it built together
//! with the position just past the consumed span. Matching never backtracks:
//! once a continuation operator has been consumed, a failure to match its
//! operand fails the whole chain.

use crate::ast::{Node, NodeArena, NodeKind, ParseTree};
use crate::lexical_matching::{
    no_rule_match_error, try_identifier_rule, try_number_rule, ParseError,
};

/// Tries to match a factor at source[pos]: a parenthesized sub-expression,
/// a number, or an identifier.
///
/// A parenthesized factor keeps three children, `[Op("("), Expr, Op(")")]`.
/// A literal factor copies the leaf's span and keeps no children at all; the
/// number or identifier leaf itself stays behind in the arena unreferenced.
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

        // The character immediately after the inner expression's span must
        // be the closing parenthesis.
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

    let leaf_matched_len = arena.node(leaf_idx).matched_len;
    let factor_idx = arena.alloc(Node {
        kind: NodeKind::Factor,
        scope_start: pos,
        matched_len: leaf_matched_len,
        child_idxs: Vec::new(),
    });

    return Ok((factor_idx, after_leaf));
}

/// Tries to match a term at source[pos]: one factor followed by any number
/// of `*`/`/` continuations. Every continuation appends an `Op` leaf and the
/// next factor as two more direct children of the same term node, so a chain
/// of factors evaluates left to right. A lone factor is still wrapped in a
/// single-child term.
fn try_term_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    let (first_factor_idx, first_after) = try_factor_rule(arena, source, pos)?;

    let mut child_idxs = vec![first_factor_idx];
    let mut resolved_up_to = first_after;

    while resolved_up_to < source.len() {
        let op_byte = source.as_bytes()[resolved_up_to];
        if op_byte != b'*' && op_byte != b'/' {
            break;
        }

        // An operator with no factor after it fails the whole term.
        let (next_factor_idx, next_after) = try_factor_rule(arena, source, resolved_up_to + 1)?;

        child_idxs.push(arena.alloc(Node::new_op(resolved_up_to)));
        child_idxs.push(next_factor_idx);
        resolved_up_to = next_after;
    }

    let term_idx = arena.alloc(Node {
        kind: NodeKind::Term,
        scope_start: pos,
        matched_len: resolved_up_to - pos,
        child_idxs: child_idxs,
    });

    return Ok((term_idx, resolved_up_to));
}

/// Tries to match an expression at source[pos]: one term followed by any
/// number of `+`/`-` continuations, appended flat exactly like the term
/// matcher one tier down.
fn try_expr_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    let (first_term_idx, first_after) = try_term_rule(arena, source, pos)?;

    let mut child_idxs = vec![first_term_idx];
    let mut resolved_up_to = first_after;

    while resolved_up_to < source.len() {
        let op_byte = source.as_bytes()[resolved_up_to];
        if op_byte != b'+' && op_byte != b'-' {
            break;
        }

        let (next_term_idx, next_after) = try_term_rule(arena, source, resolved_up_to + 1)?;

        child_idxs.push(arena.alloc(Node::new_op(resolved_up_to)));
        child_idxs.push(next_term_idx);
        resolved_up_to = next_after;
    }

    let expr_idx = arena.alloc(Node {
        kind: NodeKind::Expr,
        scope_start: pos,
        matched_len: resolved_up_to - pos,
        child_idxs: child_idxs,
    });

    return Ok((expr_idx, resolved_up_to));
}

/// Uses recursive descent to resolve one input line into a `ParseTree` with
/// flat, left-associative operator chains.
///
/// The entire input must be consumed: a match that stops before the end of
/// the line is a parse failure, not a partial success. Only this entry point
/// checks for exhaustion; the matchers themselves resolve prefixes, which
/// is what lets a parenthesized sub-expression stop at its `)`.
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
