//! Lexical matchers shared by both parser implementations. Lexing is fused
//! with matching: each rule consumes a maximal run from the front of the
//! remaining input, never skips leading characters, and allocates its leaf
//! node straight into the parse arena.

use lazy_static::lazy_static;
use regex::Regex;

use crate::ast::{Node, NodeArena, NodeKind};

/// Represents a matching error. Any matcher failing to resolve its prefix is
/// an expected, recoverable outcome that propagates upward and fails the
/// enclosing match; there is no partial-result salvage.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseError {
    UnexpectedCharacter {
        expected_rule: &'static str,
        found_character: char,
        position: usize,
    },
    UnexpectedEndOfInput {
        expected_rule: &'static str,
    },
    TrailingInput {
        resolved_len: usize,
    },
}

/// Display trait implementation for ParseError.
impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter {
                expected_rule,
                found_character,
                position,
            } => {
                return write!(
                    f,
                    "Unexpected character at position {} of the input. Expected: {}, found: {:?}.",
                    position, expected_rule, found_character
                );
            }

            Self::UnexpectedEndOfInput { expected_rule } => {
                return write!(f, "Unexpected end of input. Expected: {}.", expected_rule);
            }

            Self::TrailingInput { resolved_len } => {
                return write!(
                    f,
                    "Only the first {} characters of the input form a valid expression; trailing input remains.",
                    resolved_len
                );
            }
        }
    }
}

// Anchored patterns for the two leaf rules of the grammar. Anchoring keeps
// the rules honest about the fused-lexing contract: a match starts at the
// front of the remaining input or there is no match at all.
lazy_static! {
    static ref number_rule: Regex =
        Regex::new(r"^[0-9]+").expect("Unable to compile number rule regex.");
    static ref identifier_rule: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*").expect("Unable to compile identifier rule regex.");
}

/// Builds the error for a rule that found nothing to match at source[pos].
pub fn no_rule_match_error(source: &str, pos: usize, expected_rule: &'static str) -> ParseError {
    match source[pos..].chars().next() {
        Some(found_character) => {
            return ParseError::UnexpectedCharacter {
                expected_rule: expected_rule,
                found_character: found_character,
                position: pos,
            };
        }
        None => {
            return ParseError::UnexpectedEndOfInput {
                expected_rule: expected_rule,
            };
        }
    };
}

/// Tries to match a number at source[pos]: a maximal run of ASCII digits.
/// Zero digits is a failure, not an empty match. On success, allocates a
/// `Num` leaf and returns its arena index together with the position just
/// past the run.
pub fn try_number_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    match number_rule.find(&source[pos..]) {
        Some(match_obj) => {
            let num_idx = arena.alloc(Node {
                kind: NodeKind::Num,
                scope_start: pos,
                matched_len: match_obj.end(),
                child_idxs: Vec::new(),
            });
            return Ok((num_idx, pos + match_obj.end()));
        }
        None => {
            return Err(no_rule_match_error(source, pos, "number"));
        }
    };
}

/// Tries to match an identifier at source[pos]: an ASCII letter followed by
/// a maximal run of letters and digits. A non-letter at the front is a
/// failure. On success, allocates an `Id` leaf and returns its arena index
/// together with the position just past the run.
pub fn try_identifier_rule(
    arena: &mut NodeArena,
    source: &str,
    pos: usize,
) -> Result<(usize, usize), ParseError> {
    match identifier_rule.find(&source[pos..]) {
        Some(match_obj) => {
            let id_idx = arena.alloc(Node {
                kind: NodeKind::Id,
                scope_start: pos,
                matched_len: match_obj.end(),
                child_idxs: Vec::new(),
            });
            return Ok((id_idx, pos + match_obj.end()));
        }
        None => {
            return Err(no_rule_match_error(source, pos, "identifier"));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test if the number rule consumes a maximal digit run and stops at the
    // first non-digit.
    #[test]
    fn test_number_rule_matches_maximal_digit_run() {
        let mut arena = NodeArena::new();

        let (num_idx, new_pos) =
            try_number_rule(&mut arena, "123abc", 0).expect("number rule failed on digit prefix");

        assert_eq!(new_pos, 3);
        assert_eq!(arena.node(num_idx).kind, NodeKind::Num);
        assert_eq!(arena.node(num_idx).scope_start, 0);
        assert_eq!(arena.node(num_idx).matched_len, 3);
    }

    // Test if the number rule works at a nonzero offset into the source.
    #[test]
    fn test_number_rule_at_offset() {
        let mut arena = NodeArena::new();

        let (num_idx, new_pos) =
            try_number_rule(&mut arena, "a+456", 2).expect("number rule failed at offset 2");

        assert_eq!(new_pos, 5);
        assert_eq!(arena.node(num_idx).scope_start, 2);
        assert_eq!(arena.node(num_idx).matched_len, 3);
    }

    // Test if the number rule fails on a non-digit front and on exhausted
    // input, without allocating anything.
    #[test]
    fn test_number_rule_failures() {
        let mut arena = NodeArena::new();

        assert_eq!(
            try_number_rule(&mut arena, "x1", 0),
            Err(ParseError::UnexpectedCharacter {
                expected_rule: "number",
                found_character: 'x',
                position: 0,
            })
        );
        assert_eq!(
            try_number_rule(&mut arena, "", 0),
            Err(ParseError::UnexpectedEndOfInput {
                expected_rule: "number",
            })
        );
        assert_eq!(arena.len(), 0);
    }

    // Test if the identifier rule takes a letter head and an alphanumeric
    // tail, stopping at the first character outside the rule.
    #[test]
    fn test_identifier_rule_matches_letter_then_alphanumerics() {
        let mut arena = NodeArena::new();

        let (id_idx, new_pos) =
            try_identifier_rule(&mut arena, "a1b2+x", 0).expect("identifier rule failed");

        assert_eq!(new_pos, 4);
        assert_eq!(arena.node(id_idx).kind, NodeKind::Id);
        assert_eq!(arena.node(id_idx).matched_len, 4);
    }

    // Test if the identifier rule rejects a digit head and an underscore;
    // the grammar allows letters and digits only.
    #[test]
    fn test_identifier_rule_failures() {
        let mut arena = NodeArena::new();

        assert_eq!(
            try_identifier_rule(&mut arena, "9abc", 0),
            Err(ParseError::UnexpectedCharacter {
                expected_rule: "identifier",
                found_character: '9',
                position: 0,
            })
        );
        assert_eq!(
            try_identifier_rule(&mut arena, "_abc", 0),
            Err(ParseError::UnexpectedCharacter {
                expected_rule: "identifier",
                found_character: '_',
                position: 0,
            })
        );
        assert_eq!(
            try_identifier_rule(&mut arena, "", 0),
            Err(ParseError::UnexpectedEndOfInput {
                expected_rule: "identifier",
            })
        );
    }

    // Test if a single letter is a complete identifier match.
    #[test]
    fn test_identifier_rule_single_letter() {
        let mut arena = NodeArena::new();

        let (id_idx, new_pos) =
            try_identifier_rule(&mut arena, "x", 0).expect("identifier rule failed on one letter");

        assert_eq!(new_pos, 1);
        assert_eq!(arena.node(id_idx).matched_len, 1);
    }
}
