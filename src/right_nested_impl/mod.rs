//! Matchers that build operator chains as right-nested binary nodes: a tier
//! that sees a continuation operator matches everything after it as a single
//! recursive sub-node. The recursion is simpler than the flat chain matchers
//! but it associates every chain to the right, so `8-3-2` groups as `8-(3-2)`
//! and evaluates to 7 instead of 3.

pub mod right_nested_recursive_descent_parsing;
