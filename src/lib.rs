//! This crate contains code for a simple arithmetic expression parser and
//! evaluator, implemented twice to show how the matchers' recursion strategy
//! decides operator associativity.

pub mod ast;
pub mod end_to_end;
pub mod flat_chain_impl;
pub mod lexical_matching;
pub mod right_nested_impl;
pub mod tree_evaluation;
