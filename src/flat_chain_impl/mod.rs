//! Matchers that build operator chains as flat sibling lists: one node per
//! tier holding the first operand plus every `(operator, operand)`
//! continuation as direct children. This keeps `+ - * /` left associative.

pub mod flat_chain_recursive_descent_parsing;
