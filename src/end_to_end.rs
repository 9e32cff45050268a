//! Code to configure and run a parser implementation on an input expression.

use clap::Parser;

use crate::flat_chain_impl::flat_chain_recursive_descent_parsing;
use crate::lexical_matching::ParseError;
use crate::right_nested_impl::right_nested_recursive_descent_parsing;
use crate::tree_evaluation::{eval_parse_tree, EvalError};

/// Supported parser implementations.
pub const SUPPORTED_IMPLS: [&str; 2] = ["flat_chain", "right_nested"];

/// Config for one parser run. Instantiate via `ParserConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct ParserConfig {
    /// Which implementation to use. Must be present inside `SUPPORTED_IMPLS`.
    #[arg(short, long, default_value_t = String::from("flat_chain"))]
    pub impl_name: String,

    /// The expression to parse, as one line of source text.
    #[arg(short, long)]
    pub expression: String,

    /// Print a resolution line for every node the evaluator visits.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the tree without evaluating it.
    #[arg(short, long)]
    pub skip_eval: bool,
}

/// Errors that may be thrown when running a parser implementation.
#[derive(Debug, PartialEq, Eq)]
pub enum RunError {
    ConfigError(String),
    ExpressionParseError(ParseError),
    TreeEvalError(EvalError),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigError(config_err_string) => {
                return write!(f, "Parser configuration error: {}", config_err_string);
            }

            Self::ExpressionParseError(parse_error) => {
                return write!(f, "Expression parse error: {}", parse_error);
            }

            Self::TreeEvalError(eval_error) => {
                return write!(f, "Tree evaluation error: {}", eval_error);
            }
        }
    }
}

/// Type conversions for errors.
impl From<ParseError> for RunError {
    fn from(value: ParseError) -> Self {
        return Self::ExpressionParseError(value);
    }
}

impl From<EvalError> for RunError {
    fn from(value: EvalError) -> Self {
        return Self::TreeEvalError(value);
    }
}

/// Run the flat chain parser on the configured expression.
pub fn run_flat_chain_parser(config: &ParserConfig) -> Result<String, RunError> {
    // Run the matchers.
    let tree = flat_chain_recursive_descent_parsing::parse_recursive_descent(&config.expression)?;

    // Render the level-per-line tree dump.
    let mut run_output = format!("{}", tree);

    // Evaluate the tree and append the result.
    if !config.skip_eval {
        let result_value = eval_parse_tree(&tree, config.verbose)?;
        run_output.push_str(&format!("\nresult is: {}", result_value));
    }

    return Ok(run_output);
}

/// Run the right nested parser on the configured expression.
pub fn run_right_nested_parser(config: &ParserConfig) -> Result<String, RunError> {
    // Run the matchers.
    let tree =
        right_nested_recursive_descent_parsing::parse_recursive_descent(&config.expression)?;

    // Render the level-per-line tree dump.
    let mut run_output = format!("{}", tree);

    // Evaluate the tree and append the result.
    if !config.skip_eval {
        let result_value = eval_parse_tree(&tree, config.verbose)?;
        run_output.push_str(&format!("\nresult is: {}", result_value));
    }

    return Ok(run_output);
}

/// Run a parser implementation (i.e. the matchers, the tree renderer, and
/// the evaluator) given a parser config.
pub fn run_parser(config: &ParserConfig) -> Result<String, RunError> {
    if config.impl_name == "flat_chain" {
        return run_flat_chain_parser(config);
    }

    if config.impl_name == "right_nested" {
        return run_right_nested_parser(config);
    }

    return Err(RunError::ConfigError(format!(
        "Unrecognized implementation name {}",
        config.impl_name
    )));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(impl_name: &str, expression: &str, skip_eval: bool) -> ParserConfig {
        return ParserConfig {
            impl_name: String::from(impl_name),
            expression: String::from(expression),
            verbose: false,
            skip_eval: skip_eval,
        };
    }

    // Test if an implementation name outside SUPPORTED_IMPLS is rejected.
    #[test]
    fn test_unrecognized_impl_name_is_a_config_error() {
        let config = make_config("shunting_yard", "1+2", false);

        assert_eq!(
            run_parser(&config),
            Err(RunError::ConfigError(String::from(
                "Unrecognized implementation name shunting_yard"
            )))
        );
    }

    // Test if the two implementations report their diverging results
    // through the run output.
    #[test]
    fn test_run_output_ends_with_the_result() {
        let flat_chain_output = run_parser(&make_config("flat_chain", "8-3-2", false))
            .expect("flat chain run failed");
        assert!(flat_chain_output.ends_with("result is: 3"));

        let right_nested_output = run_parser(&make_config("right_nested", "8-3-2", false))
            .expect("right nested run failed");
        assert!(right_nested_output.ends_with("result is: 7"));
    }

    // Test if skipping evaluation makes expressions with free identifiers
    // runnable, and that evaluating them faults.
    #[test]
    fn test_skip_eval_allows_free_identifiers() {
        let skipping_output = run_parser(&make_config("flat_chain", "a+b", true))
            .expect("flat chain run with skip_eval failed");
        assert!(skipping_output.contains("<type=expr"));
        assert!(!skipping_output.contains("result is:"));

        assert_eq!(
            run_parser(&make_config("flat_chain", "a+b", false)),
            Err(RunError::TreeEvalError(EvalError::MalformedLiteral {
                literal_text: String::from("a"),
            }))
        );
    }

    // Test if parse failures surface through the run error.
    #[test]
    fn test_parse_failure_surfaces_as_run_error() {
        assert_eq!(
            run_parser(&make_config("flat_chain", "1+", false)),
            Err(RunError::ExpressionParseError(
                ParseError::UnexpectedEndOfInput {
                    expected_rule: "factor",
                }
            ))
        );
    }
}
