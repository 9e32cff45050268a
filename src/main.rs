//! Parse a given arithmetic expression, print its tree level by level, and
//! print the evaluated result to standard output.
//!
//! Example usage:
//!
//!     cargo run -- \
//!         --impl-name flat_chain \
//!         --expression "1+2*3"

use clap::Parser;
use rust_arith_parse::end_to_end::{run_parser, ParserConfig};

fn main() {
    let parser_config = ParserConfig::parse();

    let parser_result = run_parser(&parser_config);

    match parser_result {
        Ok(run_output) => {
            println!("{}", run_output);
        }

        Err(run_error) => {
            println!("{}", run_error);
        }
    }
}
