//! Evaluate one arithmetic expression and print the result to standard
//! output.
//!
//! Example usage:
//!
//!     cargo run -- --expr "(2+x)*4" --bind x=3 --verbose

use clap::Parser;
use rust_infix_calc::end_to_end::{run_calculator, CalculatorConfig};

fn main() {
    let calculator_config = CalculatorConfig::parse();

    let calculator_result = run_calculator(&calculator_config);

    match calculator_result {
        Ok(output) => {
            println!("{}", output);
        }

        Err(run_error) => {
            println!("{}", run_error);
        }
    }
}
