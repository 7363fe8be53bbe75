//! Code to configure and run the calculator on one line of input.

use std::io;

use clap::Parser;

use crate::evaluation::{evaluate, verify, EvalError};
use crate::expr_tree::{build_expr_tree, tree_to_string, TreeError};
use crate::expression::Expression;
use crate::lexical_analysis::LexError;
use crate::postfix_conversion::{infix_to_postfix, ConversionError};

/// Config for the calculator. Instantiate via `CalculatorConfig::parse()`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CalculatorConfig {
    /// The expression to evaluate. Reads one line from standard input when
    /// omitted.
    #[arg(short, long)]
    pub expr: Option<String>,

    /// A variable binding formatted as `name=value`. May be repeated.
    #[arg(short, long)]
    pub bind: Vec<String>,

    /// Also print the postfix form and the expression tree.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Errors that may be thrown when running the calculator.
#[derive(Debug)]
pub enum RunError {
    InputError(io::Error),
    BadBinding(String),
    LexError(LexError),
    InvalidExpression,
    ConversionError(ConversionError),
    EvalError(EvalError),
    TreeError(TreeError),
}

/// Display trait implementation for RunError.
impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InputError(io_error) => {
                return write!(f, "Input error: {}", io_error);
            }

            Self::BadBinding(raw_binding) => {
                return write!(
                    f,
                    "Bad binding {:?}: expected the form name=value with an integer value.",
                    raw_binding
                );
            }

            Self::LexError(lex_error) => {
                return write!(f, "Lexical error: {}", lex_error);
            }

            Self::InvalidExpression => {
                return write!(f, "Incorrect expression!");
            }

            Self::ConversionError(conversion_error) => {
                return write!(f, "Conversion error: {}", conversion_error);
            }

            Self::EvalError(eval_error) => {
                return write!(f, "Evaluation error: {}", eval_error);
            }

            Self::TreeError(tree_error) => {
                return write!(f, "Tree construction error: {}", tree_error);
            }
        }
    }
}

/// Type conversions for errors.
impl From<io::Error> for RunError {
    fn from(value: io::Error) -> Self {
        return Self::InputError(value);
    }
}

impl From<LexError> for RunError {
    fn from(value: LexError) -> Self {
        return Self::LexError(value);
    }
}

impl From<ConversionError> for RunError {
    fn from(value: ConversionError) -> Self {
        return Self::ConversionError(value);
    }
}

impl From<EvalError> for RunError {
    fn from(value: EvalError) -> Self {
        return Self::EvalError(value);
    }
}

impl From<TreeError> for RunError {
    fn from(value: TreeError) -> Self {
        return Self::TreeError(value);
    }
}

// Parses one `name=value` binding argument.
fn parse_binding(raw_binding: &str) -> Result<(String, i64), RunError> {
    let mut parts = raw_binding.splitn(2, '=');
    let name = parts.next().unwrap_or("").trim();

    let value_str = match parts.next() {
        Some(value_str) => value_str.trim(),
        None => {
            return Err(RunError::BadBinding(String::from(raw_binding)));
        }
    };

    if name.is_empty() {
        return Err(RunError::BadBinding(String::from(raw_binding)));
    }

    match value_str.parse::<i64>() {
        Ok(value) => {
            return Ok((String::from(name), value));
        }
        Err(_) => {
            return Err(RunError::BadBinding(String::from(raw_binding)));
        }
    }
}

/// Runs the calculator (i.e. the lexer, verifier, and evaluator, plus the
/// postfix and tree renderings in verbose mode) given a calculator config.
pub fn run_calculator(config: &CalculatorConfig) -> Result<String, RunError> {
    // Get the input line, either from the config or from standard input.
    let input_line = match &config.expr {
        Some(expr) => expr.clone(),
        None => {
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line
        }
    };

    // Run the lexer.
    let mut expression = Expression::new();
    expression.tokenize(input_line.as_str())?;

    // Attach the variable bindings. Tokenization clears the binding table,
    // so this must come after it.
    for raw_binding in &config.bind {
        let (name, value) = parse_binding(raw_binding)?;
        expression.bindings.insert(name, value);
    }

    // Reject structurally invalid expressions before evaluating.
    if !verify(&expression) {
        return Err(RunError::InvalidExpression);
    }

    let result = evaluate(&expression)?;

    if !config.verbose {
        return Ok(result.to_string());
    }

    let postfix_expression = infix_to_postfix(&expression)?;
    let tree = build_expr_tree(&expression.tokens)?;

    return Ok(format!(
        "postfix: {}\ntree: {}\nresult: {}",
        postfix_expression.to_display_string(),
        tree_to_string(&tree, &expression.identifiers),
        result
    ));
}
