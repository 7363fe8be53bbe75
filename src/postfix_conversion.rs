//! Converts infix token sequences into reverse Polish (postfix) order using
//! the shunting-yard algorithm.

use std::fmt::Display;

use crate::expression::{operator_priority, BracketSide, ExprForm, Expression, Token};

/// Represents a conversion error.
#[derive(Debug, PartialEq, Eq)]
pub enum ConversionError {
    BracketMismatch,
}

/// Display trait implementation for ConversionError.
impl Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BracketMismatch => {
                return write!(f, "Unbalanced brackets in infix expression.");
            }
        }
    }
}

/// Converts an infix expression into a new expression whose token sequence is
/// in postfix order, carrying the identifier table and bindings over.
///
/// Converting anything other than an infix expression is not supported:
/// the function then returns a fresh expression with no tokens instead of
/// touching the input sequence.
///
/// An unmatched `)` is not detected here: popping for it simply exhausts the
/// stack, and the resulting malformed sequence is left for the evaluator or
/// verifier to surface. An unmatched `(` survives to the final drain and is
/// reported as a bracket mismatch.
pub fn infix_to_postfix(expr: &Expression) -> Result<Expression, ConversionError> {
    if expr.form != ExprForm::Infix {
        return Ok(Expression::new());
    }

    let mut output: Vec<Token> = Vec::new();
    let mut operator_stack: Vec<Token> = Vec::new();

    for &token in &expr.tokens {
        match token {
            Token::Number(_) | Token::Identifier(_) => {
                output.push(token);
            }

            Token::Operator(op) => {
                // Pop every stacked operator that binds at least as tightly.
                // Ties pop too, which keeps equal priorities
                // left-associative.
                while let Some(&Token::Operator(top_op)) = operator_stack.last() {
                    if operator_priority(op) > operator_priority(top_op) {
                        break;
                    }

                    output.push(Token::Operator(top_op));
                    operator_stack.pop();
                }

                operator_stack.push(token);
            }

            Token::Bracket(BracketSide::Left) => {
                operator_stack.push(token);
            }

            Token::Bracket(BracketSide::Right) => {
                // Pop to the matching left bracket and discard the pair.
                loop {
                    match operator_stack.pop() {
                        Some(Token::Bracket(BracketSide::Left)) | None => {
                            break;
                        }
                        Some(stacked_token) => {
                            output.push(stacked_token);
                        }
                    }
                }
            }
        }
    }

    // Drain the remaining operators. A bracket surviving to this point means
    // the bracket sequence was unbalanced.
    while let Some(stacked_token) = operator_stack.pop() {
        if let Token::Bracket(_) = stacked_token {
            return Err(ConversionError::BracketMismatch);
        }

        output.push(stacked_token);
    }

    return Ok(Expression {
        tokens: output,
        identifiers: expr.identifiers.clone(),
        bindings: expr.bindings.clone(),
        form: ExprForm::Postfix,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // Helper that tokenizes an input string into an infix expression.
    fn make_infix_expression(input_str: &str) -> Expression {
        let mut expression = Expression::new();
        expression
            .tokenize(input_str)
            .expect("tokenize returned unexpected lexical error");
        return expression;
    }

    // Test if operator priority reorders a plain expression.
    #[test]
    fn test_priority_reordering() {
        let infix_expression = make_infix_expression("2+3*4");

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert_eq!(postfix_expression.form, ExprForm::Postfix);
        assert_eq!(postfix_expression.to_display_string(), "2 3 4 * +");
    }

    // Test if brackets override operator priority.
    #[test]
    fn test_bracket_grouping() {
        let infix_expression = make_infix_expression("(2+3)*4");

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert_eq!(postfix_expression.to_display_string(), "2 3 + 4 *");
    }

    // Test if equal-priority operators fold left-associatively.
    #[test]
    fn test_equal_priority_left_association() {
        let infix_expression = make_infix_expression("8-3-2");

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert_eq!(postfix_expression.to_display_string(), "8 3 - 2 -");
    }

    // Test if the identifier table and bindings are carried over to the
    // converted expression.
    #[test]
    fn test_tables_carried_over() {
        let mut infix_expression = make_infix_expression("x*y");
        infix_expression.bindings.insert(String::from("x"), 6);
        infix_expression.bindings.insert(String::from("y"), 7);

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert_eq!(postfix_expression.identifiers, infix_expression.identifiers);
        assert_eq!(postfix_expression.bindings, infix_expression.bindings);
        assert_eq!(postfix_expression.to_display_string(), "x y *");
    }

    // Test if converting a non-infix expression is the documented no-op: the
    // result is a fresh expression with no tokens.
    #[test]
    fn test_non_infix_input_yields_empty_expression() {
        let infix_expression = make_infix_expression("2+3");
        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        let reconverted_expression = infix_to_postfix(&postfix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert!(reconverted_expression.tokens.is_empty());
        assert!(reconverted_expression.identifiers.is_empty());
        assert!(reconverted_expression.bindings.is_empty());
    }

    // Test if an unmatched left bracket is reported as a bracket mismatch.
    #[test]
    fn test_unmatched_left_bracket() {
        let infix_expression = make_infix_expression("(2+3");

        let conversion_error = infix_to_postfix(&infix_expression)
            .expect_err("infix_to_postfix accepted an unmatched left bracket");

        assert_eq!(conversion_error, ConversionError::BracketMismatch);
    }

    // Test if an unmatched right bracket passes through undetected, leaving
    // detection to the evaluator and verifier.
    #[test]
    fn test_unmatched_right_bracket_is_undetected() {
        let infix_expression = make_infix_expression("2+3)");

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix rejected an unmatched right bracket");

        assert_eq!(postfix_expression.to_display_string(), "2 3 +");
    }

    // Test if an empty token sequence converts to an empty postfix sequence.
    #[test]
    fn test_empty_sequence() {
        let infix_expression = make_infix_expression("");

        let postfix_expression = infix_to_postfix(&infix_expression)
            .expect("infix_to_postfix returned unexpected conversion error");

        assert!(postfix_expression.tokens.is_empty());
        assert_eq!(postfix_expression.form, ExprForm::Postfix);
    }
}
