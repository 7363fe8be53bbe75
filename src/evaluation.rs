//! Evaluates postfix expressions with an operand stack, and structurally
//! verifies them with a value-free dry run of the same scan.

use std::fmt::Display;

use crate::expression::{ExprForm, Expression, OperatorKind, Token};
use crate::postfix_conversion::{infix_to_postfix, ConversionError};

/// Represents an evaluation error.
#[derive(Debug, PartialEq, Eq)]
pub enum EvalError {
    InvalidForm {
        form: ExprForm,
    },
    BracketMismatch(ConversionError),
    MissingBindings,
    UnboundVariable {
        name: String,
    },
    StackUnderflow {
        operator: OperatorKind,
    },
    DivisionByZero,
    NumericOverflow {
        operator: OperatorKind,
    },
    MalformedExpression {
        remaining: usize,
    },
}

/// Display trait implementation for EvalError.
impl Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidForm { form } => {
                return write!(f, "Can't evaluate an expression in {:?} form.", form);
            }

            Self::BracketMismatch(conversion_error) => {
                return write!(f, "{}", conversion_error);
            }

            Self::MissingBindings => {
                return write!(
                    f,
                    "Expression contains variables, but the identifier table or the binding table is empty."
                );
            }

            Self::UnboundVariable { name } => {
                return write!(f, "No value bound for variable {:?}.", name);
            }

            Self::StackUnderflow { operator } => {
                return write!(
                    f,
                    "Not enough operands on the stack to apply operator {:?}.",
                    operator
                );
            }

            Self::DivisionByZero => {
                return write!(f, "Division by zero.");
            }

            Self::NumericOverflow { operator } => {
                return write!(
                    f,
                    "Applying operator {:?} overflows a 64-bit integer.",
                    operator
                );
            }

            Self::MalformedExpression { remaining } => {
                return write!(
                    f,
                    "Malformed expression: {} values remain on the stack after evaluation.",
                    remaining
                );
            }
        }
    }
}

/// Type conversion for conversion errors raised while evaluating an infix
/// expression.
impl From<ConversionError> for EvalError {
    fn from(value: ConversionError) -> Self {
        return Self::BracketMismatch(value);
    }
}

// Applies a binary operator to its two operands. Division truncates toward
// zero. All four operators use checked arithmetic, so a result outside the
// i64 range is an error rather than a panic or a profile-dependent wrap.
fn apply_operator(left: i64, right: i64, op: OperatorKind) -> Result<i64, EvalError> {
    let result = match op {
        OperatorKind::Plus => left.checked_add(right),
        OperatorKind::Minus => left.checked_sub(right),
        OperatorKind::Mul => left.checked_mul(right),
        OperatorKind::Div => {
            if right == 0 {
                return Err(EvalError::DivisionByZero);
            }

            // Still checked: i64::MIN / -1 overflows.
            left.checked_div(right)
        }
    };

    match result {
        Some(value) => {
            return Ok(value);
        }
        None => {
            return Err(EvalError::NumericOverflow { operator: op });
        }
    }
}

/// Evaluates the expression to an integer. An infix expression is converted
/// to postfix first; a prefix expression is rejected. Identifiers resolve by
/// name through the binding table.
pub fn evaluate(expr: &Expression) -> Result<i64, EvalError> {
    if expr.form == ExprForm::Prefix {
        return Err(EvalError::InvalidForm { form: expr.form });
    }

    let converted_expression;
    let postfix_expression = if expr.form == ExprForm::Infix {
        converted_expression = infix_to_postfix(expr)?;
        &converted_expression
    } else {
        expr
    };

    let mut operand_stack: Vec<i64> = Vec::new();

    for &token in &postfix_expression.tokens {
        match token {
            Token::Number(value) => {
                operand_stack.push(value);
            }

            Token::Identifier(index) => {
                if postfix_expression.identifiers.is_empty()
                    || postfix_expression.bindings.is_empty()
                {
                    return Err(EvalError::MissingBindings);
                }

                let name = match postfix_expression.identifiers.get(&index) {
                    Some(name) => name,
                    None => {
                        return Err(EvalError::MissingBindings);
                    }
                };

                match postfix_expression.bindings.get(name) {
                    Some(&value) => {
                        operand_stack.push(value);
                    }
                    None => {
                        return Err(EvalError::UnboundVariable { name: name.clone() });
                    }
                }
            }

            Token::Operator(op) => {
                // The first pop is the most recently pushed operand, which
                // is the right-hand side.
                let right = match operand_stack.pop() {
                    Some(value) => value,
                    None => {
                        return Err(EvalError::StackUnderflow { operator: op });
                    }
                };

                let left = match operand_stack.pop() {
                    Some(value) => value,
                    None => {
                        return Err(EvalError::StackUnderflow { operator: op });
                    }
                };

                operand_stack.push(apply_operator(left, right, op)?);
            }

            // Brackets never survive postfix conversion.
            Token::Bracket(_) => {}
        }
    }

    match operand_stack.as_slice() {
        [result] => {
            return Ok(*result);
        }
        _ => {
            return Err(EvalError::MalformedExpression {
                remaining: operand_stack.len(),
            });
        }
    }
}

// Returns whether a token can act as an operand.
fn is_operand(token: Token) -> bool {
    match token {
        Token::Number(_) | Token::Identifier(_) => {
            return true;
        }
        _ => {
            return false;
        }
    }
}

/// Checks that the expression has consistent operand/operator arity without
/// computing any values or touching the identifier and binding tables.
///
/// Never faults: a prefix expression and an expression whose bracket
/// sequence fails conversion both verify as false.
pub fn verify(expr: &Expression) -> bool {
    if expr.form == ExprForm::Prefix {
        return false;
    }

    let converted_expression;
    let postfix_expression = if expr.form == ExprForm::Infix {
        converted_expression = match infix_to_postfix(expr) {
            Ok(converted) => converted,
            Err(_) => {
                return false;
            }
        };
        &converted_expression
    } else {
        expr
    };

    let mut operand_stack: Vec<Token> = Vec::new();

    for &token in &postfix_expression.tokens {
        match token {
            Token::Number(_) | Token::Identifier(_) => {
                operand_stack.push(token);
            }

            Token::Operator(_) => {
                if operand_stack.len() < 2 {
                    return false;
                }

                // Fold the pair into one pending operand: pop the first
                // operand and leave the second in place as the result slot.
                // Operators are never pushed onto this stack, so the kind
                // check on both items can't actually fire; it is kept to
                // mirror the evaluator's contract.
                let first = match operand_stack.pop() {
                    Some(popped_token) => popped_token,
                    None => {
                        return false;
                    }
                };

                let second = match operand_stack.last() {
                    Some(&top_token) => top_token,
                    None => {
                        return false;
                    }
                };

                if !is_operand(first) || !is_operand(second) {
                    return false;
                }
            }

            Token::Bracket(_) => {}
        }
    }

    return true;
}
