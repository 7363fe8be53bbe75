//! Data structures to represent arithmetic expressions, and tokenization of
//! raw text into them.

use std::collections::HashMap;

use crate::lexical_analysis::{scan_lexemes, LexError, LexemeClass};

/// The four binary operators of the expression language.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OperatorKind {
    Plus,
    Minus,
    Mul,
    Div,
}

/// Which side of a bracket pair a bracket token is.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum BracketSide {
    Left,
    Right,
}

/// Represents a single token of an expression. Only numbers and identifiers
/// carry a payload, so an operator holding a value is unrepresentable.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    Number(i64),
    Identifier(usize),
    Operator(OperatorKind),
    Bracket(BracketSide),
}

/// The notation an expression's token sequence is currently in. `Prefix` is
/// part of the form contract but is never produced by this crate.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ExprForm {
    Prefix,
    Infix,
    Postfix,
}

/// Returns the binding priority of an operator. A higher value binds tighter.
pub fn operator_priority(op: OperatorKind) -> u8 {
    match op {
        OperatorKind::Plus | OperatorKind::Minus => 1,
        OperatorKind::Mul | OperatorKind::Div => 2,
    }
}

/// Renders one token using its surface syntax, resolving identifier indices
/// through the given table. An index missing from the table renders as an
/// empty string.
pub fn token_symbol(token: Token, identifiers: &HashMap<usize, String>) -> String {
    match token {
        Token::Number(value) => {
            return value.to_string();
        }
        Token::Identifier(index) => {
            return identifiers.get(&index).cloned().unwrap_or_default();
        }
        Token::Operator(OperatorKind::Plus) => {
            return String::from("+");
        }
        Token::Operator(OperatorKind::Minus) => {
            return String::from("-");
        }
        Token::Operator(OperatorKind::Mul) => {
            return String::from("*");
        }
        Token::Operator(OperatorKind::Div) => {
            return String::from("/");
        }
        Token::Bracket(BracketSide::Left) => {
            return String::from("(");
        }
        Token::Bracket(BracketSide::Right) => {
            return String::from(")");
        }
    }
}

/// An arithmetic expression: a token sequence, the identifier table filled
/// during tokenization, the externally supplied variable bindings, and the
/// notation the token sequence is in.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Expression {
    pub tokens: Vec<Token>,
    pub identifiers: HashMap<usize, String>,
    pub bindings: HashMap<String, i64>,
    pub form: ExprForm,
}

impl Expression {
    /// Creates an empty infix expression.
    pub fn new() -> Expression {
        return Expression {
            tokens: Vec::new(),
            identifiers: HashMap::new(),
            bindings: HashMap::new(),
            form: ExprForm::Infix,
        };
    }

    /// Converts the input string into this expression's token sequence and
    /// fills the identifier table. Any state left over from a previous
    /// expression is discarded first, and the form is reset to infix.
    ///
    /// Every identifier occurrence is assigned a fresh index, even when the
    /// same name was seen before; evaluation resolves identifiers by name,
    /// so duplicate indices for one name are harmless.
    pub fn tokenize(&mut self, input: &str) -> Result<(), LexError> {
        self.tokens.clear();
        self.identifiers.clear();
        self.bindings.clear();
        self.form = ExprForm::Infix;

        // Next identifier index to hand out.
        let mut next_var_id: usize = 0;

        for lexeme in scan_lexemes(input) {
            match lexeme.class {
                LexemeClass::Whitespace => {
                    continue;
                }

                LexemeClass::Number => {
                    let value = match lexeme.text.parse::<i64>() {
                        Ok(value) => value,
                        Err(_) => {
                            return Err(LexError::MalformedNumber {
                                literal: lexeme.text,
                                position: lexeme.position,
                            });
                        }
                    };
                    self.tokens.push(Token::Number(value));
                }

                LexemeClass::Identifier => {
                    self.tokens.push(Token::Identifier(next_var_id));
                    self.identifiers.insert(next_var_id, lexeme.text);
                    next_var_id += 1;
                }

                LexemeClass::Operator => {
                    let op = match lexeme.text.as_str() {
                        "+" => OperatorKind::Plus,
                        "-" => OperatorKind::Minus,
                        "*" => OperatorKind::Mul,
                        "/" => OperatorKind::Div,
                        _ => {
                            return Err(LexError::UnresolvedSymbol {
                                symbol: lexeme.text,
                                position: lexeme.position,
                            });
                        }
                    };
                    self.tokens.push(Token::Operator(op));
                }

                LexemeClass::Bracket => {
                    let side = match lexeme.text.as_str() {
                        "(" => BracketSide::Left,
                        ")" => BracketSide::Right,
                        _ => {
                            return Err(LexError::UnresolvedSymbol {
                                symbol: lexeme.text,
                                position: lexeme.position,
                            });
                        }
                    };
                    self.tokens.push(Token::Bracket(side));
                }

                LexemeClass::Error => {
                    return Err(LexError::UnresolvedSymbol {
                        symbol: lexeme.text,
                        position: lexeme.position,
                    });
                }
            }
        }

        return Ok(());
    }

    /// Converts the expression's token sequence to a space-separated string,
    /// resolving identifiers through the identifier table. Purely diagnostic.
    pub fn to_display_string(&self) -> String {
        let mut parts = Vec::new();

        for &token in &self.tokens {
            parts.push(token_symbol(token, &self.identifiers));
        }

        return parts.join(" ");
    }
}

/// Default trait implementation for Expression via Expression::new.
impl Default for Expression {
    fn default() -> Expression {
        return Expression::new();
    }
}

/// Display trait implementation for Expression using to_display_string.
impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.to_display_string().as_str());
    }
}
