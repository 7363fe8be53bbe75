//! Regex-rule-driven scanner that splits raw expression text into classified
//! lexemes.

use std::fmt::Display;

use lazy_static::lazy_static;
use regex::Regex;

// The different classes of lexemes that compose an expression.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum LexemeClass {
    Number,
    Identifier,
    Operator,
    Bracket,
    Whitespace,
    Error,
}

/// A classified slice of the input, together with its byte offset.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Lexeme {
    pub class: LexemeClass,
    pub text: String,
    pub position: usize,
}

/// Represents a lexical error.
#[derive(Debug, PartialEq, Eq)]
pub enum LexError {
    UnresolvedSymbol { symbol: String, position: usize },
    MalformedNumber { literal: String, position: usize },
}

/// Display trait implementation for LexError.
impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnresolvedSymbol { symbol, position } => {
                return write!(
                    f,
                    "Unresolved symbol {:?} at byte offset {}.",
                    symbol, position
                );
            }

            Self::MalformedNumber { literal, position } => {
                return write!(
                    f,
                    "Number literal {:?} at byte offset {} does not fit into a 64-bit integer.",
                    literal, position
                );
            }
        }
    }
}

// Represents how to recognize a lexeme class.
#[derive(Debug)]
struct LexemeRule {
    class: LexemeClass,
    regex: Regex,
}

// Vector of regex patterns that correspond to each lexeme class.
lazy_static! {
    static ref lexeme_rules: Vec<LexemeRule> = vec![
        LexemeRule {
            class: LexemeClass::Number,
            regex: Regex::new(r"[0-9]+").expect("Unable to compile Number rule regex."),
        },
        LexemeRule {
            class: LexemeClass::Identifier,
            regex: Regex::new(r"[A-Za-z][A-Za-z0-9]*")
                .expect("Unable to compile Identifier rule regex."),
        },
        LexemeRule {
            class: LexemeClass::Operator,
            regex: Regex::new(r"\+|-|\*|/").expect("Unable to compile Operator rule regex."),
        },
        LexemeRule {
            class: LexemeClass::Bracket,
            regex: Regex::new(r"\(|\)").expect("Unable to compile Bracket rule regex."),
        },
        LexemeRule {
            class: LexemeClass::Whitespace,
            regex: Regex::new(r"\s+").expect("Unable to compile Whitespace rule regex."),
        },
        LexemeRule {
            class: LexemeClass::Error,
            regex: Regex::new(r"(?s).+?").expect("Unable to compile Error rule regex."),
        },
    ];
}

// Gets the rule for a specific lexeme class.
fn get_rule_for_lexeme_class(class: LexemeClass) -> Option<&'static LexemeRule> {
    lexeme_rules
        .iter()
        .find(|lexeme_rule| lexeme_rule.class == class)
}

// Finds the rule that matches the most characters from the start of the input
// string.
fn get_longest_matching_rule(input_str: &str) -> (&'static LexemeRule, usize) {
    let mut longest_match_len: usize = 0;
    let mut longest_lexeme_rule = get_rule_for_lexeme_class(LexemeClass::Error)
        .expect("Unable to find lexeme rule for Error lexeme class.");

    for lexeme_rule in lexeme_rules.iter() {
        match lexeme_rule
            .regex
            .find(input_str)
            .take_if(|match_obj| match_obj.start() == 0)
        {
            None => continue,
            Some(match_obj) => {
                if match_obj.len() > longest_match_len {
                    longest_match_len = match_obj.len();
                    longest_lexeme_rule = lexeme_rule;
                }
            }
        };
    }

    (longest_lexeme_rule, longest_match_len)
}

/// Given a string, returns the vector of lexemes that comprise it. Keeps
/// whitespace lexemes; the caller decides what to discard.
pub fn scan_lexemes(input_str: &str) -> Vec<Lexeme> {
    let mut curr_idx: usize = 0;
    let mut out = Vec::new();

    while curr_idx < input_str.len() {
        let (lexeme_rule, match_len) = get_longest_matching_rule(&input_str[curr_idx..]);

        out.push(Lexeme {
            class: lexeme_rule.class,
            text: String::from(&input_str[curr_idx..curr_idx + match_len]),
            position: curr_idx,
        });
        curr_idx += match_len;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test if get_rule_for_lexeme_class returns the right rule.
    #[test]
    fn test_get_rule_for_lexeme_class() {
        lexeme_rules.iter().for_each(|lexeme_rule| {
            println!("Testing lexeme class: {:?}", lexeme_rule.class);

            let retrieved_rule = get_rule_for_lexeme_class(lexeme_rule.class)
                .expect("Unable to get rule for lexeme class {lexeme_rule.class}");

            assert!(std::ptr::eq(retrieved_rule, lexeme_rule));
        });
    }

    // Test if get_longest_matching_rule returns the right rules.
    #[test]
    fn test_longest_matching_rule() {
        // Test cases formatted as (input_str, expected_class, expected_match_len).
        let string_and_rule_vec = vec![
            ("123+4", LexemeClass::Number, "123".len()),
            ("rate2*3", LexemeClass::Identifier, "rate2".len()),
            ("+4", LexemeClass::Operator, "+".len()),
            ("(2)", LexemeClass::Bracket, "(".len()),
            ("  \t2", LexemeClass::Whitespace, "  \t".len()),
            ("@2", LexemeClass::Error, "@".len()),
        ];

        string_and_rule_vec
            .iter()
            .for_each(|&(input_str, expected_class, expected_len)| {
                let (retrieved_rule, match_len) = get_longest_matching_rule(input_str);
                assert_eq!(retrieved_rule.class, expected_class);
                assert_eq!(match_len, expected_len);
            });
    }

    // Test if scan_lexemes splits a simple expression into the desired
    // lexemes with the right byte offsets.
    #[test]
    fn test_scan_lexemes_simple() {
        let input_str = "12 + x";

        let expected_lexemes = vec![
            Lexeme {
                class: LexemeClass::Number,
                text: String::from("12"),
                position: 0,
            },
            Lexeme {
                class: LexemeClass::Whitespace,
                text: String::from(" "),
                position: 2,
            },
            Lexeme {
                class: LexemeClass::Operator,
                text: String::from("+"),
                position: 3,
            },
            Lexeme {
                class: LexemeClass::Whitespace,
                text: String::from(" "),
                position: 4,
            },
            Lexeme {
                class: LexemeClass::Identifier,
                text: String::from("x"),
                position: 5,
            },
        ];

        let produced_lexemes = scan_lexemes(input_str);

        assert_eq!(produced_lexemes, expected_lexemes);
    }

    // Test if a digit run followed by letters splits into a number and an
    // identifier rather than one lexeme.
    #[test]
    fn test_scan_lexemes_number_then_identifier() {
        let produced_lexemes = scan_lexemes("12a");

        let expected_lexemes = vec![
            Lexeme {
                class: LexemeClass::Number,
                text: String::from("12"),
                position: 0,
            },
            Lexeme {
                class: LexemeClass::Identifier,
                text: String::from("a"),
                position: 2,
            },
        ];

        assert_eq!(produced_lexemes, expected_lexemes);
    }

    // Test if an unrecognized character is classified as an Error lexeme.
    #[test]
    fn test_scan_lexemes_unrecognized_character() {
        let produced_lexemes = scan_lexemes("2@");

        assert_eq!(produced_lexemes.len(), 2);
        assert_eq!(produced_lexemes[1].class, LexemeClass::Error);
        assert_eq!(produced_lexemes[1].text, "@");
        assert_eq!(produced_lexemes[1].position, 1);
    }

    // Test if empty input produces no lexemes.
    #[test]
    fn test_scan_lexemes_empty_input() {
        assert!(scan_lexemes("").is_empty());
    }
}
