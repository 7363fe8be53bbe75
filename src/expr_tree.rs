//! Builds a binary expression tree directly from an infix token sequence by
//! recursively splitting on the rightmost lowest-priority top-level operator.

use std::collections::HashMap;
use std::fmt::Display;

use crate::expression::{operator_priority, token_symbol, BracketSide, Token};

/// Represents a tree construction error.
#[derive(Debug, PartialEq, Eq)]
pub enum TreeError {
    EmptyExpression,
    MalformedBrackets,
}

/// Display trait implementation for TreeError.
impl Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyExpression => {
                return write!(f, "Can't build a tree from an empty token sequence.");
            }

            Self::MalformedBrackets => {
                return write!(f, "Malformed bracket structure in token sequence.");
            }
        }
    }
}

/// A node of a binary expression tree. Leaves hold operand tokens; interior
/// nodes hold operator tokens and own both children.
#[derive(Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub token: Token,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    // Creates a childless node.
    fn leaf(token: Token) -> TreeNode {
        return TreeNode {
            token,
            left: None,
            right: None,
        };
    }
}

/// Builds a binary expression tree from an infix-ordered, bracket-intact
/// token sequence. The in-order structure of the tree reflects operator
/// priority and left-to-right folding of equal priorities.
///
/// The split point is the last top-level operator whose priority equals the
/// lowest top-level priority seen; choosing the rightmost occurrence keeps
/// equal priorities left-associative, consistent with evaluation order.
pub fn build_expr_tree(tokens: &[Token]) -> Result<TreeNode, TreeError> {
    if tokens.is_empty() {
        return Err(TreeError::EmptyExpression);
    }

    if tokens.len() == 1 {
        return match tokens[0] {
            Token::Bracket(_) => Err(TreeError::MalformedBrackets),
            token => Ok(TreeNode::leaf(token)),
        };
    }

    // Find the last top-level operator with the lowest priority seen so far.
    let mut bracket_depth: i32 = 0;
    let mut lowest_priority = u8::MAX;
    let mut split_pos: Option<usize> = None;

    for (idx, &token) in tokens.iter().enumerate() {
        match token {
            Token::Operator(op) if bracket_depth == 0 => {
                if operator_priority(op) <= lowest_priority {
                    lowest_priority = operator_priority(op);
                    split_pos = Some(idx);
                }
            }

            Token::Bracket(BracketSide::Left) => {
                bracket_depth += 1;
            }

            Token::Bracket(BracketSide::Right) => {
                bracket_depth -= 1;
            }

            _ => {}
        }
    }

    match split_pos {
        // No top-level operator, so the whole sequence must be one
        // bracket-wrapped expression: strip the outer pair and recurse.
        None => {
            let is_wrapped = tokens[0] == Token::Bracket(BracketSide::Left)
                && tokens[tokens.len() - 1] == Token::Bracket(BracketSide::Right);

            if !is_wrapped {
                return Err(TreeError::MalformedBrackets);
            }

            return build_expr_tree(&tokens[1..tokens.len() - 1]);
        }

        Some(pos) => {
            let left_subtree = build_expr_tree(&tokens[..pos])?;
            let right_subtree = build_expr_tree(&tokens[pos + 1..])?;

            return Ok(TreeNode {
                token: tokens[pos],
                left: Some(Box::new(left_subtree)),
                right: Some(Box::new(right_subtree)),
            });
        }
    }
}

// Helper to produce an in-order string representation of a tree.
fn tree_to_string_helper(
    node: &TreeNode,
    identifiers: &HashMap<usize, String>,
    string_so_far: &mut String,
) {
    match (&node.left, &node.right) {
        (Some(left_child), Some(right_child)) => {
            string_so_far.push('(');
            tree_to_string_helper(left_child, identifiers, string_so_far);
            string_so_far.push(' ');
            string_so_far.push_str(token_symbol(node.token, identifiers).as_str());
            string_so_far.push(' ');
            tree_to_string_helper(right_child, identifiers, string_so_far);
            string_so_far.push(')');
        }

        _ => {
            string_so_far.push_str(token_symbol(node.token, identifiers).as_str());
        }
    }
}

/// Renders a tree in-order, parenthesizing every operator node and resolving
/// identifier tokens through the given table. Purely diagnostic.
pub fn tree_to_string(node: &TreeNode, identifiers: &HashMap<usize, String>) -> String {
    let mut out_string = String::new();
    tree_to_string_helper(node, identifiers, &mut out_string);
    return out_string;
}
