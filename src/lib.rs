//! This crate contains code for a simple infix arithmetic expression
//! calculator.

pub mod end_to_end;
pub mod evaluation;
pub mod expr_tree;
pub mod expression;
pub mod lexical_analysis;
pub mod postfix_conversion;
