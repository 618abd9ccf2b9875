use crate::parse::ParseError;

use thiserror::Error;

/// Reasons an expression could not be turned into a displayable number.
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Nothing to evaluate")]
    Empty,
    #[error("Disallowed character: {0:?}")]
    DisallowedCharacter(char),
    #[error("Malformed expression: consecutive operators")]
    MalformedSequence,
    #[error("Parentheses nested deeper than {0}")]
    NestingTooDeep(usize),
    #[error("Parse error: {0}")]
    Parse(Box<ParseError>),
    #[error("Result is not a finite number")]
    NonFinite,
}

/// Rejected intent payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Not a digit: {0:?}")]
    NotADigit(char),
    #[error("Unknown operator: {0:?}")]
    UnknownOperator(char),
    #[error("Unexpected character in keypad input: {0:?}")]
    UnexpectedCharacter(char),
}
