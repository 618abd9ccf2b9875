//! Guards applied to expression text before it reaches the parser.

use crate::error::EvalError;
use crate::intent::Operator;

/// Deepest parenthesis nesting accepted. Parsing and evaluation recurse once
/// per level.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Checks `input` against the arithmetic allow-list, rejects runs of two or
/// more operators and caps parenthesis nesting at [`MAX_NESTING_DEPTH`].
///
/// Whitespace is ignored when looking for operator runs, so `"2 * - 3"` is
/// rejected the same way as `"2*-3"`. Unbalanced parentheses are left for the
/// parser to reject.
pub fn sanitize(input: &str) -> Result<(), EvalError> {
    if input.is_empty() {
        return Err(EvalError::Empty);
    }
    if let Some(c) = input.chars().find(|c| !is_allowed(*c)) {
        return Err(EvalError::DisallowedCharacter(c));
    }

    let mut previous_was_operator = false;
    let mut depth = 0usize;
    for c in input.chars().filter(|c| !c.is_whitespace()) {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(EvalError::NestingTooDeep(MAX_NESTING_DEPTH));
                }
            }
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        let is_operator = Operator::is_operator_char(c);
        if is_operator && previous_was_operator {
            return Err(EvalError::MalformedSequence);
        }
        previous_was_operator = is_operator;
    }
    Ok(())
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_digit()
        || Operator::is_operator_char(c)
        || matches!(c, '.' | '(' | ')')
        || c.is_whitespace()
}
