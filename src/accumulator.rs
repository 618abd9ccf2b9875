//! Keypad input accumulation.
//!
//! The expression is kept as a list of tokens rather than a flat string, so
//! questions like "does the current number already have a decimal point?"
//! or "was the last thing typed an operator?" are answered by looking at the
//! final token instead of re-scanning the text.

use std::fmt;

use crate::display::{DisplayOptions, DisplayValue};
use crate::error::{EvalError, InputError};
use crate::evaluate::evaluate_str;
use crate::intent::Operator;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    /// Digits with at most one decimal point, possibly trailing (`"5."`).
    Number(String),
    Operator(Operator),
}

/// The expression being typed on the keypad.
///
/// Invariants: no two operators are adjacent, and each number holds at most
/// one decimal point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Accumulator {
    tokens: Vec<Token>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an accumulator by replaying `text` as key presses.
    ///
    /// Digits, `.` and `+ - * /` are accepted; anything else is an error.
    /// Because the text is replayed, a repeated operator replaces its
    /// predecessor and a second point in a number is dropped.
    pub fn from_text(text: &str) -> Result<Self, InputError> {
        let mut accumulator = Self::new();
        for c in text.chars() {
            match c {
                '0'..='9' => accumulator.insert_digit(c)?,
                '.' => accumulator.insert_decimal_point(),
                c => match Operator::try_from(c) {
                    Ok(op) => accumulator.insert_operator(op),
                    Err(_) => return Err(InputError::UnexpectedCharacter(c)),
                },
            }
        }
        Ok(accumulator)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether the final token is a pending operator.
    pub fn last_was_operator(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Operator(_)))
    }

    /// The expression text, empty when nothing has been typed.
    pub fn text(&self) -> String {
        render(&self.tokens)
    }

    pub fn insert_digit(&mut self, digit: char) -> Result<(), InputError> {
        if !digit.is_ascii_digit() {
            return Err(InputError::NotADigit(digit));
        }
        match self.tokens.last_mut() {
            Some(Token::Number(number)) => number.push(digit),
            _ => self.tokens.push(Token::Number(digit.to_string())),
        }
        Ok(())
    }

    /// Starts a fraction in the current number. A number that already has a
    /// point is left alone, and a point with no number before it becomes
    /// `"0."`.
    pub fn insert_decimal_point(&mut self) {
        match self.tokens.last_mut() {
            Some(Token::Number(number)) => {
                if !number.contains('.') {
                    number.push('.');
                }
            }
            _ => self.tokens.push(Token::Number("0.".to_string())),
        }
    }

    /// Appends `op`, or replaces the pending operator if the last thing typed
    /// was one. A leading minus starts a negative number.
    pub fn insert_operator(&mut self, op: Operator) {
        match self.tokens.last_mut() {
            Some(Token::Operator(pending)) => *pending = op,
            _ => self.tokens.push(Token::Operator(op)),
        }
    }

    /// Divides the trailing number by 100. Returns `false` without changing
    /// anything when the expression does not end in a number with at least
    /// one digit after any decimal point, or when that number is too large
    /// to represent.
    pub fn percent(&mut self) -> bool {
        let Some(Token::Number(number)) = self.tokens.last_mut() else {
            return false;
        };
        if number.ends_with('.') {
            return false;
        }
        let Ok(value) = number.parse::<f64>() else {
            return false;
        };
        let fraction = value / 100.0;
        if !fraction.is_finite() {
            return false;
        }
        *number = fraction.to_string();
        true
    }

    /// Removes the last character. Returns `false` on an empty expression.
    pub fn backspace(&mut self) -> bool {
        match self.tokens.last_mut() {
            None => return false,
            Some(Token::Number(number)) => {
                number.pop();
                if !number.is_empty() {
                    return true;
                }
            }
            Some(Token::Operator(_)) => {}
        }
        self.tokens.pop();
        true
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Evaluates the expression without changing it.
    ///
    /// An empty expression reads as zero. A trailing operator means the user
    /// is mid-entry: a preview yields `Ok(None)`, while a final evaluation
    /// drops the operator and evaluates the rest (see
    /// [`Accumulator::evaluate_final`]).
    pub fn evaluate(
        &self,
        for_preview: bool,
        options: &DisplayOptions,
    ) -> Result<Option<DisplayValue>, EvalError> {
        if for_preview && self.last_was_operator() {
            return Ok(None);
        }
        self.evaluate_final(options).map(Some)
    }

    /// The equals path of [`Accumulator::evaluate`]: a trailing operator is
    /// dropped and the rest must evaluate.
    pub fn evaluate_final(&self, options: &DisplayOptions) -> Result<DisplayValue, EvalError> {
        let tokens = match self.tokens.split_last() {
            None => return Ok(DisplayValue::zero()),
            Some((Token::Operator(_), rest)) => rest,
            Some(_) => self.tokens.as_slice(),
        };
        evaluate_str(&render(tokens), options)
    }

    /// Replaces the expression with a result so the next operator chains
    /// from it.
    pub fn commit(&mut self, value: DisplayValue) -> Result<(), InputError> {
        *self = Self::from_text(&value.to_string())?;
        Ok(())
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

fn render(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Number(number) => text.push_str(number),
            Token::Operator(op) => text.push(op.as_char()),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acc(text: &str) -> Accumulator {
        Accumulator::from_text(text).unwrap()
    }

    fn equals(accumulator: &Accumulator) -> Result<Option<DisplayValue>, EvalError> {
        accumulator.evaluate(false, &DisplayOptions::default())
    }

    fn preview(accumulator: &Accumulator) -> Result<Option<DisplayValue>, EvalError> {
        accumulator.evaluate(true, &DisplayOptions::default())
    }

    #[test]
    fn digits_accumulate() {
        let mut accumulator = Accumulator::new();
        for d in "9071".chars() {
            accumulator.insert_digit(d).unwrap();
        }
        assert_eq!(accumulator.text(), "9071");
        assert!(!accumulator.last_was_operator());
        assert_eq!(equals(&accumulator).unwrap().unwrap().value(), 9071.0);
        assert_eq!(accumulator.insert_digit('x'), Err(InputError::NotADigit('x')));
    }

    #[test]
    fn operator_replaces_pending_operator() {
        let mut accumulator = acc("3+");
        assert!(accumulator.last_was_operator());
        accumulator.insert_operator(Operator::Multiply);
        assert_eq!(accumulator.text(), "3*");
        accumulator.insert_operator(Operator::Divide);
        assert_eq!(accumulator.text(), "3/");
    }

    #[test]
    fn leading_minus() {
        let mut accumulator = Accumulator::new();
        accumulator.insert_operator(Operator::Subtract);
        assert_eq!(accumulator.text(), "-");
        assert!(accumulator.last_was_operator());
        accumulator.insert_digit('4').unwrap();
        assert_eq!(equals(&accumulator).unwrap().unwrap().to_string(), "-4");

        // Another operator straight away replaces the sign.
        let mut accumulator = acc("-");
        accumulator.insert_operator(Operator::Add);
        assert_eq!(accumulator.text(), "+");
    }

    #[test]
    fn decimal_point_once_per_number() {
        let mut accumulator = acc("3.14");
        accumulator.insert_decimal_point();
        assert_eq!(accumulator.text(), "3.14");

        accumulator.insert_operator(Operator::Add);
        accumulator.insert_decimal_point();
        assert_eq!(accumulator.text(), "3.14+0.");
        accumulator.insert_decimal_point();
        accumulator.insert_digit('5').unwrap();
        assert_eq!(accumulator.text(), "3.14+0.5");

        let mut accumulator = Accumulator::new();
        accumulator.insert_decimal_point();
        assert_eq!(accumulator.text(), "0.");
        assert!(!accumulator.last_was_operator());
    }

    #[test]
    fn percent_converts_trailing_number() {
        let mut accumulator = acc("200+50");
        assert!(accumulator.percent());
        assert_eq!(accumulator.text(), "200+0.5");

        let mut accumulator = acc("12.5");
        assert!(accumulator.percent());
        assert_eq!(accumulator.text(), "0.125");

        let mut accumulator = acc("-50");
        assert!(accumulator.percent());
        assert_eq!(accumulator.text(), "-0.5");
    }

    #[test]
    fn percent_without_trailing_number_is_noop() {
        for text in ["", "5+", "-", "5."] {
            let mut accumulator = acc(text);
            assert!(!accumulator.percent(), "{text}");
            assert_eq!(accumulator.text(), text);
        }
    }

    #[test]
    fn percent_of_unrepresentable_number_is_noop() {
        let mut accumulator = Accumulator::new();
        for _ in 0..320 {
            accumulator.insert_digit('9').unwrap();
        }
        let nines = "9".repeat(320);
        assert!(!accumulator.percent());
        assert_eq!(accumulator.text(), nines);

        accumulator.backspace();
        accumulator.insert_decimal_point();
        assert_eq!(accumulator.text(), format!("{}.", &nines[..319]));
    }

    #[test]
    fn backspace() {
        let mut accumulator = Accumulator::new();
        assert!(!accumulator.backspace());
        assert_eq!(accumulator.text(), "");

        let mut accumulator = acc("12+3");
        assert!(accumulator.backspace());
        assert_eq!(accumulator.text(), "12+");
        assert!(accumulator.last_was_operator());
        assert!(accumulator.backspace());
        assert_eq!(accumulator.text(), "12");
        assert!(!accumulator.last_was_operator());

        // The point goes first, then the digits before it.
        let mut accumulator = acc("0.");
        accumulator.backspace();
        assert_eq!(accumulator.text(), "0");
        accumulator.backspace();
        assert!(accumulator.is_empty());
    }

    #[test]
    fn clear() {
        let mut accumulator = acc("7*8-");
        accumulator.clear();
        assert!(accumulator.is_empty());
        assert!(!accumulator.last_was_operator());
    }

    #[test]
    fn evaluate_empty_is_zero() {
        let accumulator = Accumulator::new();
        assert_eq!(equals(&accumulator).unwrap(), Some(DisplayValue::zero()));
        assert_eq!(preview(&accumulator).unwrap(), Some(DisplayValue::zero()));
    }

    #[test]
    fn trailing_operator() {
        let accumulator = acc("5+");
        assert_eq!(preview(&accumulator).unwrap(), None);
        assert_eq!(equals(&accumulator).unwrap().unwrap().to_string(), "5");
        // Evaluation never mutates.
        assert_eq!(accumulator.text(), "5+");

        assert!(matches!(equals(&acc("-")), Err(EvalError::Empty)));
    }

    #[test]
    fn evaluate_final_never_blanks() {
        let options = DisplayOptions::default();
        assert_eq!(acc("").evaluate_final(&options).unwrap(), DisplayValue::zero());
        assert_eq!(acc("5+").evaluate_final(&options).unwrap().to_string(), "5");
        assert_eq!(acc("6/4").evaluate_final(&options).unwrap().to_string(), "1.5");
        assert!(matches!(acc("-").evaluate_final(&options), Err(EvalError::Empty)));
    }

    #[test]
    fn evaluate_results() {
        assert_eq!(equals(&acc("2+2")).unwrap().unwrap().to_string(), "4");
        assert_eq!(equals(&acc("1/3")).unwrap().unwrap().to_string(), "0.3333333333");
        assert_eq!(equals(&acc("2+3*4")).unwrap().unwrap().to_string(), "14");
        assert_eq!(equals(&acc("7.")).unwrap().unwrap().to_string(), "7");
        assert!(matches!(equals(&acc("1/0")), Err(EvalError::NonFinite)));
        assert!(matches!(preview(&acc("1/0")), Err(EvalError::NonFinite)));
        assert!(matches!(equals(&acc("*5")), Err(EvalError::Parse(_))));
    }

    #[test]
    fn commit_chains() {
        let mut accumulator = acc("5+3");
        let value = equals(&accumulator).unwrap().unwrap();
        accumulator.commit(value).unwrap();
        assert_eq!(accumulator.text(), "8");
        assert!(!accumulator.last_was_operator());

        accumulator.insert_operator(Operator::Add);
        accumulator.insert_digit('2').unwrap();
        let value = equals(&accumulator).unwrap().unwrap();
        assert_eq!(value.to_string(), "10");

        let mut accumulator = acc("1-3.5");
        let value = equals(&accumulator).unwrap().unwrap();
        accumulator.commit(value).unwrap();
        assert_eq!(accumulator.text(), "-2.5");
    }

    #[test]
    fn from_text_rejects_foreign_characters() {
        assert_eq!(
            Accumulator::from_text("2+alert(1)"),
            Err(InputError::UnexpectedCharacter('a'))
        );
        assert_eq!(Accumulator::from_text("(1)"), Err(InputError::UnexpectedCharacter('(')));
    }
}
