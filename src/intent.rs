//! The vocabulary of user actions understood by the calculator, and its
//! mapping from keyboard keys and keypad buttons.

use std::fmt;

use crate::error::InputError;

/// A binary arithmetic operator as typed on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    pub fn as_char(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn is_operator_char(c: char) -> bool {
        Self::try_from(c).is_ok()
    }
}

impl TryFrom<char> for Operator {
    type Error = InputError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '+' => Ok(Self::Add),
            '-' => Ok(Self::Subtract),
            '*' => Ok(Self::Multiply),
            '/' => Ok(Self::Divide),
            other => Err(InputError::UnknownOperator(other)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A discrete user action dispatched to the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    Digit(char),
    Point,
    Operator(Operator),
    Percent,
    Backspace,
    Clear,
    Equals,
}

impl Intent {
    /// Maps a keyboard key name (as reported by a `keydown` event) to an
    /// intent. Keys without a meaning return `None` and should be passed
    /// through by the caller.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => return Some(Self::Equals),
            "Backspace" => return Some(Self::Backspace),
            "Escape" => return Some(Self::Clear),
            _ => {}
        }
        let mut chars = key.chars();
        let (c, None) = (chars.next()?, chars.next()) else {
            return None;
        };
        Self::from_char(c).or(match c {
            'c' | 'C' => Some(Self::Clear),
            '%' => Some(Self::Percent),
            _ => None,
        })
    }

    /// Maps a keypad button to an intent. A button either names an `action`
    /// (`clear`, `back`, `percent`, `equals`) or carries a single character
    /// `value` to insert; the action wins when both are present.
    pub fn from_button(action: Option<&str>, value: Option<&str>) -> Option<Self> {
        match action {
            Some("clear") => return Some(Self::Clear),
            Some("back") => return Some(Self::Backspace),
            Some("percent") => return Some(Self::Percent),
            Some("equals") => return Some(Self::Equals),
            _ => {}
        }
        let mut chars = value?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    /// Insertable characters: digits, the decimal point and operators.
    fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' => Some(Self::Digit(c)),
            '.' => Some(Self::Point),
            c => Operator::try_from(c).ok().map(Self::Operator),
        }
    }
}
