//! Keypad calculator core.
//!
//! Keystrokes are accumulated into an arithmetic expression one intent at a
//! time (digit, point, operator, percent, backspace, clear, equals). While the
//! user types, the expression is previewed; on equals it is evaluated and the
//! result replaces the expression so the next operator chains from it.
//!
//! Evaluation never executes the input as code. Text is first checked
//! against an allow-list and for runs of operators, then parsed by a small
//! [`pest`] grammar and evaluated as a syntax tree.
//!
//! # Example
//!
//! ```rust
//! use keypad_expr::*;
//!
//! let mut calculator = Calculator::default();
//! for key in ["1", "/", "3", "Enter"] {
//!     calculator.press_key(key).unwrap();
//! }
//! assert_eq!(calculator.screen().result, "0.3333333333");
//!
//! let parsed = Expression::<f64>::parse("2 * (3 + 4)").unwrap();
//! assert_eq!(parsed.evaluate(), 14.0);
//! ```

mod accumulator;
mod calculator;
mod display;
mod error;
mod evaluate;
mod expression;
mod intent;
mod parse;
mod sanitize;

/// Uses the [`pest`] parsing expression grammar language.
///
/// ```text
#[doc = include_str!("grammar.pest")]
/// ```
pub mod grammar_doc {}

pub use accumulator::Accumulator;
pub use calculator::*;
pub use display::*;
pub use error::*;
pub use evaluate::evaluate_str;
pub use expression::*;
pub use intent::*;
pub use parse::ParseError;
pub use sanitize::{sanitize, MAX_NESTING_DEPTH};

pub trait FloatExt: num_traits::Float + std::str::FromStr + Send + Sync {}
impl FloatExt for f32 {}
impl FloatExt for f64 {}
