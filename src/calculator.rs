//! A calculator session: the accumulated expression plus the result line,
//! driven one intent at a time.

use tracing::{debug, trace};

use crate::accumulator::Accumulator;
use crate::display::{DisplayOptions, DisplayValue};
use crate::error::InputError;
use crate::intent::Intent;

/// What the result line currently holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Readout {
    Value(DisplayValue),
    /// No preview is available, either because the user is mid-entry or
    /// because the expression does not evaluate yet.
    Blank,
    /// A final evaluation failed.
    Error,
}

/// The two display lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Screen {
    pub expression: String,
    pub result: String,
}

#[derive(Clone, Debug)]
pub struct Calculator {
    accumulator: Accumulator,
    readout: Readout,
    options: DisplayOptions,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(DisplayOptions::default())
    }
}

impl Calculator {
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            accumulator: Accumulator::new(),
            readout: Readout::Value(DisplayValue::zero()),
            options,
        }
    }

    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    pub fn readout(&self) -> Readout {
        self.readout
    }

    /// Renders the current state. An empty expression and a blank readout
    /// both show as `0`.
    pub fn screen(&self) -> Screen {
        let expression = if self.accumulator.is_empty() {
            "0".to_string()
        } else {
            self.accumulator.text()
        };
        let result = match self.readout {
            Readout::Value(value) => value.to_string(),
            Readout::Blank => "0".to_string(),
            Readout::Error => "Error".to_string(),
        };
        Screen { expression, result }
    }

    /// Applies one intent and returns the updated screen.
    ///
    /// Only a digit intent carrying a non-digit character is rejected; every
    /// evaluation failure is absorbed into the readout.
    pub fn apply(&mut self, intent: Intent) -> Result<Screen, InputError> {
        debug!(?intent, expression = %self.accumulator, "applying intent");
        match intent {
            Intent::Digit(digit) => {
                self.accumulator.insert_digit(digit)?;
                self.refresh_preview();
            }
            Intent::Point => {
                self.accumulator.insert_decimal_point();
                self.refresh_preview();
            }
            Intent::Operator(op) => {
                self.accumulator.insert_operator(op);
                self.refresh_preview();
            }
            Intent::Percent => {
                if self.accumulator.percent() {
                    self.refresh_preview();
                }
            }
            Intent::Backspace => {
                if self.accumulator.backspace() {
                    self.refresh_preview();
                }
            }
            Intent::Clear => {
                self.accumulator.clear();
                self.readout = Readout::Value(DisplayValue::zero());
            }
            Intent::Equals => self.equals()?,
        }
        Ok(self.screen())
    }

    /// Maps a keyboard key and applies it. Unmapped keys return `Ok(None)`
    /// and leave the session untouched.
    pub fn press_key(&mut self, key: &str) -> Result<Option<Screen>, InputError> {
        Intent::from_key(key)
            .map(|intent| self.apply(intent))
            .transpose()
    }

    fn refresh_preview(&mut self) {
        self.readout = match self.accumulator.evaluate(true, &self.options) {
            Ok(Some(value)) => Readout::Value(value),
            Ok(None) => Readout::Blank,
            Err(error) => {
                trace!(%error, expression = %self.accumulator, "no preview");
                Readout::Blank
            }
        };
    }

    fn equals(&mut self) -> Result<(), InputError> {
        if self.accumulator.is_empty() {
            return Ok(());
        }
        match self.accumulator.evaluate_final(&self.options) {
            Ok(value) => {
                debug!(%value, expression = %self.accumulator, "committing result");
                self.readout = Readout::Value(value);
                self.accumulator.commit(value)?;
            }
            Err(error) => {
                debug!(%error, expression = %self.accumulator, "equals failed");
                self.readout = Readout::Error;
            }
        }
        Ok(())
    }
}
