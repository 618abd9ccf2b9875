use crate::display::{DisplayOptions, DisplayValue};
use crate::error::EvalError;
use crate::expression::Expression;
use crate::sanitize::sanitize;
use crate::FloatExt;

impl<Real: FloatExt> Expression<Real> {
    /// Calculates the value of the expression.
    ///
    /// Division by zero follows IEEE semantics and yields an infinity (or NaN
    /// for `0 / 0`); callers decide whether that is acceptable.
    pub fn evaluate(&self) -> Real {
        match self {
            Self::Add(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs + rhs, lhs, rhs),
            Self::Div(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs / rhs, lhs, rhs),
            Self::Literal(value) => *value,
            Self::Mul(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs * rhs, lhs, rhs),
            Self::Neg(only) => -only.evaluate(),
            Self::Sub(lhs, rhs) => evaluate_binary_real_op(|lhs, rhs| lhs - rhs, lhs, rhs),
        }
    }

    /// Like [`Expression::evaluate`], but rejects infinite and NaN results.
    pub fn evaluate_finite(&self) -> Result<Real, EvalError> {
        let value = self.evaluate();
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite)
        }
    }
}

fn evaluate_binary_real_op<Real: FloatExt>(
    op: fn(Real, Real) -> Real,
    lhs: &Expression<Real>,
    rhs: &Expression<Real>,
) -> Real {
    op(lhs.evaluate(), rhs.evaluate())
}

/// Runs the full guarded pipeline on arbitrary text: allow-list check,
/// consecutive operator check, parse, evaluate, then display rounding.
pub fn evaluate_str(input: &str, options: &DisplayOptions) -> Result<DisplayValue, EvalError> {
    sanitize(input)?;
    let parsed = Expression::<f64>::parse(input).map_err(|e| EvalError::Parse(Box::new(e)))?;
    let value = parsed.evaluate_finite()?;
    Ok(DisplayValue::new(value, options))
}
