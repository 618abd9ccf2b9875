/// Top-level parseable calculation.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression<Real> {
    // Binary real ops.
    Add(Box<Expression<Real>>, Box<Expression<Real>>),
    Div(Box<Expression<Real>>, Box<Expression<Real>>),
    Mul(Box<Expression<Real>>, Box<Expression<Real>>),
    Sub(Box<Expression<Real>>, Box<Expression<Real>>),

    // Unary real ops.
    Neg(Box<Expression<Real>>),

    // Constant.
    Literal(Real),
}
