use crate::expression::Expression;
use crate::FloatExt;

use once_cell::sync::Lazy;
use pest::error::ErrorVariant;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::{Parser, Position};
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct ExpressionParser;

pub type ParseError = pest::error::Error<Rule>;

impl<Real: FloatExt> Expression<Real> {
    /// Parse the expression from `input`.
    ///
    /// Only numeric literals, `+ - * /`, a leading sign on any operand and
    /// parentheses are accepted. Multiplication and division bind tighter
    /// than addition and subtraction; all binary operators are left
    /// associative.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut pairs = ExpressionParser::parse(Rule::calculation, input)?;
        match pairs.find(|p| p.as_rule() == Rule::expr) {
            Some(expr) => climb_recursive(expr.into_inner()),
            None => Err(ParseError::new_from_pos(
                ErrorVariant::CustomError {
                    message: "Expected an expression".into(),
                },
                Position::from_start(input),
            )),
        }
    }
}

static PRATT_PARSER: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    use Assoc::*;
    use Rule::*;

    PrattParser::new()
        .op(Op::infix(add, Left) | Op::infix(subtract, Left))
        .op(Op::infix(multiply, Left) | Op::infix(divide, Left))
        .op(Op::prefix(neg) | Op::prefix(pos))
});

fn climb_recursive<Real: FloatExt>(input: Pairs<Rule>) -> Result<Expression<Real>, ParseError> {
    PRATT_PARSER
        .map_primary(|pair: Pair<Rule>| match pair.as_rule() {
            Rule::expr => climb_recursive::<Real>(pair.into_inner()),
            Rule::real_literal => {
                let literal_str = pair.as_str();
                literal_str
                    .parse::<Real>()
                    .map(Expression::Literal)
                    .map_err(|_| unexpected(&pair, format!("Unexpected literal: {literal_str}")))
            }
            x => Err(unexpected(&pair, format!("Unexpected primary rule {x:?}"))),
        })
        .map_prefix(|op: Pair<Rule>, rhs| match op.as_rule() {
            Rule::neg => Ok(Expression::Neg(Box::new(rhs?))),
            Rule::pos => rhs,
            x => Err(unexpected(&op, format!("Unexpected unary operator: {x:?}"))),
        })
        .map_infix(|lhs, op: Pair<Rule>, rhs| match op.as_rule() {
            Rule::add => Ok(Expression::Add(Box::new(lhs?), Box::new(rhs?))),
            Rule::subtract => Ok(Expression::Sub(Box::new(lhs?), Box::new(rhs?))),
            Rule::multiply => Ok(Expression::Mul(Box::new(lhs?), Box::new(rhs?))),
            Rule::divide => Ok(Expression::Div(Box::new(lhs?), Box::new(rhs?))),
            x => Err(unexpected(&op, format!("Unexpected operator {x:?}"))),
        })
        .parse(input)
}

fn unexpected(pair: &Pair<Rule>, message: String) -> ParseError {
    ParseError::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}
