//! CSS math expressions — the `calc()` subset used for deferred length
//! arithmetic. Spec: <https://www.w3.org/TR/css-values-3/#calc-notation>
//!
//! Measurements taken from computed styles may carry different units, and
//! converting them eagerly would bake one environment's bases into the
//! result. An expression is therefore kept as a value type (operands plus
//! operators) and serialized once, at the styling boundary; the rendering
//! engine performs the subtraction with full unit knowledge.

#![forbid(unsafe_code)]

use core::fmt;
use cssparser::BasicParseErrorKind;
use cssparser::ParseError as CssParseError;
use cssparser::{Parser, ParserInput, Token};
use gutter_values::{ResolutionContext, compute_length_px, parse_length, parse_length_value};

pub use gutter_values::Length;

/// Parse error for `calc()` parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The input did not start with a `calc(` function token.
    NotACalcFunction,
    /// A token inside the expression did not match the supported grammar.
    UnexpectedToken,
}

/// Additive operator between two operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CalcOp {
    Add,
    Sub,
}

impl CalcOp {
    /// CSS serialization symbol for the operator.
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
        }
    }
}

/// One operand of a `calc()` expression.
///
/// A measurement that does not parse as a supported length travels through
/// verbatim as `Raw`: the composed expression stays syntactically intact and
/// the rendering engine's tolerance for invalid operands decides the
/// outcome. The alternative, dropping or zeroing the operand, would silently
/// change the arithmetic.
#[derive(Clone, Debug, PartialEq)]
pub enum CalcTerm {
    Length(Length),
    Raw(String),
}

impl CalcTerm {
    /// Parse a computed-style string into a length operand, falling back to
    /// carrying the text verbatim.
    pub fn parse_or_raw(text: &str) -> Self {
        match parse_length_value(text) {
            Ok(length) => Self::Length(length),
            Err(_) => Self::Raw(text.trim().to_owned()),
        }
    }

    /// Resolve the operand to device pixels, if the environment allows it.
    pub fn resolve_px(&self, env: &ResolutionContext) -> Option<f32> {
        match self {
            Self::Length(length) => compute_length_px(*length, env),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for CalcTerm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length(length) => fmt::Display::fmt(length, formatter),
            Self::Raw(text) => formatter.write_str(text),
        }
    }
}

/// A `calc()` expression: a head operand followed by operator/operand pairs,
/// evaluated left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct CalcExpr {
    pub head: CalcTerm,
    pub tail: Vec<(CalcOp, CalcTerm)>,
}

impl CalcExpr {
    pub const fn new(head: CalcTerm) -> Self {
        Self {
            head,
            tail: Vec::new(),
        }
    }

    /// `minuend - subtrahend_a - subtrahend_b`, the shape the synchronizer
    /// composes from its three measurements.
    pub fn difference(minuend: CalcTerm, subtrahend_a: CalcTerm, subtrahend_b: CalcTerm) -> Self {
        Self {
            head: minuend,
            tail: vec![(CalcOp::Sub, subtrahend_a), (CalcOp::Sub, subtrahend_b)],
        }
    }

    /// Resolve the whole expression to device pixels in a single common
    /// unit. `None` when any operand is raw text or cannot be resolved in
    /// this environment — the deferred analogue of the rendering engine
    /// silently declining an invalid expression.
    pub fn resolve_px(&self, env: &ResolutionContext) -> Option<f32> {
        let mut total = self.head.resolve_px(env)?;
        for (op, term) in &self.tail {
            let operand = term.resolve_px(env)?;
            total = match op {
                CalcOp::Add => total + operand,
                CalcOp::Sub => total - operand,
            };
        }
        Some(total)
    }
}

impl fmt::Display for CalcExpr {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "calc({}", self.head)?;
        for (op, term) in &self.tail {
            write!(formatter, " {} {}", op.symbol(), term)?;
        }
        formatter.write_str(")")
    }
}

/// Parse a serialized `calc()` expression back into the value type.
///
/// Strict on the supported grammar (length/percentage operands, `+`/`-`):
/// this is the inverse of serialization for expressions this crate emits,
/// used to inspect an applied override, not a general CSS math parser.
///
/// # Errors
/// Returns `ParseError::NotACalcFunction` when the input is not a single
/// `calc()` function, `ParseError::UnexpectedToken` on unsupported content.
pub fn parse_calc(text: &str) -> Result<CalcExpr, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    match parser.next() {
        Ok(token) => match token.clone() {
            Token::Function(name) if name.as_ref().eq_ignore_ascii_case("calc") => {}
            _ => return Err(ParseError::NotACalcFunction),
        },
        Err(_) => return Err(ParseError::NotACalcFunction),
    }
    let expr = parser
        .parse_nested_block(|block| parse_operand_chain(block))
        .map_err(|_| ParseError::UnexpectedToken)?;
    if parser.expect_exhausted().is_err() {
        return Err(ParseError::UnexpectedToken);
    }
    Ok(expr)
}

/// Parse `term (op term)*` from inside the function block.
fn parse_operand_chain<'input>(
    block: &mut Parser<'input, '_>,
) -> Result<CalcExpr, CssParseError<'input, ()>> {
    let head = parse_term(block)?;
    let mut expr = CalcExpr::new(head);
    loop {
        let op_token = match block.next() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let op = match op_token {
            Token::Delim('+') => CalcOp::Add,
            Token::Delim('-') => CalcOp::Sub,
            other => {
                return Err(block.new_error(BasicParseErrorKind::UnexpectedToken(other)));
            }
        };
        let term = parse_term(block)?;
        expr.tail.push((op, term));
    }
    Ok(expr)
}

fn parse_term<'input>(
    block: &mut Parser<'input, '_>,
) -> Result<CalcTerm, CssParseError<'input, ()>> {
    match parse_length(block) {
        Ok(length) => Ok(CalcTerm::Length(length)),
        Err(_) => Err(block.new_custom_error(())),
    }
}
