//! CSS <length> and <percentage> values for layout measurement plumbing.
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>

#![forbid(unsafe_code)]

use core::fmt;
use cssparser::{Parser, ParserInput, Token};

/// Parse error for value parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The next token did not match the expected grammar.
    UnexpectedToken,
}

/// Supported subset of CSS <length>: px, em, rem, vw, vh, plus <percentage>
/// and unitless zero.
///
/// Percentages live alongside lengths because a computed `left` or
/// `min-width` can be percentage-valued and must travel through the same
/// operand pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
    ViewportWidth,
    ViewportHeight,
    Percent,
}

impl LengthUnit {
    /// CSS serialization suffix for the unit ("px", "%", ...).
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Pixels => "px",
            Self::Ems => "em",
            Self::RootEms => "rem",
            Self::ViewportWidth => "vw",
            Self::ViewportHeight => "vh",
            Self::Percent => "%",
        }
    }
}

/// A CSS <length> or <percentage> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    pub const fn new(value: f32, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Pixel-valued length.
    pub const fn px(value: f32) -> Self {
        Self::new(value, LengthUnit::Pixels)
    }

    /// The canonical zero length (`0px`).
    pub const fn zero() -> Self {
        Self::px(0.0)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}{}", self.value, self.unit.suffix())
    }
}

/// Viewport metrics used to evaluate viewport-relative units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
}

/// Environment for resolving a `Length` to device pixels.
///
/// The synchronizer itself never resolves; it defers arithmetic to the
/// rendering engine. Resolution happens where a concrete number is wanted:
/// scenario tests and the demo driver.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolutionContext {
    /// Viewport metrics, required for vw/vh.
    pub viewport: Option<Viewport>,
    /// Current element font size in px, for em.
    pub font_size_px: f32,
    /// Root element font size in px, for rem.
    pub root_font_size_px: f32,
    /// Basis for percentage values (the containing block's width for
    /// horizontal properties). `None` when no basis is known.
    pub percent_basis_px: Option<f32>,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self {
            viewport: None,
            font_size_px: 16.0,
            root_font_size_px: 16.0,
            percent_basis_px: None,
        }
    }
}

/// Compute the pixel value for a given `Length` using the current environment.
///
/// - Pixels: returns the raw value.
/// - Ems/RootEms: scales by the provided font sizes.
/// - Viewport-relative (vw/vh): requires a viewport.
/// - Percent: requires a percentage basis.
pub fn compute_length_px(length: Length, env: &ResolutionContext) -> Option<f32> {
    match length.unit {
        LengthUnit::Pixels => Some(length.value),
        LengthUnit::Ems => Some(length.value * env.font_size_px),
        LengthUnit::RootEms => Some(length.value * env.root_font_size_px),
        LengthUnit::ViewportWidth => env
            .viewport
            .map(|viewport_metrics| length.value * (viewport_metrics.width_px as f32) / 100.0),
        LengthUnit::ViewportHeight => env
            .viewport
            .map(|viewport_metrics| length.value * (viewport_metrics.height_px as f32) / 100.0),
        LengthUnit::Percent => env
            .percent_basis_px
            .map(|basis_px| basis_px * length.value / 100.0),
    }
}

/// Parse a CSS <length> or <percentage> (§6.2, §5.1). Supports
/// px/em/rem/vw/vh, percentages, and unitless zero.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a
/// supported value.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    match input.next() {
        Ok(token) => match token.clone() {
            Token::Dimension { value, unit, .. } => {
                let lower = unit.as_ref().to_ascii_lowercase();
                let unit_kind = match lower.as_str() {
                    "px" => LengthUnit::Pixels,
                    "em" => LengthUnit::Ems,
                    "rem" => LengthUnit::RootEms,
                    "vw" => LengthUnit::ViewportWidth,
                    "vh" => LengthUnit::ViewportHeight,
                    _ => return Err(ParseError::UnexpectedToken),
                };
                Ok(Length {
                    value,
                    unit: unit_kind,
                })
            }
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => Ok(Length {
                // Integer percentages reconstruct exactly; unit_value alone
                // would reintroduce the /100 rounding.
                value: int_value.map_or(unit_value * 100.0, |whole| whole as f32),
                unit: LengthUnit::Percent,
            }),
            Token::Number { value, .. } if value == 0.0 => Ok(Length::zero()),
            _ => Err(ParseError::UnexpectedToken),
        },
        Err(_) => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a whole computed-style string as a single value ("240px", "50%").
///
/// Trailing input after the value is rejected: a computed-style query
/// returns exactly one value for a longhand property.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` on any non-value or trailing input.
pub fn parse_length_value(text: &str) -> Result<Length, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let length = parse_length(&mut parser)?;
    if parser.expect_exhausted().is_err() {
        return Err(ParseError::UnexpectedToken);
    }
    Ok(length)
}
