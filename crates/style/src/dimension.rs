//! Optional-length values and their resolution arithmetic.
//!
//! Spec: CSS Values and Units Module Level 4
//! <https://www.w3.org/TR/css-values-4/>
//!
//! Percentages and `calc()` need a basis to resolve against; an indefinite
//! basis makes the value unresolvable. Unresolvable is modeled as `None`
//! throughout, never as a float sentinel, and the `maybe_*` arithmetic
//! spells out how `None` propagates.

/// A `calc()` expression canonicalized at construction into the linear form
/// `length + factor × basis`.
///
/// Nested sums and products fold into this pair, which is all that remains
/// of `calc()` at computed-value time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalcExpr {
    /// Absolute pixel term.
    pub length: f32,
    /// Coefficient applied to the percentage basis.
    pub percent_factor: f32,
}

impl CalcExpr {
    pub fn new(length: f32, percent_factor: f32) -> Self {
        Self {
            length,
            percent_factor,
        }
    }

    /// Evaluate against a percentage basis, if one is available.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        if self.percent_factor == 0.0 {
            Some(self.length)
        } else {
            basis.map(|value| self.percent_factor.mul_add(value, self.length))
        }
    }

    /// Sum of two folded expressions.
    pub fn checked_add(self, other: Self) -> Self {
        Self {
            length: self.length + other.length,
            percent_factor: self.percent_factor + other.percent_factor,
        }
    }

    /// Scale both terms by a unitless factor.
    pub fn scale(self, factor: f32) -> Self {
        Self {
            length: self.length * factor,
            percent_factor: self.percent_factor * factor,
        }
    }
}

/// A length or percentage, the value space of fixed track breadths and gaps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthPercentage {
    /// Absolute length in pixels.
    Length(f32),
    /// Fraction of the basis, stored as `0.0..=1.0`.
    Percent(f32),
    /// Folded `calc()` expression.
    Calc(CalcExpr),
}

impl Default for LengthPercentage {
    fn default() -> Self {
        Self::ZERO
    }
}

impl LengthPercentage {
    pub const ZERO: Self = Self::Length(0.0);

    /// Resolve against `basis`; `None` when a percentage or percentage-bearing
    /// `calc()` meets an indefinite basis.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|value| value * fraction),
            Self::Calc(expr) => expr.resolve(basis),
        }
    }

    /// Like [`Self::resolve`], collapsing unresolvable to `0.0`.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }

    /// Whether resolution depends on the percentage basis.
    pub fn uses_percentage(self) -> bool {
        match self {
            Self::Length(_) => false,
            Self::Percent(_) => true,
            Self::Calc(expr) => expr.percent_factor != 0.0,
        }
    }
}

/// A length, percentage, or `auto`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthPercentageAuto {
    Length(f32),
    Percent(f32),
    Calc(CalcExpr),
    #[default]
    Auto,
}

impl LengthPercentageAuto {
    /// Resolve against `basis`; `auto` is never resolvable by arithmetic.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|value| value * fraction),
            Self::Calc(expr) => expr.resolve(basis),
            Self::Auto => None,
        }
    }

    /// Like [`Self::resolve`], collapsing unresolvable to `0.0`.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }
}

impl From<LengthPercentage> for LengthPercentageAuto {
    fn from(value: LengthPercentage) -> Self {
        match value {
            LengthPercentage::Length(inner) => Self::Length(inner),
            LengthPercentage::Percent(inner) => Self::Percent(inner),
            LengthPercentage::Calc(expr) => Self::Calc(expr),
        }
    }
}

/// The full sizing-property value space, adding the intrinsic keywords.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    Length(f32),
    Percent(f32),
    Calc(CalcExpr),
    #[default]
    Auto,
    MinContent,
    MaxContent,
    FitContent,
    Stretch,
}

impl Dimension {
    /// Resolve against `basis`. The keyword variants require content
    /// measurement, not arithmetic, and always report unresolvable here.
    pub fn resolve(self, basis: Option<f32>) -> Option<f32> {
        match self {
            Self::Length(value) => Some(value),
            Self::Percent(fraction) => basis.map(|value| value * fraction),
            Self::Calc(expr) => expr.resolve(basis),
            Self::Auto | Self::MinContent | Self::MaxContent | Self::FitContent | Self::Stretch => {
                None
            }
        }
    }

    /// Like [`Self::resolve`], collapsing unresolvable to `0.0`.
    pub fn resolve_or_zero(self, basis: Option<f32>) -> f32 {
        self.resolve(basis).unwrap_or(0.0)
    }
}

/// Constraint under which one axis of a box is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvailableSpace {
    /// A definite number of pixels is available.
    Definite(f32),
    /// Size under the min-content constraint.
    MinContent,
    /// Size under the max-content constraint.
    MaxContent,
}

impl AvailableSpace {
    pub fn is_definite(self) -> bool {
        matches!(self, Self::Definite(_))
    }

    /// The definite pixel value, if any.
    pub fn into_option(self) -> Option<f32> {
        match self {
            Self::Definite(value) => Some(value),
            Self::MinContent | Self::MaxContent => None,
        }
    }

    /// Shrink a definite constraint; indefinite constraints pass through.
    pub fn maybe_sub(self, amount: f32) -> Self {
        match self {
            Self::Definite(value) => Self::Definite(value - amount),
            other => other,
        }
    }
}

impl From<f32> for AvailableSpace {
    fn from(value: f32) -> Self {
        Self::Definite(value)
    }
}

/// Arithmetic over possibly-unresolved values.
///
/// "Unresolvable propagates, resolvable short-circuits": a `None` operand
/// poisons sums and differences but yields to the other side in `min`/`max`.
pub trait MaybeMath<Rhs, Output> {
    fn maybe_add(self, rhs: Rhs) -> Output;
    fn maybe_sub(self, rhs: Rhs) -> Output;
    fn maybe_min(self, rhs: Rhs) -> Output;
    fn maybe_max(self, rhs: Rhs) -> Output;
    /// Clamp between optional bounds. The max bound applies before the min
    /// bound, so a degenerate `min > max` pair yields `min`.
    fn maybe_clamp(self, min: Rhs, max: Rhs) -> Output;
}

impl MaybeMath<Option<f32>, Option<f32>> for Option<f32> {
    fn maybe_add(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(other)) => Some(lhs + other),
            (None, _) | (_, None) => None,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(other)) => Some(lhs - other),
            (None, _) | (_, None) => None,
        }
    }

    fn maybe_min(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(other)) => Some(lhs.min(other)),
            (Some(lhs), None) => Some(lhs),
            (None, Some(other)) => Some(other),
            (None, None) => None,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> Option<f32> {
        match (self, rhs) {
            (Some(lhs), Some(other)) => Some(lhs.max(other)),
            (Some(lhs), None) => Some(lhs),
            (None, Some(other)) => Some(other),
            (None, None) => None,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> Option<f32> {
        self.map(|value| value.maybe_clamp(min, max))
    }
}

impl MaybeMath<f32, Option<f32>> for Option<f32> {
    fn maybe_add(self, rhs: f32) -> Option<f32> {
        self.map(|lhs| lhs + rhs)
    }

    fn maybe_sub(self, rhs: f32) -> Option<f32> {
        self.map(|lhs| lhs - rhs)
    }

    fn maybe_min(self, rhs: f32) -> Option<f32> {
        self.map(|lhs| lhs.min(rhs))
    }

    fn maybe_max(self, rhs: f32) -> Option<f32> {
        self.map(|lhs| lhs.max(rhs))
    }

    fn maybe_clamp(self, min: f32, max: f32) -> Option<f32> {
        self.map(|lhs| lhs.min(max).max(min))
    }
}

impl MaybeMath<Option<f32>, f32> for f32 {
    fn maybe_add(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(other) => self + other,
            None => self,
        }
    }

    fn maybe_sub(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(other) => self - other,
            None => self,
        }
    }

    fn maybe_min(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(other) => self.min(other),
            None => self,
        }
    }

    fn maybe_max(self, rhs: Option<f32>) -> f32 {
        match rhs {
            Some(other) => self.max(other),
            None => self,
        }
    }

    fn maybe_clamp(self, min: Option<f32>, max: Option<f32>) -> f32 {
        // Max before min: a min above the max bound wins.
        let limited = match max {
            Some(upper) => self.min(upper),
            None => self,
        };
        match min {
            Some(lower) => limited.max(lower),
            None => limited,
        }
    }
}
