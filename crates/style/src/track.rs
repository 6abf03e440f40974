//! Track sizing functions.
//!
//! Spec: CSS Grid Layout Module Level 2, §7.2.1 Track Sizing Functions
//! <https://www.w3.org/TR/css-grid-2/#track-sizing>

use crate::dimension::LengthPercentage;
use crate::error::StyleError;

/// The sizing rule for one grid track.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackSizingFunction {
    /// A definite length or percentage.
    Fixed(LengthPercentage),
    /// Size to the minimum content contribution of the track's items.
    MinContent,
    /// Size to the maximum content contribution of the track's items.
    MaxContent,
    /// `fit-content(limit)`: max-content sizing clamped by `limit`.
    FitContent(LengthPercentage),
    /// `auto`: `minmax(auto, max-content)` behavior.
    Auto,
    /// A flexible share of free space, in `fr` units.
    Flex(f32),
    /// `minmax(min, max)`. Construct via [`TrackSizingFunction::minmax`];
    /// neither slot may itself be a `Minmax`.
    Minmax(Box<TrackSizingFunction>, Box<TrackSizingFunction>),
}

impl TrackSizingFunction {
    /// A fixed track of `value` pixels.
    pub fn length(value: f32) -> Self {
        Self::Fixed(LengthPercentage::Length(value))
    }

    /// A fixed track sized to `fraction` of the container.
    pub fn percent(fraction: f32) -> Self {
        Self::Fixed(LengthPercentage::Percent(fraction))
    }

    /// Construct a `minmax()` track.
    ///
    /// # Errors
    /// Rejects a `Minmax` in either slot; nesting is an authoring bug and
    /// fails fast rather than being silently repaired.
    pub fn minmax(min: Self, max: Self) -> Result<Self, StyleError> {
        if matches!(min, Self::Minmax(..)) {
            return Err(StyleError::NestedMinmax { slot: "min" });
        }
        if matches!(max, Self::Minmax(..)) {
            return Err(StyleError::NestedMinmax { slot: "max" });
        }
        Ok(Self::Minmax(Box::new(min), Box::new(max)))
    }

    /// The min component of this sizing function (`self` when not a minmax).
    pub fn min_sizing_function(&self) -> &Self {
        static AUTO: TrackSizingFunction = TrackSizingFunction::Auto;
        match self {
            Self::Minmax(min, _) => min,
            // fit-content(l) behaves as minmax(auto, ...) for the min, and a
            // lone <flex> as minmax(auto, <flex>).
            Self::FitContent(_) | Self::Flex(_) => &AUTO,
            other => other,
        }
    }

    /// The max component of this sizing function (`self` when not a minmax).
    pub fn max_sizing_function(&self) -> &Self {
        match self {
            Self::Minmax(_, max) => max,
            other => other,
        }
    }

    /// True for `fr` tracks, and for `minmax()` whose max is flexible.
    pub fn is_flexible(&self) -> bool {
        match self {
            Self::Flex(_) => true,
            Self::Minmax(_, max) => matches!(**max, Self::Flex(_)),
            Self::Fixed(_)
            | Self::MinContent
            | Self::MaxContent
            | Self::FitContent(_)
            | Self::Auto => false,
        }
    }

    /// The flex factor, or `0.0` for inflexible tracks.
    pub fn flex_factor(&self) -> f32 {
        match self {
            Self::Flex(factor) => *factor,
            Self::Minmax(_, max) => max.flex_factor(),
            Self::Fixed(_)
            | Self::MinContent
            | Self::MaxContent
            | Self::FitContent(_)
            | Self::Auto => 0.0,
        }
    }

    /// Whether any component is a definite length or percentage.
    ///
    /// Auto-repeat counting is only defined over tracks where this holds.
    pub fn has_fixed_component(&self) -> bool {
        match self {
            Self::Fixed(_) | Self::FitContent(_) => true,
            Self::Minmax(min, max) => min.has_fixed_component() || max.has_fixed_component(),
            Self::MinContent | Self::MaxContent | Self::Auto | Self::Flex(_) => false,
        }
    }

    /// Whether any component sizes from content.
    pub fn has_intrinsic_sizing_function(&self) -> bool {
        match self {
            Self::MinContent | Self::MaxContent | Self::FitContent(_) | Self::Auto => true,
            Self::Minmax(min, max) => {
                min.has_intrinsic_sizing_function() || max.has_intrinsic_sizing_function()
            }
            Self::Fixed(_) | Self::Flex(_) => false,
        }
    }

    /// Whether any component resolves against the container's size.
    pub fn uses_percentage(&self) -> bool {
        match self {
            Self::Fixed(inner) | Self::FitContent(inner) => inner.uses_percentage(),
            Self::Minmax(min, max) => min.uses_percentage() || max.uses_percentage(),
            Self::MinContent | Self::MaxContent | Self::Auto | Self::Flex(_) => false,
        }
    }

    /// The definite pixel size of this track against `parent_size`, used only
    /// when counting `auto-fill`/`auto-fit` repetitions.
    ///
    /// For `minmax()` the max wins when it resolves, widened by the min when
    /// both do; only then does the min alone stand in.
    pub fn definite_value(&self, parent_size: Option<f32>) -> Option<f32> {
        match self {
            Self::Fixed(inner) | Self::FitContent(inner) => inner.resolve(parent_size),
            Self::Minmax(min, max) => {
                let min_value = min.definite_value(parent_size);
                match (max.definite_value(parent_size), min_value) {
                    (Some(max_value), Some(min_value)) => Some(max_value.max(min_value)),
                    (Some(max_value), None) => Some(max_value),
                    (None, resolved_min) => resolved_min,
                }
            }
            Self::MinContent | Self::MaxContent | Self::Auto | Self::Flex(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    /// Build a flat minmax, asserting construction succeeded.
    fn minmax(min: TrackSizingFunction, max: TrackSizingFunction) -> TrackSizingFunction {
        let track = TrackSizingFunction::minmax(min, max).ok();
        assert!(track.is_some(), "flat minmax must construct");
        track.unwrap_or(TrackSizingFunction::Auto)
    }

    #[test]
    fn minmax_rejects_nesting_in_either_slot() {
        let inner = minmax(
            TrackSizingFunction::length(10.0),
            TrackSizingFunction::Flex(1.0),
        );

        assert_eq!(
            TrackSizingFunction::minmax(inner.clone(), TrackSizingFunction::Auto),
            Err(StyleError::NestedMinmax { slot: "min" })
        );
        assert_eq!(
            TrackSizingFunction::minmax(TrackSizingFunction::Auto, inner),
            Err(StyleError::NestedMinmax { slot: "max" })
        );
    }

    #[test]
    fn minmax_with_flexible_max_is_flexible() {
        let track = minmax(
            TrackSizingFunction::length(200.0),
            TrackSizingFunction::Flex(2.0),
        );
        assert!(track.is_flexible());
        assert!((track.flex_factor() - 2.0).abs() < EPSILON);
        assert!(track.has_fixed_component());
        assert!(!TrackSizingFunction::Auto.is_flexible());

        // A lone <flex> means minmax(auto, <flex>).
        assert_eq!(
            TrackSizingFunction::Flex(1.0).min_sizing_function(),
            &TrackSizingFunction::Auto
        );
    }

    #[test]
    fn definite_value_prefers_max() {
        // minmax(100px, 300px): the max wins.
        let both_fixed = minmax(
            TrackSizingFunction::length(100.0),
            TrackSizingFunction::length(300.0),
        );
        assert_eq!(both_fixed.definite_value(None), Some(300.0));

        // minmax(400px, 300px): max still wins but is widened by the min.
        let degenerate = minmax(
            TrackSizingFunction::length(400.0),
            TrackSizingFunction::length(300.0),
        );
        assert_eq!(degenerate.definite_value(None), Some(400.0));

        // minmax(200px, 1fr): only the min resolves.
        let flex_max = minmax(
            TrackSizingFunction::length(200.0),
            TrackSizingFunction::Flex(1.0),
        );
        assert_eq!(flex_max.definite_value(None), Some(200.0));

        // Percentage components only resolve against a definite parent.
        let percent = TrackSizingFunction::percent(0.5);
        assert_eq!(percent.definite_value(None), None);
        assert_eq!(percent.definite_value(Some(600.0)), Some(300.0));
    }

    #[test]
    fn intrinsic_and_percentage_predicates() {
        assert!(TrackSizingFunction::Auto.has_intrinsic_sizing_function());
        assert!(
            TrackSizingFunction::FitContent(LengthPercentage::Length(50.0))
                .has_intrinsic_sizing_function()
        );
        assert!(!TrackSizingFunction::length(10.0).has_intrinsic_sizing_function());
        assert!(TrackSizingFunction::percent(0.1).uses_percentage());
        assert!(!TrackSizingFunction::Flex(1.0).uses_percentage());
    }
}
