//! Grid item placement values and named grid structure.
//!
//! Spec: CSS Grid Layout Module Level 2, §8 Placing Grid Items
//! <https://www.w3.org/TR/css-grid-2/#placement>

use layout_geometry::Line;

/// One end of a grid item's placement along one axis.
///
/// Line numbers are 1-based; negative numbers count from the end of the
/// explicit grid. Named variants are resolved to numeric lines once per
/// layout pass and never survive resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GridPlacement {
    /// No placement specified; the auto-placement algorithm decides.
    #[default]
    Auto,
    /// A specific grid line.
    Line(i16),
    /// Span this many tracks from the opposite end.
    Span(u16),
    /// The nth line carrying this name (nth from the back when negative,
    /// `0` is treated as `1`).
    NamedLine(String, i16),
    /// Span until the nth matching named line past the opposite end.
    NamedSpan(String, u16),
}

impl GridPlacement {
    /// Whether this end pins the item to a specific line.
    pub fn is_definite(&self) -> bool {
        matches!(self, Self::Line(_))
    }

    /// Whether resolving this end needs the container's named-line maps.
    pub fn is_named(&self) -> bool {
        matches!(self, Self::NamedLine(..) | Self::NamedSpan(..))
    }

    /// Shorthand for a named line with the default first occurrence.
    pub fn named(name: impl Into<String>) -> Self {
        Self::NamedLine(name.into(), 1)
    }
}

/// Helpers over a start/end placement pair.
pub trait GridPlacementPair {
    /// Whether either end references a line name.
    fn contains_named(&self) -> bool;
    /// The span when one is specified on either end.
    fn indefinite_span(&self) -> u16;
}

impl GridPlacementPair for Line<GridPlacement> {
    fn contains_named(&self) -> bool {
        self.start.is_named() || self.end.is_named()
    }

    fn indefinite_span(&self) -> u16 {
        match (&self.start, &self.end) {
            (GridPlacement::Span(span), _) | (_, GridPlacement::Span(span)) => (*span).max(1),
            (_, _) => 1,
        }
    }
}

/// A named region of the explicit grid, as declared by
/// `grid-template-areas`. Bounds are 1-based line numbers.
///
/// Each area implicitly contributes `<name>-start` / `<name>-end` line
/// names on both axes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTemplateArea {
    pub name: String,
    pub row_start: u16,
    pub row_end: u16,
    pub column_start: u16,
    pub column_end: u16,
}

/// An explicitly named grid line on one axis. Multiple entries may share a
/// name; the resolver collects, sorts and deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGridLine {
    pub name: String,
    /// 1-based line index.
    pub index: u16,
}

impl NamedGridLine {
    pub fn new(name: impl Into<String>, index: u16) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// Auto-placement flow direction.
///
/// Spec: §8.5 Grid Item Placement Algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridAutoFlow {
    /// Fill each row in turn, adding rows as needed.
    #[default]
    Row,
    /// Fill each column in turn, adding columns as needed.
    Column,
    /// Row flow with dense packing (backfill earlier holes).
    RowDense,
    /// Column flow with dense packing.
    ColumnDense,
}

impl GridAutoFlow {
    /// Whether holes left by earlier items are revisited.
    pub fn is_dense(self) -> bool {
        matches!(self, Self::RowDense | Self::ColumnDense)
    }

    /// Whether the primary flow direction is the row axis.
    pub fn flows_rows(self) -> bool {
        matches!(self, Self::Row | Self::RowDense)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_predicates() {
        assert!(GridPlacement::Line(3).is_definite());
        assert!(!GridPlacement::Auto.is_definite());
        assert!(GridPlacement::named("header").is_named());
        assert!(GridPlacement::NamedSpan("col".into(), 2).is_named());
        assert!(!GridPlacement::Span(2).is_named());
    }

    #[test]
    fn pair_span_defaults_to_one() {
        let pair = Line::new(GridPlacement::Auto, GridPlacement::Auto);
        assert_eq!(pair.indefinite_span(), 1);

        let spanned = Line::new(GridPlacement::Auto, GridPlacement::Span(3));
        assert_eq!(spanned.indefinite_span(), 3);
    }

    #[test]
    fn pair_detects_named_ends() {
        let named = Line::new(GridPlacement::named("side"), GridPlacement::Auto);
        assert!(named.contains_named());

        let numeric = Line::new(GridPlacement::Line(1), GridPlacement::Span(2));
        assert!(!numeric.contains_named());
    }

    #[test]
    fn auto_flow_predicates() {
        assert!(GridAutoFlow::RowDense.is_dense());
        assert!(!GridAutoFlow::Column.is_dense());
        assert!(GridAutoFlow::Row.flows_rows());
        assert!(!GridAutoFlow::ColumnDense.flows_rows());
    }
}
