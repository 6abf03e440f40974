//! Resolution of named grid lines and areas to numeric line indices.
//!
//! Spec: CSS Grid Layout Module Level 2, §8.3 Line-based Placement
//! <https://www.w3.org/TR/css-grid-2/#line-placement>
//!
//! There are no errors in this module: every input has a CSS-mandated
//! numeric fallback. A reference to a name that exists nowhere resolves
//! into the first implicit line beyond the explicit grid, signed by the
//! requested direction — this is spec behavior, not a best-effort guess,
//! and reference test suites depend on the exact formula.

use std::collections::HashMap;

use layout_geometry::Line;
use layout_style::{GridContainerStyle, GridPlacement, GridPlacementPair};

use crate::GridAxis;

/// Which end of a placement pair a name is being resolved for. Decides the
/// implicit area-name suffix and the search direction of named spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Start,
    End,
}

impl Side {
    fn suffix(self) -> &'static str {
        match self {
            Self::Start => "-start",
            Self::End => "-end",
        }
    }
}

/// Per-axis name → line-list maps, built once per container per layout pass
/// from the container style alone.
///
/// The fallback math additionally needs the explicit track count of each
/// axis, which only exists after template expansion; [`Self::into_sized`]
/// injects it, and only the sized resolver can resolve placements. The
/// two-phase split keeps the pipeline ordering honest in the types.
#[derive(Debug, Clone, Default)]
pub struct NamedLineResolver {
    column_lines: HashMap<String, Vec<u16>>,
    row_lines: HashMap<String, Vec<u16>>,
}

impl NamedLineResolver {
    /// Collect explicit named lines and the `<area>-start` / `<area>-end`
    /// names every template area implies, then sort and deduplicate each
    /// per-name line list.
    pub fn new(style: &GridContainerStyle) -> Self {
        let mut resolver = Self::default();

        for line in &style.column_names {
            insert_line(&mut resolver.column_lines, line.name.clone(), line.index);
        }
        for line in &style.row_names {
            insert_line(&mut resolver.row_lines, line.name.clone(), line.index);
        }

        for area in &style.template_areas {
            insert_line(
                &mut resolver.column_lines,
                format!("{}-start", area.name),
                area.column_start,
            );
            insert_line(
                &mut resolver.column_lines,
                format!("{}-end", area.name),
                area.column_end,
            );
            insert_line(
                &mut resolver.row_lines,
                format!("{}-start", area.name),
                area.row_start,
            );
            insert_line(
                &mut resolver.row_lines,
                format!("{}-end", area.name),
                area.row_end,
            );
        }

        for lines in resolver
            .column_lines
            .values_mut()
            .chain(resolver.row_lines.values_mut())
        {
            lines.sort_unstable();
            lines.dedup();
        }

        resolver
    }

    /// The sorted, deduplicated line list bound to `name` on `axis`.
    pub fn lines(&self, axis: GridAxis, name: &str) -> &[u16] {
        let map = match axis {
            GridAxis::Column => &self.column_lines,
            GridAxis::Row => &self.row_lines,
        };
        map.get(name).map_or(&[], Vec::as_slice)
    }

    /// Attach the explicit track counts produced by template expansion,
    /// yielding a resolver able to apply the implicit-grid fallback.
    pub fn into_sized(self, explicit_columns: u16, explicit_rows: u16) -> SizedNamedLineResolver {
        SizedNamedLineResolver {
            names: self,
            explicit_columns,
            explicit_rows,
        }
    }
}

/// A [`NamedLineResolver`] plus per-axis explicit track counts.
#[derive(Debug, Clone)]
pub struct SizedNamedLineResolver {
    names: NamedLineResolver,
    explicit_columns: u16,
    explicit_rows: u16,
}

impl SizedNamedLineResolver {
    pub fn explicit_track_count(&self, axis: GridAxis) -> u16 {
        match axis {
            GridAxis::Column => self.explicit_columns,
            GridAxis::Row => self.explicit_rows,
        }
    }

    /// Resolve one placement pair to purely numeric placements.
    ///
    /// The output contains only `Auto`, `Line` and `Span` variants; no named
    /// placement survives. Resolution is pure, so re-resolving against an
    /// unchanged resolver is idempotent.
    pub fn resolve_placement(
        &self,
        axis: GridAxis,
        placement: &Line<GridPlacement>,
    ) -> Line<GridPlacement> {
        if !placement.contains_named() {
            return placement.clone();
        }

        let start = self.resolve_line_name(axis, &placement.start, Side::Start);
        let end = self.resolve_line_name(axis, &placement.end, Side::End);

        // Named spans resolve only once the opposite end is a concrete line.
        let (start, end) = match (start, end) {
            (GridPlacement::Line(anchor), GridPlacement::NamedSpan(name, count)) => {
                let line = self.nth_line_from(axis, &name, count, anchor, Side::End);
                (GridPlacement::Line(anchor), GridPlacement::Line(line))
            }
            (GridPlacement::NamedSpan(name, count), GridPlacement::Line(anchor)) => {
                let line = self.nth_line_from(axis, &name, count, anchor, Side::Start);
                (GridPlacement::Line(line), GridPlacement::Line(anchor))
            }
            pair => pair,
        };

        Line::new(degrade_named_span(start), degrade_named_span(end))
    }

    /// Resolve a `NamedLine` to a numeric line; other variants pass through.
    fn resolve_line_name(
        &self,
        axis: GridAxis,
        placement: &GridPlacement,
        side: Side,
    ) -> GridPlacement {
        let GridPlacement::NamedLine(name, nth) = placement else {
            return placement.clone();
        };

        let nth = if *nth == 0 { 1 } else { *nth };
        let lines = self.lookup(axis, name, side);
        let explicit = i16::try_from(self.explicit_track_count(axis)).unwrap_or(i16::MAX);

        let resolved = if nth > 0 {
            let position = nth as usize;
            if let Some(line) = lines.get(position - 1) {
                *line as i16
            } else {
                // Extend logically past the explicit grid: the k-th missing
                // entry is line E + 1 + k.
                let missing = (position - lines.len()) as i16;
                explicit + 1 + missing
            }
        } else {
            let position = nth.unsigned_abs() as usize;
            if position <= lines.len() {
                lines[lines.len() - position] as i16
            } else {
                let missing = (position - lines.len()) as i16;
                -(explicit + 1 + missing)
            }
        };

        GridPlacement::Line(resolved)
    }

    /// The `count`-th line named `name` strictly past `anchor` in the
    /// direction implied by `side` (after for an end, before for a start).
    fn nth_line_from(&self, axis: GridAxis, name: &str, count: u16, anchor: i16, side: Side) -> i16 {
        let explicit = i16::try_from(self.explicit_track_count(axis)).unwrap_or(i16::MAX);
        // Normalize a negative anchor to a positive position first.
        let anchor = if anchor < 0 { explicit + 1 + anchor } else { anchor };
        let count = count.max(1) as usize;
        let lines = self.lookup(axis, name, side);

        let matches: Vec<i16> = match side {
            Side::End => lines
                .iter()
                .map(|line| *line as i16)
                .filter(|line| *line > anchor)
                .collect(),
            Side::Start => lines
                .iter()
                .rev()
                .map(|line| *line as i16)
                .filter(|line| *line < anchor)
                .collect(),
        };

        if let Some(line) = matches.get(count - 1) {
            *line
        } else {
            let missing = (count - matches.len()) as i16;
            match side {
                Side::End => explicit + 1 + missing,
                Side::Start => -(explicit + 1 + missing),
            }
        }
    }

    /// Direct name lookup, retrying with the implicit area suffix for the
    /// side being resolved (area-name compatibility).
    fn lookup(&self, axis: GridAxis, name: &str, side: Side) -> &[u16] {
        let direct = self.names.lines(axis, name);
        if !direct.is_empty() {
            return direct;
        }
        let mut suffixed = String::with_capacity(name.len() + side.suffix().len());
        suffixed.push_str(name);
        suffixed.push_str(side.suffix());
        self.names.lines(axis, &suffixed)
    }
}

/// A named span that found no anchor degrades to `span 1`.
fn degrade_named_span(placement: GridPlacement) -> GridPlacement {
    match placement {
        GridPlacement::NamedSpan(..) => GridPlacement::Span(1),
        other => other,
    }
}

fn insert_line(map: &mut HashMap<String, Vec<u16>>, name: String, index: u16) {
    map.entry(name).or_default().push(index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_style::{GridTemplateArea, NamedGridLine};

    fn style_with_columns(names: &[(&str, u16)]) -> GridContainerStyle {
        GridContainerStyle {
            column_names: names
                .iter()
                .map(|(name, index)| NamedGridLine::new(*name, *index))
                .collect(),
            ..GridContainerStyle::new()
        }
    }

    fn resolve_columns(
        resolver: &SizedNamedLineResolver,
        start: GridPlacement,
        end: GridPlacement,
    ) -> Line<GridPlacement> {
        resolver.resolve_placement(GridAxis::Column, &Line::new(start, end))
    }

    #[test]
    fn line_lists_are_sorted_and_deduplicated() {
        let style = style_with_columns(&[("col", 3), ("col", 1), ("col", 3), ("col", 2)]);
        let resolver = NamedLineResolver::new(&style);
        assert_eq!(resolver.lines(GridAxis::Column, "col"), &[1, 2, 3]);
        assert_eq!(resolver.lines(GridAxis::Column, "missing"), &[] as &[u16]);
    }

    #[test]
    fn areas_contribute_start_and_end_lines_per_axis() {
        let style = GridContainerStyle {
            template_areas: vec![GridTemplateArea {
                name: "header".into(),
                row_start: 1,
                row_end: 2,
                column_start: 1,
                column_end: 4,
            }],
            ..GridContainerStyle::new()
        };
        let resolver = NamedLineResolver::new(&style);
        assert_eq!(resolver.lines(GridAxis::Column, "header-start"), &[1]);
        assert_eq!(resolver.lines(GridAxis::Column, "header-end"), &[4]);
        assert_eq!(resolver.lines(GridAxis::Row, "header-start"), &[1]);
        assert_eq!(resolver.lines(GridAxis::Row, "header-end"), &[2]);
    }

    #[test]
    fn nth_occurrence_from_both_ends() {
        let style = style_with_columns(&[("col", 1), ("col", 2), ("col", 3)]);
        let resolver = NamedLineResolver::new(&style).into_sized(2, 0);

        for (nth, expected) in [(1, 1), (2, 2), (3, 3), (-1, 3), (-2, 2), (-3, 1)] {
            let pair = resolve_columns(
                &resolver,
                GridPlacement::NamedLine("col".into(), nth),
                GridPlacement::Auto,
            );
            assert_eq!(pair.start, GridPlacement::Line(expected), "nth = {nth}");
        }

        // n = 0 is treated as n = 1.
        let pair = resolve_columns(
            &resolver,
            GridPlacement::NamedLine("col".into(), 0),
            GridPlacement::Auto,
        );
        assert_eq!(pair.start, GridPlacement::Line(1));
    }

    #[test]
    fn nonexistent_name_fallback_formula() {
        // E = 3: NamedLine(ghost, +k) resolves to E + 1 + k, and
        // NamedLine(ghost, -k) to -(E + 1 + k).
        let resolver = NamedLineResolver::new(&GridContainerStyle::new()).into_sized(3, 3);

        for k in 1..=4_i16 {
            let pair = resolve_columns(
                &resolver,
                GridPlacement::NamedLine("ghost".into(), k),
                GridPlacement::NamedLine("ghost".into(), -k),
            );
            assert_eq!(pair.start, GridPlacement::Line(3 + 1 + k));
            assert_eq!(pair.end, GridPlacement::Line(-(3 + 1 + k)));
        }
    }

    #[test]
    fn short_list_extends_past_explicit_grid() {
        // Two occurrences, E = 4: the third occurrence is the first missing
        // entry, line E + 1 + 1.
        let style = style_with_columns(&[("col", 2), ("col", 4)]);
        let resolver = NamedLineResolver::new(&style).into_sized(4, 0);

        let pair = resolve_columns(
            &resolver,
            GridPlacement::NamedLine("col".into(), 3),
            GridPlacement::Auto,
        );
        assert_eq!(pair.start, GridPlacement::Line(6));
    }

    #[test]
    fn area_suffix_retry_on_miss() {
        let style = GridContainerStyle {
            template_areas: vec![GridTemplateArea {
                name: "main".into(),
                row_start: 2,
                row_end: 3,
                column_start: 1,
                column_end: 3,
            }],
            ..GridContainerStyle::new()
        };
        let resolver = NamedLineResolver::new(&style).into_sized(2, 2);

        // Resolving "main" as a start retries as "main-start"; as an end,
        // as "main-end".
        let pair = resolve_columns(
            &resolver,
            GridPlacement::named("main"),
            GridPlacement::named("main"),
        );
        assert_eq!(pair.start, GridPlacement::Line(1));
        assert_eq!(pair.end, GridPlacement::Line(3));
    }

    #[test]
    fn named_span_searches_from_anchor() {
        let style = style_with_columns(&[("col", 1), ("col", 2), ("col", 3)]);
        let resolver = NamedLineResolver::new(&style).into_sized(2, 0);

        // End span: second "col" strictly after line 1 is line 3.
        let pair = resolve_columns(
            &resolver,
            GridPlacement::Line(1),
            GridPlacement::NamedSpan("col".into(), 2),
        );
        assert_eq!(pair.end, GridPlacement::Line(3));

        // Start span: first "col" strictly before line 3 is line 2.
        let pair = resolve_columns(
            &resolver,
            GridPlacement::NamedSpan("col".into(), 1),
            GridPlacement::Line(3),
        );
        assert_eq!(pair.start, GridPlacement::Line(2));

        // Span past the available occurrences extends past the grid.
        let pair = resolve_columns(
            &resolver,
            GridPlacement::Line(3),
            GridPlacement::NamedSpan("col".into(), 2),
        );
        // No "col" lies after line 3, so both matches are missing:
        // line E + 1 + 2.
        assert_eq!(pair.end, GridPlacement::Line(5));
    }

    #[test]
    fn anchorless_named_span_degrades_to_span_one() {
        let resolver = NamedLineResolver::new(&GridContainerStyle::new()).into_sized(2, 2);
        let pair = resolve_columns(
            &resolver,
            GridPlacement::NamedSpan("col".into(), 2),
            GridPlacement::NamedSpan("col".into(), 3),
        );
        assert_eq!(pair.start, GridPlacement::Span(1));
        assert_eq!(pair.end, GridPlacement::Span(1));
    }

    #[test]
    fn numeric_pairs_pass_through_unchanged() {
        let resolver = NamedLineResolver::new(&GridContainerStyle::new()).into_sized(3, 3);
        let pair = Line::new(GridPlacement::Line(-2), GridPlacement::Span(2));
        assert_eq!(resolver.resolve_placement(GridAxis::Column, &pair), pair);

        let auto = Line::new(GridPlacement::Auto, GridPlacement::Auto);
        assert_eq!(resolver.resolve_placement(GridAxis::Row, &auto), auto);
    }

    #[test]
    fn resolution_is_idempotent() {
        let style = style_with_columns(&[("first", 1), ("middle", 2), ("last", 3)]);
        let resolver = NamedLineResolver::new(&style).into_sized(2, 2);

        let placement = Line::new(GridPlacement::named("first"), GridPlacement::named("middle"));
        let once = resolver.resolve_placement(GridAxis::Column, &placement);
        let twice = resolver.resolve_placement(GridAxis::Column, &placement);
        assert_eq!(once, twice);
        assert_eq!(once.start, GridPlacement::Line(1));
        assert_eq!(once.end, GridPlacement::Line(2));
    }
}
