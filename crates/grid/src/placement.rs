//! Item placement: definite placements plus the auto-placement algorithm.
//!
//! Spec: CSS Grid Layout Module Level 2, §8.5 Grid Item Placement Algorithm
//! <https://www.w3.org/TR/css-grid-2/#auto-placement-algo>
//!
//! Placement works in flow-relative terms: the major axis is the one the
//! grid grows along (`grid-auto-flow: row` grows rows), the minor axis is
//! the other one. Everything row/column-specific happens at the boundary of
//! [`place_grid_items`]; the passes themselves only know major and minor.

use std::collections::HashMap;
use std::ops::Range;

use layout_geometry::Line;
use layout_style::{GridAutoFlow, GridItemStyle, GridPlacement};

use crate::{GridAxis, SizedNamedLineResolver};

/// An item's definite cell range in the final grid: 1-based, end-exclusive
/// line numbers counted from the first track (leading implicit tracks
/// included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridArea {
    pub row_start: u16,
    pub row_end: u16,
    pub column_start: u16,
    pub column_end: u16,
}

impl GridArea {
    /// 0-based indices of the row tracks this area covers.
    pub fn row_range(&self) -> Range<usize> {
        self.row_start as usize - 1..self.row_end as usize - 1
    }

    /// 0-based indices of the column tracks this area covers.
    pub fn column_range(&self) -> Range<usize> {
        self.column_start as usize - 1..self.column_end as usize - 1
    }

    pub fn track_range(&self, axis: GridAxis) -> Range<usize> {
        match axis {
            GridAxis::Row => self.row_range(),
            GridAxis::Column => self.column_range(),
        }
    }

    pub fn span(&self, axis: GridAxis) -> usize {
        let range = self.track_range(axis);
        range.end - range.start
    }
}

/// Final track count of one axis, split by provenance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackCounts {
    pub leading_implicit: u16,
    pub explicit: u16,
    pub trailing_implicit: u16,
}

impl TrackCounts {
    pub fn total(self) -> usize {
        self.leading_implicit as usize + self.explicit as usize + self.trailing_implicit as usize
    }
}

/// Everything placement decides: one definite area per item (parallel to the
/// input item list) and the final per-axis track counts.
#[derive(Debug, Clone, Default)]
pub struct PlacementOutput {
    pub areas: Vec<GridArea>,
    pub columns: TrackCounts,
    pub rows: TrackCounts,
}

/// One axis of an item's placement after line-name resolution and
/// normalization. `Definite` starts are 1-based explicit-grid lines; zero
/// and negative values land in leading implicit tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisPlacement {
    Definite { start: i16, span: u16 },
    AutoSpan(u16),
}

/// Assign every item a definite cell range, growing the implicit grid where
/// placements or auto-flow overflow the explicit tracks.
pub fn place_grid_items(
    resolver: &SizedNamedLineResolver,
    items: &[GridItemStyle],
    auto_flow: GridAutoFlow,
) -> PlacementOutput {
    let explicit_rows = resolver.explicit_track_count(GridAxis::Row);
    let explicit_columns = resolver.explicit_track_count(GridAxis::Column);

    let placements: Vec<(AxisPlacement, AxisPlacement)> = items
        .iter()
        .map(|item| {
            let row = resolver.resolve_placement(GridAxis::Row, &item.row);
            let column = resolver.resolve_placement(GridAxis::Column, &item.column);
            (
                normalize(&row, explicit_rows),
                normalize(&column, explicit_columns),
            )
        })
        .collect();

    let (row_offset, column_offset) = leading_offsets(&placements);
    let flows_rows = auto_flow.flows_rows();
    let (major_offset, minor_offset, minor_explicit) = if flows_rows {
        (row_offset, column_offset, explicit_columns)
    } else {
        (column_offset, row_offset, explicit_rows)
    };

    let mut placer = Placer {
        grid: OccupancyGrid::default(),
        flows_rows,
        dense: auto_flow.is_dense(),
        major_offset,
        minor_offset,
        minor_tracks: initial_minor_tracks(&placements, flows_rows, minor_offset, minor_explicit),
        major_cursors: HashMap::new(),
        cursor_major: 0,
        cursor_minor: 0,
    };
    let mut areas: Vec<Option<GridArea>> = vec![None; items.len()];
    placer.run_definite_pass(&placements, &mut areas);
    placer.run_major_locked_pass(&placements, &mut areas);
    placer.run_auto_pass(&placements, &mut areas);

    // The three passes cover every normalized constructor pair; the fallback
    // cell is never read.
    let areas: Vec<GridArea> = areas
        .into_iter()
        .map(|area| {
            area.unwrap_or(GridArea { row_start: 1, row_end: 2, column_start: 1, column_end: 2 })
        })
        .collect();

    let rows = axis_counts(row_offset, explicit_rows, areas.iter().map(|area| area.row_end));
    let columns = axis_counts(
        column_offset,
        explicit_columns,
        areas.iter().map(|area| area.column_end),
    );
    tracing::debug!(
        "placed {} item(s) into {} row(s) x {} column(s)",
        areas.len(),
        rows.total(),
        columns.total()
    );

    PlacementOutput { areas, columns, rows }
}

/// Reduce a resolved placement pair to a definite start/span or an auto
/// span. Line 0 does not exist and reads as auto; negative lines count back
/// from the end of the explicit grid (line -1 is the last explicit line,
/// E + 1); equal lines span one track; reversed lines swap.
fn normalize(pair: &Line<GridPlacement>, explicit: u16) -> AxisPlacement {
    let explicit = i16::try_from(explicit).unwrap_or(i16::MAX);
    let to_line = |raw: i16| -> Option<i16> {
        match raw {
            0 => None,
            line if line < 0 => Some(explicit + 2 + line),
            line => Some(line),
        }
    };

    match (&pair.start, &pair.end) {
        (GridPlacement::Line(raw_start), GridPlacement::Line(raw_end)) => {
            match (to_line(*raw_start), to_line(*raw_end)) {
                (Some(start), Some(end)) => {
                    let (start, end) = if start == end {
                        (start, start + 1)
                    } else if start > end {
                        (end, start)
                    } else {
                        (start, end)
                    };
                    AxisPlacement::Definite { start, span: (end - start) as u16 }
                }
                (Some(start), None) => AxisPlacement::Definite { start, span: 1 },
                (None, Some(end)) => AxisPlacement::Definite { start: end - 1, span: 1 },
                (None, None) => AxisPlacement::AutoSpan(1),
            }
        }
        (GridPlacement::Line(raw_start), GridPlacement::Span(span)) => {
            let span = (*span).max(1);
            to_line(*raw_start)
                .map_or(AxisPlacement::AutoSpan(span), |start| AxisPlacement::Definite {
                    start,
                    span,
                })
        }
        (GridPlacement::Span(span), GridPlacement::Line(raw_end)) => {
            let span = (*span).max(1);
            to_line(*raw_end).map_or(AxisPlacement::AutoSpan(span), |end| {
                AxisPlacement::Definite { start: end - span as i16, span }
            })
        }
        (GridPlacement::Line(raw_start), _) => to_line(*raw_start)
            .map_or(AxisPlacement::AutoSpan(1), |start| AxisPlacement::Definite {
                start,
                span: 1,
            }),
        (_, GridPlacement::Line(raw_end)) => to_line(*raw_end)
            .map_or(AxisPlacement::AutoSpan(1), |end| AxisPlacement::Definite {
                start: end - 1,
                span: 1,
            }),
        (GridPlacement::Span(span), _) | (_, GridPlacement::Span(span)) => {
            AxisPlacement::AutoSpan((*span).max(1))
        }
        _ => AxisPlacement::AutoSpan(1),
    }
}

/// How many implicit tracks each axis needs before line 1, from definite
/// placements starting at or before line 0.
fn leading_offsets(placements: &[(AxisPlacement, AxisPlacement)]) -> (i16, i16) {
    let mut row_offset = 0_i16;
    let mut column_offset = 0_i16;
    for (row, column) in placements {
        if let AxisPlacement::Definite { start, .. } = row {
            row_offset = row_offset.max(1 - start);
        }
        if let AxisPlacement::Definite { start, .. } = column {
            column_offset = column_offset.max(1 - start);
        }
    }
    (row_offset, column_offset)
}

/// Minor-axis track count before auto placement runs: explicit tracks plus
/// leading implicit, widened to cover every definite minor placement and
/// the widest auto span.
fn initial_minor_tracks(
    placements: &[(AxisPlacement, AxisPlacement)],
    flows_rows: bool,
    minor_offset: i16,
    minor_explicit: u16,
) -> usize {
    let mut tracks = (minor_explicit as i16 + minor_offset) as usize;
    for (row, column) in placements {
        let minor = if flows_rows { column } else { row };
        match minor {
            AxisPlacement::Definite { start, span } => {
                tracks = tracks.max((start - 1 + minor_offset + *span as i16) as usize);
            }
            AxisPlacement::AutoSpan(span) => tracks = tracks.max(*span as usize),
        }
    }
    tracks.max(1)
}

/// 0-based final-grid track index of a 1-based explicit-grid start line.
fn track_of(start: i16, offset: i16) -> usize {
    (start - 1 + offset) as usize
}

fn axis_counts(offset: i16, explicit: u16, ends: impl Iterator<Item = u16>) -> TrackCounts {
    let base = offset as usize + explicit as usize;
    let max_track = ends.map(|end| end as usize - 1).fold(base, usize::max);
    TrackCounts {
        leading_implicit: offset as u16,
        explicit,
        trailing_implicit: (max_track - base) as u16,
    }
}

/// Mutable placement state shared by the three passes.
struct Placer {
    grid: OccupancyGrid,
    flows_rows: bool,
    dense: bool,
    major_offset: i16,
    minor_offset: i16,
    minor_tracks: usize,
    /// Sparse per-major-track minor cursors for major-locked items.
    major_cursors: HashMap<usize, usize>,
    cursor_major: usize,
    cursor_minor: usize,
}

impl Placer {
    fn split(&self, pair: &(AxisPlacement, AxisPlacement)) -> (AxisPlacement, AxisPlacement) {
        if self.flows_rows { (pair.0, pair.1) } else { (pair.1, pair.0) }
    }

    fn make_area(
        &self,
        major_track: usize,
        major_span: usize,
        minor_track: usize,
        minor_span: usize,
    ) -> GridArea {
        let (row, row_span, column, column_span) = if self.flows_rows {
            (major_track, major_span, minor_track, minor_span)
        } else {
            (minor_track, minor_span, major_track, major_span)
        };
        GridArea {
            row_start: (row + 1) as u16,
            row_end: (row + 1 + row_span) as u16,
            column_start: (column + 1) as u16,
            column_end: (column + 1 + column_span) as u16,
        }
    }

    /// Items definite in both axes claim their cells first.
    fn run_definite_pass(
        &mut self,
        placements: &[(AxisPlacement, AxisPlacement)],
        areas: &mut [Option<GridArea>],
    ) {
        for (index, pair) in placements.iter().enumerate() {
            let (major, minor) = self.split(pair);
            if let (
                AxisPlacement::Definite { start: major_start, span: major_span },
                AxisPlacement::Definite { start: minor_start, span: minor_span },
            ) = (major, minor)
            {
                let major_track = track_of(major_start, self.major_offset);
                let minor_track = track_of(minor_start, self.minor_offset);
                let (major_span, minor_span) = (major_span as usize, minor_span as usize);
                self.minor_tracks = self.minor_tracks.max(minor_track + minor_span);
                self.grid.mark(
                    major_track..major_track + major_span,
                    minor_track..minor_track + minor_span,
                );
                areas[index] = Some(self.make_area(major_track, major_span, minor_track, minor_span));
            }
        }
    }

    /// Items locked to a major track but auto in the minor axis slot into
    /// the first free minor position of their track, growing the minor axis
    /// when the track has no gap wide enough.
    fn run_major_locked_pass(
        &mut self,
        placements: &[(AxisPlacement, AxisPlacement)],
        areas: &mut [Option<GridArea>],
    ) {
        for (index, pair) in placements.iter().enumerate() {
            let (major, minor) = self.split(pair);
            if let (
                AxisPlacement::Definite { start, span: major_span },
                AxisPlacement::AutoSpan(minor_span),
            ) = (major, minor)
            {
                let major_track = track_of(start, self.major_offset);
                let (major_span, minor_span) = (major_span as usize, minor_span as usize);
                let mut minor = if self.dense {
                    0
                } else {
                    self.major_cursors.get(&major_track).copied().unwrap_or(0)
                };
                while !self.grid.range_is_free(
                    major_track..major_track + major_span,
                    minor..minor + minor_span,
                ) {
                    minor += 1;
                }
                self.grid
                    .mark(major_track..major_track + major_span, minor..minor + minor_span);
                self.minor_tracks = self.minor_tracks.max(minor + minor_span);
                self.major_cursors.insert(major_track, minor + minor_span);
                areas[index] = Some(self.make_area(major_track, major_span, minor, minor_span));
            }
        }
    }

    /// Remaining items run under the auto-placement cursor, in order.
    fn run_auto_pass(
        &mut self,
        placements: &[(AxisPlacement, AxisPlacement)],
        areas: &mut [Option<GridArea>],
    ) {
        for (index, pair) in placements.iter().enumerate() {
            let (major, minor) = self.split(pair);
            match (major, minor) {
                (AxisPlacement::AutoSpan(major_span), AxisPlacement::Definite { start, span }) => {
                    let minor_track = track_of(start, self.minor_offset);
                    let (major_span, minor_span) = (major_span as usize, span as usize);
                    let major_track =
                        self.place_definite_minor(major_span, minor_track, minor_span);
                    areas[index] =
                        Some(self.make_area(major_track, major_span, minor_track, minor_span));
                }
                (AxisPlacement::AutoSpan(major_span), AxisPlacement::AutoSpan(minor_span)) => {
                    let (major_span, minor_span) = (major_span as usize, minor_span as usize);
                    let (major_track, minor_track) = self.place_auto(major_span, minor_span);
                    areas[index] =
                        Some(self.make_area(major_track, major_span, minor_track, minor_span));
                }
                _ => {}
            }
        }
    }

    /// Slot an item with a fixed minor position into the first major track
    /// (from the cursor) where it fits.
    fn place_definite_minor(
        &mut self,
        major_span: usize,
        minor_track: usize,
        minor_span: usize,
    ) -> usize {
        self.minor_tracks = self.minor_tracks.max(minor_track + minor_span);
        if self.dense {
            self.cursor_major = 0;
        } else if minor_track < self.cursor_minor {
            // The cursor may not move backwards within a major track.
            self.cursor_major += 1;
        }
        let mut major = self.cursor_major;
        while !self
            .grid
            .range_is_free(major..major + major_span, minor_track..minor_track + minor_span)
        {
            major += 1;
        }
        self.grid
            .mark(major..major + major_span, minor_track..minor_track + minor_span);
        self.cursor_major = major;
        self.cursor_minor = minor_track + minor_span;
        major
    }

    /// Walk the cursor forward to the first fully free slot, wrapping at the
    /// minor track count and growing the major axis without bound.
    fn place_auto(&mut self, major_span: usize, minor_span: usize) -> (usize, usize) {
        if self.dense {
            self.cursor_major = 0;
            self.cursor_minor = 0;
        }
        loop {
            if self.cursor_minor + minor_span > self.minor_tracks {
                self.cursor_major += 1;
                self.cursor_minor = 0;
                continue;
            }
            let majors = self.cursor_major..self.cursor_major + major_span;
            let minors = self.cursor_minor..self.cursor_minor + minor_span;
            if self.grid.range_is_free(majors.clone(), minors.clone()) {
                self.grid.mark(majors, minors);
                return (self.cursor_major, self.cursor_minor);
            }
            self.cursor_minor += 1;
        }
    }
}

/// Which cells hold an item already. Rows are major tracks; both axes grow
/// on demand, and cells outside the allocated area read as free.
#[derive(Default)]
struct OccupancyGrid {
    cells: Vec<Vec<bool>>,
}

impl OccupancyGrid {
    fn range_is_free(&self, majors: Range<usize>, minors: Range<usize>) -> bool {
        for major in majors {
            let Some(row) = self.cells.get(major) else { continue };
            for minor in minors.clone() {
                if row.get(minor).copied().unwrap_or(false) {
                    return false;
                }
            }
        }
        true
    }

    fn mark(&mut self, majors: Range<usize>, minors: Range<usize>) {
        for major in majors {
            if self.cells.len() <= major {
                self.cells.resize_with(major + 1, Vec::new);
            }
            let row = &mut self.cells[major];
            if row.len() < minors.end {
                row.resize(minors.end, false);
            }
            for minor in minors.clone() {
                row[minor] = true;
            }
        }
    }
}
