//! Grid container layout driver.
//!
//! Runs the whole pipeline for one container: template expansion, named-line
//! resolution, placement, per-axis track sizing (columns first, then rows
//! with known item widths), and finally item rectangle computation.

use std::ops::Range;

use layout_geometry::{Point, Rect, Size};
use layout_style::{
    AvailableSpace, GridContainerStyle, GridItemStyle, TrackSizingFunction,
};

use crate::GridAxis;
use crate::expansion::{ExpandedTemplate, TrackOrigin, expand_template};
use crate::named::NamedLineResolver;
use crate::placement::{GridArea, TrackCounts, place_grid_items};
use crate::track_sizing::{GridTrack, SizingItem, size_tracks};

/// Everything a grid layout invocation consumes.
#[derive(Debug, Clone, Copy)]
pub struct GridLayoutInputs<'inputs> {
    pub style: &'inputs GridContainerStyle,
    pub items: &'inputs [GridItemStyle],
    pub available_space: Size<AvailableSpace>,
}

/// One laid-out item: its definite cell range and its pixel rectangle
/// relative to the container's content box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGridItem {
    pub area: GridArea,
    pub rect: Rect<f32>,
}

/// The laid-out grid: final tracks per axis, per-item rectangles (parallel
/// to the input item list), and the container's content size.
#[derive(Debug, Clone)]
pub struct GridLayoutOutput {
    pub columns: Vec<GridTrack>,
    pub rows: Vec<GridTrack>,
    pub items: Vec<PlacedGridItem>,
    pub explicit_columns: u16,
    pub explicit_rows: u16,
    pub content_size: Size<f32>,
}

/// Lay out one grid container.
///
/// `measure` is called once per item per candidate constraint to obtain
/// content contributions: `(item_index, known_dimensions, available_space)`
/// to measured size. Running under an intrinsic [`AvailableSpace`] yields
/// the container's own min-/max-content size in `content_size`.
pub fn compute_grid_layout(
    inputs: &GridLayoutInputs<'_>,
    mut measure: impl FnMut(usize, Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32>,
) -> GridLayoutOutput {
    let style = inputs.style;
    let inner = Size::new(
        inputs.available_space.width.into_option(),
        inputs.available_space.height.into_option(),
    );
    let gap = Size::new(
        style.gap.width.resolve_or_zero(inner.width),
        style.gap.height.resolve_or_zero(inner.height),
    );

    let expanded_columns = expand_template(
        &style.template_columns,
        inputs.available_space.width,
        inner.width,
        gap.width,
    );
    let expanded_rows = expand_template(
        &style.template_rows,
        inputs.available_space.height,
        inner.height,
        gap.height,
    );

    let resolver = NamedLineResolver::new(style).into_sized(
        expanded_columns.explicit_track_count(),
        expanded_rows.explicit_track_count(),
    );
    let placement = place_grid_items(&resolver, inputs.items, style.auto_flow);

    let mut columns = build_axis_tracks(&expanded_columns, placement.columns, &style.auto_columns);
    let mut rows = build_axis_tracks(&expanded_rows, placement.rows, &style.auto_rows);
    collapse_empty_auto_fit(
        &mut columns,
        &expanded_columns,
        placement.columns,
        &placement.areas,
        GridAxis::Column,
    );
    collapse_empty_auto_fit(
        &mut rows,
        &expanded_rows,
        placement.rows,
        &placement.areas,
        GridAxis::Row,
    );

    // Columns first: row contributions depend on the width items will span.
    let column_items =
        column_sizing_items(&placement.areas, inputs.available_space.height, &mut measure);
    size_tracks(
        &mut columns,
        &column_items,
        inputs.available_space.width,
        inner.width,
        gap.width,
    );

    let row_items = row_sizing_items(
        &placement.areas,
        inputs.available_space.height,
        &columns,
        gap.width,
        &mut measure,
    );
    size_tracks(
        &mut rows,
        &row_items,
        inputs.available_space.height,
        inner.height,
        gap.height,
    );

    let (column_offsets, content_width) = track_offsets(&columns, gap.width);
    let (row_offsets, content_height) = track_offsets(&rows, gap.height);
    let items = placement
        .areas
        .iter()
        .map(|area| PlacedGridItem {
            area: *area,
            rect: Rect::new(
                Point::new(
                    span_start(&column_offsets, &area.column_range()),
                    span_start(&row_offsets, &area.row_range()),
                ),
                Size::new(
                    span_size(&columns, area.column_range(), gap.width),
                    span_size(&rows, area.row_range(), gap.height),
                ),
            ),
        })
        .collect();

    tracing::debug!(
        "grid layout: {} column(s) x {} row(s), content {content_width:.1}x{content_height:.1}",
        columns.len(),
        rows.len()
    );

    GridLayoutOutput {
        columns,
        rows,
        items,
        explicit_columns: expanded_columns.explicit_track_count(),
        explicit_rows: expanded_rows.explicit_track_count(),
        content_size: Size::new(content_width, content_height),
    }
}

/// Assemble the final track list of one axis: leading implicit tracks, the
/// expanded template, trailing implicit tracks.
fn build_axis_tracks(
    expanded: &ExpandedTemplate,
    counts: TrackCounts,
    auto_tracks: &[TrackSizingFunction],
) -> Vec<GridTrack> {
    let mut tracks = Vec::with_capacity(counts.total());
    let leading = counts.leading_implicit as isize;
    for position in 0..leading {
        tracks.push(GridTrack::new(
            implicit_sizing(auto_tracks, position - leading),
            TrackOrigin::Implicit,
        ));
    }
    for track in &expanded.tracks {
        tracks.push(GridTrack::new(track.sizing.clone(), track.origin));
    }
    for position in 0..counts.trailing_implicit as isize {
        tracks.push(GridTrack::new(
            implicit_sizing(auto_tracks, position),
            TrackOrigin::Implicit,
        ));
    }
    tracks
}

/// Implicit tracks cycle through the `grid-auto-*` list; tracks before the
/// explicit grid cycle backwards from its end.
fn implicit_sizing(auto_tracks: &[TrackSizingFunction], index: isize) -> TrackSizingFunction {
    if auto_tracks.is_empty() {
        return TrackSizingFunction::Auto;
    }
    let len = auto_tracks.len() as isize;
    auto_tracks[index.rem_euclid(len) as usize].clone()
}

/// `auto-fit` repetition tracks that hold no item collapse to zero before
/// sizing runs.
fn collapse_empty_auto_fit(
    tracks: &mut [GridTrack],
    expanded: &ExpandedTemplate,
    counts: TrackCounts,
    areas: &[GridArea],
    axis: GridAxis,
) {
    if !expanded.is_auto_fit {
        return;
    }
    let leading = counts.leading_implicit as usize;
    for (position, expanded_track) in expanded.tracks.iter().enumerate() {
        if expanded_track.origin != TrackOrigin::AutoRepeat {
            continue;
        }
        let index = leading + position;
        let occupied = areas.iter().any(|area| area.track_range(axis).contains(&index));
        if !occupied && let Some(track) = tracks.get_mut(index) {
            track.collapse();
        }
    }
}

/// Column contributions: min- and max-content widths of each item.
fn column_sizing_items(
    areas: &[GridArea],
    available_height: AvailableSpace,
    measure: &mut impl FnMut(usize, Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32>,
) -> Vec<SizingItem> {
    areas
        .iter()
        .enumerate()
        .map(|(index, area)| {
            let min = measure(
                index,
                Size::NONE,
                Size::new(AvailableSpace::MinContent, available_height),
            )
            .width;
            let max = measure(
                index,
                Size::NONE,
                Size::new(AvailableSpace::MaxContent, available_height),
            )
            .width;
            SizingItem {
                track_range: area.column_range(),
                min_contribution: min,
                max_contribution: max.max(min),
            }
        })
        .collect()
}

/// Row contributions: each item's height at the width its columns grant it.
fn row_sizing_items(
    areas: &[GridArea],
    available_height: AvailableSpace,
    columns: &[GridTrack],
    column_gap: f32,
    measure: &mut impl FnMut(usize, Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32>,
) -> Vec<SizingItem> {
    areas
        .iter()
        .enumerate()
        .map(|(index, area)| {
            let width = span_size(columns, area.column_range(), column_gap);
            let height = measure(
                index,
                Size::new(Some(width), None),
                Size::new(AvailableSpace::Definite(width), available_height),
            )
            .height;
            SizingItem {
                track_range: area.row_range(),
                min_contribution: height,
                max_contribution: height,
            }
        })
        .collect()
}

/// Leading-edge offset of every track plus the total content size. Collapsed
/// tracks sit at the current position and contribute neither size nor gap.
fn track_offsets(tracks: &[GridTrack], gap: f32) -> (Vec<f32>, f32) {
    let mut offsets = Vec::with_capacity(tracks.len());
    let mut position = 0.0;
    let mut seen_track = false;
    for track in tracks {
        if track.is_collapsed {
            offsets.push(position);
            continue;
        }
        if seen_track {
            position += gap;
        }
        offsets.push(position);
        position += track.size();
        seen_track = true;
    }
    (offsets, position)
}

fn span_start(offsets: &[f32], range: &Range<usize>) -> f32 {
    offsets.get(range.start).copied().unwrap_or(0.0)
}

/// Pixel extent of a track range, skipping collapsed tracks and their gaps.
fn span_size(tracks: &[GridTrack], range: Range<usize>, gap: f32) -> f32 {
    let live: Vec<f32> = range
        .filter_map(|index| tracks.get(index))
        .filter(|track| !track.is_collapsed)
        .map(GridTrack::size)
        .collect();
    if live.is_empty() {
        return 0.0;
    }
    live.iter().sum::<f32>() + gap * (live.len() - 1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout_geometry::Line;
    use layout_style::{GridPlacement, GridRepetition, RepetitionCount};

    const EPSILON: f32 = 1e-4;

    /// A measurement callback for items with fixed content sizes.
    fn fixed_measure(
        sizes: Vec<Size<f32>>,
    ) -> impl FnMut(usize, Size<Option<f32>>, Size<AvailableSpace>) -> Size<f32> {
        move |index, known, _| {
            let base = sizes.get(index).copied().unwrap_or(Size::ZERO);
            Size::new(known.width.unwrap_or(base.width), known.height.unwrap_or(base.height))
        }
    }

    fn definite(width: f32, height: f32) -> Size<AvailableSpace> {
        Size::new(AvailableSpace::Definite(width), AvailableSpace::Definite(height))
    }

    #[test]
    fn items_land_in_consecutive_fixed_columns() {
        let style = GridContainerStyle {
            template_columns: vec![
                TrackSizingFunction::length(100.0).into(),
                TrackSizingFunction::length(100.0).into(),
            ],
            template_rows: vec![TrackSizingFunction::length(50.0).into()],
            ..GridContainerStyle::new()
        };
        let items = vec![GridItemStyle::auto(), GridItemStyle::auto()];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: definite(200.0, 50.0),
        };
        let output = compute_grid_layout(&inputs, fixed_measure(vec![Size::ZERO; 2]));

        assert_eq!(
            output.items[0].rect,
            Rect::new(Point::ZERO, Size::new(100.0, 50.0))
        );
        assert_eq!(
            output.items[1].rect,
            Rect::new(Point::new(100.0, 0.0), Size::new(100.0, 50.0))
        );
        assert!((output.content_size.width - 200.0).abs() < EPSILON);
    }

    #[test]
    fn auto_fit_collapses_empty_repeat_tracks() {
        let repetition = GridRepetition::new(
            RepetitionCount::AutoFit,
            vec![TrackSizingFunction::length(100.0)],
        )
        .ok();
        assert!(repetition.is_some());
        let Some(repetition) = repetition else { return };

        let style = GridContainerStyle {
            template_columns: vec![repetition.into()],
            template_rows: vec![TrackSizingFunction::length(50.0).into()],
            ..GridContainerStyle::new()
        };
        let items = vec![GridItemStyle::auto(), GridItemStyle::auto()];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: definite(500.0, 50.0),
        };
        let output = compute_grid_layout(&inputs, fixed_measure(vec![Size::ZERO; 2]));

        assert_eq!(output.columns.len(), 5);
        assert_eq!(
            output.columns.iter().filter(|track| track.is_collapsed).count(),
            3
        );
        // Collapsed tracks contribute nothing to the content size.
        assert!((output.content_size.width - 200.0).abs() < EPSILON);
    }

    #[test]
    fn implicit_rows_cycle_through_grid_auto_rows() {
        let style = GridContainerStyle {
            template_columns: vec![TrackSizingFunction::length(100.0).into()],
            auto_rows: vec![
                TrackSizingFunction::length(40.0),
                TrackSizingFunction::length(80.0),
            ],
            ..GridContainerStyle::new()
        };
        let items = vec![GridItemStyle::auto(); 4];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: definite(100.0, 400.0),
        };
        let output = compute_grid_layout(&inputs, fixed_measure(vec![Size::new(0.0, 10.0); 4]));

        let heights: Vec<f32> = output.rows.iter().map(GridTrack::size).collect();
        assert_eq!(heights, vec![40.0, 80.0, 40.0, 80.0]);
        assert!((output.items[2].rect.location.y - 120.0).abs() < EPSILON);
        assert!((output.content_size.height - 240.0).abs() < EPSILON);
    }

    #[test]
    fn leading_implicit_tracks_cycle_backwards() {
        let style = GridContainerStyle {
            template_columns: vec![TrackSizingFunction::length(100.0).into()],
            auto_columns: vec![
                TrackSizingFunction::length(40.0),
                TrackSizingFunction::length(80.0),
            ],
            ..GridContainerStyle::new()
        };
        // Line -4 normalizes to -1, two lines before the explicit grid, so
        // two leading implicit columns are synthesized.
        let items = vec![GridItemStyle {
            column: Line::new(GridPlacement::Line(-4), GridPlacement::Auto),
            ..GridItemStyle::auto()
        }];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: definite(300.0, 50.0),
        };
        let output = compute_grid_layout(&inputs, fixed_measure(vec![Size::new(0.0, 50.0)]));

        let widths: Vec<f32> = output.columns.iter().map(GridTrack::size).collect();
        // The grid-auto-columns list cycles backwards from the explicit grid.
        assert_eq!(widths, vec![40.0, 80.0, 100.0]);
        assert!((output.items[0].rect.location.x).abs() < EPSILON);
        assert!((output.items[0].rect.size.width - 40.0).abs() < EPSILON);
        assert!((output.content_size.width - 220.0).abs() < EPSILON);
    }

    #[test]
    fn intrinsic_available_space_reports_content_size() {
        let style = GridContainerStyle {
            template_columns: vec![TrackSizingFunction::Auto.into()],
            ..GridContainerStyle::new()
        };
        let items = vec![GridItemStyle::auto()];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: Size::new(AvailableSpace::MaxContent, AvailableSpace::MaxContent),
        };
        let output =
            compute_grid_layout(&inputs, fixed_measure(vec![Size::new(120.0, 30.0)]));
        assert!((output.content_size.width - 120.0).abs() < EPSILON);
        assert!((output.content_size.height - 30.0).abs() < EPSILON);
    }

    #[test]
    fn gap_separates_tracks_and_offsets_items() {
        let style = GridContainerStyle {
            template_columns: vec![
                TrackSizingFunction::length(100.0).into(),
                TrackSizingFunction::length(100.0).into(),
            ],
            template_rows: vec![TrackSizingFunction::length(50.0).into()],
            gap: Size::splat(layout_style::LengthPercentage::Length(10.0)),
            ..GridContainerStyle::new()
        };
        let items = vec![GridItemStyle::auto(), GridItemStyle::auto()];
        let inputs = GridLayoutInputs {
            style: &style,
            items: &items,
            available_space: definite(210.0, 50.0),
        };
        let output = compute_grid_layout(&inputs, fixed_measure(vec![Size::ZERO; 2]));

        assert!((output.items[1].rect.location.x - 110.0).abs() < EPSILON);
        assert!((output.content_size.width - 210.0).abs() < EPSILON);
    }
}
