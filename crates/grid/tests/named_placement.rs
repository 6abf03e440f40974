//! End-to-end named-line and named-area placement through the full layout
//! pipeline, checked against literal pixel rectangles.

use layout_geometry::{Line, Point, Rect, Size};
use layout_grid::{GridLayoutInputs, GridLayoutOutput, compute_grid_layout};
use layout_style::{
    AvailableSpace, GridContainerStyle, GridItemStyle, GridPlacement, GridTemplateArea,
    NamedGridLine, TrackSizingFunction,
};

const EPSILON: f32 = 1e-4;

fn columns(count: usize) -> Vec<layout_style::GridTemplateComponent> {
    (0..count)
        .map(|_| TrackSizingFunction::length(100.0).into())
        .collect()
}

fn layout(style: &GridContainerStyle, items: &[GridItemStyle]) -> GridLayoutOutput {
    let _ = env_logger::builder().is_test(true).try_init();
    let inputs = GridLayoutInputs {
        style,
        items,
        available_space: Size::new(
            AvailableSpace::Definite(1000.0),
            AvailableSpace::Definite(1000.0),
        ),
    };
    compute_grid_layout(&inputs, |_, known, _| {
        Size::new(known.width.unwrap_or(0.0), known.height.unwrap_or(0.0))
    })
}

fn assert_rect(actual: Rect<f32>, expected: Rect<f32>) {
    assert!(
        (actual.location.x - expected.location.x).abs() < EPSILON
            && (actual.location.y - expected.location.y).abs() < EPSILON
            && (actual.size.width - expected.size.width).abs() < EPSILON
            && (actual.size.height - expected.size.height).abs() < EPSILON,
        "expected {expected:?}, got {actual:?}"
    );
}

#[test]
fn named_lines_resolve_to_the_first_column() {
    let style = GridContainerStyle {
        template_columns: columns(2),
        template_rows: columns(1),
        column_names: vec![
            NamedGridLine::new("first", 1),
            NamedGridLine::new("middle", 2),
            NamedGridLine::new("last", 3),
        ],
        ..GridContainerStyle::new()
    };
    let items = vec![GridItemStyle {
        column: Line::new(GridPlacement::named("first"), GridPlacement::named("middle")),
        ..GridItemStyle::auto()
    }];

    let output = layout(&style, &items);
    assert_eq!(output.items[0].area.column_start, 1);
    assert_eq!(output.items[0].area.column_end, 2);
    assert_rect(
        output.items[0].rect,
        Rect::new(Point::ZERO, Size::new(100.0, 100.0)),
    );
}

#[test]
fn area_bound_item_covers_the_header_region() {
    // A 3x3 grid of 100px tracks with a "header" area over rows 1-2 and
    // columns 1-4: the bare area name resolves through the implicit
    // "-start"/"-end" line names.
    let style = GridContainerStyle {
        template_columns: columns(3),
        template_rows: columns(3),
        template_areas: vec![GridTemplateArea {
            name: "header".into(),
            row_start: 1,
            row_end: 2,
            column_start: 1,
            column_end: 4,
        }],
        ..GridContainerStyle::new()
    };
    let items = vec![GridItemStyle {
        row: Line::new(GridPlacement::named("header"), GridPlacement::named("header")),
        column: Line::new(GridPlacement::named("header"), GridPlacement::named("header")),
    }];

    let output = layout(&style, &items);
    assert_rect(
        output.items[0].rect,
        Rect::new(Point::ZERO, Size::new(300.0, 100.0)),
    );
}

#[test]
fn nth_occurrence_selects_the_second_column() {
    // "col" names lines 1, 2 and 3; occurrences 2 and 3 bound the second
    // 100px column.
    let style = GridContainerStyle {
        template_columns: columns(2),
        template_rows: columns(1),
        column_names: vec![
            NamedGridLine::new("col", 1),
            NamedGridLine::new("col", 2),
            NamedGridLine::new("col", 3),
        ],
        ..GridContainerStyle::new()
    };
    let items = vec![GridItemStyle {
        column: Line::new(
            GridPlacement::NamedLine("col".into(), 2),
            GridPlacement::NamedLine("col".into(), 3),
        ),
        ..GridItemStyle::auto()
    }];

    let output = layout(&style, &items);
    assert_eq!(output.items[0].area.column_start, 2);
    assert_eq!(output.items[0].area.column_end, 3);
    assert_rect(
        output.items[0].rect,
        Rect::new(Point::new(100.0, 0.0), Size::new(100.0, 100.0)),
    );
}

#[test]
fn named_start_with_numeric_end_spans_two_columns() {
    let style = GridContainerStyle {
        template_columns: columns(3),
        template_rows: columns(1),
        column_names: vec![NamedGridLine::new("start", 1)],
        ..GridContainerStyle::new()
    };
    let items = vec![GridItemStyle {
        column: Line::new(GridPlacement::named("start"), GridPlacement::Line(3)),
        ..GridItemStyle::auto()
    }];

    let output = layout(&style, &items);
    assert_eq!(output.items[0].area.column_start, 1);
    assert_eq!(output.items[0].area.column_end, 3);
    assert_rect(
        output.items[0].rect,
        Rect::new(Point::ZERO, Size::new(200.0, 100.0)),
    );
}

#[test]
fn missing_name_falls_into_the_implicit_grid() {
    // E = 2 explicit columns: an unknown name resolves to line E + 2 = 4,
    // one implicit track past the explicit grid.
    let style = GridContainerStyle {
        template_columns: columns(2),
        template_rows: columns(1),
        ..GridContainerStyle::new()
    };
    let items = vec![GridItemStyle {
        column: Line::new(GridPlacement::named("ghost"), GridPlacement::Auto),
        ..GridItemStyle::auto()
    }];

    let output = layout(&style, &items);
    assert_eq!(output.items[0].area.column_start, 4);
    assert_eq!(output.items[0].area.column_end, 5);
    assert_eq!(output.columns.len(), 4);
}
