//! Grid container and item style structs.

use layout_geometry::{Line, Size};

use crate::dimension::LengthPercentage;
use crate::placement::{GridAutoFlow, GridPlacement, GridTemplateArea, NamedGridLine};
use crate::template::GridTemplateComponent;
use crate::track::TrackSizingFunction;

/// Everything the grid algorithms read off a container's computed style.
///
/// All fields arrive fully typed; nothing here is parsed from text.
#[derive(Debug, Clone, Default)]
pub struct GridContainerStyle {
    /// `grid-template-columns`.
    pub template_columns: Vec<GridTemplateComponent>,
    /// `grid-template-rows`.
    pub template_rows: Vec<GridTemplateComponent>,
    /// `grid-auto-columns`: sizing of implicit column tracks, cycled.
    pub auto_columns: Vec<TrackSizingFunction>,
    /// `grid-auto-rows`: sizing of implicit row tracks, cycled.
    pub auto_rows: Vec<TrackSizingFunction>,
    /// `grid-template-areas`, already validated to rectangular regions.
    pub template_areas: Vec<GridTemplateArea>,
    /// Explicit line names on the column axis.
    pub column_names: Vec<NamedGridLine>,
    /// Explicit line names on the row axis.
    pub row_names: Vec<NamedGridLine>,
    /// `grid-auto-flow`.
    pub auto_flow: GridAutoFlow,
    /// `column-gap` (width) and `row-gap` (height).
    pub gap: Size<LengthPercentage>,
}

impl GridContainerStyle {
    pub fn new() -> Self {
        Self {
            gap: Size::splat(LengthPercentage::ZERO),
            ..Self::default()
        }
    }
}

/// Per-item placement style.
#[derive(Debug, Clone, Default)]
pub struct GridItemStyle {
    /// `grid-row-start` / `grid-row-end`.
    pub row: Line<GridPlacement>,
    /// `grid-column-start` / `grid-column-end`.
    pub column: Line<GridPlacement>,
}

impl GridItemStyle {
    /// Fully auto-placed item.
    pub fn auto() -> Self {
        Self::default()
    }

    /// Item pinned to a numeric cell range on both axes.
    pub fn with_area(row_start: i16, row_end: i16, column_start: i16, column_end: i16) -> Self {
        Self {
            row: Line::new(GridPlacement::Line(row_start), GridPlacement::Line(row_end)),
            column: Line::new(
                GridPlacement::Line(column_start),
                GridPlacement::Line(column_end),
            ),
        }
    }
}
