//! Typed style values consumed by the layout algorithms.
//!
//! Styles arrive here already parsed; this crate defines the computed-value
//! data model (CSS Values and Units Level 4, CSS Grid Level 2) and the
//! resolution arithmetic the sizing algorithms build on.

mod container;
mod dimension;
mod error;
mod placement;
mod template;
mod track;

pub use container::{GridContainerStyle, GridItemStyle};
pub use dimension::{
    AvailableSpace, CalcExpr, Dimension, LengthPercentage, LengthPercentageAuto, MaybeMath,
};
pub use error::StyleError;
pub use placement::{
    GridAutoFlow, GridPlacement, GridPlacementPair, GridTemplateArea, NamedGridLine,
};
pub use template::{GridRepetition, GridTemplateComponent, RepetitionCount};
pub use track::TrackSizingFunction;
