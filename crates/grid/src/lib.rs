//! CSS Grid placement and track sizing.
//!
//! Spec: CSS Grid Layout Module Level 2
//! <https://www.w3.org/TR/css-grid-2/>
//!
//! The subsystem is a single forward pipeline, run once per container per
//! layout invocation:
//!
//! 1. [`NamedLineResolver`] maps line names and area names to numeric lines;
//! 2. template expansion turns `repeat()` notation into a flat track list
//!    (which fixes the explicit track counts the resolver's fallback math
//!    needs, hence the two-phase [`NamedLineResolver::into_sized`] step);
//! 3. placement assigns every item a definite cell range, growing the
//!    implicit grid as needed;
//! 4. track sizing computes final pixel sizes per track.
//!
//! Everything here is pure computation over typed styles; the only outside
//! contact is an opaque content-measurement callback.

mod expansion;
mod layout;
mod named;
mod placement;
mod track_sizing;

pub use expansion::{ExpandedTemplate, ExpandedTrack, TrackOrigin, expand_template};
pub use layout::{GridLayoutInputs, GridLayoutOutput, PlacedGridItem, compute_grid_layout};
pub use named::{NamedLineResolver, SizedNamedLineResolver};
pub use placement::{GridArea, PlacementOutput, TrackCounts, place_grid_items};
pub use track_sizing::{GridTrack, SizingItem, size_tracks};

/// Axis identifier (row or column).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    /// Row axis: tracks are rows, sized along the vertical axis.
    Row,
    /// Column axis: tracks are columns, sized along the horizontal axis.
    Column,
}
