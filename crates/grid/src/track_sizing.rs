//! Grid track sizing algorithm.
//!
//! Spec: CSS Grid Layout Module Level 2, §12 Grid Sizing
//! <https://www.w3.org/TR/css-grid-2/#algo-track-sizing>
//!
//! Tracks carry a base size and a growth limit through five passes:
//! initialization from fixed sizing functions, intrinsic resolution from
//! item contributions, maximization into definite free space, flexible
//! (`fr`) expansion, and the final stretch of `auto` tracks.

mod distribution;
mod flex;
mod intrinsic;

use std::ops::Range;

use layout_style::{AvailableSpace, TrackSizingFunction};

use crate::expansion::{ExpandedTrack, TrackOrigin};

/// One track of an axis while (and after) sizing runs.
#[derive(Debug, Clone)]
pub struct GridTrack {
    pub sizing: TrackSizingFunction,
    pub origin: TrackOrigin,
    /// Current size; the final size once every pass has run.
    pub base_size: f32,
    /// Upper bound for growth passes. `f32::INFINITY` means unlimited; the
    /// intrinsic pass replaces a still-infinite limit with the base size.
    pub growth_limit: f32,
    /// Collapsed `auto-fit` tracks size to zero and take no part in any
    /// distribution.
    pub is_collapsed: bool,
}

impl GridTrack {
    pub fn new(sizing: TrackSizingFunction, origin: TrackOrigin) -> Self {
        Self {
            sizing,
            origin,
            base_size: 0.0,
            growth_limit: f32::INFINITY,
            is_collapsed: false,
        }
    }

    pub fn collapse(&mut self) {
        self.is_collapsed = true;
        self.base_size = 0.0;
        self.growth_limit = 0.0;
    }

    /// Final pixel size of this track.
    pub fn size(&self) -> f32 {
        if self.is_collapsed { 0.0 } else { self.base_size }
    }
}

impl From<ExpandedTrack> for GridTrack {
    fn from(track: ExpandedTrack) -> Self {
        Self::new(track.sizing, track.origin)
    }
}

/// An item's contribution to the axis being sized: the tracks it covers and
/// its min-/max-content sizes in this axis.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingItem {
    pub track_range: Range<usize>,
    pub min_contribution: f32,
    pub max_contribution: f32,
}

/// Run the track sizing algorithm over one axis.
///
/// `inner_size` is the container's definite content-box size in this axis
/// (the percentage basis); `available_space` drives the maximize, flex and
/// stretch passes. Collapsed tracks stay at zero throughout.
pub fn size_tracks(
    tracks: &mut [GridTrack],
    items: &[SizingItem],
    available_space: AvailableSpace,
    inner_size: Option<f32>,
    gap: f32,
) {
    initialize_track_sizes(tracks, inner_size);
    intrinsic::resolve_intrinsic_track_sizes(tracks, items, inner_size, gap);
    distribution::maximize_tracks(tracks, available_space, gap);
    flex::expand_flexible_tracks(tracks, items, available_space, gap);
    flex::stretch_auto_tracks(tracks, available_space, gap);
    tracing::debug!(
        "sized {} track(s), {:.1}px used",
        tracks.len(),
        used_space(tracks)
    );
}

/// §12.4: base sizes start from the fixed part of the min sizing function,
/// growth limits from the fixed part of the max (infinite when the max is
/// intrinsic, flexible, or an unresolvable percentage).
fn initialize_track_sizes(tracks: &mut [GridTrack], inner_size: Option<f32>) {
    for track in tracks.iter_mut() {
        if track.is_collapsed {
            track.base_size = 0.0;
            track.growth_limit = 0.0;
            continue;
        }
        track.base_size = match track.sizing.min_sizing_function() {
            TrackSizingFunction::Fixed(length) => length.resolve_or_zero(inner_size),
            _ => 0.0,
        };
        track.growth_limit = match track.sizing.max_sizing_function() {
            TrackSizingFunction::Fixed(length) => {
                length.resolve(inner_size).unwrap_or(f32::INFINITY)
            }
            _ => f32::INFINITY,
        };
        if track.growth_limit < track.base_size {
            track.growth_limit = track.base_size;
        }
    }
}

/// Sum of base sizes over non-collapsed tracks.
pub(crate) fn used_space(tracks: &[GridTrack]) -> f32 {
    tracks
        .iter()
        .filter(|track| !track.is_collapsed)
        .map(|track| track.base_size)
        .sum()
}

/// Gaps between non-collapsed tracks; gaps adjacent to a collapsed track
/// collapse with it.
pub(crate) fn used_gap_count(tracks: &[GridTrack]) -> usize {
    tracks
        .iter()
        .filter(|track| !track.is_collapsed)
        .count()
        .saturating_sub(1)
}
