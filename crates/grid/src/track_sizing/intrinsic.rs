//! Intrinsic track sizing from item contributions.
//!
//! Spec: CSS Grid Layout Module Level 2, §12.5 Resolve Intrinsic Track Sizes
//! <https://www.w3.org/TR/css-grid-2/#algo-content>

use layout_style::TrackSizingFunction;

use super::distribution::{EPSILON, distribute_beyond_limits, distribute_up_to_limits};
use super::{GridTrack, SizingItem};

/// Feed item contributions into intrinsic tracks: single-track items first,
/// then spanning items in ascending span order. Spanning items crossing a
/// flexible track are left to the flex pass, but a non-spanning item on a
/// flexible track still raises its base size (a lone `fr` is
/// `minmax(auto, fr)`). Any growth limit still infinite at the end snaps to
/// its base size.
pub(super) fn resolve_intrinsic_track_sizes(
    tracks: &mut [GridTrack],
    items: &[SizingItem],
    inner_size: Option<f32>,
    gap: f32,
) {
    let mut contributing: Vec<&SizingItem> = items
        .iter()
        .filter(|item| item.track_range.len() <= 1 || !crosses_flexible(tracks, item))
        .collect();
    contributing.sort_by_key(|item| item.track_range.len());

    for item in contributing {
        if item.track_range.len() <= 1 {
            size_single_track(tracks, item, inner_size);
        } else {
            distribute_spanning_item(tracks, item, inner_size, gap);
        }
    }

    for track in tracks.iter_mut() {
        if track.growth_limit.is_infinite() {
            track.growth_limit = track.base_size;
        }
    }
}

pub(super) fn crosses_flexible(tracks: &[GridTrack], item: &SizingItem) -> bool {
    item.track_range
        .clone()
        .any(|index| tracks.get(index).is_some_and(|track| track.sizing.is_flexible()))
}

fn is_intrinsic_min(track: &GridTrack) -> bool {
    matches!(
        track.sizing.min_sizing_function(),
        TrackSizingFunction::MinContent | TrackSizingFunction::MaxContent | TrackSizingFunction::Auto
    )
}

fn is_intrinsic_max(track: &GridTrack) -> bool {
    matches!(
        track.sizing.max_sizing_function(),
        TrackSizingFunction::MinContent
            | TrackSizingFunction::MaxContent
            | TrackSizingFunction::Auto
            | TrackSizingFunction::FitContent(_)
    )
}

/// A single-track item raises its track's base size and growth limit
/// directly.
fn size_single_track(tracks: &mut [GridTrack], item: &SizingItem, inner_size: Option<f32>) {
    let Some(track) = tracks.get_mut(item.track_range.start) else {
        return;
    };
    if track.is_collapsed {
        return;
    }

    match track.sizing.min_sizing_function() {
        TrackSizingFunction::MinContent | TrackSizingFunction::Auto => {
            track.base_size = track.base_size.max(item.min_contribution);
        }
        TrackSizingFunction::MaxContent => {
            track.base_size = track.base_size.max(item.max_contribution);
        }
        _ => {}
    }

    let limit_target = match track.sizing.max_sizing_function() {
        TrackSizingFunction::MinContent => Some(item.min_contribution),
        TrackSizingFunction::MaxContent | TrackSizingFunction::Auto => {
            Some(item.max_contribution)
        }
        TrackSizingFunction::FitContent(limit) => {
            // An unresolvable fit-content limit leaves plain max-content
            // behavior.
            let clamp = limit.resolve(inner_size);
            Some(clamp.map_or(item.max_contribution, |clamp| item.max_contribution.min(clamp)))
        }
        _ => None,
    };
    if let Some(target) = limit_target {
        track.growth_limit = if track.growth_limit.is_infinite() {
            target
        } else {
            track.growth_limit.max(target)
        };
    }
    track.growth_limit = track.growth_limit.max(track.base_size);
}

/// A spanning item distributes whatever its contribution exceeds the tracks
/// it covers (gaps included) across the intrinsic tracks in its span.
fn distribute_spanning_item(
    tracks: &mut [GridTrack],
    item: &SizingItem,
    inner_size: Option<f32>,
    gap: f32,
) {
    let covered: Vec<usize> = item
        .track_range
        .clone()
        .filter(|&index| index < tracks.len() && !tracks[index].is_collapsed)
        .collect();
    if covered.is_empty() {
        return;
    }
    let span_gaps = (covered.len() - 1) as f32;

    // Base sizes grow toward the min-content contribution.
    let receives_min: Vec<usize> = covered
        .iter()
        .copied()
        .filter(|&index| is_intrinsic_min(&tracks[index]))
        .collect();
    let current: f32 = covered.iter().map(|&index| tracks[index].base_size).sum();
    let shortfall = item.min_contribution - current - gap * span_gaps;
    if shortfall > EPSILON && !receives_min.is_empty() {
        let distributed = distribute_up_to_limits(tracks, &receives_min, shortfall);
        distribute_beyond_limits(tracks, &receives_min, shortfall - distributed);
    }

    // Growth limits grow toward the max-content contribution; an infinite
    // limit counts as its base size before growing.
    let receives_max: Vec<usize> = covered
        .iter()
        .copied()
        .filter(|&index| is_intrinsic_max(&tracks[index]))
        .collect();
    if receives_max.is_empty() {
        return;
    }
    let limit_sum: f32 = covered
        .iter()
        .map(|&index| {
            let track = &tracks[index];
            if track.growth_limit.is_infinite() { track.base_size } else { track.growth_limit }
        })
        .sum();
    let shortfall = item.max_contribution - limit_sum - gap * span_gaps;
    if shortfall > EPSILON {
        let share = shortfall / receives_max.len() as f32;
        for &index in &receives_max {
            if tracks[index].growth_limit.is_infinite() {
                tracks[index].growth_limit = tracks[index].base_size;
            }
            tracks[index].growth_limit += share;
        }
    }

    // fit-content tracks clamp whatever the distribution produced.
    for &index in &receives_max {
        if let TrackSizingFunction::FitContent(limit) = tracks[index].sizing.max_sizing_function()
            && let Some(clamp) = limit.resolve(inner_size)
        {
            tracks[index].growth_limit =
                tracks[index].growth_limit.min(clamp).max(tracks[index].base_size);
        }
    }
}
