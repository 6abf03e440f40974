//! Flexible (`fr`) track expansion and the final `auto` stretch.
//!
//! Spec: CSS Grid Layout Module Level 2, §12.7 Expand Flexible Tracks and
//! §12.8 Stretch `auto` Tracks
//! <https://www.w3.org/TR/css-grid-2/#algo-flex-tracks>

use layout_style::{AvailableSpace, TrackSizingFunction};

use super::distribution::EPSILON;
use super::intrinsic::crosses_flexible;
use super::{GridTrack, SizingItem, used_gap_count, used_space};

/// Grow flexible tracks to `fr_size x factor`. With definite space the fr
/// size fills the leftover after inflexible tracks; with indefinite space it
/// is the largest fr size any flexible track or flex-spanning item demands.
pub(super) fn expand_flexible_tracks(
    tracks: &mut [GridTrack],
    items: &[SizingItem],
    available_space: AvailableSpace,
    gap: f32,
) {
    let flexible: Vec<usize> = (0..tracks.len())
        .filter(|&index| !tracks[index].is_collapsed && tracks[index].sizing.is_flexible())
        .collect();
    if flexible.is_empty() {
        return;
    }

    let fr_size = match available_space.into_option() {
        Some(space) => {
            find_fr_size(tracks, &flexible, space - gap * used_gap_count(tracks) as f32)
        }
        None => {
            let mut fr_size = 0.0_f32;
            for &index in &flexible {
                let factor = tracks[index].sizing.flex_factor();
                if factor > 0.0 {
                    fr_size = fr_size.max(tracks[index].base_size / factor);
                }
            }
            for item in items {
                if !crosses_flexible(tracks, item) {
                    continue;
                }
                let total_factor: f32 = item
                    .track_range
                    .clone()
                    .filter_map(|index| tracks.get(index))
                    .map(|track| track.sizing.flex_factor())
                    .sum();
                fr_size = fr_size.max(item.max_contribution / total_factor.max(1.0));
            }
            fr_size
        }
    };

    for &index in &flexible {
        let target = fr_size * tracks[index].sizing.flex_factor();
        if target > tracks[index].base_size {
            tracks[index].base_size = target;
            tracks[index].growth_limit = tracks[index].growth_limit.max(target);
        }
    }
}

/// §12.7.1 Find the Size of an `fr`: hypothetical fr size over the flexible
/// tracks, re-run treating any track whose base already exceeds its share as
/// inflexible.
fn find_fr_size(tracks: &[GridTrack], flexible: &[usize], space_to_fill: f32) -> f32 {
    let mut inflexible: Vec<usize> = Vec::new();
    loop {
        let used: f32 = tracks
            .iter()
            .enumerate()
            .filter(|(index, track)| {
                !track.is_collapsed && (!flexible.contains(index) || inflexible.contains(index))
            })
            .map(|(_, track)| track.base_size)
            .sum();
        let active: Vec<usize> = flexible
            .iter()
            .copied()
            .filter(|index| !inflexible.contains(index))
            .collect();
        let total_factor: f32 = active
            .iter()
            .map(|&index| tracks[index].sizing.flex_factor())
            .sum();
        if active.is_empty() || total_factor <= 0.0 {
            return 0.0;
        }

        let fr_size = ((space_to_fill - used) / total_factor.max(1.0)).max(0.0);
        let mut changed = false;
        for &index in &active {
            if tracks[index].base_size > fr_size * tracks[index].sizing.flex_factor() + EPSILON {
                inflexible.push(index);
                changed = true;
            }
        }
        if !changed {
            return fr_size;
        }
    }
}

/// Split remaining definite free space equally among tracks whose max sizing
/// function is `auto`.
pub(super) fn stretch_auto_tracks(
    tracks: &mut [GridTrack],
    available_space: AvailableSpace,
    gap: f32,
) {
    let AvailableSpace::Definite(space) = available_space else {
        return;
    };
    let auto: Vec<usize> = (0..tracks.len())
        .filter(|&index| {
            !tracks[index].is_collapsed
                && matches!(
                    tracks[index].sizing.max_sizing_function(),
                    TrackSizingFunction::Auto
                )
        })
        .collect();
    if auto.is_empty() {
        return;
    }

    let free = space - used_space(tracks) - gap * used_gap_count(tracks) as f32;
    if free <= EPSILON {
        return;
    }
    let share = free / auto.len() as f32;
    for &index in &auto {
        tracks[index].base_size += share;
        tracks[index].growth_limit = tracks[index].growth_limit.max(tracks[index].base_size);
    }
}
