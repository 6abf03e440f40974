//! Space distribution helpers shared by the sizing passes.
//!
//! Spec: CSS Grid Layout Module Level 2, §12.5.1 Distributing Extra Space
//! <https://www.w3.org/TR/css-grid-2/#extra-space>

use layout_style::AvailableSpace;

use super::{GridTrack, used_gap_count, used_space};

pub(super) const EPSILON: f32 = 1e-5;

/// Distribute `space` equally among `indices`, freezing each track as it
/// reaches its growth limit and re-sharing the remainder. Returns the amount
/// actually placed.
pub(super) fn distribute_up_to_limits(
    tracks: &mut [GridTrack],
    indices: &[usize],
    space: f32,
) -> f32 {
    let mut remaining = space;
    loop {
        let active: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&index| tracks[index].base_size + EPSILON < tracks[index].growth_limit)
            .collect();
        if active.is_empty() || remaining <= EPSILON {
            break;
        }

        let share = remaining / active.len() as f32;
        let mut distributed = 0.0;
        for &index in &active {
            let headroom = tracks[index].growth_limit - tracks[index].base_size;
            let grow = share.min(headroom);
            tracks[index].base_size += grow;
            distributed += grow;
        }
        remaining -= distributed;
        if distributed <= EPSILON {
            break;
        }
    }
    space - remaining
}

/// Distribute `space` equally among `indices` ignoring growth limits,
/// raising each limit to keep it at or above the new base.
pub(super) fn distribute_beyond_limits(tracks: &mut [GridTrack], indices: &[usize], space: f32) {
    if indices.is_empty() || space <= 0.0 {
        return;
    }
    let share = space / indices.len() as f32;
    for &index in indices {
        tracks[index].base_size += share;
        tracks[index].growth_limit = tracks[index].growth_limit.max(tracks[index].base_size);
    }
}

/// §12.6 Maximize Tracks: grow base sizes up to growth limits. With definite
/// space the free space is shared; under a max-content constraint every
/// track jumps straight to its limit; under min-content nothing grows.
pub(super) fn maximize_tracks(
    tracks: &mut [GridTrack],
    available_space: AvailableSpace,
    gap: f32,
) {
    match available_space {
        AvailableSpace::Definite(space) => {
            let free = space - used_space(tracks) - gap * used_gap_count(tracks) as f32;
            if free > 0.0 {
                let growable: Vec<usize> = (0..tracks.len())
                    .filter(|&index| !tracks[index].is_collapsed)
                    .collect();
                distribute_up_to_limits(tracks, &growable, free);
            }
        }
        AvailableSpace::MaxContent => {
            for track in tracks.iter_mut() {
                if !track.is_collapsed && track.growth_limit.is_finite() {
                    track.base_size = track.base_size.max(track.growth_limit);
                }
            }
        }
        AvailableSpace::MinContent => {}
    }
}
