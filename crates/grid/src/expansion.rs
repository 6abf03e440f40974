//! Track template expansion, including `repeat()` and auto-repetition.
//!
//! Spec: CSS Grid Layout Module Level 2, §7.2.3.2 Repeat-to-fill
//! <https://www.w3.org/TR/css-grid-2/#auto-repeat>

use layout_style::{AvailableSpace, GridTemplateComponent, RepetitionCount, TrackSizingFunction};

/// Where an expanded track came from. Auto-fit collapse and implicit-track
/// synthesis both need to tell these apart downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackOrigin {
    /// Directly from the template (single component or counted repeat).
    Explicit,
    /// From an `auto-fill`/`auto-fit` repetition.
    AutoRepeat,
    /// Synthesized to cover placements outside the explicit grid.
    Implicit,
}

/// One track of the flat, expanded template.
#[derive(Debug, Clone)]
pub struct ExpandedTrack {
    pub sizing: TrackSizingFunction,
    pub origin: TrackOrigin,
}

/// A template axis after `repeat()` expansion.
#[derive(Debug, Clone, Default)]
pub struct ExpandedTemplate {
    pub tracks: Vec<ExpandedTrack>,
    /// Whether an `auto-fit` repetition contributed tracks (its empty
    /// tracks collapse during sizing).
    pub is_auto_fit: bool,
}

impl ExpandedTemplate {
    /// The explicit track count this expansion fixes, fed back into the
    /// named-line resolver's fallback math.
    pub fn explicit_track_count(&self) -> u16 {
        self.tracks.len() as u16
    }
}

/// Flatten a template-component list into an ordered track list.
///
/// `Single` components pass through; counted repetitions unroll in order;
/// auto repetitions produce as many copies as fit `available_space` (their
/// tracks are guaranteed a fixed component by construction). An indefinite
/// available space collapses every auto repetition to exactly one copy.
pub fn expand_template(
    template: &[GridTemplateComponent],
    available_space: AvailableSpace,
    inner_size: Option<f32>,
    gap: f32,
) -> ExpandedTemplate {
    // Space and track count consumed by everything outside auto repetitions,
    // needed to size the auto-repeat formula.
    let mut fixed_space = 0.0_f32;
    let mut fixed_count = 0_usize;
    for component in template {
        match component {
            GridTemplateComponent::Single(track) => {
                fixed_space += track.definite_value(inner_size).unwrap_or(0.0);
                fixed_count += 1;
            }
            GridTemplateComponent::Repeat(repetition) => {
                if let RepetitionCount::Count(count) = repetition.count() {
                    let per_copy: f32 = repetition
                        .tracks()
                        .iter()
                        .map(|track| track.definite_value(inner_size).unwrap_or(0.0))
                        .sum();
                    fixed_space += per_copy * f32::from(count);
                    fixed_count += repetition.tracks().len() * count as usize;
                }
            }
        }
    }

    let mut expanded = ExpandedTemplate::default();
    for component in template {
        match component {
            GridTemplateComponent::Single(track) => {
                expanded.tracks.push(ExpandedTrack {
                    sizing: track.clone(),
                    origin: TrackOrigin::Explicit,
                });
            }
            GridTemplateComponent::Repeat(repetition) => match repetition.count() {
                RepetitionCount::Count(count) => {
                    for _ in 0..count {
                        for track in repetition.tracks() {
                            expanded.tracks.push(ExpandedTrack {
                                sizing: track.clone(),
                                origin: TrackOrigin::Explicit,
                            });
                        }
                    }
                }
                RepetitionCount::AutoFill | RepetitionCount::AutoFit => {
                    if repetition.count() == RepetitionCount::AutoFit {
                        expanded.is_auto_fit = true;
                    }
                    let copies = auto_repeat_count(
                        repetition.tracks(),
                        available_space,
                        inner_size,
                        gap,
                        fixed_space,
                        fixed_count,
                    );
                    tracing::debug!(
                        "auto-repeat expands to {copies} copies of {} track(s)",
                        repetition.tracks().len()
                    );
                    for _ in 0..copies {
                        for track in repetition.tracks() {
                            expanded.tracks.push(ExpandedTrack {
                                sizing: track.clone(),
                                origin: TrackOrigin::AutoRepeat,
                            });
                        }
                    }
                }
            },
        }
    }

    expanded
}

/// Standard auto-repeat formula: the largest `n` such that the fixed sizes
/// of `n` copies plus all gaps still fit the available space, never below 1.
fn auto_repeat_count(
    repeat_tracks: &[TrackSizingFunction],
    available_space: AvailableSpace,
    inner_size: Option<f32>,
    gap: f32,
    fixed_space: f32,
    fixed_count: usize,
) -> u16 {
    let Some(space) = available_space.into_option() else {
        return 1;
    };

    let per_copy: f32 = repeat_tracks
        .iter()
        .map(|track| track.definite_value(inner_size).unwrap_or(0.0))
        .sum();
    if per_copy <= 0.0 {
        return 1;
    }

    let tracks_per_copy = repeat_tracks.len() as f32;
    // n·per_copy + (n·k + m − 1)·gap ≤ space, solved for n.
    let numerator = space + gap - fixed_space - fixed_count as f32 * gap;
    let denominator = per_copy + tracks_per_copy * gap;
    let copies = (numerator / denominator).floor();
    if copies >= 1.0 { copies as u16 } else { 1 }
}
