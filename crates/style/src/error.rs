//! Style-construction failures.

use thiserror::Error;

/// Invariant violations detected while constructing style values.
///
/// These are authoring bugs and are rejected as early as possible, at
/// construction time rather than layout time. Everything else in this
/// subsystem is infallible by CSS mandate (unknown line names, degenerate
/// clamps and the like all have defined numeric fallbacks).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    /// `minmax()` may not nest another `minmax()` in either slot.
    #[error("minmax() cannot nest another minmax() in its {slot} slot")]
    NestedMinmax {
        /// `"min"` or `"max"`.
        slot: &'static str,
    },

    /// Every track in an `auto-fill`/`auto-fit` repetition must have a fixed
    /// component, otherwise the repetition count is undefined.
    #[error(
        "repeat(auto-fill | auto-fit) requires every repeated track to have a fixed component \
         (track {track_index} does not)"
    )]
    AutoRepeatNeedsFixedTrack {
        /// Index of the offending track within the repeated block.
        track_index: usize,
    },
}
