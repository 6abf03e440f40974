//! Track template components and `repeat()` notation.
//!
//! Spec: CSS Grid Layout Module Level 2, §7.2.3 Repeating Rows and Columns
//! <https://www.w3.org/TR/css-grid-2/#repeat-notation>

use crate::error::StyleError;
use crate::track::TrackSizingFunction;

/// Repetition count of a `repeat()` component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepetitionCount {
    /// `repeat(n, ...)` with an explicit positive count.
    Count(u16),
    /// As many repetitions as fit the available space.
    AutoFill,
    /// Like `auto-fill`, but repetitions left empty of items collapse.
    AutoFit,
}

impl RepetitionCount {
    pub fn is_auto(self) -> bool {
        matches!(self, Self::AutoFill | Self::AutoFit)
    }
}

/// A `repeat()` block inside a track template.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRepetition {
    count: RepetitionCount,
    tracks: Vec<TrackSizingFunction>,
}

impl GridRepetition {
    /// Construct a repetition.
    ///
    /// # Errors
    /// Auto repetitions require every repeated track to have a fixed
    /// component, otherwise the repetition count is undefined; violating
    /// this is a caller error and is rejected here, not at layout time.
    pub fn new(
        count: RepetitionCount,
        tracks: Vec<TrackSizingFunction>,
    ) -> Result<Self, StyleError> {
        if count.is_auto() {
            for (track_index, track) in tracks.iter().enumerate() {
                if !track.has_fixed_component() {
                    return Err(StyleError::AutoRepeatNeedsFixedTrack { track_index });
                }
            }
        }
        Ok(Self { count, tracks })
    }

    pub fn count(&self) -> RepetitionCount {
        self.count
    }

    pub fn tracks(&self) -> &[TrackSizingFunction] {
        &self.tracks
    }
}

/// One entry of a `grid-template-columns` / `grid-template-rows` list.
#[derive(Debug, Clone, PartialEq)]
pub enum GridTemplateComponent {
    /// A single track.
    Single(TrackSizingFunction),
    /// A `repeat()` block.
    Repeat(GridRepetition),
}

impl GridTemplateComponent {
    /// Convenience constructor for an explicitly counted repetition.
    ///
    /// # Errors
    /// Propagates [`GridRepetition::new`] validation.
    pub fn repeat(
        count: RepetitionCount,
        tracks: Vec<TrackSizingFunction>,
    ) -> Result<Self, StyleError> {
        GridRepetition::new(count, tracks).map(Self::Repeat)
    }
}

impl From<TrackSizingFunction> for GridTemplateComponent {
    fn from(track: TrackSizingFunction) -> Self {
        Self::Single(track)
    }
}

impl From<GridRepetition> for GridTemplateComponent {
    fn from(repetition: GridRepetition) -> Self {
        Self::Repeat(repetition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_repeat_requires_fixed_components() {
        let err = GridRepetition::new(
            RepetitionCount::AutoFill,
            vec![
                TrackSizingFunction::length(100.0),
                TrackSizingFunction::Auto,
            ],
        );
        assert_eq!(
            err,
            Err(StyleError::AutoRepeatNeedsFixedTrack { track_index: 1 })
        );

        // An explicit count places no such requirement.
        let counted = GridRepetition::new(
            RepetitionCount::Count(3),
            vec![TrackSizingFunction::Auto],
        );
        assert!(counted.is_ok());

        // minmax with a fixed min qualifies for auto repetition.
        let track = TrackSizingFunction::minmax(
            TrackSizingFunction::length(200.0),
            TrackSizingFunction::Flex(1.0),
        )
        .ok();
        assert!(track.is_some());
        let Some(track) = track else { return };
        assert!(GridRepetition::new(RepetitionCount::AutoFit, vec![track]).is_ok());
    }
}
