#![forbid(unsafe_code)]

//! Panel positions, assistive-technology state, and progress.
//!
//! [`PanelFrame::compute`] is a pure function of `(current, count)`: every
//! panel is offset by `(index - current) * 100%` of the viewport, only the
//! current panel is interactive and announced, and the progress indicator
//! reads `current + 1` of `count`. [`PanelState::apply`] pushes a frame into a
//! [`PanelSurface`]; applying the same frame twice yields the same page.

use std::fmt;

/// Ordered, fixed-length list of panel handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelSequence<P> {
    panels: Vec<P>,
}

impl<P> PanelSequence<P> {
    /// Wrap `panels`. Returns `None` for an empty list.
    #[must_use]
    pub fn new(panels: Vec<P>) -> Option<Self> {
        (!panels.is_empty()).then_some(Self { panels })
    }

    /// Number of panels (always at least one).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always `false`; present for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Handle at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&P> {
        self.panels.get(index)
    }

    /// Iterate handles in order.
    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.panels.iter()
    }
}

/// Where one panel sits and how assistive technology should treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PanelPlacement {
    /// Panel index.
    pub index: usize,
    /// Vertical translation as a percentage of the viewport height.
    pub offset_percent: i64,
    /// True only for the visible panel.
    pub is_current: bool,
}

impl PanelPlacement {
    /// Non-current panels are inert.
    #[inline]
    #[must_use]
    pub const fn inert(&self) -> bool {
        !self.is_current
    }

    /// Non-current panels are hidden from assistive technology.
    #[inline]
    #[must_use]
    pub const fn aria_hidden(&self) -> bool {
        !self.is_current
    }

    /// CSS transform for this placement.
    #[must_use]
    pub fn transform(&self) -> String {
        format!("translate3d(0, {}%, 0)", self.offset_percent)
    }
}

/// Position within the sequence, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Progress {
    /// 1-based position of the current panel.
    pub position: usize,
    /// Number of panels.
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.position, self.total)
    }
}

/// Enabled state of the previous/next controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlState {
    /// The "previous" control is disabled on the first panel.
    pub prev_disabled: bool,
    /// The "next" control is disabled on the last panel.
    pub next_disabled: bool,
}

/// Complete presentation state for one current index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelFrame {
    /// Current index.
    pub current: usize,
    /// One placement per panel, in order.
    pub placements: Vec<PanelPlacement>,
    /// Progress indicator.
    pub progress: Progress,
    /// Previous/next control state.
    pub controls: ControlState,
}

impl PanelFrame {
    /// Compute the frame for `current` among `count` panels.
    ///
    /// `current` must be below `count`.
    #[must_use]
    pub fn compute(current: usize, count: usize) -> Self {
        debug_assert!(current < count, "current {current} out of range for {count} panels");
        let placements = (0..count)
            .map(|index| PanelPlacement {
                index,
                offset_percent: (index as i64 - current as i64) * 100,
                is_current: index == current,
            })
            .collect();
        Self {
            current,
            placements,
            progress: Progress {
                position: current + 1,
                total: count,
            },
            controls: ControlState {
                prev_disabled: current == 0,
                next_disabled: current + 1 >= count,
            },
        }
    }

    /// Number of placements marked current.
    #[must_use]
    pub fn current_count(&self) -> usize {
        self.placements.iter().filter(|p| p.is_current).count()
    }
}

/// The page elements the controller drives.
///
/// Implemented by the host. `P` is the host's opaque panel handle.
pub trait PanelSurface<P> {
    /// Position a panel and set its inert/hidden state.
    fn place(&mut self, panel: &P, placement: &PanelPlacement);

    /// Update the progress indicator.
    fn show_progress(&mut self, progress: &Progress);

    /// Enable or disable the previous/next controls.
    fn set_controls(&mut self, controls: ControlState);

    /// Move keyboard focus to a panel without scrolling.
    fn focus(&mut self, panel: &P);

    /// Make a panel focusable by script (but not by tabbing).
    ///
    /// Called once per panel at construction.
    fn make_focusable(&mut self, panel: &P) {
        let _ = panel;
    }
}

/// Owner of the current index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelState {
    current: usize,
    count: usize,
}

impl PanelState {
    /// Create state for `count` panels, clamping `initial` into range.
    ///
    /// `count` must be at least one.
    #[must_use]
    pub fn new(initial: usize, count: usize) -> Self {
        debug_assert!(count > 0);
        Self {
            current: initial.min(count.saturating_sub(1)),
            count,
        }
    }

    /// Current index.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> usize {
        self.current
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// True when `index` names a panel.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index < self.count
    }

    /// Move to `index`. Out-of-range indices are ignored.
    pub(crate) fn set(&mut self, index: usize) {
        if self.contains(index) {
            self.current = index;
        }
    }

    /// Frame for the current index.
    #[must_use]
    pub fn frame(&self) -> PanelFrame {
        PanelFrame::compute(self.current, self.count)
    }

    /// Push the current frame into `surface`.
    pub fn apply<P, S: PanelSurface<P>>(&self, panels: &PanelSequence<P>, surface: &mut S) {
        let frame = self.frame();
        for (panel, placement) in panels.iter().zip(&frame.placements) {
            surface.place(panel, placement);
        }
        surface.show_progress(&frame.progress);
        surface.set_controls(frame.controls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn frame_offsets_are_relative_to_current() {
        let frame = PanelFrame::compute(1, 4);
        let offsets: Vec<i64> = frame.placements.iter().map(|p| p.offset_percent).collect();
        assert_eq!(offsets, vec![-100, 0, 100, 200]);
        assert_eq!(frame.placements[1].transform(), "translate3d(0, 0%, 0)");
        assert_eq!(frame.placements[0].transform(), "translate3d(0, -100%, 0)");
        assert!(frame.placements[0].inert());
        assert!(frame.placements[0].aria_hidden());
        assert!(!frame.placements[1].inert());
        assert_eq!(frame.progress.to_string(), "2 / 4");
    }

    #[test]
    fn controls_disable_at_edges() {
        assert_eq!(
            PanelFrame::compute(0, 3).controls,
            ControlState {
                prev_disabled: true,
                next_disabled: false
            }
        );
        assert_eq!(
            PanelFrame::compute(2, 3).controls,
            ControlState {
                prev_disabled: false,
                next_disabled: true
            }
        );
        assert_eq!(
            PanelFrame::compute(0, 1).controls,
            ControlState {
                prev_disabled: true,
                next_disabled: true
            }
        );
    }

    #[test]
    fn state_clamps_initial_index() {
        assert_eq!(PanelState::new(10, 3).current(), 2);
        assert_eq!(PanelState::new(0, 3).current(), 0);
    }

    #[test]
    fn empty_sequence_is_rejected() {
        assert!(PanelSequence::<u8>::new(Vec::new()).is_none());
        let seq = PanelSequence::new(vec!['a', 'b']).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.get(1), Some(&'b'));
        assert!(!seq.is_empty());
    }

    proptest! {
        #[test]
        fn exactly_one_current(count in 1usize..64, seed in any::<usize>()) {
            let current = seed % count;
            let frame = PanelFrame::compute(current, count);
            prop_assert_eq!(frame.current_count(), 1);
            prop_assert_eq!(frame.placements.len(), count);
            prop_assert_eq!(frame.progress.position, current + 1);
            prop_assert!(frame.placements[current].is_current);
        }

        #[test]
        fn frame_is_pure(count in 1usize..32, seed in any::<usize>()) {
            let current = seed % count;
            prop_assert_eq!(PanelFrame::compute(current, count), PanelFrame::compute(current, count));
        }
    }
}
