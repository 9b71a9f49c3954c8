//! Drag-and-drop reordering.
//!
//! A drag gesture produces many intermediate "over" events before the user
//! releases. Those only update a [`SwapPreview`] describing which banners
//! will shift; the [`SequenceModel`] is touched exactly once, on drop.
//!
//! Indices are flat positions in the ordered list. Grid layouts that wrap
//! banners into rows must translate `(row, column)` to a flat index with the
//! same row width they render with before calling in.

use core::ops::RangeInclusive;

use tracing::{debug, warn};

use super::error::ReorderError;
use super::sequence::SequenceModel;

/// Direction the dragged banner is travelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragDirection {
    /// Towards lower indices.
    Up,
    /// Towards higher indices.
    Down,
    /// Hovering over its own slot.
    #[default]
    None,
}

/// Direction a displaced banner moves to make room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftDirection {
    /// One slot towards lower indices.
    Up,
    /// One slot towards higher indices.
    Down,
}

/// Banners that will be displaced if the drag is dropped where it hovers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapPreview {
    /// Travel direction of the dragged banner.
    pub direction: DragDirection,
    /// Indices that shift, excluding the source and including the target.
    pub shifted: RangeInclusive<usize>,
}

impl SwapPreview {
    fn between(source: usize, dest: usize) -> Option<Self> {
        match dest.cmp(&source) {
            core::cmp::Ordering::Greater => Some(Self {
                direction: DragDirection::Down,
                shifted: (source + 1)..=dest,
            }),
            core::cmp::Ordering::Less => Some(Self {
                direction: DragDirection::Up,
                shifted: dest..=(source - 1),
            }),
            core::cmp::Ordering::Equal => None,
        }
    }

    /// How the banner at `index` shifts, if it is displaced at all.
    #[must_use]
    pub fn shift_for(&self, index: usize) -> Option<ShiftDirection> {
        if !self.shifted.contains(&index) {
            return None;
        }
        match self.direction {
            DragDirection::Down => Some(ShiftDirection::Up),
            DragDirection::Up => Some(ShiftDirection::Down),
            DragDirection::None => None,
        }
    }
}

/// Transient state of an in-flight drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    /// Index the drag started from.
    pub source_index: usize,
    /// Index currently hovered, if any valid target has been entered.
    pub dest_index: Option<usize>,
    /// Length of the list when the drag started.
    pub len: usize,
    /// Current swap preview.
    pub preview: Option<SwapPreview>,
}

impl DragState {
    /// Travel direction of the dragged banner.
    #[must_use]
    pub fn direction(&self) -> DragDirection {
        self.preview
            .as_ref()
            .map_or(DragDirection::None, |preview| preview.direction)
    }
}

/// Gesture phase.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A banner is being dragged.
    Dragging(DragState),
}

/// Gesture input, as reported by whatever drag library hosts the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Pointer picked up the banner at `source` in a list of `len`.
    Start {
        /// Picked-up index.
        source: usize,
        /// List length at pickup.
        len: usize,
    },
    /// Pointer is over `dest`.
    Over {
        /// Hovered index.
        dest: usize,
    },
    /// Pointer released over `dest`.
    Drop {
        /// Target index.
        dest: usize,
    },
    /// Gesture aborted.
    Cancel,
}

/// A move to commit to the sequence model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    /// Index picked up.
    pub source: usize,
    /// Index dropped on.
    pub dest: usize,
}

impl DragPhase {
    /// Apply a gesture event.
    ///
    /// Only [`DragEvent::Drop`] during a drag yields a [`PendingMove`]; every
    /// other transition is preview-only.
    #[must_use]
    pub fn apply(self, event: DragEvent) -> (Self, Option<PendingMove>) {
        match (self, event) {
            (_, DragEvent::Start { source, len }) => {
                if source >= len {
                    return (Self::Idle, None);
                }
                let state = DragState {
                    source_index: source,
                    dest_index: None,
                    len,
                    preview: None,
                };
                (Self::Dragging(state), None)
            }
            (Self::Dragging(mut state), DragEvent::Over { dest }) => {
                if dest < state.len {
                    state.dest_index = Some(dest);
                    state.preview = SwapPreview::between(state.source_index, dest);
                } else {
                    state.dest_index = None;
                    state.preview = None;
                }
                (Self::Dragging(state), None)
            }
            (Self::Dragging(state), DragEvent::Drop { dest }) => {
                let pending = PendingMove {
                    source: state.source_index,
                    dest,
                };
                (Self::Idle, Some(pending))
            }
            (Self::Dragging(_) | Self::Idle, DragEvent::Cancel)
            | (Self::Idle, DragEvent::Over { .. } | DragEvent::Drop { .. }) => (Self::Idle, None),
        }
    }
}

/// Tracks one drag gesture for a banner list.
#[derive(Debug, Clone, Default)]
pub struct DragReorderController {
    phase: DragPhase,
}

impl DragReorderController {
    /// Create an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin dragging the banner at `source`. Any stale gesture is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::IndexOutOfRange`] if `source` is not in
    /// `model`; the controller is left idle.
    pub fn on_drag_start(
        &mut self,
        source: usize,
        model: &SequenceModel,
    ) -> Result<(), ReorderError> {
        let len = model.len();
        if source >= len {
            warn!(index = source, len, "Drag start rejected: index out of range");
            self.phase = DragPhase::Idle;
            return Err(ReorderError::IndexOutOfRange { index: source, len });
        }
        if self.is_dragging() {
            debug!("Discarding stale drag gesture");
        }
        self.step(DragEvent::Start { source, len });
        debug!(source, "Drag started");
        Ok(())
    }

    /// Update the preview for the hovered index. Never touches the model.
    ///
    /// Hovering outside the list clears the preview; hovering while idle is
    /// ignored.
    pub fn on_drag_over(&mut self, dest: usize) {
        self.step(DragEvent::Over { dest });
    }

    /// Commit the drag by moving the source banner to `dest`.
    ///
    /// The controller is idle afterwards whether or not the move succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`ReorderError::DragNotActive`] if no drag is in progress and
    /// [`ReorderError::IndexOutOfRange`] if either index is no longer valid
    /// for `model`.
    pub fn on_drop(
        &mut self,
        dest: usize,
        model: &SequenceModel,
    ) -> Result<SequenceModel, ReorderError> {
        let Some(pending) = self.step(DragEvent::Drop { dest }) else {
            warn!(dest, "Drop received with no drag in progress");
            return Err(ReorderError::DragNotActive);
        };
        debug!(source = pending.source, dest = pending.dest, "Drag dropped");
        model.move_item(pending.source, pending.dest)
    }

    /// Abort the drag without touching the model.
    ///
    /// Returns whether a gesture was discarded.
    pub fn on_drag_cancel(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        self.step(DragEvent::Cancel);
        if was_dragging {
            debug!("Drag cancelled");
        }
        was_dragging
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging(_))
    }

    /// Current gesture phase.
    #[must_use]
    pub const fn phase(&self) -> &DragPhase {
        &self.phase
    }

    /// State of the in-flight drag.
    #[must_use]
    pub const fn state(&self) -> Option<&DragState> {
        match &self.phase {
            DragPhase::Dragging(state) => Some(state),
            DragPhase::Idle => None,
        }
    }

    /// Current swap preview.
    #[must_use]
    pub fn preview(&self) -> Option<&SwapPreview> {
        self.state().and_then(|state| state.preview.as_ref())
    }

    /// Rendering hint for the banner at `index`.
    #[must_use]
    pub fn shift_for(&self, index: usize) -> Option<ShiftDirection> {
        self.preview().and_then(|preview| preview.shift_for(index))
    }

    fn step(&mut self, event: DragEvent) -> Option<PendingMove> {
        let (phase, pending) = core::mem::take(&mut self.phase).apply(event);
        self.phase = phase;
        pending
    }
}
