//! Banner display-order engine.
//!
//! Four pieces cooperate on one banner-ordering screen:
//!
//! - [`SequenceModel`] - the canonical ranked list (ranks always `1..=N`)
//! - [`ManualRankEditor`] - typed rank entry with per-banner inline errors
//! - [`DragReorderController`] - drag gestures with a non-committing preview
//! - [`CarouselPreviewController`] - full-screen preview with autoplay
//!
//! The sequence model is only ever written by the rank editor and the drag
//! controller. Everything here runs on the host's event loop; the carousel's
//! autoplay timer is the only asynchronous piece.

pub mod carousel;
pub mod drag;
pub mod error;
pub mod rank_editor;
pub mod sequence;

pub use carousel::{
    AutoplayTick, AutoplayTimer, CarouselEvent, CarouselPreviewController, CarouselState,
    TimerEffect,
};
pub use drag::{
    DragDirection, DragEvent, DragPhase, DragReorderController, DragState, PendingMove,
    ShiftDirection, SwapPreview,
};
pub use error::{InvalidRank, RankRejection, ReorderError};
pub use rank_editor::ManualRankEditor;
pub use sequence::SequenceModel;
