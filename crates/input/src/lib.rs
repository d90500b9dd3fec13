//! Input module (engine-facing).
//!
//! Independent of any input device or UI framework. Hosts translate their
//! own key or touch events into [`Control`] presses and releases; the
//! [`AutoRepeat`] tracker turns held controls into periodic
//! [`crate::types::GameAction`]s using DAS/ARR timing.

pub mod repeat;

pub use stackfall_types as types;

pub use repeat::{AutoRepeat, Control, RepeatConfig};
