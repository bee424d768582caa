//! Input module - click events and modifier state.

pub mod events;

pub use events::{ClickEvent, ClickTarget, Modifiers};
