//! Slateboard Render Library
//!
//! Builds a backend-agnostic display list from a [`slateboard_core::Session`].
//! The host shell replays the resulting [`Frame`] onto whatever drawing
//! surface it owns, applying the carried camera transform to the paint ops.

pub mod color;
pub mod frame;

pub use color::{ColorParseError, Rgba, parse_color};
pub use frame::{Frame, PaintOp, build_frame};
