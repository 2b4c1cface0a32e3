//! Terminal rendering: a thin consumer of the engine's state shape

pub mod ansi;
pub mod frame;

pub use frame::render_frame;
