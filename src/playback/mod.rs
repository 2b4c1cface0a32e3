//! Playback control over generated histories

pub mod session;

pub use session::PlaybackSession;
