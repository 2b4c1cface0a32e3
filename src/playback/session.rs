//! Interactive playback over a generated history

use std::time::Duration;

/// Caller-owned playback cursor over a simulation's state history.
///
/// The session never touches the simulation itself; it only tracks an index
/// into a history of `state_count` states plus play/pause bookkeeping, so
/// the owner decides when frames are drawn and when ticks fire. Replacing
/// the simulation means dropping the session and building a new one, which
/// cancels any pending playback by construction.
///
/// When a cycle was detected, the final state duplicates the state at the
/// cycle start; `loop_range` lets auto-advance skip that duplicate and loop
/// precisely over the repeating segment. Manual stepping still walks the
/// full history.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    state_count: usize,
    index: usize,
    playing: bool,
    loop_playback: bool,
    frame_interval: Duration,
    loop_start: usize,
    /// Exclusive end of the auto-advance range
    loop_end: usize,
}

impl PlaybackSession {
    /// Create a paused session at index 0.
    ///
    /// `framerate` is frames per second for auto-advance; `state_count` must
    /// cover at least the initial state.
    pub fn new(state_count: usize, framerate: u32, loop_playback: bool) -> Self {
        assert!(state_count > 0, "history is never empty");
        assert!(framerate > 0, "framerate must be positive");
        Self {
            state_count,
            index: 0,
            playing: false,
            loop_playback,
            frame_interval: Duration::from_secs(1) / framerate,
            loop_start: 0,
            loop_end: state_count,
        }
    }

    /// Restrict auto-advance to `start..end` (end exclusive).
    ///
    /// For a detected cycle pass `cycle_start..state_count - 1` so the
    /// duplicated closing state is skipped instead of shown twice per loop.
    pub fn with_loop_range(mut self, start: usize, end: usize) -> Self {
        assert!(start < end && end <= self.state_count, "invalid loop range");
        self.loop_start = start;
        self.loop_end = end;
        self
    }

    pub fn current(&self) -> usize {
        self.index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Manual step forward; stops playback and wraps at the end
    pub fn show_next(&mut self) {
        self.pause();
        self.index = if self.index + 1 >= self.state_count {
            0
        } else {
            self.index + 1
        };
    }

    /// Manual step backward; stops playback and wraps at the start
    pub fn show_previous(&mut self) {
        self.pause();
        self.index = if self.index == 0 {
            self.state_count - 1
        } else {
            self.index - 1
        };
    }

    /// Begin auto-advance; restarts from the loop start when already at the
    /// end of the range
    pub fn play(&mut self) {
        if self.index + 1 >= self.loop_end {
            self.index = self.loop_start;
        }
        self.playing = true;
    }

    /// Idempotent: pausing a paused session is a no-op
    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle_play_pause(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance one frame while playing.
    ///
    /// At the end of the loop range either wraps to the loop start (when
    /// loop playback is on) or pauses in place. Returns the index to draw.
    pub fn tick(&mut self) -> usize {
        if !self.playing {
            return self.index;
        }

        if self.index + 1 >= self.loop_end {
            if self.loop_playback {
                self.index = self.loop_start;
            } else {
                self.playing = false;
            }
        } else {
            self.index += 1;
        }

        self.index
    }
}
