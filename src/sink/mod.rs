//! Media sink abstraction for aniplay
//!
//! The controller is written entirely against the [`MediaSink`] trait: an
//! opaque platform capability that can bind one media source at a time,
//! accept transport commands, and report what actually happened through
//! [`SinkEvent`]s. Exactly one source is ever bound; `bind` fully replaces
//! the previous binding.
//!
//! Keeping the seam here means the controller's logic runs unchanged against
//! a browser media element, a native pipeline, or the deterministic
//! [`SimSink`] used in tests and the demo binary.

mod sim;

pub use sim::{SimSink, SimSinkHandle, SinkCommand};

use crate::utils::error::Result;

/// Platform capability for loading and controlling a single media source
pub trait MediaSink: Send {
    /// Bind a source URL, replacing any previous binding. Position and
    /// duration of the old binding are discarded; the sink reports the new
    /// duration with [`SinkEvent::DurationKnown`] once metadata is loaded.
    fn bind(&mut self, source: &str) -> Result<()>;

    /// Command playback to start
    fn play(&mut self) -> Result<()>;

    /// Command playback to pause
    fn pause(&mut self) -> Result<()>;

    /// Command a seek to an absolute position in seconds. Values past the
    /// end of media are resolved by the sink, not the caller.
    fn seek(&mut self, seconds: f64) -> Result<()>;

    /// Set the volume level (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32) -> Result<()>;

    /// Set the muted flag without changing the volume level
    fn set_muted(&mut self, muted: bool) -> Result<()>;

    /// Request entering or leaving fullscreen on the player surface. The
    /// effective state is reported via [`SinkEvent::FullscreenChanged`].
    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()>;
}

/// Events a media sink reports back to the controller
///
/// Playback state is derived from these events only, never assumed from the
/// commands that were issued, so a sink rejecting a command (autoplay
/// restrictions, for instance) cannot desync the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    /// Playback position advanced or jumped, in seconds
    TimeUpdate(f64),

    /// Media metadata loaded; total duration in seconds is now known
    DurationKnown(f64),

    /// Playback is running
    Playing,

    /// Playback is paused
    Paused,

    /// Playback stalled waiting for data
    Buffering,

    /// Enough data is available to (re)start playback
    ReadyToPlay,

    /// The player surface entered or left fullscreen
    FullscreenChanged(bool),

    /// The bound source failed to load
    LoadFailed(String),
}
