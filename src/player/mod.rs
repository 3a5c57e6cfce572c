//! Playback controller module for aniplay
//!
//! This module owns all transient player state and the operations a player
//! surface needs: transport controls, multi-track audio switching with
//! seek/resume continuity, subtitle selection, click/double-click gesture
//! disambiguation, the transient seek indicator, and auto-hiding controls.
//! It coordinates with the platform through the [`MediaSink`] capability
//! and derives its state from sink events, never from issued commands.
//!
//! [`MediaSink`]: crate::sink::MediaSink

mod controller;
mod gesture;
mod session;

pub use controller::PlaybackController;
pub use gesture::{ClickKind, GestureState};
pub use session::{PlaybackSession, SeekIndicator};

use serde::{Deserialize, Serialize};

/// Playback state as derived from sink events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Playback is running
    Playing,

    /// Playback is paused
    Paused,

    /// Playback stalled waiting for data
    Buffering,
}

/// The last play/pause intent commanded by the user
///
/// Used to resolve what Buffering clears back to once the sink reports
/// readiness, since Buffering itself does not say whether the user wanted
/// playback running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayIntent {
    Play,
    Pause,
}

/// Which half of the player surface a click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceSide {
    Left,
    Right,
}

/// Direction of a double-click seek
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekDirection {
    Forward,
    Backward,
}

/// Display mode of a subtitle track. Exactly one track is `Showing` at a
/// time, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubtitleMode {
    Showing,
    Hidden,
}

/// Player behavior tunables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerOptions {
    /// Start playback as soon as a target is bound
    pub autoplay: bool,

    /// Initial volume (0.0 to 1.0)
    pub default_volume: f32,

    /// Window within which a same-side second click counts as a double click
    pub double_click_window_ms: u64,

    /// Seconds jumped by a double-click seek
    pub double_click_seek_secs: f64,

    /// Inactivity delay before the controls hide
    pub controls_hide_delay_ms: u64,

    /// Visual decay of the transient seek indicator
    pub seek_indicator_decay_ms: u64,

    /// Volume restored when un-muting from a volume of zero
    pub unmute_fallback_volume: f32,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            default_volume: 1.0,
            double_click_window_ms: 300,
            double_click_seek_secs: 10.0,
            controls_hide_delay_ms: 3000,
            seek_indicator_decay_ms: 500,
            unmute_fallback_volume: 0.5,
        }
    }
}

/// Input events from the player surface
///
/// Clicks on the control bar itself must be routed as the specific button
/// or bar variants, never as `Click`: control-bar activity neither feeds
/// the gesture debounce nor counts as movement for auto-hide.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceInput {
    /// Pointer moved over the player surface
    PointerMoved,

    /// Pointer left the player surface
    PointerLeft,

    /// Click on the bare player surface; `x_ratio` is the horizontal click
    /// position as a fraction of the surface width (0.0 = left edge)
    Click { x_ratio: f32 },

    /// Scrubber moved to a fraction of the duration (0.0 to 1.0)
    SeekBarChanged(f64),

    /// Volume bar moved (0.0 to 1.0)
    VolumeBarChanged(f32),

    /// Play/pause button pressed
    PlayPausePressed,

    /// Mute button pressed
    MutePressed,

    /// Fullscreen button pressed
    FullscreenPressed,

    /// Audio track menu opened or closed
    AudioMenuToggled,

    /// Audio track picked from the menu, by language label
    AudioTrackSelected(String),

    /// Subtitle menu opened or closed
    SubtitleMenuToggled,

    /// Subtitle language picked from the menu; `None` turns subtitles off
    SubtitleSelected(Option<String>),
}

/// Player event for external observers
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    /// A track source was bound to the sink
    MediaBound { lang: String, url: String },

    /// Playback started
    PlaybackStarted,

    /// Playback paused
    PlaybackPaused,

    /// Playback stalled waiting for data
    Buffering,

    /// Duration became known, in seconds
    DurationKnown(f64),

    /// Position changed, in seconds
    PositionChanged(f64),

    /// Active audio track switched
    TrackSwitched { lang: String },

    /// Subtitle selection changed; `None` means off
    SubtitleChanged { lang: Option<String> },

    /// Volume changed (0.0 to 1.0)
    VolumeChanged(f32),

    /// Muted flag flipped
    MuteChanged(bool),

    /// Fullscreen state changed
    FullscreenChanged(bool),

    /// A double-click seek raised the directional indicator
    SeekIndicatorRaised(SeekDirection),

    /// Controls became visible or hidden
    ControlsVisibilityChanged(bool),

    /// The bound source failed to load
    LoadFailed { reason: String },
}

/// Player event handler trait
pub trait PlayerEventHandler: Send {
    /// Handle a player event
    fn handle_event(&mut self, event: PlayerEvent);
}
