//! Per-target playback session state
//!
//! A [`PlaybackSession`] is the complete transient state attached to one
//! (series, episode) viewing instance. Navigating to a different episode
//! destroys and recreates the session; switching audio tracks within the
//! same episode mutates it in place, preserving position.

use crate::catalog::{Episode, Series, Track};
use crate::player::{GestureState, PlayIntent, PlayState, PlayerOptions, SeekDirection};
use std::time::Instant;

/// Transient directional indicator raised by a double-click seek
///
/// Purely presentational: it decays after a fixed duration, and a new
/// instance always replaces the prior one so overlapping double-clicks
/// restart the animation rather than stacking. `raised_at` doubles as the
/// unique instance key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekIndicator {
    pub direction: SeekDirection,
    pub raised_at: Instant,
}

/// All transient state for one (series, episode) viewing instance
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Parent series identity
    pub series_id: String,

    /// Parent series display title
    pub series_title: String,

    /// The resolved episode, immutable for the life of the session
    pub episode: Episode,

    /// Index into `episode.tracks` of the track bound to the sink.
    /// Invariant: always a valid index.
    pub active_track: usize,

    /// Active subtitle language, normalized to a 2-letter form; `None` = off
    pub active_subtitle: Option<String>,

    /// Last reported position in seconds
    pub position: f64,

    /// Duration in seconds; `None` until the sink reports metadata
    pub duration: Option<f64>,

    /// Playback state derived from sink events
    pub play_state: PlayState,

    /// Last commanded play/pause intent
    pub intent: PlayIntent,

    /// Volume level (0.0 to 1.0)
    pub volume: f32,

    /// Muted flag; effective audible volume is zero while set
    pub muted: bool,

    /// Whether the control surface is shown
    pub controls_visible: bool,

    /// Single auto-hide deadline; rescheduling always replaces it
    pub hide_controls_at: Option<Instant>,

    /// Fullscreen state, derived from sink notifications
    pub fullscreen: bool,

    /// Position to restore once the next metadata load completes; only set
    /// during a track switch
    pub pending_seek_on_load: Option<f64>,

    /// Click debounce state for the double-click seek gesture
    pub gesture: GestureState,

    /// Transient double-click seek indicator, if one is decaying
    pub seek_indicator: Option<SeekIndicator>,

    /// Audio track selection menu open flag
    pub audio_menu_open: bool,

    /// Subtitle selection menu open flag
    pub subtitle_menu_open: bool,

    /// Set when the bound source failed to load; the session stays in a
    /// stalled Buffering display state with no automatic retry
    pub stalled: bool,
}

impl PlaybackSession {
    /// Create a fresh session for a resolved target
    pub fn new(series: &Series, episode: &Episode, options: &PlayerOptions) -> Self {
        let (play_state, intent) = if options.autoplay {
            (PlayState::Playing, PlayIntent::Play)
        } else {
            (PlayState::Paused, PlayIntent::Pause)
        };

        Self {
            series_id: series.id.clone(),
            series_title: series.title.clone(),
            episode: episode.clone(),
            active_track: 0,
            active_subtitle: None,
            position: 0.0,
            duration: None,
            play_state,
            intent,
            volume: options.default_volume.clamp(0.0, 1.0),
            muted: false,
            controls_visible: true,
            hide_controls_at: None,
            fullscreen: false,
            pending_seek_on_load: None,
            gesture: GestureState::default(),
            seek_indicator: None,
            audio_menu_open: false,
            subtitle_menu_open: false,
            stalled: false,
        }
    }

    /// The track currently bound to the sink
    pub fn active_track(&self) -> &Track {
        &self.episode.tracks[self.active_track]
    }

    /// Effective audible volume: zero while muted
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}
