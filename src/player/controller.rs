//! Playback controller implementation
//!
//! [`PlaybackController`] resolves a (series, episode) target against the
//! catalog, binds a [`MediaSink`] to the selected track source, and from
//! then on reacts to sink events and user input, updating the session and
//! re-issuing sink commands. Everything runs on the caller's event loop:
//! nothing here blocks, and the only time-deferred behavior (auto-hiding
//! controls, seek indicator decay) is a deadline checked by [`tick`].
//!
//! [`tick`]: PlaybackController::tick

use crate::catalog::Catalog;
use crate::player::{
    ClickKind, PlayIntent, PlayState, PlaybackSession, PlayerEvent, PlayerEventHandler,
    PlayerOptions, SeekDirection, SeekIndicator, SubtitleMode, SurfaceInput, SurfaceSide,
};
use crate::sink::{MediaSink, SinkEvent};
use crate::utils::error::{PlayerError, Result};

use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Normalize a subtitle language label to its fixed 2-letter form
fn normalize_lang(label: &str) -> String {
    label.to_lowercase().chars().take(2).collect()
}

/// Error for operations attempted without a resolved target
fn session_missing(missing: &Option<(String, String)>) -> PlayerError {
    let (series_id, episode_id) = missing.clone().unwrap_or_default();
    PlayerError::TargetNotFound {
        series_id,
        episode_id,
    }
}

/// The playback controller: owns the session and the sink binding
pub struct PlaybackController {
    sink: Box<dyn MediaSink>,
    options: PlayerOptions,

    /// `None` is the terminal NotFound state: no sink is bound and
    /// transport operations fail with `TargetNotFound`
    session: Option<PlaybackSession>,

    /// The identity that failed to resolve, kept for error reporting
    missing: Option<(String, String)>,

    handlers: Vec<Box<dyn PlayerEventHandler>>,
}

impl PlaybackController {
    /// Resolve a target and open a controller for it
    ///
    /// If the (series, episode) pair is unknown the controller is returned
    /// in the terminal NotFound state: no source is bound, and the caller
    /// is expected to present a "not available" affordance. Check with
    /// [`is_not_found`](Self::is_not_found).
    pub fn open(
        catalog: &Catalog,
        series_id: &str,
        episode_id: &str,
        sink: Box<dyn MediaSink>,
        options: PlayerOptions,
    ) -> Result<Self> {
        let mut controller = Self {
            sink,
            options,
            session: None,
            missing: None,
            handlers: Vec::new(),
        };
        controller.load(catalog, series_id, episode_id)?;
        Ok(controller)
    }

    /// Navigate to a (series, episode) pair: a full session reset, never an
    /// in-place patch. Position, track and subtitle selection all restart.
    pub fn load(&mut self, catalog: &Catalog, series_id: &str, episode_id: &str) -> Result<()> {
        match catalog.find_episode(series_id, episode_id) {
            Some((series, episode)) => {
                info!(
                    "Opening '{}' E{} '{}'",
                    series.title, episode.episode_number, episode.title
                );
                let session = PlaybackSession::new(series, episode, &self.options);
                let track = session.active_track().clone();
                let volume = session.volume;
                let autoplay = self.options.autoplay;

                self.session = Some(session);
                self.missing = None;

                self.sink.set_volume(volume)?;
                self.sink.bind(&track.url)?;
                self.emit(PlayerEvent::MediaBound {
                    lang: track.lang,
                    url: track.url,
                });
                if autoplay {
                    self.sink.play()?;
                }
                Ok(())
            }
            None => {
                warn!(
                    "Target not found: series '{}', episode '{}'",
                    series_id, episode_id
                );
                self.session = None;
                self.missing = Some((series_id.to_string(), episode_id.to_string()));
                Ok(())
            }
        }
    }

    /// Register an observer for player events
    pub fn add_event_handler(&mut self, handler: Box<dyn PlayerEventHandler>) {
        self.handlers.push(handler);
    }

    /// The current session, or `None` in the NotFound state
    pub fn session(&self) -> Option<&PlaybackSession> {
        self.session.as_ref()
    }

    /// Whether target resolution failed
    pub fn is_not_found(&self) -> bool {
        self.session.is_none()
    }

    // ---- Sink event handling -------------------------------------------

    /// Feed one sink event into the controller. Session state is derived
    /// from these events only, never set directly by command methods, so a
    /// rejected command (autoplay restrictions, say) cannot desync us.
    pub fn handle_sink_event(&mut self, event: SinkEvent) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            // Late events from a binding we navigated away from
            return Ok(());
        };

        match event {
            SinkEvent::TimeUpdate(seconds) => {
                session.position = seconds;
                self.emit(PlayerEvent::PositionChanged(seconds));
            }
            SinkEvent::DurationKnown(seconds) => {
                session.duration = Some(seconds);
                session.stalled = false;
                let pending = session.pending_seek_on_load.take();
                self.emit(PlayerEvent::DurationKnown(seconds));
                if let Some(target) = pending {
                    debug!("Restoring position {:.3}s after track switch", target);
                    self.sink.seek(target)?;
                }
            }
            SinkEvent::Playing => {
                session.play_state = PlayState::Playing;
                session.intent = PlayIntent::Play;
                session.stalled = false;
                self.emit(PlayerEvent::PlaybackStarted);
            }
            SinkEvent::Paused => {
                session.play_state = PlayState::Paused;
                session.intent = PlayIntent::Pause;
                self.emit(PlayerEvent::PlaybackPaused);
            }
            SinkEvent::Buffering => {
                if session.play_state != PlayState::Buffering {
                    session.play_state = PlayState::Buffering;
                    self.emit(PlayerEvent::Buffering);
                }
            }
            SinkEvent::ReadyToPlay => {
                session.stalled = false;
                if session.play_state == PlayState::Buffering {
                    // Buffering clears back to whatever was last intended
                    let resumed = session.intent == PlayIntent::Play;
                    session.play_state = if resumed {
                        PlayState::Playing
                    } else {
                        PlayState::Paused
                    };
                    self.emit(if resumed {
                        PlayerEvent::PlaybackStarted
                    } else {
                        PlayerEvent::PlaybackPaused
                    });
                }
            }
            SinkEvent::FullscreenChanged(fullscreen) => {
                session.fullscreen = fullscreen;
                self.emit(PlayerEvent::FullscreenChanged(fullscreen));
            }
            SinkEvent::LoadFailed(reason) => {
                warn!("Source failed to load: {}", reason);
                // The pending seek is dropped, never retried; the session
                // stays stalled until further sink events arrive
                session.pending_seek_on_load = None;
                session.play_state = PlayState::Buffering;
                session.stalled = true;
                self.emit(PlayerEvent::LoadFailed { reason });
            }
        }
        Ok(())
    }

    // ---- User input ----------------------------------------------------

    /// Dispatch one player-surface input event
    pub fn handle_input(&mut self, input: SurfaceInput, now: Instant) -> Result<()> {
        match input {
            SurfaceInput::PointerMoved => {
                self.pointer_moved(now);
                Ok(())
            }
            SurfaceInput::PointerLeft => {
                self.pointer_left();
                Ok(())
            }
            SurfaceInput::Click { x_ratio } => self.surface_click(now, x_ratio),
            SurfaceInput::SeekBarChanged(fraction) => self.seek_to_fraction(fraction),
            SurfaceInput::VolumeBarChanged(volume) => self.set_volume(volume),
            SurfaceInput::PlayPausePressed => self.toggle_play_pause(),
            SurfaceInput::MutePressed => self.toggle_mute(),
            SurfaceInput::FullscreenPressed => self.toggle_fullscreen(),
            SurfaceInput::AudioMenuToggled => {
                self.toggle_audio_menu();
                Ok(())
            }
            SurfaceInput::AudioTrackSelected(lang) => self.switch_audio_track(&lang),
            SurfaceInput::SubtitleMenuToggled => {
                self.toggle_subtitle_menu();
                Ok(())
            }
            SurfaceInput::SubtitleSelected(lang) => self.set_subtitle_language(lang.as_deref()),
        }
    }

    // ---- Transport -----------------------------------------------------

    /// Command play if the sink is paused, pause otherwise. The session's
    /// play state only changes once the sink reports back.
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(session_missing(&self.missing));
        };
        if session.play_state == PlayState::Paused {
            self.sink.play()
        } else {
            self.sink.pause()
        }
    }

    /// Seek to a fraction of the duration, from the scrubber. No-op while
    /// the duration is unknown.
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(session_missing(&self.missing));
        };
        let Some(duration) = session.duration else {
            return Ok(());
        };
        self.sink.seek(fraction.clamp(0.0, 1.0) * duration)
    }

    /// Set the volume (0.0 to 1.0). A volume of zero also flags the session
    /// as muted.
    pub fn set_volume(&mut self, volume: f32) -> Result<()> {
        let volume = volume.clamp(0.0, 1.0);
        let Some(session) = self.session.as_mut() else {
            return Err(session_missing(&self.missing));
        };
        session.volume = volume;
        session.muted = volume == 0.0;
        self.sink.set_volume(volume)?;
        self.emit(PlayerEvent::VolumeChanged(volume));
        Ok(())
    }

    /// Flip the muted flag. Un-muting from a volume of zero restores a
    /// default audible level instead of staying silent.
    pub fn toggle_mute(&mut self) -> Result<()> {
        let fallback = self.options.unmute_fallback_volume;
        let Some(session) = self.session.as_mut() else {
            return Err(session_missing(&self.missing));
        };

        session.muted = !session.muted;
        let muted = session.muted;
        let restore = if !muted && session.volume == 0.0 {
            session.volume = fallback;
            Some(fallback)
        } else {
            None
        };

        self.sink.set_muted(muted)?;
        self.emit(PlayerEvent::MuteChanged(muted));
        if let Some(volume) = restore {
            self.sink.set_volume(volume)?;
            self.emit(PlayerEvent::VolumeChanged(volume));
        }
        Ok(())
    }

    /// Request entering or leaving fullscreen. `fullscreen` on the session
    /// follows the sink's change notification, so external exits (browser
    /// chrome, window manager) stay consistent.
    pub fn toggle_fullscreen(&mut self) -> Result<()> {
        let Some(session) = self.session.as_ref() else {
            return Err(session_missing(&self.missing));
        };
        self.sink.set_fullscreen(!session.fullscreen)
    }

    // ---- Track and subtitle selection ----------------------------------

    /// Switch the spoken-language track without losing position
    ///
    /// Tracks are separate media sources, so this is a hard rebind: the
    /// current position is parked in `pending_seek_on_load` and re-applied
    /// once the new source's metadata arrives. A switch issued while
    /// another is still loading overwrites the pending seek and rebinds
    /// again; nothing is queued.
    pub fn switch_audio_track(&mut self, lang: &str) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(session_missing(&self.missing));
        };
        let Some(index) = session.episode.tracks.iter().position(|t| t.lang == lang) else {
            return Err(PlayerError::UnknownTrack(lang.to_string()));
        };

        session.pending_seek_on_load = Some(session.position);
        session.intent = if session.play_state == PlayState::Paused {
            PlayIntent::Pause
        } else {
            PlayIntent::Play
        };
        session.active_track = index;
        session.duration = None;
        session.stalled = false;
        session.audio_menu_open = false;

        let track = session.active_track().clone();
        let resume = session.intent == PlayIntent::Play;
        info!(
            "Switching audio track to '{}' at {:.3}s",
            track.lang, session.position
        );

        self.sink.bind(&track.url)?;
        if resume {
            self.sink.play()?;
        }
        self.emit(PlayerEvent::TrackSwitched {
            lang: track.lang.clone(),
        });
        self.emit(PlayerEvent::MediaBound {
            lang: track.lang,
            url: track.url,
        });
        Ok(())
    }

    /// Select the subtitle language, or turn subtitles off with `None`.
    /// Subtitles are overlays: the sink binding is untouched and playback
    /// continues uninterrupted.
    pub fn set_subtitle_language(&mut self, lang: Option<&str>) -> Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Err(session_missing(&self.missing));
        };

        let normalized = match lang {
            Some(label) => {
                let normalized = normalize_lang(label);
                let known = session
                    .episode
                    .subtitles
                    .iter()
                    .any(|s| normalize_lang(&s.lang) == normalized);
                if !known {
                    return Err(PlayerError::UnknownSubtitle(label.to_string()));
                }
                Some(normalized)
            }
            None => None,
        };

        debug!("Subtitle language set to {:?}", normalized);
        session.active_subtitle = normalized.clone();
        session.subtitle_menu_open = false;
        self.emit(PlayerEvent::SubtitleChanged { lang: normalized });
        Ok(())
    }

    /// Display mode of every subtitle track: at most one is `Showing`
    pub fn subtitle_modes(&self) -> Vec<(String, SubtitleMode)> {
        let Some(session) = self.session.as_ref() else {
            return Vec::new();
        };
        session
            .episode
            .subtitles
            .iter()
            .map(|track| {
                let mode = if session.active_subtitle.as_deref()
                    == Some(normalize_lang(&track.lang).as_str())
                {
                    SubtitleMode::Showing
                } else {
                    SubtitleMode::Hidden
                };
                (track.lang.clone(), mode)
            })
            .collect()
    }

    /// Open or close the audio track menu
    pub fn toggle_audio_menu(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.audio_menu_open = !session.audio_menu_open;
        }
    }

    /// Open or close the subtitle menu
    pub fn toggle_subtitle_menu(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.subtitle_menu_open = !session.subtitle_menu_open;
        }
    }

    // ---- Gestures ------------------------------------------------------

    /// Classify a click on the bare player surface
    ///
    /// A second same-side click within the double-click window seeks 10s
    /// backward (left half, clamped at zero) or forward (right half,
    /// uncapped; the sink resolves overrun at end of media) and raises the
    /// directional indicator. Anything else toggles play/pause.
    pub fn surface_click(&mut self, now: Instant, x_ratio: f32) -> Result<()> {
        let window = Duration::from_millis(self.options.double_click_window_ms);
        let step = self.options.double_click_seek_secs;
        let Some(session) = self.session.as_mut() else {
            return Err(session_missing(&self.missing));
        };

        let side = if x_ratio < 0.5 {
            SurfaceSide::Left
        } else {
            SurfaceSide::Right
        };

        match session.gesture.classify(now, side, window) {
            ClickKind::Double => {
                let (target, direction) = match side {
                    SurfaceSide::Left => ((session.position - step).max(0.0), SeekDirection::Backward),
                    SurfaceSide::Right => (session.position + step, SeekDirection::Forward),
                };
                session.seek_indicator = Some(SeekIndicator {
                    direction,
                    raised_at: now,
                });
                debug!("Double-click seek {:?} to {:.3}s", direction, target);
                self.sink.seek(target)?;
                self.emit(PlayerEvent::SeekIndicatorRaised(direction));
                Ok(())
            }
            ClickKind::Single => self.toggle_play_pause(),
        }
    }

    // ---- Controls visibility and timers --------------------------------

    /// Pointer movement over the surface: show the controls and restart the
    /// single inactivity deadline (cancel-and-restart, so an old deadline
    /// can never race a new one).
    pub fn pointer_moved(&mut self, now: Instant) {
        let delay = Duration::from_millis(self.options.controls_hide_delay_ms);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let was_visible = session.controls_visible;
        session.controls_visible = true;
        session.hide_controls_at = Some(now + delay);
        if !was_visible {
            self.emit(PlayerEvent::ControlsVisibilityChanged(true));
        }
    }

    /// Pointer left the surface: hide immediately while playback runs
    pub fn pointer_left(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.play_state == PlayState::Playing && session.controls_visible {
            session.controls_visible = false;
            session.hide_controls_at = None;
            self.emit(PlayerEvent::ControlsVisibilityChanged(false));
        }
    }

    /// Advance the controller's timers to `now`: expires the auto-hide
    /// deadline and decays the seek indicator. Call from the host's loop.
    pub fn tick(&mut self, now: Instant) {
        let decay = Duration::from_millis(self.options.seek_indicator_decay_ms);
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if let Some(indicator) = session.seek_indicator {
            if now.duration_since(indicator.raised_at) >= decay {
                session.seek_indicator = None;
            }
        }

        if session.hide_controls_at.is_some_and(|deadline| now >= deadline) {
            session.hide_controls_at = None;
            if session.controls_visible {
                session.controls_visible = false;
                self.emit(PlayerEvent::ControlsVisibilityChanged(false));
            }
        }
    }

    // ---- Internals -----------------------------------------------------

    fn emit(&mut self, event: PlayerEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }
}
