//! Deterministic simulated media sink
//!
//! [`SimSink`] stands in for a real media backend in tests and in the demo
//! binary. It records every command it receives and emits [`SinkEvent`]s
//! over a channel, but it never loads anything on its own: metadata arrival
//! and load failures are driven explicitly through the paired
//! [`SimSinkHandle`], so event ordering in tests is fully under the caller's
//! control.
//!
//! Seeks are clamped to `[0, duration]` once the duration is known, matching
//! how a media element resolves seeks past the end of media. The controller
//! itself passes forward seeks through uncapped and relies on this.

use crate::sink::{MediaSink, SinkEvent};
use crate::utils::error::Result;
use crossbeam_channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Fallback duration for sources without a configured one, in seconds
const DEFAULT_SOURCE_DURATION: f64 = 1425.0;

/// A command received by the simulated sink, in arrival order
#[derive(Debug, Clone, PartialEq)]
pub enum SinkCommand {
    Bind(String),
    Play,
    Pause,
    /// The seek target as requested, before end-of-media clamping
    Seek(f64),
    SetVolume(f32),
    SetMuted(bool),
    SetFullscreen(bool),
}

#[derive(Debug, Default)]
struct SimState {
    commands: Vec<SinkCommand>,
    source_durations: HashMap<String, f64>,
    bound: Option<String>,
    duration: Option<f64>,
    position: f64,
    playing: bool,
    volume: f32,
    muted: bool,
    fullscreen: bool,
}

/// Simulated media sink
pub struct SimSink {
    state: Arc<Mutex<SimState>>,
    events: Sender<SinkEvent>,
}

/// Driver and inspection handle paired with a [`SimSink`]
///
/// The handle keeps its own sender so driver-emitted events (metadata,
/// load failures, time updates) flow through the same channel as the
/// sink's own reactions, in order.
pub struct SimSinkHandle {
    state: Arc<Mutex<SimState>>,
    events: Receiver<SinkEvent>,
    events_tx: Sender<SinkEvent>,
}

impl SimSink {
    /// Create a sink and its driver handle
    pub fn new() -> (SimSink, SimSinkHandle) {
        let state = Arc::new(Mutex::new(SimState {
            volume: 1.0,
            ..SimState::default()
        }));
        let (tx, rx) = unbounded();

        (
            SimSink {
                state: Arc::clone(&state),
                events: tx.clone(),
            },
            SimSinkHandle {
                state,
                events: rx,
                events_tx: tx,
            },
        )
    }
}

impl MediaSink for SimSink {
    fn bind(&mut self, source: &str) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::Bind(source.to_string()));
        state.bound = Some(source.to_string());
        state.duration = None;
        state.position = 0.0;

        // Metadata is not available until the driver completes the load
        let _ = self.events.send(SinkEvent::Buffering);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::Play);
        state.playing = true;
        let _ = self.events.send(SinkEvent::Playing);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::Pause);
        state.playing = false;
        let _ = self.events.send(SinkEvent::Paused);
        Ok(())
    }

    fn seek(&mut self, seconds: f64) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::Seek(seconds));

        let clamped = match state.duration {
            Some(duration) => seconds.clamp(0.0, duration),
            None => seconds.max(0.0),
        };
        state.position = clamped;
        let _ = self.events.send(SinkEvent::TimeUpdate(clamped));
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::SetVolume(volume));
        state.volume = volume;
        Ok(())
    }

    fn set_muted(&mut self, muted: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::SetMuted(muted));
        state.muted = muted;
        Ok(())
    }

    fn set_fullscreen(&mut self, fullscreen: bool) -> Result<()> {
        let mut state = self.state.lock();
        state.commands.push(SinkCommand::SetFullscreen(fullscreen));
        state.fullscreen = fullscreen;
        let _ = self.events.send(SinkEvent::FullscreenChanged(fullscreen));
        Ok(())
    }
}

impl SimSinkHandle {
    /// Configure the duration the sink will report for a source
    pub fn set_source_duration(&self, source: &str, seconds: f64) {
        self.state
            .lock()
            .source_durations
            .insert(source.to_string(), seconds);
    }

    /// Finish loading the currently bound source: reports the configured
    /// duration followed by readiness to play.
    pub fn complete_load(&self) {
        let duration = {
            let mut state = self.state.lock();
            let Some(bound) = state.bound.clone() else {
                return;
            };
            let duration = state
                .source_durations
                .get(&bound)
                .copied()
                .unwrap_or(DEFAULT_SOURCE_DURATION);
            state.duration = Some(duration);
            duration
        };

        let _ = self.events_tx.send(SinkEvent::DurationKnown(duration));
        let _ = self.events_tx.send(SinkEvent::ReadyToPlay);
    }

    /// Fail loading the currently bound source
    pub fn fail_load(&self, reason: &str) {
        let _ = self
            .events_tx
            .send(SinkEvent::LoadFailed(reason.to_string()));
    }

    /// Advance playback time if the sink is playing, emitting a time update
    pub fn advance(&self, seconds: f64) {
        let position = {
            let mut state = self.state.lock();
            if !state.playing {
                return;
            }
            let limit = state.duration.unwrap_or(f64::MAX);
            state.position = (state.position + seconds).min(limit);
            state.position
        };
        let _ = self.events_tx.send(SinkEvent::TimeUpdate(position));
    }

    /// Drain all pending sink events
    pub fn drain_events(&self) -> Vec<SinkEvent> {
        self.events.try_iter().collect()
    }

    /// All commands received so far, in order
    pub fn commands(&self) -> Vec<SinkCommand> {
        self.state.lock().commands.clone()
    }

    /// Take and clear the recorded commands
    pub fn take_commands(&self) -> Vec<SinkCommand> {
        std::mem::take(&mut self.state.lock().commands)
    }

    /// The currently bound source, if any
    pub fn bound_source(&self) -> Option<String> {
        self.state.lock().bound.clone()
    }

    /// The sink's current position in seconds
    pub fn position(&self) -> f64 {
        self.state.lock().position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_resets_position_and_duration() {
        let (mut sink, handle) = SimSink::new();
        handle.set_source_duration("a.mp4", 100.0);

        sink.bind("a.mp4").unwrap();
        handle.complete_load();
        sink.seek(40.0).unwrap();
        assert_eq!(handle.position(), 40.0);

        sink.bind("b.mp4").unwrap();
        assert_eq!(handle.position(), 0.0);
        assert_eq!(handle.bound_source().as_deref(), Some("b.mp4"));
    }

    #[test]
    fn test_seek_clamps_to_duration() {
        let (mut sink, handle) = SimSink::new();
        handle.set_source_duration("a.mp4", 60.0);
        sink.bind("a.mp4").unwrap();
        handle.complete_load();

        sink.seek(500.0).unwrap();
        assert_eq!(handle.position(), 60.0);

        sink.seek(-5.0).unwrap();
        assert_eq!(handle.position(), 0.0);

        // The command log keeps the requested values
        let commands = handle.commands();
        assert!(commands.contains(&SinkCommand::Seek(500.0)));
        assert!(commands.contains(&SinkCommand::Seek(-5.0)));
    }

    #[test]
    fn test_advance_only_while_playing() {
        let (mut sink, handle) = SimSink::new();
        sink.bind("a.mp4").unwrap();
        handle.complete_load();

        handle.advance(5.0);
        assert_eq!(handle.position(), 0.0);

        sink.play().unwrap();
        handle.advance(5.0);
        assert_eq!(handle.position(), 5.0);
    }

    #[test]
    fn test_driver_events_share_the_sink_channel() {
        let (mut sink, handle) = SimSink::new();
        handle.set_source_duration("a.mp4", 120.0);

        // Sink reaction, then driver-emitted events, in channel order
        sink.bind("a.mp4").unwrap();
        handle.complete_load();
        sink.play().unwrap();
        handle.advance(7.0);
        handle.fail_load("network reset");

        let events = handle.drain_events();
        assert_eq!(
            events,
            vec![
                SinkEvent::Buffering,
                SinkEvent::DurationKnown(120.0),
                SinkEvent::ReadyToPlay,
                SinkEvent::Playing,
                SinkEvent::TimeUpdate(7.0),
                SinkEvent::LoadFailed("network reset".to_string()),
            ]
        );
    }

    #[test]
    fn test_complete_load_emits_metadata_events() {
        let (mut sink, handle) = SimSink::new();
        handle.set_source_duration("a.mp4", 90.0);
        sink.bind("a.mp4").unwrap();
        handle.drain_events();

        handle.complete_load();
        let events = handle.drain_events();
        assert_eq!(
            events,
            vec![SinkEvent::DurationKnown(90.0), SinkEvent::ReadyToPlay]
        );
    }
}
