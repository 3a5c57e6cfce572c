//! aniplay - playback controller for an episode catalog
//!
//! The crate centers on [`player::PlaybackController`]: the state machine
//! behind a player surface, handling transport, multi-track audio switching
//! with seek/resume continuity, subtitle selection, double-click seek
//! gestures and auto-hiding controls. It talks to the platform through the
//! [`sink::MediaSink`] capability, so the same logic drives a real media
//! backend or the deterministic [`sink::SimSink`] used in tests.

pub mod catalog;
pub mod player;
pub mod sink;
pub mod utils;

pub use catalog::{Catalog, CatalogStore, Episode, Series, SubtitleTrack, Track};
pub use player::{PlaybackController, PlayerEvent, PlayerEventHandler, PlayerOptions};
pub use sink::{MediaSink, SinkEvent};
pub use utils::error::{PlayerError, Result};
