use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use aniplay::catalog::{Catalog, CatalogStore};
use aniplay::player::{
    PlaybackController, PlayerEvent, PlayerEventHandler, SurfaceInput,
};
use aniplay::sink::{SimSink, SimSinkHandle};
use aniplay::utils::{format_timestamp, Config};

/// aniplay - episode playback controller demo
///
/// Runs a scripted viewing session against the simulated media sink,
/// logging every state transition the controller makes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog JSON file (defaults to the built-in sample catalog)
    #[arg(short, long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Series to open (defaults to the first series in the catalog)
    #[arg(short, long)]
    series: Option<String>,

    /// Episode to open (defaults to the first episode of the series)
    #[arg(short, long)]
    episode: Option<String>,

    /// Initial volume (0-100)
    #[arg(short, long, default_value = "100")]
    volume: u8,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load_or_default();

    let log_level = if args.debug {
        "debug".to_string()
    } else {
        config.log_level.clone()
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level))
        .format_timestamp_millis()
        .init();

    info!("Starting aniplay v{}", env!("CARGO_PKG_VERSION"));

    let catalog = match &args.catalog {
        Some(path) => CatalogStore::load(path)
            .with_context(|| format!("Loading catalog from {:?}", path))?,
        None => Catalog::sample(),
    };

    let Some(first_series) = catalog.series.first() else {
        bail!("Catalog is empty");
    };
    let series_id = args.series.clone().unwrap_or_else(|| first_series.id.clone());
    let episode_id = match &args.episode {
        Some(id) => id.clone(),
        None => {
            let series = catalog
                .find_series(&series_id)
                .with_context(|| format!("Unknown series '{}'", series_id))?;
            let episode = series.episodes.first().context("Series has no episodes")?;
            episode.id.clone()
        }
    };

    let mut options = config.player.clone();
    options.default_volume = f32::from(args.volume.min(100)) / 100.0;

    let (sink, handle) = SimSink::new();
    let mut controller = PlaybackController::open(
        &catalog,
        &series_id,
        &episode_id,
        Box::new(sink),
        options,
    )?;
    controller.add_event_handler(Box::new(LoggingEventHandler));

    if controller.is_not_found() {
        bail!(
            "Episode not found: series '{}', episode '{}'",
            series_id,
            episode_id
        );
    }

    run_scripted_session(&mut controller, &handle)?;

    info!("Session finished");
    Ok(())
}

/// Drive a short scripted viewing session through the controller
fn run_scripted_session(
    controller: &mut PlaybackController,
    handle: &SimSinkHandle,
) -> Result<()> {
    let base = Instant::now();
    let at = |millis: u64| base + Duration::from_millis(millis);

    // Metadata arrives and autoplay kicks in
    handle.complete_load();
    pump(controller, handle)?;

    // A little playback, with the pointer over the surface
    controller.handle_input(SurfaceInput::PointerMoved, at(0))?;
    handle.advance(42.0);
    pump(controller, handle)?;

    // Double-click on the right half: +10s with the seek indicator
    controller.handle_input(SurfaceInput::Click { x_ratio: 0.8 }, at(100))?;
    controller.handle_input(SurfaceInput::Click { x_ratio: 0.8 }, at(250))?;
    pump(controller, handle)?;

    // The first click of the pair paused playback; resume
    controller.handle_input(SurfaceInput::PlayPausePressed, at(500))?;
    pump(controller, handle)?;

    // Switch the spoken language without losing the position
    let other_track = controller.session().and_then(|session| {
        let active = session.active_track().lang.clone();
        session
            .episode
            .tracks
            .iter()
            .map(|track| track.lang.clone())
            .find(|lang| *lang != active)
    });
    if let Some(lang) = other_track {
        controller.handle_input(SurfaceInput::AudioTrackSelected(lang), at(1000))?;
        pump(controller, handle)?;
        handle.complete_load();
        pump(controller, handle)?;
    }

    // Subtitles on, if the episode has any
    let subtitle = controller
        .session()
        .and_then(|s| s.episode.subtitles.first().map(|t| t.lang.clone()));
    if let Some(lang) = subtitle {
        controller.handle_input(SurfaceInput::SubtitleSelected(Some(lang)), at(1500))?;
    }

    // Mute, restore, fullscreen round trip
    controller.handle_input(SurfaceInput::MutePressed, at(2000))?;
    controller.handle_input(SurfaceInput::MutePressed, at(2200))?;
    controller.handle_input(SurfaceInput::FullscreenPressed, at(2400))?;
    pump(controller, handle)?;

    // Idle playback: the pointer leaves and the controls hide
    controller.handle_input(SurfaceInput::PointerLeft, at(3000))?;
    controller.tick(at(6000));
    handle.advance(20.0);
    pump(controller, handle)?;

    if let Some(session) = controller.session() {
        info!(
            "Final state: '{}' track '{}' at {} / {}, controls {}",
            session.episode.title,
            session.active_track().lang,
            format_timestamp(session.position),
            session
                .duration
                .map(format_timestamp)
                .unwrap_or_else(|| "--:--".to_string()),
            if session.controls_visible { "visible" } else { "hidden" },
        );
    }
    Ok(())
}

/// Deliver pending sink events back to the controller
fn pump(controller: &mut PlaybackController, handle: &SimSinkHandle) -> Result<()> {
    loop {
        let events = handle.drain_events();
        if events.is_empty() {
            return Ok(());
        }
        for event in events {
            controller.handle_sink_event(event)?;
        }
    }
}

/// Event handler that logs player events
struct LoggingEventHandler;

impl PlayerEventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::MediaBound { lang, url } => {
                info!("Bound '{}' source: {}", lang, url);
            }
            PlayerEvent::PlaybackStarted => info!("Playback started"),
            PlayerEvent::PlaybackPaused => info!("Playback paused"),
            PlayerEvent::Buffering => info!("Buffering"),
            PlayerEvent::DurationKnown(seconds) => {
                info!("Duration known: {}", format_timestamp(seconds));
            }
            PlayerEvent::PositionChanged(seconds) => {
                log::debug!("Position: {}", format_timestamp(seconds));
            }
            PlayerEvent::TrackSwitched { lang } => info!("Audio track: {}", lang),
            PlayerEvent::SubtitleChanged { lang } => {
                info!("Subtitles: {}", lang.as_deref().unwrap_or("off"));
            }
            PlayerEvent::VolumeChanged(volume) => {
                info!("Volume: {:.0}%", volume * 100.0);
            }
            PlayerEvent::MuteChanged(muted) => {
                info!("{}", if muted { "Muted" } else { "Unmuted" });
            }
            PlayerEvent::FullscreenChanged(fullscreen) => {
                info!("Fullscreen: {}", fullscreen);
            }
            PlayerEvent::SeekIndicatorRaised(direction) => {
                info!("Seek indicator: {:?}", direction);
            }
            PlayerEvent::ControlsVisibilityChanged(visible) => {
                info!("Controls {}", if visible { "shown" } else { "hidden" });
            }
            PlayerEvent::LoadFailed { reason } => {
                log::error!("Source failed to load: {}", reason);
            }
        }
    }
}
