//! End-to-end session tests for the aniplay playback controller
//!
//! These drive the full path a host application uses: load a catalog from
//! disk, open a controller on a target, and run a viewing session against
//! the simulated sink, delivering its events back to the controller the way
//! an event loop would.

use anyhow::Result;
use aniplay::catalog::CatalogStore;
use aniplay::player::{PlaybackController, PlayerOptions, SurfaceInput};
use aniplay::sink::{SimSink, SimSinkHandle, SinkCommand};
use aniplay_integration_tests::TestFixture;
use std::time::{Duration, Instant};

fn pump(controller: &mut PlaybackController, handle: &SimSinkHandle) {
    loop {
        let events = handle.drain_events();
        if events.is_empty() {
            break;
        }
        for event in events {
            controller.handle_sink_event(event).unwrap();
        }
    }
}

#[test]
fn test_full_viewing_session() -> Result<()> {
    let fixture = TestFixture::new()?;
    let catalog = CatalogStore::load(&fixture.catalog_path)?;

    let (sink, handle) = SimSink::new();
    let mut controller = PlaybackController::open(
        &catalog,
        "aurora-drift",
        "ad-e1",
        Box::new(sink),
        PlayerOptions::default(),
    )?;
    assert!(!controller.is_not_found());

    // Metadata arrives; autoplay is already running
    handle.set_source_duration(&handle.bound_source().unwrap(), 1400.0);
    handle.complete_load();
    pump(&mut controller, &handle);

    let session = controller.session().unwrap();
    assert_eq!(session.duration, Some(1400.0));
    assert_eq!(session.active_track().lang, "Japanese");

    // Watch a while, then switch the spoken language
    handle.advance(300.0);
    pump(&mut controller, &handle);
    handle.take_commands();

    controller.switch_audio_track("English")?;
    pump(&mut controller, &handle);
    handle.set_source_duration(&handle.bound_source().unwrap(), 1400.0);
    handle.complete_load();
    pump(&mut controller, &handle);

    // The session resumed where it was, on the new source
    let session = controller.session().unwrap();
    assert_eq!(session.active_track().lang, "English");
    assert!((session.position - 300.0).abs() < 1e-9);
    assert_eq!(session.pending_seek_on_load, None);
    let seeks: Vec<_> = handle
        .commands()
        .into_iter()
        .filter(|c| matches!(c, SinkCommand::Seek(_)))
        .collect();
    assert_eq!(seeks, vec![SinkCommand::Seek(300.0)]);

    // Subtitles on: exactly one showing, playback untouched
    controller.set_subtitle_language(Some("Spanish"))?;
    assert_eq!(
        controller.session().unwrap().active_subtitle.as_deref(),
        Some("sp")
    );
    assert!(handle.bound_source().unwrap().ends_with("e1-en.mp4"));

    Ok(())
}

#[test]
fn test_gesture_seeks_through_input_dispatch() -> Result<()> {
    let fixture = TestFixture::new()?;
    let catalog = CatalogStore::load(&fixture.catalog_path)?;

    let (sink, handle) = SimSink::new();
    let mut controller = PlaybackController::open(
        &catalog,
        "aurora-drift",
        "ad-e1",
        Box::new(sink),
        PlayerOptions::default(),
    )?;
    handle.set_source_duration(&handle.bound_source().unwrap(), 1400.0);
    handle.complete_load();
    pump(&mut controller, &handle);
    handle.advance(30.0);
    pump(&mut controller, &handle);
    handle.take_commands();

    let base = Instant::now();
    let at = |millis: u64| base + Duration::from_millis(millis);

    controller.handle_input(SurfaceInput::Click { x_ratio: 0.9 }, at(0))?;
    controller.handle_input(SurfaceInput::Click { x_ratio: 0.9 }, at(150))?;
    pump(&mut controller, &handle);

    // Single + double: one toggle, one forward seek
    let commands = handle.commands();
    assert_eq!(commands[0], SinkCommand::Pause);
    assert!(commands.contains(&SinkCommand::Seek(40.0)));
    assert!((controller.session().unwrap().position - 40.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn test_not_found_target_from_disk_catalog() -> Result<()> {
    let fixture = TestFixture::new()?;
    let catalog = CatalogStore::load(&fixture.catalog_path)?;

    let (sink, handle) = SimSink::new();
    let controller = PlaybackController::open(
        &catalog,
        "aurora-drift",
        "missing-episode",
        Box::new(sink),
        PlayerOptions::default(),
    )?;

    assert!(controller.is_not_found());
    assert!(handle.commands().is_empty());
    Ok(())
}

#[test]
fn test_corrupt_catalog_is_rejected() -> Result<()> {
    let fixture = TestFixture::new()?;
    std::fs::write(&fixture.catalog_path, "{\"series\": [{}]}")?;

    assert!(CatalogStore::load(&fixture.catalog_path).is_err());
    Ok(())
}
