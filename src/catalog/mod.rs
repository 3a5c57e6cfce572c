//! Catalog types for aniplay
//!
//! The catalog is a read-only collaborator from the player's point of view:
//! an ordered list of series, each with ordered episodes, each carrying the
//! playable audio/video track variants and optional subtitle tracks. The
//! player never mutates it; catalog administration lives outside this crate.
//!
//! The JSON shape uses camelCase field names so catalog files exported from
//! the original front-end load unchanged.

mod store;

pub use store::CatalogStore;

use serde::{Deserialize, Serialize};

/// One playable audio/video source variant of an episode, distinguished by
/// spoken language. Tracks are fully separate media sources, not in-stream
/// selectable tracks: switching tracks means rebinding the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Language label, e.g. "Japanese" or "English"
    pub lang: String,

    /// Source locator for this variant
    pub url: String,
}

/// One text-overlay source variant, distinguished by language. Independent
/// of audio track selection; toggling subtitles never interrupts playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    /// Language label, e.g. "English"
    pub lang: String,

    /// Source locator for the subtitle file
    pub url: String,
}

/// A single episode of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Stable identity within the catalog
    pub id: String,

    /// Ordinal position within the series, 1-based
    pub episode_number: u32,

    /// Display title
    pub title: String,

    /// Thumbnail image reference
    pub thumbnail_url: String,

    /// Playable track variants. Invariant: never empty.
    pub tracks: Vec<Track>,

    /// Optional subtitle variants
    #[serde(default)]
    pub subtitles: Vec<SubtitleTrack>,
}

/// A series with its ordered episode list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_url: String,
    pub banner_url: String,
    pub release_year: u32,
    pub rating: f32,
    pub genres: Vec<String>,
    pub episodes: Vec<Episode>,
}

/// The full catalog: an ordered list of series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub series: Vec<Series>,
}

impl Catalog {
    /// Look up a series by identity
    pub fn find_series(&self, series_id: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.id == series_id)
    }

    /// Resolve a (series, episode) pair
    ///
    /// # Returns
    ///
    /// The series and episode, or `None` if either identity is unknown
    pub fn find_episode(&self, series_id: &str, episode_id: &str) -> Option<(&Series, &Episode)> {
        let series = self.find_series(series_id)?;
        let episode = series.episodes.iter().find(|e| e.id == episode_id)?;
        Some((series, episode))
    }

    /// Check the catalog invariants: every episode carries at least one
    /// playable track.
    pub fn validate(&self) -> crate::utils::error::Result<()> {
        for series in &self.series {
            for episode in &series.episodes {
                if episode.tracks.is_empty() {
                    return Err(crate::utils::error::PlayerError::Catalog(format!(
                        "Episode '{}' of series '{}' has no tracks",
                        episode.id, series.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// A small built-in catalog, used by the demo binary when no catalog
    /// file is given and by tests.
    pub fn sample() -> Self {
        Catalog {
            series: vec![
                Series {
                    id: "aurora-drift".to_string(),
                    title: "Aurora Drift".to_string(),
                    description: "A salvage crew charts the wreck fields of a collapsed orbital ring."
                        .to_string(),
                    poster_url: "https://cdn.example.com/aurora-drift/poster.jpg".to_string(),
                    banner_url: "https://cdn.example.com/aurora-drift/banner.jpg".to_string(),
                    release_year: 2023,
                    rating: 8.6,
                    genres: vec!["Sci-Fi".to_string(), "Drama".to_string()],
                    episodes: vec![
                        Episode {
                            id: "ad-e1".to_string(),
                            episode_number: 1,
                            title: "Debris Line".to_string(),
                            thumbnail_url: "https://cdn.example.com/aurora-drift/e1.jpg".to_string(),
                            tracks: vec![
                                Track {
                                    lang: "Japanese".to_string(),
                                    url: "https://cdn.example.com/aurora-drift/e1-jp.mp4".to_string(),
                                },
                                Track {
                                    lang: "English".to_string(),
                                    url: "https://cdn.example.com/aurora-drift/e1-en.mp4".to_string(),
                                },
                            ],
                            subtitles: vec![
                                SubtitleTrack {
                                    lang: "English".to_string(),
                                    url: "https://cdn.example.com/aurora-drift/e1-en.vtt".to_string(),
                                },
                                SubtitleTrack {
                                    lang: "Spanish".to_string(),
                                    url: "https://cdn.example.com/aurora-drift/e1-es.vtt".to_string(),
                                },
                            ],
                        },
                        Episode {
                            id: "ad-e2".to_string(),
                            episode_number: 2,
                            title: "Cold Welds".to_string(),
                            thumbnail_url: "https://cdn.example.com/aurora-drift/e2.jpg".to_string(),
                            tracks: vec![Track {
                                lang: "Japanese".to_string(),
                                url: "https://cdn.example.com/aurora-drift/e2-jp.mp4".to_string(),
                            }],
                            subtitles: vec![SubtitleTrack {
                                lang: "English".to_string(),
                                url: "https://cdn.example.com/aurora-drift/e2-en.vtt".to_string(),
                            }],
                        },
                    ],
                },
                Series {
                    id: "paper-lantern".to_string(),
                    title: "Paper Lantern Detective Office".to_string(),
                    description: "Two clerks solve small mysteries in a riverside town.".to_string(),
                    poster_url: "https://cdn.example.com/paper-lantern/poster.jpg".to_string(),
                    banner_url: "https://cdn.example.com/paper-lantern/banner.jpg".to_string(),
                    release_year: 2021,
                    rating: 7.9,
                    genres: vec!["Mystery".to_string(), "Slice of Life".to_string()],
                    episodes: vec![Episode {
                        id: "pl-e1".to_string(),
                        episode_number: 1,
                        title: "The Missing Stamp".to_string(),
                        thumbnail_url: "https://cdn.example.com/paper-lantern/e1.jpg".to_string(),
                        tracks: vec![Track {
                            lang: "Japanese".to_string(),
                            url: "https://cdn.example.com/paper-lantern/e1-jp.mp4".to_string(),
                        }],
                        subtitles: Vec::new(),
                    }],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_episode() {
        let catalog = Catalog::sample();

        let (series, episode) = catalog.find_episode("aurora-drift", "ad-e2").unwrap();
        assert_eq!(series.title, "Aurora Drift");
        assert_eq!(episode.episode_number, 2);

        assert!(catalog.find_episode("aurora-drift", "nope").is_none());
        assert!(catalog.find_episode("nope", "ad-e1").is_none());
    }

    #[test]
    fn test_sample_catalog_is_valid() {
        assert!(Catalog::sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_trackless_episode() {
        let mut catalog = Catalog::sample();
        catalog.series[0].episodes[0].tracks.clear();

        assert!(catalog.validate().is_err());
    }

    #[test]
    fn test_camel_case_json_shape() {
        let json = r#"{
            "series": [{
                "id": "s1",
                "title": "T",
                "description": "D",
                "posterUrl": "p",
                "bannerUrl": "b",
                "releaseYear": 2020,
                "rating": 7.0,
                "genres": ["Action"],
                "episodes": [{
                    "id": "e1",
                    "episodeNumber": 1,
                    "title": "Ep",
                    "thumbnailUrl": "t",
                    "tracks": [{"lang": "Japanese", "url": "u"}]
                }]
            }]
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.series[0].episodes[0].episode_number, 1);
        // subtitles are optional in the wire shape
        assert!(catalog.series[0].episodes[0].subtitles.is_empty());
    }
}
