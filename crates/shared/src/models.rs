//! Data models for the content feed.
//!
//! This module defines the catalog enums sent to the GraphQL service and the
//! display-ready card produced for every media entry.

use serde::{Deserialize, Serialize};

/// Catalog a paginated list belongs to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    #[default]
    Anime,
    Manga,
}

impl MediaType {
    /// Every catalog, in display order
    pub const ALL: [MediaType; 2] = [MediaType::Anime, MediaType::Manga];

    /// Wire value used by the GraphQL service
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Anime => "ANIME",
            MediaType::Manga => "MANGA",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Anime => write!(f, "anime"),
            MediaType::Manga => write!(f, "manga"),
        }
    }
}

impl std::str::FromStr for MediaType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "anime" => Ok(MediaType::Anime),
            "manga" => Ok(MediaType::Manga),
            _ => Err(anyhow::anyhow!("Invalid media type: {}", s)),
        }
    }
}

/// Sort descriptor for a media page
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MediaSort {
    #[serde(rename = "SCORE")]
    ScoreAsc,
    #[serde(rename = "SCORE_DESC")]
    ScoreDesc,
}

impl MediaSort {
    /// Sort order used when none is configured
    pub fn default_order() -> Vec<MediaSort> {
        vec![MediaSort::ScoreDesc]
    }
}

impl std::fmt::Display for MediaSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaSort::ScoreAsc => write!(f, "SCORE"),
            MediaSort::ScoreDesc => write!(f, "SCORE_DESC"),
        }
    }
}

/// Display projection of one media entry
///
/// Immutable once built. Lists key cards by title, so two entries sharing a
/// title collide in anything that uses [`ContentCard::display_key`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentCard {
    cover_url: String,
    title: String,
    average_score: i32,
}

impl ContentCard {
    pub fn new(cover_url: impl Into<String>, title: impl Into<String>, average_score: i32) -> Self {
        Self {
            cover_url: cover_url.into(),
            title: title.into(),
            average_score,
        }
    }

    pub fn cover_url(&self) -> &str {
        &self.cover_url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn average_score(&self) -> i32 {
        self.average_score
    }

    /// Identity used when rendering a list of cards
    pub fn display_key(&self) -> &str {
        &self.title
    }
}
