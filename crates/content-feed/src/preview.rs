//! Offline transport serving a fixed catalog.
//!
//! Responses are rendered in the same wire format the GraphQL service uses,
//! so they go through the normal decoder.

use crate::query::PageQuery;
use crate::transport::{Transport, TransportError};
use serde_json::json;
use shared::{ContentCard, MediaType};

/// Render a media page response body
pub fn page_body(
    current_page: u32,
    per_page: u32,
    has_next_page: bool,
    cards: &[ContentCard],
) -> Vec<u8> {
    let media: Vec<serde_json::Value> = cards
        .iter()
        .map(|card| {
            json!({
                "title": { "userPreferred": card.title() },
                "averageScore": card.average_score(),
                "coverImage": {
                    "extraLarge": card.cover_url(),
                    "large": card.cover_url(),
                    "medium": card.cover_url(),
                    "color": null
                }
            })
        })
        .collect();

    json!({
        "data": {
            "Page": {
                "pageInfo": {
                    "perPage": per_page,
                    "currentPage": current_page,
                    "hasNextPage": has_next_page
                },
                "media": media
            }
        }
    })
    .to_string()
    .into_bytes()
}

/// The fixed catalog for a media type
pub fn sample_cards(media_type: MediaType) -> Vec<ContentCard> {
    match media_type {
        MediaType::Anime => vec![
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx124194-pWfBqp3GgjOx.jpg",
                "Fruits Basket: The Final",
                90,
            ),
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx104578-LaZYFkmhinfB.jpg",
                "Shingeki no Kyojin 3 Part 2",
                89,
            ),
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/anime/cover/large/bx145064-5fa4ZBbW4dqA.jpg",
                "Jujutsu Kaisen 2nd Season",
                88,
            ),
        ],
        MediaType::Manga => vec![
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/manga/cover/large/bx30002-7EzO7o21jzeF.jpg",
                "Berserk",
                93,
            ),
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/manga/cover/medium/b135129-rbQyUsPfUZTj.jpg",
                "Vagabond: Saigo no Manga-ten",
                88,
            ),
            ContentCard::new(
                "https://s4.anilist.co/file/anilistcdn/media/manga/cover/large/bx98610-TIf7R1gkU0vc.jpg",
                "86: Eighty Six",
                87,
            ),
        ],
    }
}

/// Serves [`sample_cards`] as a single page per media type
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewTransport;

impl Transport for PreviewTransport {
    async fn send(&self, query: &PageQuery) -> Result<Vec<u8>, TransportError> {
        let variables = &query.variables;
        let cards = if variables.page == 1 {
            sample_cards(variables.media_type)
        } else {
            Vec::new()
        };

        Ok(page_body(variables.page, variables.per_page, false, &cards))
    }
}
