//! Media page response decoding.
//!
//! A page is accepted or rejected as a whole: any missing or mistyped field
//! in any entry fails the entire page.

use serde::Deserialize;
use shared::ContentCard;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure turning a response body into a page of cards
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed page response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("GraphQL errors: {}", .0.join("; "))]
    Api(Vec<String>),

    #[error("response has no data")]
    MissingData,
}

/// Top-level GraphQL envelope
#[derive(Debug, Deserialize)]
struct PageResponse {
    data: Option<PageData>,
    #[serde(default)]
    errors: Vec<GraphQLError>,
}

#[derive(Debug, Deserialize)]
struct GraphQLError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaPage {
    page_info: PageInfo,
    media: Vec<MediaEntry>,
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub per_page: u32,
    pub current_page: u32,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaEntry {
    title: MediaTitle,
    average_score: i32,
    cover_image: CoverImage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaTitle {
    user_preferred: String,
}

#[derive(Debug, Deserialize)]
struct CoverImage {
    large: String,
}

impl From<MediaEntry> for ContentCard {
    fn from(entry: MediaEntry) -> Self {
        ContentCard::new(
            entry.cover_image.large,
            entry.title.user_preferred,
            entry.average_score,
        )
    }
}

/// One decoded page of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPage {
    pub info: PageInfo,
    pub items: Vec<ContentCard>,
}

impl ContentPage {
    pub fn has_next_page(&self) -> bool {
        self.info.has_next_page
    }
}

/// Decode a media page response body
pub fn decode(bytes: &[u8]) -> Result<ContentPage, DecodeError> {
    let response: PageResponse = serde_json::from_slice(bytes)?;

    let messages: Vec<String> = response.errors.into_iter().map(|e| e.message).collect();

    let data = match response.data {
        Some(data) => data,
        None if !messages.is_empty() => return Err(DecodeError::Api(messages)),
        None => return Err(DecodeError::MissingData),
    };

    if !messages.is_empty() {
        warn!(errors = ?messages, "Page response carried GraphQL errors alongside data");
    }

    let page = data.page;
    let items: Vec<ContentCard> = page.media.into_iter().map(ContentCard::from).collect();

    debug!(
        current_page = page.page_info.current_page,
        has_next_page = page.page_info.has_next_page,
        items = items.len(),
        "Decoded page"
    );

    Ok(ContentPage {
        info: page.page_info,
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn media(title: &str, score: i32) -> serde_json::Value {
        json!({
            "title": { "userPreferred": title },
            "averageScore": score,
            "coverImage": {
                "extraLarge": format!("https://img/xl/{}.jpg", title),
                "large": format!("https://img/l/{}.jpg", title),
                "medium": format!("https://img/m/{}.jpg", title),
                "color": "#e4a15d"
            }
        })
    }

    fn body(value: serde_json::Value) -> Vec<u8> {
        serde_json::to_vec(&value).unwrap()
    }

    #[test]
    fn test_decode_page() {
        let bytes = body(json!({
            "data": {
                "Page": {
                    "pageInfo": { "perPage": 20, "currentPage": 1, "hasNextPage": true },
                    "media": [media("Berserk", 93), media("Vagabond", 88)]
                }
            }
        }));

        let page = decode(&bytes).unwrap();
        assert!(page.has_next_page());
        assert_eq!(page.info.current_page, 1);
        assert_eq!(
            page.items,
            vec![
                ContentCard::new("https://img/l/Berserk.jpg", "Berserk", 93),
                ContentCard::new("https://img/l/Vagabond.jpg", "Vagabond", 88),
            ]
        );
    }

    #[test]
    fn test_decode_empty_last_page() {
        let bytes = body(json!({
            "data": {
                "Page": {
                    "pageInfo": { "perPage": 20, "currentPage": 9, "hasNextPage": false },
                    "media": []
                }
            }
        }));

        let page = decode(&bytes).unwrap();
        assert!(!page.has_next_page());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_missing_page_is_malformed() {
        let bytes = body(json!({ "data": {} }));
        assert!(matches!(decode(&bytes), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_one_bad_entry_rejects_the_page() {
        let mut bad = media("Monster", 90);
        bad["averageScore"] = json!("ninety");

        let bytes = body(json!({
            "data": {
                "Page": {
                    "pageInfo": { "perPage": 20, "currentPage": 1, "hasNextPage": true },
                    "media": [media("Berserk", 93), bad]
                }
            }
        }));

        assert!(matches!(decode(&bytes), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_null_score_is_rejected() {
        let mut unscored = media("Monster", 0);
        unscored["averageScore"] = serde_json::Value::Null;

        let bytes = body(json!({
            "data": {
                "Page": {
                    "pageInfo": { "perPage": 20, "currentPage": 1, "hasNextPage": true },
                    "media": [unscored]
                }
            }
        }));

        assert!(decode(&bytes).is_err());
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(decode(b"<html>"), Err(DecodeError::Malformed(_))));
    }

    #[test]
    fn test_error_envelope() {
        let bytes = body(json!({
            "data": null,
            "errors": [{ "message": "Too Many Requests.", "status": 429 }]
        }));

        match decode(&bytes) {
            Err(DecodeError::Api(messages)) => {
                assert_eq!(messages, vec!["Too Many Requests.".to_string()])
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_null_data_without_errors() {
        let bytes = body(json!({ "data": null }));
        assert!(matches!(decode(&bytes), Err(DecodeError::MissingData)));
    }
}
