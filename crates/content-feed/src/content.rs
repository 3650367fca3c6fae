//! Paginated content lists, one track per media type.
//!
//! Each [`MediaType`] owns an independent cursor and item list. Loading a page
//! always advances the active track's cursor by one, whether the fetch
//! succeeds or not, so a failed page is skipped rather than retried.

use crate::decode::{decode, ContentPage, DecodeError};
use crate::query::{build_query, PageVariables, DEFAULT_PER_PAGE};
use crate::transport::{Transport, TransportError};
use shared::{CatalogConfig, ContentCard, MediaSort, MediaType};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Shown when the request itself failed
pub const NETWORK_ERROR_MESSAGE: &str = "Error of network request. Try later.";

/// Shown when the response could not be decoded
pub const DATA_ERROR_MESSAGE: &str = "Error with data. Try later.";

const ERROR_CHANNEL_CAPACITY: usize = 16;

/// Why a page could not be loaded
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl ContentError {
    /// Fixed message for the presentation layer
    pub fn user_message(&self) -> &'static str {
        match self {
            ContentError::Transport(_) => NETWORK_ERROR_MESSAGE,
            ContentError::Decode(_) => DATA_ERROR_MESSAGE,
        }
    }
}

/// Published on the error channel for every failed page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentErrorEvent {
    pub media_type: MediaType,
    pub page: u32,
    pub message: &'static str,
}

/// Result of a single [`ContentListService::load_more`] call
#[derive(Debug)]
pub enum LoadOutcome {
    /// The page was appended to its track
    Loaded {
        media_type: MediaType,
        page: u32,
        added: usize,
        has_next_page: bool,
    },
    /// The page was lost; the cursor has still moved past it
    Failed(ContentError),
    /// A page for the active type is already in flight; nothing was sent
    Busy,
    /// The service was closed; nothing was sent or the result was dropped
    Closed,
}

/// Pagination state of one media type
#[derive(Debug, Clone)]
struct PaginationTrack {
    items: Vec<ContentCard>,
    next_page: u32,
    has_next_page: bool,
    in_flight: bool,
}

impl Default for PaginationTrack {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_page: 1,
            has_next_page: true,
            in_flight: false,
        }
    }
}

#[derive(Debug, Default)]
struct ContentListState {
    active_type: MediaType,
    tracks: HashMap<MediaType, PaginationTrack>,
    last_error_message: String,
    closed: bool,
}

impl ContentListState {
    fn track(&mut self, media_type: MediaType) -> &mut PaginationTrack {
        self.tracks.entry(media_type).or_default()
    }
}

fn lock(state: &Mutex<ContentListState>) -> MutexGuard<'_, ContentListState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clears a track's in-flight flag when the load finishes or is dropped
struct InFlightGuard<'a> {
    state: &'a Mutex<ContentListState>,
    media_type: MediaType,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).track(self.media_type).in_flight = false;
    }
}

/// Incremental loader for the anime and manga lists of one screen session
///
/// The service is shared by reference; state lives behind a mutex that is
/// never held across an await, so it can sit in an `Arc` and be driven from
/// several tasks. At most one page per media type is in flight at a time.
pub struct ContentListService<T> {
    transport: T,
    per_page: u32,
    sort: Vec<MediaSort>,
    state: Mutex<ContentListState>,
    can_load_more_tx: watch::Sender<bool>,
    error_tx: broadcast::Sender<ContentErrorEvent>,
}

impl<T: Transport> ContentListService<T> {
    /// Create a service with both cursors at page 1 and both lists empty
    pub fn new(transport: T) -> Self {
        let (can_load_more_tx, _) = watch::channel(true);
        let (error_tx, _) = broadcast::channel(ERROR_CHANNEL_CAPACITY);

        Self {
            transport,
            per_page: DEFAULT_PER_PAGE,
            sort: MediaSort::default_order(),
            state: Mutex::new(ContentListState::default()),
            can_load_more_tx,
            error_tx,
        }
    }

    /// Create a service using the page size and sort of the `[catalog]` section
    pub fn from_config(transport: T, config: &CatalogConfig) -> Self {
        Self::new(transport)
            .with_per_page(config.per_page)
            .with_sort(config.sort.clone())
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_sort(mut self, sort: Vec<MediaSort>) -> Self {
        self.sort = sort;
        self
    }

    /// Switch the active list without fetching or touching any track
    pub fn set_active_type(&self, media_type: MediaType) {
        let mut state = lock(&self.state);
        state.active_type = media_type;
        let has_next_page = state.track(media_type).has_next_page;
        self.can_load_more_tx.send_replace(has_next_page);

        debug!(media_type = %media_type, has_next_page, "Active media type changed");
    }

    /// Fetch the next page of the active media type and append it
    ///
    /// The cursor is advanced before the request goes out, exactly once per
    /// attempt. The page lands in the track that was active when the call
    /// started, even if the active type changes while it is in flight.
    pub async fn load_more(&self) -> LoadOutcome {
        let (media_type, page) = {
            let mut state = lock(&self.state);
            if state.closed {
                return LoadOutcome::Closed;
            }

            let media_type = state.active_type;
            let track = state.track(media_type);
            if track.in_flight {
                debug!(media_type = %media_type, "Page already in flight, skipping");
                return LoadOutcome::Busy;
            }

            track.in_flight = true;
            let page = track.next_page;
            track.next_page += 1;
            (media_type, page)
        };
        let _guard = InFlightGuard {
            state: &self.state,
            media_type,
        };

        let query = build_query(
            PageVariables::new(page, media_type)
                .with_per_page(self.per_page)
                .with_sort(self.sort.clone()),
        );

        info!(media_type = %media_type, page, "Loading page");

        let result = match self.transport.send(&query).await {
            Ok(bytes) => decode(&bytes).map_err(ContentError::from),
            Err(e) => Err(ContentError::from(e)),
        };

        self.finish(media_type, page, result)
    }

    fn finish(
        &self,
        media_type: MediaType,
        page: u32,
        result: Result<ContentPage, ContentError>,
    ) -> LoadOutcome {
        let mut state = lock(&self.state);
        if state.closed {
            debug!(media_type = %media_type, page, "Service closed, discarding page");
            return LoadOutcome::Closed;
        }

        match result {
            Ok(content) => {
                let is_active = state.active_type == media_type;
                let has_next_page = content.has_next_page();
                let added = content.items.len();

                let track = state.track(media_type);
                track.has_next_page = has_next_page;
                track.items.extend(content.items);
                let total = track.items.len();

                if is_active {
                    self.can_load_more_tx.send_replace(has_next_page);
                }

                info!(
                    media_type = %media_type,
                    page,
                    added,
                    total,
                    has_next_page,
                    "Page loaded"
                );

                LoadOutcome::Loaded {
                    media_type,
                    page,
                    added,
                    has_next_page,
                }
            }
            Err(error) => {
                let message = error.user_message();
                warn!(media_type = %media_type, page, error = %error, "Failed to load page");

                state.last_error_message = message.to_string();
                // No subscribers is fine
                let _ = self.error_tx.send(ContentErrorEvent {
                    media_type,
                    page,
                    message,
                });

                LoadOutcome::Failed(error)
            }
        }
    }

    /// Stop accepting loads; results still in flight are discarded
    pub fn close(&self) {
        lock(&self.state).closed = true;
        info!("Content list closed");
    }

    pub fn active_type(&self) -> MediaType {
        lock(&self.state).active_type
    }

    /// Items of the active media type, in load order
    pub fn content_list(&self) -> Vec<ContentCard> {
        let mut state = lock(&self.state);
        let media_type = state.active_type;
        state.track(media_type).items.clone()
    }

    pub fn content_list_for(&self, media_type: MediaType) -> Vec<ContentCard> {
        lock(&self.state).track(media_type).items.clone()
    }

    /// Next page that will be requested for `media_type`
    pub fn current_page(&self, media_type: MediaType) -> u32 {
        lock(&self.state).track(media_type).next_page
    }

    /// Whether the last completed page of the active type reported a next page
    pub fn can_load_more(&self) -> bool {
        let mut state = lock(&self.state);
        let media_type = state.active_type;
        state.track(media_type).has_next_page
    }

    pub fn is_loading(&self, media_type: MediaType) -> bool {
        lock(&self.state).track(media_type).in_flight
    }

    /// Message of the most recent failure, empty until one happens
    pub fn last_error_message(&self) -> String {
        lock(&self.state).last_error_message.clone()
    }

    /// Latest "can load more" value for the active type
    pub fn subscribe_can_load_more(&self) -> watch::Receiver<bool> {
        self.can_load_more_tx.subscribe()
    }

    /// Failed page events; slow receivers may miss events
    pub fn subscribe_errors(&self) -> broadcast::Receiver<ContentErrorEvent> {
        self.error_tx.subscribe()
    }
}
