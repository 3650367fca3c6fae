//! Content feed library for paging through a GraphQL media catalog.
//!
//! This library builds score-sorted media page queries, sends them over HTTP,
//! decodes the responses into display cards, and accumulates them into one
//! paginated list per media type.

pub mod content;
pub mod decode;
pub mod preview;
pub mod query;
pub mod transport;

pub use content::{
    ContentError, ContentErrorEvent, ContentListService, LoadOutcome, DATA_ERROR_MESSAGE,
    NETWORK_ERROR_MESSAGE,
};
pub use decode::{decode, ContentPage, DecodeError, PageInfo};
pub use preview::PreviewTransport;
pub use query::{build_query, PageQuery, PageVariables};
pub use transport::{HttpTransport, Transport, TransportError};
