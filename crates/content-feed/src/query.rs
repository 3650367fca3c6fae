//! GraphQL query document for paginated media lists.
//!
//! The document is fixed; only the variables change between requests.

use serde::Serialize;
use shared::{MediaSort, MediaType};

/// Number of media entries requested per page unless configured otherwise
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Page of media sorted by the requested descriptors
pub const MEDIA_PAGE_QUERY: &str = r#"
query ($page: Int!, $perPage: Int, $type: MediaType, $sortOrder: [MediaSort]) {
    Page(page: $page, perPage: $perPage) {
        pageInfo {
            perPage
            currentPage
            hasNextPage
        }
        media(type: $type, sort: $sortOrder) {
            title {
                userPreferred
            }
            averageScore
            coverImage {
                extraLarge
                large
                medium
                color
            }
        }
    }
}
"#;

/// Request body posted to a GraphQL endpoint
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GraphQLRequest<V> {
    pub query: &'static str,
    pub variables: V,
}

/// Variables of [`MEDIA_PAGE_QUERY`]
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageVariables {
    /// 1-based page number
    pub page: u32,
    /// Entries per page
    pub per_page: u32,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub sort_order: Vec<MediaSort>,
}

/// A ready-to-send media page request
pub type PageQuery = GraphQLRequest<PageVariables>;

impl PageVariables {
    /// Variables for `page` of `media_type` with the default page size and sort
    ///
    /// Page 0 is treated as page 1.
    pub fn new(page: u32, media_type: MediaType) -> Self {
        Self {
            page: page.max(1),
            per_page: DEFAULT_PER_PAGE,
            media_type,
            sort_order: MediaSort::default_order(),
        }
    }

    /// Override the page size; 0 is treated as 1
    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    pub fn with_sort(mut self, sort_order: Vec<MediaSort>) -> Self {
        self.sort_order = sort_order;
        self
    }
}

/// Pair the fixed media page document with its variables
pub fn build_query(variables: PageVariables) -> PageQuery {
    GraphQLRequest {
        query: MEDIA_PAGE_QUERY,
        variables,
    }
}
