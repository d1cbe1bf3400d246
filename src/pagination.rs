//! Pagination metadata for SonarQube Web API responses.
//!
//! The platform paginates list endpoints in two incompatible encodings:
//! most responses carry an offset/total `paging` block, while endpoints
//! that proxy Bitbucket-style APIs carry a bare `isLastPage` flag. Both
//! are normalized into [`PageMeta`] at decode time so the continuation
//! decision is a single exhaustive match.

use serde::{Deserialize, Serialize};

/// The `paging` block returned by most paginated endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page number (1-indexed).
    pub page_index: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

/// Pagination metadata extracted from a decoded response.
///
/// Decided once per response; a populated `paging` block takes precedence
/// over an `isLastPage` flag if a response somehow carries both.
#[derive(Debug, Clone)]
pub enum PageMeta {
    /// Offset/total paging block (`paging` field).
    Paging(Paging),
    /// Bitbucket-style boolean flag (`isLastPage` field).
    LastPage(bool),
    /// No pagination metadata at all.
    Absent,
}

impl PageMeta {
    /// Build metadata from the two optional wire fields, applying the
    /// `paging`-over-`isLastPage` precedence.
    #[must_use]
    pub fn from_parts(paging: Option<Paging>, is_last_page: Option<bool>) -> Self {
        match (paging, is_last_page) {
            (Some(p), _) => PageMeta::Paging(p),
            (None, Some(flag)) => PageMeta::LastPage(flag),
            (None, None) => PageMeta::Absent,
        }
    }
}

/// Whether another page should be fetched after the page just received.
///
/// `page` is the 1-based number of the page that produced `meta`. With a
/// paging block, more pages remain while `page < ceil(total / pageSize)`.
/// With a last-page flag, more pages remain while the flag is false.
/// Responses with no metadata are treated as exhausted; defaulting the
/// other way would loop forever against a degenerate endpoint.
#[must_use]
pub fn has_more_pages(meta: &PageMeta, page: u32) -> bool {
    match meta {
        PageMeta::Paging(paging) => {
            // pageSize > 0 is part of the request contract, but a zero
            // from the wire must not panic the iteration.
            if paging.page_size == 0 {
                return false;
            }
            let total_pages = paging.total.div_ceil(u64::from(paging.page_size));
            u64::from(page) < total_pages
        }
        PageMeta::LastPage(is_last) => !is_last,
        PageMeta::Absent => false,
    }
}

/// A decoded response that carries one page of a paginated collection.
///
/// Implemented by each list-response type; the engine in
/// [`crate::builder`] only ever touches pages through this trait. The
/// items field's name varies per resource (`components`, `favorites`,
/// `hotspots`, `deliveries`, ...), which is why extraction is a trait
/// method rather than a fixed field.
pub trait PagedResponse {
    /// The resource-specific item type.
    type Item;

    /// Pagination metadata for this page.
    fn page_meta(&self) -> PageMeta;

    /// Consume the page, yielding its items in response order.
    fn into_items(self) -> Vec<Self::Item>;
}
