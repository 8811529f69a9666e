//! Pagination module
//!
//! # Overview
//!
//! Listing endpoints return `{items, has_more, page_token}`. The
//! `CursorPaginator` feeds each `page_token` back as a query parameter
//! until `has_more` is false and returns every item fetched, in order.
//! Page sizes outside `10..=100` are rejected before any request is made.

mod paginator;
mod types;

pub use paginator::{CursorPaginator, DEFAULT_ITEMS_FIELD, PAGE_SIZE_PARAM, PAGE_TOKEN_PARAM};
pub use types::{
    NextPage, Page, PageSize, PaginationState, MAX_PAGE_SIZE, MIN_PAGE_SIZE,
};
