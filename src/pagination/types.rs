//! Pagination types
//!
//! Listing endpoints nest `{items, has_more, page_token}` inside the
//! envelope's `data`.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer};

/// Smallest page size listing endpoints accept
pub const MIN_PAGE_SIZE: u32 = 10;

/// Largest page size listing endpoints accept
pub const MAX_PAGE_SIZE: u32 = 100;

/// A page size known to be inside `MIN_PAGE_SIZE..=MAX_PAGE_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSize(u32);

impl PageSize {
    /// The largest page, used by most bulk listings
    pub const MAX: PageSize = PageSize(MAX_PAGE_SIZE);

    /// The smallest page
    pub const MIN: PageSize = PageSize(MIN_PAGE_SIZE);

    pub fn new(size: u32) -> Result<Self> {
        if (MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&size) {
            Ok(Self(size))
        } else {
            Err(Error::InvalidPageSize {
                page_size: size,
                min: MIN_PAGE_SIZE,
                max: MAX_PAGE_SIZE,
            })
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for PageSize {
    type Error = Error;

    fn try_from(size: u32) -> Result<Self> {
        Self::new(size)
    }
}

/// One page of a listing
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    /// Absent or `null` when the page is empty
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty", bound(deserialize = "T: Deserialize<'de>"))]
    pub items: Vec<T>,
    pub has_more: bool,
    /// Cursor for the next page
    #[serde(default)]
    pub page_token: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Result of processing one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch again with this cursor
    Continue {
        /// Value for the `page_token` query parameter
        page_token: String,
    },
    /// No more pages
    Done,
}

/// Counters kept while walking a listing
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationState {
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Total items fetched so far
    pub total_fetched: u64,
}

impl PaginationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one fetched page holding `count` items
    pub fn add_page(&mut self, count: u64) {
        self.pages_fetched += 1;
        self.total_fetched += count;
    }
}
