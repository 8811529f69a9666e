//! Cursor paginator
//!
//! Drives the request executor page after page until the server reports
//! `has_more == false`, collecting every item in server order.

use super::types::{NextPage, Page, PageSize, PaginationState};
use crate::error::{Error, Result};
use crate::http::{decode_data, HttpClient, RequestConfig};
use crate::types::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

/// Query parameter carrying the page size
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Query parameter carrying the cursor
pub const PAGE_TOKEN_PARAM: &str = "page_token";

/// Field holding a page's items, unless overridden
pub const DEFAULT_ITEMS_FIELD: &str = "items";

/// Collects a full listing through `page_token` cursors
///
/// A failing page aborts the whole listing; items gathered from earlier
/// pages are dropped rather than returned.
#[derive(Debug, Clone, Copy)]
pub struct CursorPaginator {
    page_size: PageSize,
    items_field: &'static str,
}

impl CursorPaginator {
    /// Create a paginator, rejecting page sizes outside `10..=100`
    pub fn new(page_size: u32) -> Result<Self> {
        let page_size = PageSize::new(page_size).map_err(|e| {
            debug!("Rejected listing request: {e}");
            e
        })?;
        Ok(Self::with_page_size(page_size))
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            items_field: DEFAULT_ITEMS_FIELD,
        }
    }

    /// Read items from `field` instead of `items`
    ///
    /// A few listings (meeting participants) name the array after its
    /// contents while keeping `has_more` and `page_token`.
    pub fn with_items_field(mut self, field: &'static str) -> Self {
        self.items_field = field;
        self
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn items_field(&self) -> &'static str {
        self.items_field
    }

    /// Fold one page into `items` and decide whether to continue
    pub fn process_page<T>(
        &self,
        page: Page<T>,
        state: &mut PaginationState,
        items: &mut Vec<T>,
    ) -> Result<NextPage> {
        let Page {
            items: page_items,
            has_more,
            page_token,
        } = page;

        state.add_page(page_items.len() as u64);
        items.extend(page_items);

        if !has_more {
            return Ok(NextPage::Done);
        }

        match page_token.filter(|token| !token.is_empty()) {
            Some(page_token) => Ok(NextPage::Continue { page_token }),
            None => Err(Error::MissingCursor),
        }
    }

    /// Fetch every page and decode each item as `T`
    pub async fn collect<T: DeserializeOwned>(
        &self,
        client: &HttpClient,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Vec<T>> {
        let mut config = config;
        config
            .query
            .insert(PAGE_SIZE_PARAM.to_string(), self.page_size.get().to_string());

        let mut state = PaginationState::new();
        let mut items = Vec::new();

        loop {
            let outcome = match self.fetch_page(client, method, path, &config).await {
                Ok(page) => self.process_page(page, &mut state, &mut items),
                Err(e) => Err(e),
            };

            match outcome {
                Ok(NextPage::Done) => break,
                Ok(NextPage::Continue { page_token }) => {
                    config.query.insert(PAGE_TOKEN_PARAM.to_string(), page_token);
                }
                Err(e) => {
                    if !items.is_empty() {
                        warn!(
                            "Discarding {} items of {} after page {} failed",
                            items.len(),
                            path,
                            state.pages_fetched + 1
                        );
                    }
                    return Err(e);
                }
            }
        }

        debug!(
            "Fetched {} items of {} in {} pages",
            state.total_fetched, path, state.pages_fetched
        );
        Ok(items)
    }

    async fn fetch_page<T: DeserializeOwned>(
        &self,
        client: &HttpClient,
        method: Method,
        path: &str,
        config: &RequestConfig,
    ) -> Result<Page<T>> {
        let mut data = client.request(method, path, config.clone()).await?;

        if self.items_field != DEFAULT_ITEMS_FIELD {
            if let Value::Object(map) = &mut data {
                let page_items = map.remove(self.items_field).unwrap_or(Value::Null);
                map.insert(DEFAULT_ITEMS_FIELD.to_string(), page_items);
            }
        }

        decode_data(path, data)
    }
}

impl HttpClient {
    /// Fetch a whole listing as raw JSON items
    pub async fn get_all_pages(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
        page_size: u32,
    ) -> Result<Vec<Value>> {
        self.get_all_pages_as(method, path, config, page_size).await
    }

    /// Fetch a whole listing, decoding each item as `T`
    pub async fn get_all_pages_as<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
        page_size: u32,
    ) -> Result<Vec<T>> {
        CursorPaginator::new(page_size)?
            .collect(self, method, path, config)
            .await
    }
}
