// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Page-by-page collection with an upper bound on the number of items.
//!
//! [`fetch_all`] drives a [`PageSource`] from [`FIRST_PAGE`] until the
//! accumulated item count exceeds the limit, the source reports no further
//! page, or a page fetch fails. Failures never discard what was already
//! collected: the partial result is returned next to the error so callers can
//! decide whether it is usable.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::Error;

/// Opaque page cursor understood by a [`PageSource`].
pub type PageToken = u32;

/// Token of the first page requested by [`fetch_all`].
pub const FIRST_PAGE: PageToken = 1;

/// Items returned by one page fetch.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct PageChunk<T,>
{
    /// Items on this page in provider order.
    pub items: Vec<T,>,
    /// Cursor of the following page, `None` once the source is exhausted.
    pub next:  Option<PageToken,>,
}

/// Capability to fetch a single page of items.
#[async_trait]
pub trait PageSource: Send + Sync
{
    /// Item type yielded by the source.
    type Item: Send;

    /// Fetches the page identified by `page`.
    ///
    /// # Errors
    ///
    /// Returns [`Error`] when the transport or provider fails. A failed page
    /// ends pagination; it is never retried.
    async fn fetch_page(&self, page: PageToken,) -> Result<PageChunk<Self::Item,>, Error,>;
}

/// Outcome of [`fetch_all`]: the collected items and the error that stopped
/// pagination early, if any.
#[derive(Debug,)]
pub struct Collected<T,>
{
    /// Items in fetch order, never more than the requested limit.
    pub items: Vec<T,>,
    /// Error reported by the page that ended collection.
    pub error: Option<Error,>,
}

impl<T,> Collected<T,>
{
    /// Converts the outcome into a `Result`, discarding partial items when an
    /// error occurred.
    ///
    /// # Errors
    ///
    /// Returns the error that interrupted pagination.
    pub fn into_result(self,) -> Result<Vec<T,>, Error,>
    {
        match self.error {
            Some(error,) => Err(error,),
            None => Ok(self.items,),
        }
    }
}

/// Accumulated pagination state threaded through each page step.
struct Cursor<T,>
{
    items: Vec<T,>,
    next:  Option<PageToken,>,
}

impl<T,> Cursor<T,>
{
    fn start() -> Self
    {
        Self {
            items: Vec::new(), next: Some(FIRST_PAGE,),
        }
    }

    /// Folds one fetched page into the state.
    fn advance(mut self, chunk: PageChunk<T,>,) -> Self
    {
        self.items.extend(chunk.items,);
        self.next = chunk.next;
        self
    }

    fn within(&self, limit: Option<usize,>,) -> bool
    {
        limit.is_none_or(|limit| self.items.len() <= limit,)
    }

    fn finish(mut self, limit: Option<usize,>, error: Option<Error,>,) -> Collected<T,>
    {
        if let Some(limit,) = limit {
            self.items.truncate(limit,);
        }
        Collected {
            items: self.items, error,
        }
    }
}

/// Fetches pages from `source` until more than `limit` items are collected,
/// the source runs out of pages, or a page fails.
///
/// `limit` of `None` collects everything. The result is truncated to exactly
/// `limit` items, preserving fetch order. With `limit` of `Some(0)` the source
/// is never queried and the result is empty.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use repo_digest::{Error, PageChunk, PageSource, PageToken, fetch_all};
///
/// struct Numbers;
///
/// #[async_trait]
/// impl PageSource for Numbers
/// {
///     type Item = u32;
///
///     async fn fetch_page(&self, page: PageToken,) -> Result<PageChunk<u32,>, Error,>
///     {
///         let next = if page < 3 { Some(page + 1,) } else { None };
///         Ok(PageChunk {
///             items: vec![page * 10, page * 10 + 1], next,
///         },)
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let collected = fetch_all(&Numbers, Some(3,),).await;
/// assert_eq!(collected.items, vec![10, 11, 20]);
/// assert!(collected.error.is_none());
/// # }
/// ```
pub async fn fetch_all<S,>(source: &S, limit: Option<usize,>,) -> Collected<S::Item,>
where
    S: PageSource + ?Sized,
{
    let mut cursor = Cursor::start();
    if limit == Some(0,) {
        debug!("Limit is zero, skipping fetch");
        return cursor.finish(limit, None,);
    }

    while cursor.within(limit,) {
        let Some(page,) = cursor.next else {
            break;
        };

        match source.fetch_page(page,).await {
            Ok(chunk,) => {
                debug!("Fetched page {} with {} items", page, chunk.items.len());
                cursor = cursor.advance(chunk,);
            }
            Err(error,) => {
                warn!(
                    "Page {} failed after {} items were collected: {}",
                    page,
                    cursor.items.len(),
                    error
                );
                return cursor.finish(limit, Some(error,),);
            }
        }
    }

    cursor.finish(limit, None,)
}
