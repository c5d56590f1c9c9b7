//! Lazy result iteration across pages

use super::fetcher::PageFetcher;
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::query::Query;
use crate::service::EntityResult;
use crate::types::{Cursor, MoreResults};
use futures::stream::{self, Stream};
use pin_project_lite::pin_project;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, info, warn};

/// Stream of results paired with their cursors
pub type CursorStream = Pin<Box<dyn Stream<Item = Result<(Entity, Cursor)>> + Send>>;

/// Where a [`ResultIterator`] is in its page walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// Nothing fetched yet
    Init,
    /// Holding a page with results not yet yielded
    HasBuffer,
    /// Current page consumed; the service has more and the limit allows a fetch
    BufferEmptyMoreAvailable,
    /// No further fetch will be attempted
    Exhausted,
}

/// Lazy, single-pass iteration over the results of one query execution
///
/// No request is sent until the first result is demanded. Each later page is
/// requested with the previous page's end cursor, one at a time, and only
/// once every buffered result has been handed out. Iteration stops when a
/// page reports anything other than `NOT_FINISHED`, or when the request limit
/// (if any) has been spent; the latter is normal termination, not an error.
///
/// The entry points take `self`, so an instance serves exactly one view.
/// The iterator is `Send` but must be driven by a single consumer.
///
/// A fetch error is returned from the pull that needed the page. The
/// iterator is exhausted afterwards; run the query again to retry.
#[derive(Debug)]
pub struct ResultIterator {
    fetcher: PageFetcher,
    query: Query,
    request_limit: Option<u32>,
    state: IterState,
    buffer: VecDeque<EntityResult>,
    end_cursor: Option<Cursor>,
    more_results: MoreResults,
    fetch_count: u32,
    received: u32,
}

impl ResultIterator {
    /// Create an iterator; nothing is fetched yet
    pub fn new(fetcher: PageFetcher, query: Query) -> Self {
        Self {
            fetcher,
            query,
            request_limit: None,
            state: IterState::Init,
            buffer: VecDeque::new(),
            end_cursor: None,
            more_results: MoreResults::default(),
            fetch_count: 0,
            received: 0,
        }
    }

    /// Cap the number of page fetches
    ///
    /// A limit of zero allows no fetch at all.
    #[must_use]
    pub fn with_request_limit(mut self, limit: u32) -> Self {
        self.request_limit = Some(limit);
        self
    }

    /// Current state
    pub fn state(&self) -> IterState {
        self.state
    }

    /// Page fetches issued so far
    pub fn fetch_count(&self) -> u32 {
        self.fetch_count
    }

    /// Configured fetch cap
    pub fn request_limit(&self) -> Option<u32> {
        self.request_limit
    }

    /// End cursor of the most recent page
    ///
    /// Feed it to [`Query::start`] to resume the query later.
    pub fn end_cursor(&self) -> Option<&Cursor> {
        self.end_cursor.as_ref()
    }

    /// Continuation indicator of the most recent page
    pub fn more_results(&self) -> MoreResults {
        self.more_results
    }

    /// The query being iterated
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Check if iteration stopped on the request limit while the service had more
    pub fn is_truncated(&self) -> bool {
        self.state == IterState::Exhausted
            && self.more_results.is_not_finished()
            && self.limit_reached()
    }

    /// Pull the next result and its cursor
    ///
    /// Fetches a page only when the buffer is empty and another page is
    /// allowed. Returns `Ok(None)` once exhausted.
    pub async fn next_with_cursor(&mut self) -> Result<Option<(Entity, Cursor)>> {
        loop {
            if let Some(result) = self.buffer.pop_front() {
                if self.buffer.is_empty() {
                    self.state = self.state_after_page();
                }
                return Ok(Some((result.entity, result.cursor)));
            }

            match self.state {
                IterState::Exhausted => return Ok(None),
                IterState::Init if self.limit_reached() => self.state = IterState::Exhausted,
                IterState::Init | IterState::BufferEmptyMoreAvailable => self.fetch_next().await?,
                IterState::HasBuffer => self.state = self.state_after_page(),
            }
        }
    }

    /// Lazy stream of results paired with their cursors
    pub fn values_with_cursor(self) -> CursorStream {
        Box::pin(stream::try_unfold(self, |mut iter| async move {
            let next = iter.next_with_cursor().await?;
            Ok::<_, Error>(next.map(|item| (item, iter)))
        }))
    }

    /// Lazy stream of results
    pub fn values(self) -> Values {
        Values {
            inner: self.values_with_cursor(),
        }
    }

    /// Eagerly feed every result to `action`
    ///
    /// `request_limit` overrides any limit set with
    /// [`with_request_limit`](Self::with_request_limit); `None` keeps it.
    /// Returns how many results were delivered.
    pub async fn all<F>(self, request_limit: Option<u32>, mut action: F) -> Result<usize>
    where
        F: FnMut(Entity),
    {
        self.all_with_cursor(request_limit, |entity, _| action(entity))
            .await
    }

    /// Eagerly feed every result and its cursor to `action`
    ///
    /// Same limit rules as [`all`](Self::all).
    pub async fn all_with_cursor<F>(
        mut self,
        request_limit: Option<u32>,
        mut action: F,
    ) -> Result<usize>
    where
        F: FnMut(Entity, Cursor),
    {
        if let Some(limit) = request_limit {
            self.request_limit = Some(limit);
        }

        let mut delivered = 0;
        while let Some((entity, cursor)) = self.next_with_cursor().await? {
            action(entity, cursor);
            delivered += 1;
        }

        debug!(
            "Delivered {} results over {} requests (truncated: {})",
            delivered,
            self.fetch_count,
            self.is_truncated()
        );
        Ok(delivered)
    }

    fn limit_reached(&self) -> bool {
        self.request_limit
            .is_some_and(|limit| self.fetch_count >= limit)
    }

    /// Check if earlier pages already returned the query's overall limit
    fn query_limit_spent(&self) -> bool {
        self.query
            .limit
            .is_some_and(|limit| self.received >= limit)
    }

    /// State to enter once the current page has no buffered results left
    fn state_after_page(&self) -> IterState {
        if self.more_results.is_done() {
            return IterState::Exhausted;
        }
        if self.end_cursor.is_none() {
            warn!(
                "Page {} reported more results without an end cursor; stopping",
                self.fetch_count
            );
            return IterState::Exhausted;
        }
        if self.limit_reached() {
            info!("Request limit of {} reached", self.fetch_count);
            return IterState::Exhausted;
        }
        if self.query_limit_spent() {
            debug!("Query limit spent after {} results", self.received);
            return IterState::Exhausted;
        }
        IterState::BufferEmptyMoreAvailable
    }

    /// Query for the next request, with any overall limit lowered by what
    /// earlier pages already returned
    fn next_query(&self) -> Cow<'_, Query> {
        match self.query.limit {
            Some(limit) if self.fetch_count > 0 => Cow::Owned(Query {
                limit: Some(limit.saturating_sub(self.received)),
                ..self.query.clone()
            }),
            _ => Cow::Borrowed(&self.query),
        }
    }

    async fn fetch_next(&mut self) -> Result<()> {
        let cursor = match self.state {
            IterState::Init => None,
            _ => self.end_cursor.clone(),
        };
        debug!(
            "Fetching page {} (cursor: {:?})",
            self.fetch_count + 1,
            cursor
        );

        let fetched = {
            let query = self.next_query();
            self.fetcher.fetch(&query, cursor.as_ref()).await
        };
        self.fetch_count += 1;

        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                self.state = IterState::Exhausted;
                return Err(e);
            }
        };

        debug!(
            "Page {}: {} results, more_results={:?}",
            self.fetch_count,
            page.len(),
            page.more_results
        );

        self.received = self.received.saturating_add(page.len() as u32);
        self.end_cursor = page.end_cursor;
        self.more_results = page.more_results;
        self.buffer = page.results.into();
        self.state = if self.buffer.is_empty() {
            self.state_after_page()
        } else {
            IterState::HasBuffer
        };
        Ok(())
    }
}

pin_project! {
    /// Results-only view over a [`CursorStream`]
    #[must_use = "streams do nothing unless polled"]
    pub struct Values {
        #[pin]
        inner: CursorStream,
    }
}

impl Stream for Values {
    type Item = Result<Entity>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.project()
            .inner
            .poll_next(cx)
            .map(|item| item.map(|result| result.map(|(entity, _)| entity)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}
