//! Paginated stream for lazy iteration over collection endpoints.
//!
//! Canvas returns collections as a bare JSON array per page and links the
//! pages through the `Link` header. [`PaginatedStream`] turns that into one
//! forward-only stream of hydrated resources.

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::stream::FusedStream;
use futures_util::{Stream, StreamExt};
use serde_json::{Map, Value};

use super::links::PaginationLinks;
use super::params::Params;
use super::requester::{Method, RawResponse, Requester};
use crate::models::{hydrate_with, Resource};
use crate::{Error, Result};

/// Type alias for a boxed future used internally.
type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The request that produces the next page.
struct PageRequest {
    method: Method,
    path: String,
    params: Params,
}

/// A single-pass stream over every item of a paginated collection.
///
/// Pages are fetched only when the consumer asks for an item and the
/// current page is used up; nothing is prefetched. Dropping the stream at
/// any point leaves no request in flight. An empty page that still links to
/// a further page does not end the stream.
///
/// A failed page fetch is yielded as an error and ends the stream; no
/// partial page is substituted.
///
/// # Example
///
/// ```no_run
/// use futures_util::StreamExt;
///
/// # async fn example(canvas: canvasapi::Canvas) -> canvasapi::Result<()> {
/// let course = canvas.get_course(1).await?;
/// let mut users = course.get_users(None);
///
/// while let Some(user) = users.next().await {
///     println!("{}", user?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct PaginatedStream<T> {
    requester: Requester,
    /// Request for the next page, `None` once the last page was seen.
    next_request: Option<PageRequest>,
    /// Unconsumed items of the current page.
    current_items: VecDeque<Value>,
    /// Attributes merged into every item before hydration.
    extra_attributes: Map<String, Value>,
    /// Links of the most recent page.
    links: PaginationLinks,
    /// Current in-flight fetch future.
    pending_fetch: Option<BoxFuture<'static, Result<RawResponse>>>,
    /// Error to yield on first poll, for streams that could not be set up.
    deferred_error: Option<Error>,
    pages_fetched: usize,
    terminated: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> PaginatedStream<T> {
    /// Create a stream whose first page is `method path?params`.
    ///
    /// No request is made until the stream is first polled.
    pub fn new(
        requester: Requester,
        method: Method,
        path: impl Into<String>,
        mut params: Params,
    ) -> Self {
        if let Some(per_page) = requester.per_page() {
            if !params.contains_key("per_page") {
                params.push("per_page", per_page.to_string());
            }
        }

        let request = PageRequest {
            method,
            path: path.into(),
            params,
        };
        Self::from_parts(requester, Some(request))
    }

    /// Create a stream seeded with an already received first page.
    ///
    /// Fails if the body is not a JSON array.
    pub fn from_response(requester: Requester, response: RawResponse) -> Result<Self> {
        let mut stream = Self::from_parts(requester, None);
        stream.accept_page(response)?;
        Ok(stream)
    }

    /// Create a stream that yields `error` once and then ends, without
    /// making any request.
    pub fn failed(requester: Requester, error: Error) -> Self {
        let mut stream = Self::from_parts(requester, None);
        stream.deferred_error = Some(error);
        stream
    }

    /// Merge `extra` into every item before it is hydrated. Fields present
    /// in the item itself take precedence.
    pub fn with_extra_attributes(mut self, extra: Map<String, Value>) -> Self {
        self.extra_attributes = extra;
        self
    }

    /// Links of the most recently received page.
    pub fn links(&self) -> &PaginationLinks {
        &self.links
    }

    /// Number of pages received so far, including a seeding page.
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Drain the stream into a vector, stopping at the first error.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    fn from_parts(requester: Requester, next_request: Option<PageRequest>) -> Self {
        Self {
            requester,
            next_request,
            current_items: VecDeque::new(),
            extra_attributes: Map::new(),
            links: PaginationLinks::default(),
            pending_fetch: None,
            deferred_error: None,
            pages_fetched: 0,
            terminated: false,
            _marker: PhantomData,
        }
    }

    fn accept_page(&mut self, response: RawResponse) -> Result<()> {
        self.pages_fetched += 1;
        self.links = response.links.clone();
        self.next_request = self.links.next.clone().map(|url| PageRequest {
            method: Method::Get,
            path: url,
            params: Params::new(),
        });
        self.current_items = response.into_array()?.into();
        tracing::debug!(
            page = self.pages_fetched,
            items = self.current_items.len(),
            has_next = self.next_request.is_some(),
            "Received page"
        );
        Ok(())
    }

    fn start_fetch(&mut self, request: PageRequest) {
        tracing::debug!(page = self.pages_fetched + 1, path = %request.path, "Fetching page");
        let requester = self.requester.clone();
        self.pending_fetch = Some(Box::pin(async move {
            requester
                .request(request.method, &request.path, &request.params, None)
                .await
        }));
    }

    fn terminate(&mut self) {
        self.deferred_error = None;
        self.next_request = None;
        self.pending_fetch = None;
        self.current_items.clear();
        self.terminated = true;
    }
}

impl<T: Resource> Stream for PaginatedStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        loop {
            if this.terminated {
                return Poll::Ready(None);
            }

            if let Some(e) = this.deferred_error.take() {
                this.terminate();
                return Poll::Ready(Some(Err(e)));
            }

            // Yield from the buffered page first
            if let Some(value) = this.current_items.pop_front() {
                return match hydrate_with(value, &this.extra_attributes, &this.requester) {
                    Ok(item) => Poll::Ready(Some(Ok(item))),
                    Err(e) => {
                        this.terminate();
                        Poll::Ready(Some(Err(e)))
                    }
                };
            }

            if let Some(ref mut fut) = this.pending_fetch {
                match fut.as_mut().poll(cx) {
                    Poll::Ready(Ok(response)) => {
                        this.pending_fetch = None;
                        if let Err(e) = this.accept_page(response) {
                            this.terminate();
                            return Poll::Ready(Some(Err(e)));
                        }
                        // Empty pages fall through to the next link
                        continue;
                    }
                    Poll::Ready(Err(e)) => {
                        this.terminate();
                        return Poll::Ready(Some(Err(e)));
                    }
                    Poll::Pending => return Poll::Pending,
                }
            }

            if let Some(request) = this.next_request.take() {
                this.start_fetch(request);
                continue;
            }

            this.terminated = true;
            return Poll::Ready(None);
        }
    }
}

impl<T: Resource> FusedStream for PaginatedStream<T> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<T> Unpin for PaginatedStream<T> {}

impl<T> fmt::Debug for PaginatedStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginatedStream")
            .field("buffered", &self.current_items.len())
            .field("next", &self.next_request.as_ref().map(|r| r.path.as_str()))
            .field("pages_fetched", &self.pages_fetched)
            .field("terminated", &self.terminated)
            .finish()
    }
}
