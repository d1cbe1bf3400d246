//! Request builders and the pagination engine.
//!
//! Every operation on the API goes through a builder: a typed request
//! struct accumulated via fluent setters, plus an injected [`Executor`]
//! closure that performs the actual round trip. Paginated operations
//! layer a lazy page-walking stream on top via [`PagedBuilder::all`].

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::stream::{self, Stream};

use crate::error::Result;
use crate::pagination::{has_more_pages, PagedResponse};

/// The function that performs one network round trip for a builder.
///
/// Supplied by a resource client, which knows the path, verb, and auth
/// concerns; shared across every builder that client hands out.
pub type Executor<R, T> = Arc<dyn Fn(R) -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// A typed request that a builder accumulates.
///
/// `validate` runs before every dispatch; request types with mandatory
/// fields override it and fail with [`crate::SonarError::Validation`]
/// before the executor is ever invoked.
pub trait ApiRequest: Clone + Send + Sync {
    /// Check that all mandatory fields are present.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is absent or invalid.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// A request with page-number and page-size slots.
pub trait PagedRequest: ApiRequest {
    /// Set the 1-based page number (wire name `p`).
    fn set_page(&mut self, page: u32);
    /// Set the page size (wire name `ps`).
    fn set_page_size(&mut self, page_size: u32);
}

/// Finalize the accumulated request and dispatch it.
#[async_trait]
pub trait Execute {
    /// The decoded response type.
    type Output;

    /// Dispatch the request as currently accumulated.
    ///
    /// Pure pass-through: no retries, no timeouts, no defaults injected.
    /// The builder is not consumed; setters may be re-invoked afterwards
    /// and a later `execute` simply produces a new request.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any network call if a mandatory
    /// field is unset, or whatever the executor raised.
    async fn execute(&self) -> Result<Self::Output>;
}

/// Accumulates a typed request ahead of a single dispatch.
///
/// Resource modules expose named setters on concrete instantiations of
/// this type; there is no string-keyed parameter map, only struct fields.
pub struct RequestBuilder<R, T> {
    request: R,
    executor: Executor<R, T>,
}

impl<R: ApiRequest, T> RequestBuilder<R, T> {
    /// Bind a request to an executor.
    ///
    /// This is the extension point for operations the crate does not
    /// cover: any request type implementing [`ApiRequest`] can be bound
    /// to a custom [`Executor`] closure.
    #[must_use]
    pub fn new(request: R, executor: Executor<R, T>) -> Self {
        Self { request, executor }
    }

    /// Apply a mutation to the request. Named setters funnel through
    /// here; last write to a field wins.
    pub(crate) fn modify(mut self, f: impl FnOnce(&mut R)) -> Self {
        f(&mut self.request);
        self
    }

    async fn dispatch(&self) -> Result<T> {
        self.request.validate()?;
        (self.executor)(self.request.clone()).await
    }
}

#[async_trait]
impl<R, T> Execute for RequestBuilder<R, T>
where
    R: ApiRequest + 'static,
    T: Send + 'static,
{
    type Output = T;

    async fn execute(&self) -> Result<T> {
        self.dispatch().await
    }
}

/// A [`RequestBuilder`] over a paginated operation.
pub struct PagedBuilder<R, T> {
    base: RequestBuilder<R, T>,
}

impl<R, T> PagedBuilder<R, T>
where
    R: PagedRequest,
    T: PagedResponse,
{
    /// Bind a paginated request to an executor.
    ///
    /// Like [`RequestBuilder::new`], this is public so that paginated
    /// endpoints the crate does not cover can still plug into the page
    /// walker: implement [`PagedRequest`] and [`PagedResponse`] and
    /// supply the executor.
    #[must_use]
    pub fn new(request: R, executor: Executor<R, T>) -> Self {
        Self {
            base: RequestBuilder::new(request, executor),
        }
    }

    pub(crate) fn modify(mut self, f: impl FnOnce(&mut R)) -> Self {
        self.base = self.base.modify(f);
        self
    }

    /// Set the page number for a single-page [`Execute::execute`] call.
    #[must_use]
    pub fn page(self, page: u32) -> Self {
        self.modify(|r| r.set_page(page))
    }

    /// Set the page size.
    #[must_use]
    pub fn page_size(self, page_size: u32) -> Self {
        self.modify(|r| r.set_page_size(page_size))
    }

    /// Fetch every page lazily, yielding items one at a time.
    ///
    /// The returned stream is single-pass and strictly sequential: one
    /// request per page, and page N+1 is not fetched until page N's items
    /// have all been consumed. Dropping the stream abandons iteration
    /// with no further requests. Any failed page fetch (including the
    /// first) surfaces as an `Err` item and ends the stream; items
    /// already yielded stand.
    ///
    /// Iteration always restarts from page 1: a page number set via
    /// [`page`](Self::page) applies to `execute` only and is overwritten
    /// here. Callers wanting a single mid-sequence page should use
    /// `execute` instead.
    pub fn all(self) -> impl Stream<Item = Result<T::Item>> + Send
    where
        R: 'static,
        T: Send + 'static,
        T::Item: Send,
    {
        struct PageWalk<R, T: PagedResponse> {
            builder: RequestBuilder<R, T>,
            page: u32,
            buffered: VecDeque<T::Item>,
            exhausted: bool,
        }

        let walk = PageWalk {
            builder: self.base,
            page: 1,
            buffered: VecDeque::new(),
            exhausted: false,
        };

        stream::try_unfold(walk, |mut walk| async move {
            loop {
                if let Some(item) = walk.buffered.pop_front() {
                    return Ok(Some((item, walk)));
                }
                if walk.exhausted {
                    return Ok(None);
                }
                walk.builder.request.set_page(walk.page);
                let response = walk.builder.dispatch().await?;
                walk.exhausted = !has_more_pages(&response.page_meta(), walk.page);
                walk.page += 1;
                // An empty page with more pages remaining loops straight
                // into the next fetch without yielding.
                walk.buffered = response.into_items().into();
            }
        })
    }
}

#[async_trait]
impl<R, T> Execute for PagedBuilder<R, T>
where
    R: PagedRequest + 'static,
    T: PagedResponse + Send + 'static,
{
    type Output = T;

    async fn execute(&self) -> Result<T> {
        self.base.dispatch().await
    }
}
