//! Cursor pagination coordinator for the remote product catalog.
//!
//! The Admin API pages its catalog with opaque cursors: a response carries
//! `startCursor`/`endCursor` and the only legal moves are "page after this
//! cursor" and "page before this cursor". This module reconstructs a stable
//! "current page" abstraction on top of that, tracking navigation state
//! across forward/backward moves, search changes, and page-size changes.
//!
//! Navigation state is an immutable value ([`NavigationState`]); every
//! applied response produces a new state. The driver ([`Pager`]) serializes
//! navigation: one fetch may be outstanding at a time, `load_next`/
//! `load_previous` are rejected while one is in flight, and a
//! `load_first_page` issued mid-flight supersedes the outstanding fetch,
//! whose late response is discarded.
//!
//! The displayed page number is bookkeeping only: the cursor from the last
//! successful response is always the sole source of truth for the next
//! request. If the remote catalog mutates between fetches the page number
//! can drift from the true offset; this is accepted.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::shopify::AdminShopifyError;
use crate::shopify::types::{CatalogProduct, PageInfo, ProductConnection};

/// Traversal direction through the remote catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Page after the cursor (`first`/`after`).
    Forward,
    /// Page before the cursor (`last`/`before`).
    Backward,
}

/// A single catalog page request.
///
/// `cursor` is `None` only for the first page of a given
/// (search, page size) combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Opaque position token from the previous successful response.
    pub cursor: Option<String>,
    /// Traversal direction.
    pub direction: Direction,
    /// Search term, passed to the remote as-is (empty means unfiltered).
    pub search: String,
    /// Number of products per page.
    pub page_size: i64,
}

impl PageRequest {
    /// Build the request for the first page of a (search, page size) pair.
    #[must_use]
    pub fn first_page(search: &str, page_size: i64) -> Self {
        Self {
            cursor: None,
            direction: Direction::Forward,
            search: search.to_owned(),
            page_size,
        }
    }
}

/// Something that can serve catalog pages.
///
/// Implemented by the Shopify Admin client; tests substitute scripted
/// doubles.
pub trait ProductSource: Send + Sync {
    /// Fetch one page of products.
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<ProductConnection, AdminShopifyError>> + Send;
}

/// Immutable navigation state.
///
/// One value per successfully applied page; transitions go through
/// [`NavigationState::reset`] and [`NavigationState::applied`], which return
/// new values and never mutate in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Current search term.
    pub search_term: String,
    /// Current page size.
    pub items_per_page: i64,
    /// Display page number, 1-based.
    pub page_number: u32,
    /// Cursor of the first item on the current page.
    pub start_cursor: Option<String>,
    /// Cursor of the last item on the current page.
    pub end_cursor: Option<String>,
    /// Whether the remote reports a page after this one.
    pub has_next_page: bool,
    /// Whether the remote reports a page before this one.
    pub has_previous_page: bool,
}

impl NavigationState {
    /// Fresh state for a (search, page size) pair: page 1, no cursors.
    ///
    /// Discards any cursor history from a previous search or page size;
    /// cursors are only meaningful within the result set that minted them.
    #[must_use]
    pub fn reset(search: &str, items_per_page: i64) -> Self {
        Self {
            search_term: search.to_owned(),
            items_per_page,
            page_number: 1,
            start_cursor: None,
            end_cursor: None,
            has_next_page: false,
            has_previous_page: false,
        }
    }

    /// New state with a page applied.
    #[must_use]
    pub fn applied(&self, page_number: u32, info: &PageInfo) -> Self {
        Self {
            search_term: self.search_term.clone(),
            items_per_page: self.items_per_page,
            page_number,
            start_cursor: info.start_cursor.clone(),
            end_cursor: info.end_cursor.clone(),
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
        }
    }

    /// Request for the page after the current one, or `None` when the remote
    /// reports no next page or no fetch has completed yet.
    #[must_use]
    pub fn next_request(&self) -> Option<PageRequest> {
        if !self.has_next_page {
            return None;
        }
        let cursor = self.end_cursor.clone()?;
        Some(PageRequest {
            cursor: Some(cursor),
            direction: Direction::Forward,
            search: self.search_term.clone(),
            page_size: self.items_per_page,
        })
    }

    /// Request for the page before the current one, or `None` when the
    /// remote reports no previous page or no fetch has completed yet.
    #[must_use]
    pub fn previous_request(&self) -> Option<PageRequest> {
        if !self.has_previous_page {
            return None;
        }
        let cursor = self.start_cursor.clone()?;
        Some(PageRequest {
            cursor: Some(cursor),
            direction: Direction::Backward,
            search: self.search_term.clone(),
            page_size: self.items_per_page,
        })
    }
}

/// Errors surfaced by the coordinator.
///
/// The coordinator never retries; all failures leave the last successful
/// navigation state intact so the caller can retry in place.
#[derive(Debug, Error)]
pub enum PagerError {
    /// A navigation request is already outstanding.
    #[error("a navigation request is already in flight")]
    Busy,

    /// A newer navigation superseded this one while it was in flight.
    #[error("navigation superseded by a newer request")]
    Superseded,

    /// The product source failed.
    #[error(transparent)]
    Source(#[from] AdminShopifyError),
}

/// One successfully loaded page, as handed to the caller.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Products on this page, in remote catalog order.
    pub products: Vec<CatalogProduct>,
    /// Display page number, 1-based.
    pub page_number: u32,
    /// Page size the page was fetched with.
    pub items_per_page: i64,
    /// Whether a next page exists.
    pub has_next_page: bool,
    /// Whether a previous page exists.
    pub has_previous_page: bool,
}

impl PageView {
    /// 1-based item range for display ("items X-Y").
    ///
    /// An empty page reports `(0, 0)`.
    #[must_use]
    pub fn item_range(&self) -> (u64, u64) {
        if self.products.is_empty() {
            return (0, 0);
        }
        #[allow(clippy::cast_sign_loss)] // items_per_page is validated to 1..=50
        let per_page = self.items_per_page as u64;
        let first = u64::from(self.page_number - 1) * per_page + 1;
        let last = first + self.products.len() as u64 - 1;
        (first, last)
    }
}

/// Generation-tracked state behind the pager's lock.
#[derive(Debug)]
struct Tracked {
    state: NavigationState,
    /// Monotonic token; a response only applies if its generation is still
    /// current when it arrives.
    generation: u64,
    in_flight: bool,
}

/// Drives paginated traversal of a [`ProductSource`].
///
/// All methods take `&self`; share the pager behind an `Arc` to navigate
/// from multiple tasks. Navigation is serialized (see module docs).
pub struct Pager<S> {
    source: S,
    tracked: Mutex<Tracked>,
}

impl<S: ProductSource> Pager<S> {
    /// Create a pager over a product source.
    ///
    /// No fetch is issued until [`load_first_page`](Self::load_first_page)
    /// is called.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            tracked: Mutex::new(Tracked {
                state: NavigationState::reset("", 0),
                generation: 0,
                in_flight: false,
            }),
        }
    }

    /// Snapshot of the current navigation state.
    pub async fn state(&self) -> NavigationState {
        self.tracked.lock().await.state.clone()
    }

    /// Load the first page for a (search, page size) pair.
    ///
    /// Must be called for every search-term or page-size change; it resets
    /// the page number to 1 and discards all prior cursor state. If another
    /// navigation is in flight it is superseded: its response is discarded
    /// when it arrives and its caller gets [`PagerError::Superseded`].
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Source`] if the fetch fails (prior state is
    /// kept), or [`PagerError::Superseded`] if a newer navigation overtook
    /// this one.
    pub async fn load_first_page(
        &self,
        search: &str,
        items_per_page: i64,
    ) -> Result<PageView, PagerError> {
        let generation = {
            let mut tracked = self.tracked.lock().await;
            // Superseding an in-flight fetch is allowed here: bumping the
            // generation invalidates it.
            tracked.generation += 1;
            tracked.in_flight = true;
            tracked.generation
        };

        let request = PageRequest::first_page(search, items_per_page);
        let base = NavigationState::reset(search, items_per_page);
        self.dispatch(generation, &request, base, 1).await
    }

    /// Load the page after the current one.
    ///
    /// Returns `Ok(None)` without dispatching a request when the remote
    /// reported no next page, or when no first page has been loaded yet.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Busy`] while another navigation is in flight,
    /// [`PagerError::Source`] if the fetch fails (prior state is kept), or
    /// [`PagerError::Superseded`] if a newer navigation overtook this one.
    pub async fn load_next(&self) -> Result<Option<PageView>, PagerError> {
        let (generation, request, base, page_number) = {
            let mut tracked = self.tracked.lock().await;
            if tracked.in_flight {
                return Err(PagerError::Busy);
            }
            let Some(request) = tracked.state.next_request() else {
                return Ok(None);
            };
            tracked.generation += 1;
            tracked.in_flight = true;
            (
                tracked.generation,
                request,
                tracked.state.clone(),
                tracked.state.page_number + 1,
            )
        };

        self.dispatch(generation, &request, base, page_number)
            .await
            .map(Some)
    }

    /// Load the page before the current one.
    ///
    /// Returns `Ok(None)` without dispatching a request when the remote
    /// reported no previous page, or when no first page has been loaded yet.
    /// The page number never goes below 1.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Busy`] while another navigation is in flight,
    /// [`PagerError::Source`] if the fetch fails (prior state is kept), or
    /// [`PagerError::Superseded`] if a newer navigation overtook this one.
    pub async fn load_previous(&self) -> Result<Option<PageView>, PagerError> {
        let (generation, request, base, page_number) = {
            let mut tracked = self.tracked.lock().await;
            if tracked.in_flight {
                return Err(PagerError::Busy);
            }
            let Some(request) = tracked.state.previous_request() else {
                return Ok(None);
            };
            tracked.generation += 1;
            tracked.in_flight = true;
            (
                tracked.generation,
                request,
                tracked.state.clone(),
                tracked.state.page_number.saturating_sub(1).max(1),
            )
        };

        self.dispatch(generation, &request, base, page_number)
            .await
            .map(Some)
    }

    /// Run one fetch and apply its result if this navigation is still
    /// current.
    ///
    /// `base` is the state the response applies onto; it is only committed
    /// on success, so a failed fetch leaves the stored state untouched.
    async fn dispatch(
        &self,
        generation: u64,
        request: &PageRequest,
        base: NavigationState,
        page_number: u32,
    ) -> Result<PageView, PagerError> {
        let result = self.source.fetch_page(request).await;

        let mut tracked = self.tracked.lock().await;
        if tracked.generation != generation {
            // A newer navigation took over while we were waiting; its state
            // wins regardless of what this response says.
            tracing::debug!(generation, "discarding superseded page response");
            return Err(PagerError::Superseded);
        }
        tracked.in_flight = false;

        match result {
            Ok(connection) => {
                let state = base.applied(page_number, &connection.page_info);
                let view = PageView {
                    products: connection.products,
                    page_number,
                    items_per_page: state.items_per_page,
                    has_next_page: state.has_next_page,
                    has_previous_page: state.has_previous_page,
                };
                tracked.state = state;
                Ok(view)
            }
            Err(e) => Err(PagerError::Source(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use tokio::sync::{Mutex as AsyncMutex, oneshot};

    use super::*;
    use crate::shopify::types::MediaImage;

    fn product(n: u32) -> CatalogProduct {
        CatalogProduct {
            id: format!("gid://shopify/Product/{n}"),
            title: format!("Product {n}"),
            handle: format!("product-{n}"),
            description: String::new(),
            media: vec![MediaImage {
                url: format!("https://cdn.example.com/{n}.jpg"),
                alt_text: None,
            }],
            variants: vec![],
        }
    }

    fn page(
        count: u32,
        has_previous: bool,
        has_next: bool,
        start: &str,
        end: &str,
    ) -> ProductConnection {
        ProductConnection {
            products: (1..=count).map(product).collect(),
            page_info: PageInfo {
                has_next_page: has_next,
                has_previous_page: has_previous,
                start_cursor: Some(start.to_string()),
                end_cursor: Some(end.to_string()),
            },
        }
    }

    /// Scripted source: returns queued responses in order and records every
    /// request it serves.
    struct ScriptedSource {
        responses: AsyncMutex<VecDeque<Result<ProductConnection, AdminShopifyError>>>,
        requests: AsyncMutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(
            responses: impl IntoIterator<Item = Result<ProductConnection, AdminShopifyError>>,
        ) -> Self {
            Self {
                responses: AsyncMutex::new(responses.into_iter().collect()),
                requests: AsyncMutex::new(Vec::new()),
            }
        }

        async fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().await.clone()
        }
    }

    impl ProductSource for &ScriptedSource {
        async fn fetch_page(
            &self,
            request: &PageRequest,
        ) -> Result<ProductConnection, AdminShopifyError> {
            self.requests.lock().await.push(request.clone());
            self.responses
                .lock()
                .await
                .pop_front()
                .expect("scripted source ran out of responses")
        }
    }

    /// Gated source: each fetch waits for an explicit release before
    /// returning, so tests can control response arrival order.
    struct GatedSource {
        scripted: ScriptedSource,
        gates: AsyncMutex<VecDeque<oneshot::Receiver<()>>>,
    }

    impl GatedSource {
        fn new(
            responses: impl IntoIterator<Item = Result<ProductConnection, AdminShopifyError>>,
            gate_count: usize,
        ) -> (Self, Vec<oneshot::Sender<()>>) {
            let (senders, receivers): (Vec<_>, Vec<_>) =
                (0..gate_count).map(|_| oneshot::channel()).unzip();
            (
                Self {
                    scripted: ScriptedSource::new(responses),
                    gates: AsyncMutex::new(receivers.into_iter().collect()),
                },
                senders,
            )
        }
    }

    impl ProductSource for &GatedSource {
        async fn fetch_page(
            &self,
            request: &PageRequest,
        ) -> Result<ProductConnection, AdminShopifyError> {
            let gate = self
                .gates
                .lock()
                .await
                .pop_front()
                .expect("gated source ran out of gates");
            // Bind the scripted response at dispatch (gate-acquisition) order,
            // so out-of-order gate releases don't reorder which response each
            // fetch receives.
            let response = (&self.scripted).fetch_page(request).await;
            gate.await.expect("gate sender dropped");
            response
        }
    }

    #[tokio::test]
    async fn test_first_page_requests_with_null_cursor() {
        let source = ScriptedSource::new([Ok(page(3, false, true, "c1", "c3"))]);
        let pager = Pager::new(&source);

        let view = pager.load_first_page("", 3).await.unwrap();

        assert_eq!(view.page_number, 1);
        assert_eq!(view.products.len(), 3);
        assert!(view.has_next_page);

        let requests = source.requests().await;
        assert_eq!(requests.len(), 1);
        let first = requests.first().unwrap();
        assert_eq!(first.cursor, None);
        assert_eq!(first.direction, Direction::Forward);
        assert_eq!(first.page_size, 3);
    }

    #[tokio::test]
    async fn test_load_next_sends_end_cursor_and_increments_page() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(3, true, false, "c4", "c6")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();
        let view = pager.load_next().await.unwrap().unwrap();

        assert_eq!(view.page_number, 2);
        assert!(!view.has_next_page);

        let requests = source.requests().await;
        let second = requests.get(1).unwrap();
        assert_eq!(second.cursor.as_deref(), Some("c3"));
        assert_eq!(second.direction, Direction::Forward);
    }

    #[tokio::test]
    async fn test_load_next_is_noop_once_has_next_is_false() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(2, true, false, "c4", "c5")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();
        pager.load_next().await.unwrap().unwrap();

        // Exhausted: no further request may be dispatched
        let result = pager.load_next().await.unwrap();
        assert!(result.is_none());
        assert_eq!(source.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_load_next_before_first_page_is_noop() {
        let source = ScriptedSource::new(Vec::new());
        let pager = Pager::new(&source);

        assert!(pager.load_next().await.unwrap().is_none());
        assert!(pager.load_previous().await.unwrap().is_none());
        assert!(source.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_first_page_is_idempotent_under_identical_input() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(3, false, true, "c1", "c3")),
        ]);
        let pager = Pager::new(&source);

        let first = pager.load_first_page("shirt", 3).await.unwrap();
        let second = pager.load_first_page("shirt", 3).await.unwrap();

        assert_eq!(first.page_number, 1);
        assert_eq!(second.page_number, 1);
    }

    #[tokio::test]
    async fn test_page_size_change_discards_cursor_state() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(3, true, true, "c4", "c6")),
            Ok(page(5, false, true, "d1", "d5")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();
        pager.load_next().await.unwrap().unwrap();

        // New page size: back to page 1, and no cursor from the old result
        // set may leak into the request
        let view = pager.load_first_page("", 5).await.unwrap();
        assert_eq!(view.page_number, 1);

        let requests = source.requests().await;
        let third = requests.get(2).unwrap();
        assert_eq!(third.cursor, None);
        assert_eq!(third.page_size, 5);

        let state = pager.state().await;
        assert_eq!(state.end_cursor.as_deref(), Some("d5"));
        assert_eq!(state.items_per_page, 5);
    }

    #[tokio::test]
    async fn test_search_term_travels_with_every_request() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(3, true, false, "c4", "c6")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("linen shirt", 3).await.unwrap();
        pager.load_next().await.unwrap().unwrap();

        for request in source.requests().await {
            assert_eq!(request.search, "linen shirt");
        }
    }

    #[tokio::test]
    async fn test_load_previous_uses_start_cursor_backward() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Ok(page(3, true, true, "c4", "c6")),
            Ok(page(3, false, true, "c1", "c3")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();
        pager.load_next().await.unwrap().unwrap();
        let view = pager.load_previous().await.unwrap().unwrap();

        assert_eq!(view.page_number, 1);

        let requests = source.requests().await;
        let third = requests.get(2).unwrap();
        assert_eq!(third.cursor.as_deref(), Some("c4"));
        assert_eq!(third.direction, Direction::Backward);
    }

    #[tokio::test]
    async fn test_page_number_floors_at_one() {
        // Remote can report has_previous_page on what we display as page 1
        // (e.g., items inserted upstream since the first fetch)
        let source = ScriptedSource::new([
            Ok(page(3, true, true, "c1", "c3")),
            Ok(page(3, true, true, "b1", "b3")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();
        let view = pager.load_previous().await.unwrap().unwrap();

        assert_eq!(view.page_number, 1);
    }

    #[tokio::test]
    async fn test_fetch_error_keeps_prior_state_for_retry() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Err(AdminShopifyError::RateLimited(30)),
            Ok(page(3, true, false, "c4", "c6")),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("", 3).await.unwrap();

        let err = pager.load_next().await.unwrap_err();
        assert!(matches!(err, PagerError::Source(_)));

        // Prior state intact: same cursor is re-sent on retry
        let state = pager.state().await;
        assert_eq!(state.page_number, 1);
        assert_eq!(state.end_cursor.as_deref(), Some("c3"));

        let view = pager.load_next().await.unwrap().unwrap();
        assert_eq!(view.page_number, 2);

        let requests = source.requests().await;
        assert_eq!(requests.get(1).unwrap().cursor.as_deref(), Some("c3"));
        assert_eq!(requests.get(2).unwrap().cursor.as_deref(), Some("c3"));
    }

    #[tokio::test]
    async fn test_failed_first_page_does_not_commit_reset() {
        let source = ScriptedSource::new([
            Ok(page(3, false, true, "c1", "c3")),
            Err(AdminShopifyError::Unauthorized("expired".to_string())),
        ]);
        let pager = Pager::new(&source);

        pager.load_first_page("old", 3).await.unwrap();
        let err = pager.load_first_page("new", 3).await.unwrap_err();
        assert!(matches!(err, PagerError::Source(_)));

        // The failed reset left the last successful state in place
        let state = pager.state().await;
        assert_eq!(state.search_term, "old");
        assert_eq!(state.end_cursor.as_deref(), Some("c3"));
    }

    #[tokio::test]
    async fn test_concurrent_navigation_is_rejected_busy() {
        let (source, gates) = GatedSource::new(
            [
                Ok(page(3, false, true, "c1", "c3")),
                Ok(page(3, true, false, "c4", "c6")),
            ],
            2,
        );
        let source = Arc::new(source);
        let pager = Arc::new(Pager::new(SharedSource(Arc::clone(&source))));

        let mut gates = gates.into_iter();
        gates.next().unwrap().send(()).unwrap();
        pager.load_first_page("", 3).await.unwrap();

        // Hold the second fetch open and try to navigate again
        let task_pager = Arc::clone(&pager);
        let in_flight = tokio::spawn(async move { task_pager.load_next().await });
        tokio::task::yield_now().await;

        let err = pager.load_next().await.unwrap_err();
        assert!(matches!(err, PagerError::Busy));

        gates.next().unwrap().send(()).unwrap();
        let view = in_flight.await.unwrap().unwrap().unwrap();
        assert_eq!(view.page_number, 2);
    }

    #[tokio::test]
    async fn test_first_page_supersedes_in_flight_navigation() {
        let (source, gates) = GatedSource::new(
            [
                Ok(page(3, false, true, "c1", "c3")),
                // Response to the doomed load_next
                Ok(page(3, true, true, "c4", "c6")),
                // Response to the superseding first page (new search)
                Ok(page(2, false, false, "s1", "s2")),
            ],
            3,
        );
        let source = Arc::new(source);
        let pager = Arc::new(Pager::new(SharedSource(Arc::clone(&source))));

        let mut gates = gates.into_iter();
        gates.next().unwrap().send(()).unwrap();
        pager.load_first_page("", 3).await.unwrap();

        let task_pager = Arc::clone(&pager);
        let stale = tokio::spawn(async move { task_pager.load_next().await });
        tokio::task::yield_now().await;

        // Search changes mid-flight: the new first page takes over
        let task_pager = Arc::clone(&pager);
        let fresh = tokio::spawn(async move { task_pager.load_first_page("shirt", 3).await });
        tokio::task::yield_now().await;

        // Release the superseding fetch first, then the stale one
        let stale_gate = gates.next().unwrap();
        gates.next().unwrap().send(()).unwrap();
        let view = fresh.await.unwrap().unwrap();
        assert_eq!(view.page_number, 1);
        assert_eq!(view.products.len(), 2);

        stale_gate.send(()).unwrap();
        let err = stale.await.unwrap().unwrap_err();
        assert!(matches!(err, PagerError::Superseded));

        // The stale response did not overwrite the fresh state
        let state = pager.state().await;
        assert_eq!(state.search_term, "shirt");
        assert_eq!(state.end_cursor.as_deref(), Some("s2"));
        assert_eq!(state.page_number, 1);
    }

    #[tokio::test]
    async fn test_item_range() {
        let view = PageView {
            products: (1..=3).map(product).collect(),
            page_number: 3,
            items_per_page: 5,
            has_next_page: false,
            has_previous_page: true,
        };
        assert_eq!(view.item_range(), (11, 13));

        let empty = PageView {
            products: vec![],
            page_number: 1,
            items_per_page: 5,
            has_next_page: false,
            has_previous_page: false,
        };
        assert_eq!(empty.item_range(), (0, 0));
    }

    #[test]
    fn test_navigation_state_next_request_requires_cursor() {
        let state = NavigationState {
            has_next_page: true,
            end_cursor: None,
            ..NavigationState::reset("", 3)
        };
        assert!(state.next_request().is_none());
    }

    #[test]
    fn test_navigation_state_applied_is_a_new_value() {
        let base = NavigationState::reset("q", 3);
        let info = PageInfo {
            has_next_page: true,
            has_previous_page: false,
            start_cursor: Some("c1".to_string()),
            end_cursor: Some("c3".to_string()),
        };
        let next = base.applied(1, &info);

        assert_eq!(base.end_cursor, None);
        assert_eq!(next.end_cursor.as_deref(), Some("c3"));
        assert_eq!(next.search_term, "q");
    }

    /// Arc wrapper so gated sources can be shared with spawned tasks.
    struct SharedSource(Arc<GatedSource>);

    impl ProductSource for SharedSource {
        async fn fetch_page(
            &self,
            request: &PageRequest,
        ) -> Result<ProductConnection, AdminShopifyError> {
            (&*self.0).fetch_page(request).await
        }
    }
}
