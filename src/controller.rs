//! Server-driven pagination for one list endpoint.
//!
//! A [`PaginationController`] owns the page, size, sort and search state of a
//! listing, turns it into query parameters, asks a [`Fetcher`] for the rows and
//! publishes the outcome as a [`ListState`]. Every mutator re-fetches; fetch
//! failures are stored in the state instead of being returned.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::domain::list_query::ListQuery;
use crate::domain::types::{PageNumber, PageSize, SortSpec};
use crate::fetcher::{FetchError, FetchRequest, Fetcher};
use crate::pagination::{PageLinks, total_pages};

/// Observable outcome of the latest fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// Rows of the last successfully fetched page.
    pub data: Vec<T>,
    /// Row count across all pages, from the total-count header.
    pub total: u64,
    pub loading: bool,
    /// Error of the last fetch; cleared by the next successful one.
    pub error: Option<FetchError>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            total: 0,
            loading: false,
            error: None,
        }
    }
}

/// Clears `loading` if a fetch is dropped before it completes.
struct LoadingGuard<'a, T> {
    state: &'a watch::Sender<ListState<T>>,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| std::mem::replace(&mut state.loading, false));
    }
}

/// Where a controller sends its list requests.
///
/// A watched endpoint follows a value owned elsewhere, typically the path of
/// a collection nested under the currently selected parent row.
#[derive(Debug, Clone)]
pub enum Endpoint {
    Fixed(Option<String>),
    Watched(watch::Receiver<Option<String>>),
}

impl Endpoint {
    /// Current endpoint, with blank values treated as unset.
    pub fn current(&self) -> Option<String> {
        let endpoint = match self {
            Endpoint::Fixed(endpoint) => endpoint.clone(),
            Endpoint::Watched(receiver) => receiver.borrow().clone(),
        };
        endpoint.filter(|e| !e.trim().is_empty())
    }
}

impl From<&str> for Endpoint {
    fn from(endpoint: &str) -> Self {
        Endpoint::Fixed(Some(endpoint.to_string()))
    }
}

impl From<String> for Endpoint {
    fn from(endpoint: String) -> Self {
        Endpoint::Fixed(Some(endpoint))
    }
}

impl From<Option<String>> for Endpoint {
    fn from(endpoint: Option<String>) -> Self {
        Endpoint::Fixed(endpoint)
    }
}

impl From<watch::Receiver<Option<String>>> for Endpoint {
    fn from(receiver: watch::Receiver<Option<String>>) -> Self {
        Endpoint::Watched(receiver)
    }
}

/// Initial query state of a controller.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub page: PageNumber,
    pub size: PageSize,
    pub sort: SortSpec,
    pub search: String,
    /// Fetch as soon as the controller is opened.
    pub immediate: bool,
}

impl ListOptions {
    pub fn new(sort: SortSpec) -> Self {
        Self {
            page: PageNumber::FIRST,
            size: PageSize::default(),
            sort,
            search: String::new(),
            immediate: true,
        }
    }

    pub fn page(mut self, page: PageNumber) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: PageSize) -> Self {
        self.size = size;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }
}

pub struct PaginationController<T, F: ?Sized> {
    fetcher: Arc<F>,
    endpoint: Endpoint,
    page: PageNumber,
    size: PageSize,
    sort: SortSpec,
    search: String,
    state: watch::Sender<ListState<T>>,
    requests_sent: u64,
}

impl<T, F> PaginationController<T, F>
where
    T: DeserializeOwned + Send + Sync,
    F: Fetcher + ?Sized,
{
    /// Creates a controller without fetching anything.
    pub fn new(fetcher: Arc<F>, endpoint: impl Into<Endpoint>, options: ListOptions) -> Self {
        let (state, _) = watch::channel(ListState::default());
        Self {
            fetcher,
            endpoint: endpoint.into(),
            page: options.page,
            size: options.size,
            sort: options.sort,
            search: options.search,
            state,
            requests_sent: 0,
        }
    }

    /// Creates a controller and loads the first page unless
    /// [`ListOptions::immediate`] is off.
    pub async fn open(fetcher: Arc<F>, endpoint: impl Into<Endpoint>, options: ListOptions) -> Self {
        let immediate = options.immediate;
        let mut controller = Self::new(fetcher, endpoint, options);
        if immediate {
            controller.fetch_data().await;
        }
        controller
    }

    /// Loads the current page.
    ///
    /// With no endpoint the listing is emptied without a request. On success
    /// rows and total are replaced wholesale; on failure they are kept and the
    /// error is stored. Dropping the future mid-request leaves the listing as
    /// it was, with `loading` cleared.
    pub async fn fetch_data(&mut self) {
        let Some(endpoint) = self.endpoint.current() else {
            self.state.send_modify(|state| {
                state.data.clear();
                state.total = 0;
            });
            return;
        };

        self.requests_sent += 1;
        let request = FetchRequest::get().params(self.query().to_params());
        log::debug!(
            "List request #{} to {endpoint}: {:?}",
            self.requests_sent,
            request.params
        );

        self.state.send_modify(|state| state.loading = true);
        let _loading = LoadingGuard { state: &self.state };

        let result = self
            .fetcher
            .fetch(&endpoint, request)
            .await
            .and_then(|response| {
                let total = response.total_count();
                let data = serde_json::from_value::<Vec<T>>(response.body)?;
                Ok((data, total))
            });

        self.state.send_modify(|state| {
            state.loading = false;
            match result {
                Ok((data, total)) => {
                    state.data = data;
                    state.total = total;
                    state.error = None;
                }
                Err(err) => {
                    log::error!("Failed to fetch {endpoint}: {err}");
                    state.error = Some(err);
                }
            }
        });
    }

    pub async fn on_page_change(&mut self, page: PageNumber) {
        self.page = page;
        self.fetch_data().await;
    }

    pub async fn on_size_change(&mut self, size: PageSize) {
        self.size = size;
        self.fetch_data().await;
    }

    pub async fn on_sort_change(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.fetch_data().await;
    }

    /// Applies a new keyword and returns to the first page before fetching.
    pub async fn on_search_change(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = PageNumber::FIRST;
        self.fetch_data().await;
    }

    /// Points the controller at another endpoint, back on the first page.
    pub async fn set_endpoint(&mut self, endpoint: impl Into<Endpoint>) {
        self.endpoint = endpoint.into();
        self.page = PageNumber::FIRST;
        self.fetch_data().await;
    }

    /// Waits for the watched endpoint to change, then reloads from page 1.
    ///
    /// Returns `false` without fetching for a fixed endpoint or once the
    /// sending side of a watched endpoint is gone.
    ///
    /// Not cancel-safe: once the change is observed, dropping the future
    /// skips the reload for that change. Call [`fetch_data`](Self::fetch_data)
    /// to catch up.
    pub async fn endpoint_changed(&mut self) -> bool {
        let changed = match &mut self.endpoint {
            Endpoint::Watched(receiver) => receiver.changed().await.is_ok(),
            Endpoint::Fixed(_) => false,
        };

        if changed {
            self.page = PageNumber::FIRST;
            self.fetch_data().await;
        }

        changed
    }

    /// Reloads on every endpoint change until the endpoint stops changing.
    pub async fn follow_endpoint(&mut self) {
        while self.endpoint_changed().await {}
    }
}

impl<T, F: ?Sized> PaginationController<T, F> {
    pub fn page(&self) -> PageNumber {
        self.page
    }

    pub fn size(&self) -> PageSize {
        self.size
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn endpoint(&self) -> Option<String> {
        self.endpoint.current()
    }

    /// Query the next fetch will send.
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.page,
            size: self.size,
            sort: self.sort.clone(),
            keyword: Some(self.search.clone()).filter(|s| !s.is_empty()),
        }
    }

    pub fn state(&self) -> watch::Ref<'_, ListState<T>> {
        self.state.borrow()
    }

    /// Receiver notified after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    pub fn total(&self) -> u64 {
        self.state.borrow().total
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<FetchError> {
        self.state.borrow().error.clone()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total(), self.size)
    }

    pub fn page_links(&self) -> PageLinks {
        PageLinks::new(self.page, self.size, self.total())
    }

    /// Number of list requests issued so far.
    pub fn requests_sent(&self) -> u64 {
        self.requests_sent
    }
}
