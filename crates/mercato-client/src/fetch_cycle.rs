//! The loading → loaded/empty/failed cycle behind every list view.
//!
//! Each list view owns one [`FetchCycle`]. Calling [`FetchCycle::run`]
//! stamps the request with a new generation number; when the response
//! arrives it is applied only if no newer request started in the meantime,
//! so a slow page-1 response cannot overwrite a fast page-2 response.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::envelope::{Page, PageInfo};
use crate::error::ClientError;

/// Message shown in place of a list whose fetch failed.
pub const GENERIC_LOAD_ERROR: &str = "We couldn't load this page. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    /// The fetch succeeded and returned no items.
    LoadedEmpty,
    Failed,
}

/// Render-ready state of one list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T, P> {
    pub status: LoadStatus,
    pub items: Vec<T>,
    pub page: PageInfo,
    /// Parameters of the most recent request.
    pub params: Option<P>,
    /// Inline error for the last failed fetch.
    pub error: Option<String>,
    /// Set when the session expired and the view must send the user to log in.
    pub redirect_to: Option<String>,
}

impl<T, P> Default for ListState<T, P> {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            items: Vec::new(),
            page: PageInfo::default(),
            params: None,
            error: None,
            redirect_to: None,
        }
    }
}

impl<T, P> ListState<T, P> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Status to fall back to when a fetch ends without new data.
    fn settled_status(&self) -> LoadStatus {
        if self.items.is_empty() {
            LoadStatus::Idle
        } else {
            LoadStatus::Loaded
        }
    }
}

/// What happened to one [`FetchCycle::run`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded { count: usize },
    Empty,
    Failed,
    Unauthorized { login_route: String },
    /// A newer request started before this one finished; its result was dropped.
    Stale,
}

struct Inner<T, P> {
    state: ListState<T, P>,
    generation: u64,
}

pub struct FetchCycle<T, P> {
    inner: Mutex<Inner<T, P>>,
}

impl<T, P> Default for FetchCycle<T, P> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: ListState::default(),
                generation: 0,
            }),
        }
    }
}

impl<T, P> FetchCycle<T, P>
where
    P: PartialEq + Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T, P>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> ListState<T, P>
    where
        T: Clone,
    {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().state.is_loading()
    }

    /// Runs one fetch for `params`.
    ///
    /// When `params` differ from the previous request the items and
    /// pagination are reset before loading. On failure the items are left as
    /// they were. The loading flag is cleared on every exit path, including
    /// when the returned future is dropped before completion.
    pub async fn run<F, Fut>(&self, params: P, fetch: F) -> FetchOutcome
    where
        F: FnOnce(P) -> Fut,
        Fut: Future<Output = Result<Page<T>, ClientError>>,
    {
        let generation = self.begin(&params);
        let guard = LoadingGuard {
            cycle: self,
            generation,
        };

        let result = fetch(params).await;
        let outcome = self.complete(generation, result);
        drop(guard);
        outcome
    }

    fn begin(&self, params: &P) -> u64 {
        let mut inner = self.lock();
        inner.generation += 1;

        let state = &mut inner.state;
        if state.params.as_ref() != Some(params) {
            state.items.clear();
            state.page = PageInfo::default();
        }
        state.params = Some(params.clone());
        state.status = LoadStatus::Loading;
        state.error = None;
        state.redirect_to = None;

        inner.generation
    }

    fn complete(&self, generation: u64, result: Result<Page<T>, ClientError>) -> FetchOutcome {
        let mut inner = self.lock();
        if inner.generation != generation {
            tracing::debug!(
                generation,
                current = inner.generation,
                "discarding stale list response"
            );
            return FetchOutcome::Stale;
        }

        let state = &mut inner.state;
        match result {
            Ok(page) => {
                let count = page.items.len();
                state.items = page.items;
                state.page = page.info;
                if count == 0 {
                    state.status = LoadStatus::LoadedEmpty;
                    FetchOutcome::Empty
                } else {
                    state.status = LoadStatus::Loaded;
                    FetchOutcome::Loaded { count }
                }
            }
            Err(ClientError::Unauthorized { login_route }) => {
                state.status = LoadStatus::Failed;
                state.redirect_to = Some(login_route.clone());
                FetchOutcome::Unauthorized { login_route }
            }
            Err(err) => {
                tracing::warn!(error = %err, "list fetch failed");
                state.status = LoadStatus::Failed;
                state.error = Some(GENERIC_LOAD_ERROR.to_owned());
                FetchOutcome::Failed
            }
        }
    }
}

/// Clears the loading flag if the owning fetch never reached `complete`.
struct LoadingGuard<'a, T, P> {
    cycle: &'a FetchCycle<T, P>,
    generation: u64,
}

impl<T, P> Drop for LoadingGuard<'_, T, P> {
    fn drop(&mut self) {
        let mut inner = self
            .cycle
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if inner.generation == self.generation && inner.state.is_loading() {
            inner.state.status = inner.state.settled_status();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    type Cycle = FetchCycle<u32, u32>;

    fn page(items: Vec<u32>, last_page: u32) -> Page<u32> {
        Page {
            items,
            info: PageInfo {
                current_page: 1,
                last_page,
                total: None,
            },
        }
    }

    #[test]
    fn starts_idle() {
        let cycle = Cycle::new();
        let state = cycle.snapshot();
        assert_eq!(state.status, LoadStatus::Idle);
        assert!(state.items.is_empty());
        assert_eq!(state.page, PageInfo::default());
    }

    #[tokio::test]
    async fn success_stores_items_and_last_page() {
        let cycle = Cycle::new();
        let outcome = cycle
            .run(1, |_| async { Ok(page(vec![10, 11], 4)) })
            .await;
        assert_eq!(outcome, FetchOutcome::Loaded { count: 2 });
        let state = cycle.snapshot();
        assert_eq!(state.status, LoadStatus::Loaded);
        assert_eq!(state.items, vec![10, 11]);
        assert_eq!(state.page.last_page, 4);
        assert_eq!(state.params, Some(1));
    }

    #[tokio::test]
    async fn empty_result_is_loaded_empty() {
        let cycle = Cycle::new();
        let outcome = cycle.run(1, |_| async { Ok(page(vec![], 1)) }).await;
        assert_eq!(outcome, FetchOutcome::Empty);
        assert_eq!(cycle.snapshot().status, LoadStatus::LoadedEmpty);
    }

    #[tokio::test]
    async fn loading_flag_is_set_while_in_flight() {
        let cycle = Cycle::new();
        let outcome = cycle
            .run(1, |_| {
                let loading = cycle.is_loading();
                async move {
                    assert!(loading);
                    Ok(page(vec![1], 1))
                }
            })
            .await;
        assert_eq!(outcome, FetchOutcome::Loaded { count: 1 });
        assert!(!cycle.is_loading());
    }

    #[tokio::test]
    async fn failure_keeps_last_known_items_and_clears_loading() {
        let cycle = Cycle::new();
        cycle.run(1, |_| async { Ok(page(vec![1, 2], 2)) }).await;

        let outcome = cycle
            .run(1, |_| async {
                Err(ClientError::UnexpectedStatus {
                    status: 500,
                    url: "http://test/api/v1/products".to_owned(),
                })
            })
            .await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let state = cycle.snapshot();
        assert_eq!(state.status, LoadStatus::Failed);
        assert_eq!(state.items, vec![1, 2]);
        assert_eq!(state.error.as_deref(), Some(GENERIC_LOAD_ERROR));
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn changed_params_reset_pagination() {
        let cycle = Cycle::new();
        cycle.run(1, |_| async { Ok(page(vec![1, 2], 5)) }).await;

        let outcome = cycle
            .run(2, |_| async {
                Err(ClientError::NotFound {
                    url: "http://test".to_owned(),
                })
            })
            .await;

        assert_eq!(outcome, FetchOutcome::Failed);
        let state = cycle.snapshot();
        assert!(state.items.is_empty());
        assert_eq!(state.page, PageInfo::default());
        assert_eq!(state.params, Some(2));
    }

    #[tokio::test]
    async fn unauthorized_sets_redirect_without_inline_error() {
        let cycle = Cycle::new();
        let outcome = cycle
            .run(1, |_| async {
                Err(ClientError::Unauthorized {
                    login_route: "/login".to_owned(),
                })
            })
            .await;

        assert_eq!(
            outcome,
            FetchOutcome::Unauthorized {
                login_route: "/login".to_owned()
            }
        );
        let state = cycle.snapshot();
        assert_eq!(state.redirect_to.as_deref(), Some("/login"));
        assert!(state.error.is_none());
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn stale_response_does_not_overwrite_newer_one() {
        let cycle = Cycle::new();

        let slow = cycle.run(1, |_| async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(page(vec![100], 1))
        });
        let fast = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            cycle.run(2, |_| async { Ok(page(vec![200], 3)) }).await
        };

        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert_eq!(slow_outcome, FetchOutcome::Stale);
        assert_eq!(fast_outcome, FetchOutcome::Loaded { count: 1 });
        let state = cycle.snapshot();
        assert_eq!(state.items, vec![200]);
        assert_eq!(state.page.last_page, 3);
        assert_eq!(state.params, Some(2));
    }

    #[tokio::test]
    async fn dropped_fetch_clears_loading_flag() {
        let cycle = Cycle::new();
        let never = cycle.run(1, |_| std::future::pending::<Result<Page<u32>, ClientError>>());

        let timed_out = tokio::time::timeout(Duration::from_millis(10), never).await;
        assert!(timed_out.is_err());

        let state = cycle.snapshot();
        assert!(!state.is_loading());
        assert_eq!(state.status, LoadStatus::Idle);
    }
}
