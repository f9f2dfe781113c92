//! Bounded incremental loader for history/list views. Pages append to an
//! ordered sequence; page zero replaces it (used when filters or search
//! change). Growth stops at a hard item cap regardless of what the server
//! still has.

use parking_lot::Mutex;
use promo_core::error::PromoResult;
use tracing::debug;

use crate::PageFetcher;

/// Default hard cap on incrementally loaded items.
pub const DEFAULT_ITEM_CAP: usize = 50;

struct CacheState<T> {
    items: Vec<T>,
    next_page: u32,
    has_more: bool,
}

/// Incremental page cache over one fetcher. One instance per list view.
///
/// Loads on the same instance are serialized: while a fetch is in flight,
/// further load calls are suppressed rather than queued, so a double-click on
/// "load more" cannot append the same page twice.
pub struct ListCache<T, F> {
    fetcher: F,
    state: Mutex<CacheState<T>>,
    busy: tokio::sync::Mutex<()>,
    cap: usize,
}

impl<T: Clone, F: PageFetcher<T>> ListCache<T, F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_cap(fetcher, DEFAULT_ITEM_CAP)
    }

    pub fn with_cap(fetcher: F, cap: usize) -> Self {
        Self {
            fetcher,
            state: Mutex::new(CacheState {
                items: Vec::new(),
                next_page: 0,
                has_more: true,
            }),
            busy: tokio::sync::Mutex::new(()),
            cap,
        }
    }

    pub fn items(&self) -> Vec<T> {
        self.state.lock().items.clone()
    }

    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Whether the server reported more pages and the cap is not yet reached.
    pub fn has_more(&self) -> bool {
        let state = self.state.lock();
        state.has_more && state.items.len() < self.cap
    }

    /// Load a specific page. Page zero replaces the cached sequence; any
    /// other page appends. Returns `true` if a fetch actually ran.
    pub async fn load_page(&self, page: u32) -> PromoResult<bool> {
        // Suppress, not queue: a load already in flight wins.
        let Ok(_guard) = self.busy.try_lock() else {
            debug!(page, "Page load suppressed, fetch already in flight");
            return Ok(false);
        };

        if page != 0 {
            let state = self.state.lock();
            if !state.has_more || state.items.len() >= self.cap {
                return Ok(false);
            }
        }

        let slice = self.fetcher.fetch_page(page).await?;

        let mut state = self.state.lock();
        if page == 0 {
            state.items = slice.items;
        } else {
            state.items.extend(slice.items);
        }
        state.items.truncate(self.cap);
        state.has_more = !slice.last;
        state.next_page = page + 1;
        Ok(true)
    }

    /// Load the page after the last one loaded.
    pub async fn load_more(&self) -> PromoResult<bool> {
        let next_page = self.state.lock().next_page;
        self.load_page(next_page).await
    }

    /// Reload from the first page, replacing the cached sequence.
    pub async fn refresh(&self) -> PromoResult<bool> {
        self.load_page(0).await
    }
}
