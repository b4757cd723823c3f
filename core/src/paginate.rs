//! Continuation-token pagination.
//!
//! Provider adapters normalize every list operation to a [`Page`]: the items of
//! one response plus the token for the next request, if any. Whether the
//! provider signals "more" through a next-token field, a marker, or a
//! truncation flag paired with a marker is the adapter's concern; [`paginate`]
//! only looks at [`Page::next`].

use std::future::Future;

use tracing::trace;

use crate::error::ProviderError;

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, K = String> {
    pub items: Vec<T>,
    pub next: Option<K>,
}

impl<T, K> Page<T, K> {
    /// A final page.
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    /// A page followed by more results.
    pub fn more(items: Vec<T>, next: K) -> Self {
        Self {
            items,
            next: Some(next),
        }
    }
}

/// Calls `fetch` with each continuation token in turn until a page comes back
/// without one, and returns the items of every page in order.
///
/// The first call gets `None`. There is no page limit and no retry; the first
/// error ends the walk.
pub async fn paginate<T, K, F, Fut>(mut fetch: F) -> Result<Vec<T>, ProviderError>
where
    F: FnMut(Option<K>) -> Fut,
    Fut: Future<Output = Result<Page<T, K>, ProviderError>>,
{
    let mut items = Vec::new();
    let mut token: Option<K> = None;
    let mut pages: usize = 0;

    loop {
        let page = fetch(token.take()).await?;
        pages += 1;
        items.extend(page.items);

        match page.next {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    trace!(pages, items = items.len(), "pagination finished");
    Ok(items)
}
