//! Auto-paging over V3 list endpoints.
//!
//! A [`Pager`] wraps a single-page fetch function and walks the `next`
//! links one request at a time. It can be driven page by page with
//! [`Pager::next_page`], which lets callers stop early without issuing
//! further requests, or drained with [`Pager::collect_all`].

use std::future::Future;
use std::pin::Pin;

use crate::error::{CfError, Result};
use crate::pagination::{Included, ListPage, PageCursor};

type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<ListPage<T>>> + Send + 'a>>;
type PageFetch<'a, T> = Box<dyn FnMut(PageCursor) -> PageFuture<'a, T> + Send + 'a>;

/// Forward-only, one-shot iterator over the pages of a list endpoint.
///
/// Once exhausted (or after an error) the pager yields no more pages; start
/// over by building a new one.
pub struct Pager<'a, T> {
    fetch: PageFetch<'a, T>,
    next: Option<PageCursor>,
    fetched: u32,
}

impl<T> std::fmt::Debug for Pager<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("next", &self.next)
            .field("fetched", &self.fetched)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Send + 'a> Pager<'a, T> {
    /// Create a pager starting at `initial`.
    ///
    /// `fetch` is called once per page with the cursor to request.
    pub fn new<F, Fut>(initial: PageCursor, mut fetch: F) -> Self
    where
        F: FnMut(PageCursor) -> Fut + Send + 'a,
        Fut: Future<Output = Result<ListPage<T>>> + Send + 'a,
    {
        Self {
            fetch: Box::new(move |cursor| Box::pin(fetch(cursor))),
            next: Some(initial),
            fetched: 0,
        }
    }

    /// Number of pages fetched so far.
    pub fn pages_fetched(&self) -> u32 {
        self.fetched
    }

    /// Returns true once no further page will be fetched.
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Fetch the next page, or `Ok(None)` when there are no more.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or [`CfError::PaginationLoop`] when a page's
    /// `next` link names that same page. The pager is exhausted afterwards.
    pub async fn next_page(&mut self) -> Result<Option<ListPage<T>>> {
        let Some(cursor) = self.next.take() else {
            return Ok(None);
        };

        let page = (self.fetch)(cursor).await?;
        self.fetched += 1;

        tracing::debug!(
            page = ?cursor.page(),
            per_page = ?cursor.per_page(),
            items = page.resources.len(),
            total_results = page.pagination.total_results,
            "Fetched page"
        );

        let next = page.pagination.next_cursor();
        if next == Some(cursor) {
            tracing::warn!(page = ?cursor.page(), "Next link repeats the current page");
            return Err(CfError::PaginationLoop {
                page: cursor.page(),
                per_page: cursor.per_page(),
            });
        }
        self.next = next;

        Ok(Some(page))
    }

    /// Fetch every remaining page and return all items in server order.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error; items from earlier pages are dropped.
    pub async fn collect_all(self) -> Result<Vec<T>> {
        self.collect_all_with_included().await.map(|(items, _)| items)
    }

    /// Like [`collect_all`](Self::collect_all), also merging each page's
    /// `included` side-collections.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error.
    pub async fn collect_all_with_included(mut self) -> Result<(Vec<T>, Included)> {
        let mut items = Vec::new();
        let mut included = Included::new();

        while let Some(page) = self.next_page().await? {
            items.extend(page.resources);
            included.extend(page.included);
        }

        Ok((items, included))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::ApiError;
    use crate::pagination::{Link, Pagination};

    fn link(page: u32, per_page: u32) -> Link {
        Link::new(format!(
            "https://api.example.org/v3/apps?page={page}&per_page={per_page}"
        ))
    }

    /// Build `pages` pages of `per_page` numbered items, chained by next links.
    fn page_of(page: u32, pages: u32, per_page: u32) -> ListPage<u32> {
        let start = (page - 1) * per_page;
        let pagination = Pagination {
            total_results: u64::from(pages * per_page),
            total_pages: u64::from(pages),
            first: Some(link(1, per_page)),
            last: Some(link(pages, per_page)),
            next: (page < pages).then(|| link(page + 1, per_page)),
            previous: (page > 1).then(|| link(page - 1, per_page)),
        };
        ListPage::new((start..start + per_page).collect(), pagination)
    }

    fn server_error() -> CfError {
        ApiError::from_body(500, "boom".to_string()).into()
    }

    #[tokio::test]
    async fn test_collect_all_follows_next_links() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = calls.clone();

        let pager = Pager::new(PageCursor::first_page(2), move |cursor: PageCursor| {
            seen.lock().unwrap().push(cursor);
            let page = cursor.page().unwrap();
            async move { Ok(page_of(page, 3, 2)) }
        });

        let items = pager.collect_all().await.unwrap();

        assert_eq!(items, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                PageCursor::new(1, 2),
                PageCursor::new(2, 2),
                PageCursor::new(3, 2)
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_count_matches_page_count() {
        for pages in 1..=5u32 {
            let calls = Arc::new(AtomicUsize::new(0));
            let counter = calls.clone();

            let pager = Pager::new(PageCursor::first_page(3), move |cursor: PageCursor| {
                counter.fetch_add(1, Ordering::SeqCst);
                let page = cursor.page().unwrap();
                async move { Ok(page_of(page, pages, 3)) }
            });

            let items = pager.collect_all().await.unwrap();
            assert_eq!(items.len(), (pages * 3) as usize);
            assert_eq!(calls.load(Ordering::SeqCst), pages as usize);
        }
    }

    #[tokio::test]
    async fn test_collect_all_fails_fast() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let pager = Pager::new(PageCursor::first_page(2), move |cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            let page = cursor.page().unwrap();
            async move {
                if page == 2 {
                    Err(server_error())
                } else {
                    Ok(page_of(page, 3, 2))
                }
            }
        });

        let result = pager.collect_all().await;

        assert!(matches!(result, Err(CfError::Api(ref e)) if e.status == 500));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_long_walks_are_not_truncated() {
        let pages = 10_001u32;
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let pager = Pager::new(PageCursor::first_page(1), move |cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            let page = cursor.page().unwrap();
            async move { Ok(page_of(page, pages, 1)) }
        });

        let items = pager.collect_all().await.unwrap();

        assert_eq!(items.len(), pages as usize);
        assert_eq!(items.last(), Some(&(pages - 1)));
        assert_eq!(calls.load(Ordering::SeqCst), pages as usize);
    }

    #[tokio::test]
    async fn test_self_referencing_next_link_is_an_error() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut pager = Pager::new(PageCursor::first_page(2), move |_cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                let pagination = Pagination {
                    next: Some(link(1, 2)),
                    ..Default::default()
                };
                Ok(ListPage::new(vec![1u32, 2], pagination))
            }
        });

        let err = pager.next_page().await.unwrap_err();
        assert!(matches!(
            err,
            CfError::PaginationLoop {
                page: Some(1),
                per_page: Some(2)
            }
        ));
        assert!(pager.is_exhausted());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_page_is_not_an_error() {
        let pager = Pager::new(PageCursor::first_page(50), |_cursor: PageCursor| async {
            Ok(ListPage::<u32>::new(Vec::new(), Pagination::default()))
        });

        let items = pager.collect_all().await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_totals_do_not_drive_termination() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        // Totals say 5 pages, but the first page has no next link.
        let pager = Pager::new(PageCursor::first_page(2), move |_cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                let pagination = Pagination {
                    total_results: 10,
                    total_pages: 5,
                    ..Default::default()
                };
                Ok(ListPage::new(vec![1u32, 2], pagination))
            }
        });

        assert_eq!(pager.collect_all().await.unwrap(), vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_malformed_next_link_stops_silently() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let pager = Pager::new(PageCursor::first_page(2), move |_cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            async {
                let pagination = Pagination {
                    next: Some(Link::new("%%% not a url")),
                    ..Default::default()
                };
                Ok(ListPage::new(vec![7u32, 8], pagination))
            }
        });

        assert_eq!(pager.collect_all().await.unwrap(), vec![7, 8]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lazy_mode_stops_when_caller_stops() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();

        let mut pager = Pager::new(PageCursor::first_page(2), move |cursor: PageCursor| {
            counter.fetch_add(1, Ordering::SeqCst);
            let page = cursor.page().unwrap();
            async move { Ok(page_of(page, 10, 2)) }
        });

        let first = pager.next_page().await.unwrap().unwrap();
        assert_eq!(first.resources, vec![0, 1]);
        assert!(!pager.is_exhausted());

        drop(pager);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pager_is_one_shot() {
        let mut pager = Pager::new(PageCursor::first_page(2), |cursor: PageCursor| {
            let page = cursor.page().unwrap();
            async move { Ok(page_of(page, 2, 2)) }
        });

        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.unwrap().is_some());
        assert!(pager.next_page().await.unwrap().is_none());
        assert!(pager.next_page().await.unwrap().is_none());
        assert_eq!(pager.pages_fetched(), 2);
    }

    #[tokio::test]
    async fn test_error_exhausts_pager() {
        let mut pager = Pager::new(PageCursor::first_page(2), |_cursor: PageCursor| async {
            Err::<ListPage<u32>, _>(server_error())
        });

        assert!(pager.next_page().await.is_err());
        assert!(pager.is_exhausted());
        assert!(pager.next_page().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collect_all_with_included_merges_side_collections() {
        let pager = Pager::new(PageCursor::first_page(1), |cursor: PageCursor| {
            let page = cursor.page().unwrap();
            async move {
                let mut list = page_of(page, 2, 1);
                list.included.push(
                    "organizations",
                    vec![serde_json::json!({ "guid": format!("org-{page}") })],
                );
                Ok(list)
            }
        });

        let (items, included) = pager.collect_all_with_included().await.unwrap();

        assert_eq!(items, vec![0, 1]);
        let orgs: Vec<&str> = included
            .raw("organizations")
            .iter()
            .filter_map(|v| v["guid"].as_str())
            .collect();
        assert_eq!(orgs, vec!["org-1", "org-2"]);
    }
}
