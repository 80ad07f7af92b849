//! Generic CRUD client for V3 resources.

use std::marker::PhantomData;

use crate::client::CfClient;
use crate::error::{CfError, Result};
use crate::filter::ListFilter;
use crate::models::{App, Job, Organization, Role, Route, ServiceCredentialBinding, Space};
use crate::pager::Pager;
use crate::pagination::{Included, ListPage, PageCursor};
use crate::resolve::{resolve_empty_response, resolve_response, AsyncOperation};
use crate::traits::{Create, Delete, Resource, Update};

/// Client for one resource type, rooted at `v3/{R::PATH}`.
///
/// Obtained from [`CfClient::resource`] or one of the named accessors
/// such as [`CfClient::apps`].
///
/// # Example
///
/// ```no_run
/// use cfapi::{CfClient, ListFilter};
///
/// # async fn example() -> cfapi::Result<()> {
/// let client = CfClient::from_env()?;
///
/// let apps = client
///     .apps()
///     .list_all(&ListFilter::new().names(["web"]))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ResourceClient<'c, R> {
    client: &'c CfClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceClient<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for ResourceClient<'_, R> {}

impl<R: Resource> std::fmt::Debug for ResourceClient<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceClient")
            .field("path", &Self::collection_path())
            .finish()
    }
}

impl<'c, R: Resource> ResourceClient<'c, R> {
    pub(crate) fn new(client: &'c CfClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn collection_path() -> String {
        format!("v3/{}", R::PATH)
    }

    fn item_path(guid: &str) -> String {
        format!("v3/{}/{}", R::PATH, urlencoding::encode(guid))
    }

    /// Fetch a resource by guid.
    ///
    /// # Errors
    ///
    /// Returns an API error with status 404 if the resource does not exist.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn get(&self, guid: &str) -> Result<R> {
        self.client.get_json(&Self::item_path(guid)).await
    }

    /// Fetch a single page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the page cannot be decoded.
    pub async fn list(&self, filter: &ListFilter, cursor: PageCursor) -> Result<ListPage<R>> {
        self.client
            .list_page(&Self::collection_path(), filter, cursor)
            .await
    }

    /// Page through the collection starting at `cursor`.
    ///
    /// Pages are only fetched as the caller asks for them.
    pub fn pager<'a>(&self, filter: &'a ListFilter, cursor: PageCursor) -> Pager<'a, R>
    where
        'c: 'a,
    {
        let client = self.client;
        let path = Self::collection_path();
        Pager::new(cursor, move |cursor| {
            let path = path.clone();
            async move { client.list_page(&path, filter, cursor).await }
        })
    }

    /// Fetch every page and return all matching resources.
    ///
    /// # Errors
    ///
    /// Returns the first page error; no partial result is returned.
    pub async fn list_all(&self, filter: &ListFilter) -> Result<Vec<R>> {
        self.pager(filter, PageCursor::first_page(self.client.per_page()))
            .collect_all()
            .await
    }

    /// Fetch every page, also collecting the `included` side-collections.
    ///
    /// # Errors
    ///
    /// Returns the first page error.
    pub async fn list_all_with_included(&self, filter: &ListFilter) -> Result<(Vec<R>, Included)> {
        self.pager(filter, PageCursor::first_page(self.client.per_page()))
            .collect_all_with_included()
            .await
    }

    /// Fetch the only resource matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::NotFound`] when nothing matches and
    /// [`CfError::ExpectedOne`] when several resources match.
    pub async fn single(&self, filter: &ListFilter) -> Result<R> {
        let page = self.list(filter, PageCursor::first_page(2)).await?;
        let found = usize::try_from(page.pagination.total_results).unwrap_or(usize::MAX);
        let found = found.max(page.resources.len());

        let mut resources = page.resources;
        match (found, resources.pop()) {
            (1, Some(resource)) => Ok(resource),
            (_, None) => Err(CfError::NotFound {
                kind: R::KIND,
                id: filter_description(filter),
            }),
            (found, Some(_)) => Err(CfError::ExpectedOne {
                kind: R::KIND,
                found,
            }),
        }
    }
}

impl<R: Create> ResourceClient<'_, R> {
    /// Create a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip(self, params), fields(kind = R::KIND))]
    pub async fn create(&self, params: &R::Params) -> Result<AsyncOperation<R>> {
        let path = Self::collection_path();
        let response = self.client.post(&path, params).await?;
        resolve_response(&path, response).await
    }
}

impl<R: Update> ResourceClient<'_, R> {
    /// Update a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip(self, params), fields(kind = R::KIND))]
    pub async fn update(&self, guid: &str, params: &R::Params) -> Result<AsyncOperation<R>> {
        let path = Self::item_path(guid);
        let response = self.client.patch(&path, params).await?;
        resolve_response(&path, response).await
    }
}

impl<R: Delete> ResourceClient<'_, R> {
    /// Delete a resource. Usually deferred to a job.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self), fields(kind = R::KIND))]
    pub async fn delete(&self, guid: &str) -> Result<AsyncOperation<()>> {
        let path = Self::item_path(guid);
        let response = self.client.delete(&path).await?;
        Ok(resolve_empty_response(&path, response))
    }
}

fn filter_description(filter: &ListFilter) -> String {
    filter.to_query_string(&PageCursor::default())
}

impl CfClient {
    /// Client for any resource type.
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient::new(self)
    }

    /// Applications.
    pub fn apps(&self) -> ResourceClient<'_, App> {
        self.resource()
    }

    /// Spaces.
    pub fn spaces(&self) -> ResourceClient<'_, Space> {
        self.resource()
    }

    /// Organizations.
    pub fn organizations(&self) -> ResourceClient<'_, Organization> {
        self.resource()
    }

    /// Routes.
    pub fn routes(&self) -> ResourceClient<'_, Route> {
        self.resource()
    }

    /// Roles.
    pub fn roles(&self) -> ResourceClient<'_, Role> {
        self.resource()
    }

    /// Service credential bindings.
    pub fn service_credential_bindings(&self) -> ResourceClient<'_, ServiceCredentialBinding> {
        self.resource()
    }

    /// Jobs.
    pub fn jobs(&self) -> ResourceClient<'_, Job> {
        self.resource()
    }
}
