//! Create trait for resources that can be created.

use serde::Serialize;

use super::Resource;

/// A resource that can be created with `POST /v3/{PATH}`.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, App, AppCreate};
///
/// let client = CfClient::from_env()?;
/// let op = client.apps().create(&AppCreate::new("my-app", "space-guid")).await?;
/// ```
pub trait Create: Resource {
    /// Request body for creation.
    type Params: Serialize + Send + Sync;
}
