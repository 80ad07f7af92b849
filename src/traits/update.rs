//! Update trait for modifying resources.

use serde::Serialize;

use super::Resource;

/// A resource that can be modified with `PATCH /v3/{PATH}/{guid}`.
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, AppUpdate};
///
/// let client = CfClient::from_env()?;
/// let op = client
///     .apps()
///     .update(
///         "app-guid",
///         &AppUpdate {
///             name: Some("renamed".to_string()),
///             ..Default::default()
///         },
///     )
///     .await?;
/// ```
pub trait Update: Resource {
    /// Request body for the update; unset fields are left untouched.
    type Params: Serialize + Send + Sync;
}
