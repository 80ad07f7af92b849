//! Base trait for API resources.

use serde::de::DeserializeOwned;

/// A resource exposed under `/v3/{PATH}`.
///
/// Every resource can be fetched by guid and listed; mutating operations
/// are opted into with [`Create`](super::Create), [`Update`](super::Update)
/// and [`Delete`](super::Delete).
///
/// # Example
///
/// ```ignore
/// use cfapi::{CfClient, App, ListFilter};
///
/// let client = CfClient::from_env()?;
/// let apps = client.resource::<App>().list_all(&ListFilter::new()).await?;
/// ```
pub trait Resource: DeserializeOwned + Send + Sync + 'static {
    /// Human-readable name used in errors and logs (e.g. `"app"`).
    const KIND: &'static str;

    /// Collection path below `v3/` (e.g. `"apps"`).
    const PATH: &'static str;

    /// The resource guid.
    fn guid(&self) -> &str;
}
