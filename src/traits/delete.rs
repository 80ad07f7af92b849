//! Delete trait for resources that can be removed.

use super::Resource;

/// A resource that can be removed with `DELETE /v3/{PATH}/{guid}`.
///
/// Most deletes are carried out by a background job; the client returns
/// the job id so the caller can wait for it.
pub trait Delete: Resource {}
