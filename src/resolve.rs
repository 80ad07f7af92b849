//! Resolution of mutating responses into synchronous or job-backed results.
//!
//! Create, update and delete endpoints either finish inline (200/201 with a
//! resource body, or 204) or accept the work and answer 202 with a
//! `Location` header pointing at `/v3/jobs/{guid}`. [`AsyncOperation`]
//! folds both shapes into one return type.

use std::fmt;

use reqwest::header::LOCATION;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{CfError, Result};

/// Identifier of a server-side asynchronous job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    /// Wrap a known job guid.
    pub fn new(guid: impl Into<String>) -> Self {
        Self(guid.into())
    }

    /// The job guid.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the job guid.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for JobId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Outcome of a mutating call.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncOperation<T> {
    /// The operation completed and the server returned its result.
    Immediate(T),
    /// The operation was accepted; poll the job to learn the outcome.
    Deferred(JobId),
}

impl<T> AsyncOperation<T> {
    /// The job id for a deferred operation.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::Deferred(id) => Some(id),
            Self::Immediate(_) => None,
        }
    }

    /// Returns true if a job has to be polled to learn the outcome.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }

    /// The immediate result, if the operation finished inline.
    pub fn into_immediate(self) -> Option<T> {
        match self {
            Self::Immediate(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// Map the immediate result.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> AsyncOperation<U> {
        match self {
            Self::Immediate(value) => AsyncOperation::Immediate(f(value)),
            Self::Deferred(id) => AsyncOperation::Deferred(id),
        }
    }
}

/// Extract a job id from a `Location` header value.
///
/// The URL path must contain a segment equal to `jobs` followed by at least
/// one more segment; the last non-empty segment is the id. Query strings and
/// trailing slashes are ignored. Relative references such as
/// `/v3/jobs/{guid}` are accepted. Unparseable URLs yield `None`.
pub fn job_id_from_location(location: &str) -> Option<JobId> {
    let url = match Url::parse(location) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse("http://localhost/").ok()?.join(location).ok()?
        }
        Err(_) => return None,
    };
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();

    let jobs_at = segments.iter().position(|s| *s == "jobs")?;
    let id = segments.last()?;
    if segments.len() <= jobs_at + 1 {
        return None;
    }

    Some(JobId((*id).to_string()))
}

/// Resolve a response whose body, if any, decodes into `T`.
///
/// A job `Location` wins: the body is not looked at. Otherwise the body is
/// decoded as JSON.
///
/// # Errors
///
/// Returns [`CfError::Decode`] if the body is not valid JSON for `T`.
pub fn resolve<T: DeserializeOwned>(
    path: &str,
    location: Option<&str>,
    body: &[u8],
) -> Result<AsyncOperation<T>> {
    if let Some(job) = location.and_then(job_id_from_location) {
        return Ok(AsyncOperation::Deferred(job));
    }

    serde_json::from_slice(body)
        .map(AsyncOperation::Immediate)
        .map_err(|e| CfError::decode(path, body, e))
}

/// Resolve a response with no decode target (delete-style calls).
pub fn resolve_without_body(location: Option<&str>) -> AsyncOperation<()> {
    match location.and_then(job_id_from_location) {
        Some(job) => AsyncOperation::Deferred(job),
        None => AsyncOperation::Immediate(()),
    }
}

fn location_header(response: &Response) -> Option<String> {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Resolve a live response, reading the body only when there is no job.
///
/// Typed calls need a resource body: a 204, or any success without a job
/// and with an empty body, is reported as [`CfError::EmptyBody`].
///
/// # Errors
///
/// Returns an error if the body is missing, cannot be read or cannot be
/// decoded.
pub async fn resolve_response<T: DeserializeOwned>(
    path: &str,
    response: Response,
) -> Result<AsyncOperation<T>> {
    let location = location_header(&response);
    if let Some(job) = location.as_deref().and_then(job_id_from_location) {
        tracing::debug!(path, job = %job, "Operation deferred to job");
        return Ok(AsyncOperation::Deferred(job));
    }

    let status = response.status();
    let body = response.bytes().await.map_err(|e| CfError::http(path, e))?;
    if status == StatusCode::NO_CONTENT || body.iter().all(u8::is_ascii_whitespace) {
        return Err(CfError::EmptyBody {
            path: path.to_string(),
            status: status.as_u16(),
        });
    }
    resolve(path, None, &body)
}

/// Resolve a live response without decoding its body.
pub fn resolve_empty_response(path: &str, response: Response) -> AsyncOperation<()> {
    let location = location_header(&response);
    let op = resolve_without_body(location.as_deref());
    if let Some(job) = op.job_id() {
        tracing::debug!(path, job = %job, "Operation deferred to job");
    }
    op
}
