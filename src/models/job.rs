//! Asynchronous job model.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ErrorDetail;
use crate::pagination::Link;
use crate::traits::Resource;

/// A background job created by an asynchronous operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub guid: String,

    /// Operation being carried out, e.g. `app.delete`.
    #[serde(default)]
    pub operation: String,

    pub state: JobState,

    #[serde(default)]
    pub errors: Vec<ErrorDetail>,

    #[serde(default)]
    pub warnings: Vec<JobWarning>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub links: BTreeMap<String, Link>,
}

impl Job {
    /// Whether the job reached a final state.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, JobState::Complete | JobState::Failed)
    }
}

/// Job state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobState {
    Processing,
    Polling,
    Complete,
    Failed,
}

/// Non-fatal message attached to a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobWarning {
    pub detail: String,
}

impl Resource for Job {
    const KIND: &'static str = "job";
    const PATH: &'static str = "jobs";

    fn guid(&self) -> &str {
        &self.guid
    }
}
